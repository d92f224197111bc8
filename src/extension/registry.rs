//! In-process extension registry keyed by module path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{Extension, ExtensionRef, ModuleLoader};
use crate::generator::GeneratorHost;
use crate::{Error, Result};

/// [`ModuleLoader`] backed by extensions registered ahead of time.
///
/// Discovery yields module paths; the registry maps each path to the
/// extension compiled into the running program.
#[derive(Default, Clone)]
pub struct ExtensionRegistry {
    modules: HashMap<PathBuf, ExtensionRef>,
}

impl ExtensionRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `ext` for `path`, replacing any previous registration.
    pub fn add<E: Extension + 'static>(&mut self, path: impl Into<PathBuf>, ext: E) -> &mut Self {
        self.modules.insert(path.into(), ExtensionRef(Arc::new(ext)));
        self
    }

    /// Registers a closure as the extension for `path`.
    pub fn add_fn<F>(&mut self, path: impl Into<PathBuf>, f: F) -> &mut Self
    where
        F: Fn(&mut GeneratorHost) -> Result<()> + Send + Sync + 'static,
    {
        self.add(path, f)
    }

    /// Adds a pre-wrapped extension reference.
    pub fn add_ref(&mut self, path: impl Into<PathBuf>, ext: ExtensionRef) -> &mut Self {
        self.modules.insert(path.into(), ext);
        self
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.modules.contains_key(path)
    }

    /// Returns the number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns true if no modules are registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Registered module paths, sorted.
    pub fn paths(&self) -> Vec<&Path> {
        let mut paths: Vec<&Path> = self.modules.keys().map(PathBuf::as_path).collect();
        paths.sort_unstable();
        paths
    }
}

impl ModuleLoader for ExtensionRegistry {
    fn load(&self, path: &Path) -> Result<ExtensionRef> {
        self.modules
            .get(path)
            .cloned()
            .ok_or_else(|| Error::ModuleNotFound {
                path: path.to_path_buf(),
            })
    }
}

impl std::fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("modules", &self.paths())
            .finish()
    }
}
