//! Extendable generator host.
//!
//! [`GeneratorHost`] is the generator instance that extensions attach to. On
//! bootstrap it gathers every installed extension into an [`ExtensionMap`] and
//! then dispatches on the invocation target:
//! - static target: extensions for the host's namespace are applied in place
//! - dynamic target (`gen:/name`): each extension for `gen:name` is registered
//!   and run as its own generator, and the host's own run is suppressed
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pluggable_generator::{ExtensionRegistry, GeneratorHost, ProcessEnv};
//!
//! let mut host = GeneratorHost::builder("dummy:app")
//!     .args(["my-project"])
//!     .environment(Arc::new(framework_env))
//!     .loader(Arc::new(ExtensionRegistry::new()))
//!     .build()?;
//!
//! let process = ProcessEnv::capture()?;
//! let start_dir = process.install_dir().unwrap_or(process.cwd()).to_path_buf();
//! let outcome = host.bootstrap(&process, &start_dir, std::env::args().nth(1).as_deref())?;
//! ```

mod dispatch;
mod environment;
mod options;
mod target;

pub use dispatch::DispatchOutcome;
pub use environment::Environment;
pub use options::GeneratorOptions;
pub use target::{DYNAMIC_SENTINEL, InvocationTarget};

use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::{DiscoverySettings, ProcessEnv};
use crate::extension::ModuleLoader;
use crate::plugins::{ExtensionLocator, ExtensionMap, NamespaceIndexer, SearchPaths, namespace};
use crate::{Error, Result};

/// Whether the host runs its own generation flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    #[default]
    Normal,
    /// Control was handed to dynamic sub-generators.
    Suppressed,
}

pub struct GeneratorHost {
    generator_name: String,
    options: GeneratorOptions,
    args: Vec<String>,
    env: Arc<dyn Environment>,
    loader: Arc<dyn ModuleLoader>,
    settings: DiscoverySettings,
    extensions: ExtensionMap,
    execution_mode: ExecutionMode,
    attributes: Map<String, Value>,
}

impl GeneratorHost {
    pub fn builder(namespace: impl Into<String>) -> GeneratorHostBuilder {
        GeneratorHostBuilder::new(namespace)
    }

    /// Gather extensions, then dispatch on `target_token`.
    ///
    /// A missing token targets the host's own namespace statically.
    pub fn bootstrap(
        &mut self,
        process: &ProcessEnv,
        start_dir: &Path,
        target_token: Option<&str>,
    ) -> Result<DispatchOutcome> {
        self.gather(process, start_dir);

        let target = match target_token {
            Some(token) => InvocationTarget::parse(token),
            None => InvocationTarget::Static(self.options.namespace.clone()),
        };
        self.init(&target)
    }

    /// Discover installed extensions and rebuild the namespace map.
    ///
    /// Discovery never fails: roots that do not exist or cannot be read
    /// simply contribute nothing.
    pub fn gather(&mut self, process: &ProcessEnv, start_dir: &Path) -> &ExtensionMap {
        let roots = SearchPaths::resolve(process, start_dir);
        let patterns = self.settings.package_patterns(&self.generator_name);
        let packages = ExtensionLocator::locate(&roots, &patterns);

        let env = Arc::clone(&self.env);
        self.extensions = NamespaceIndexer::new(&self.settings, &self.generator_name)
            .index(&packages, |path| env.namespace(path));

        tracing::debug!(
            generator = %self.generator_name,
            packages = packages.len(),
            namespaces = self.extensions.len(),
            "gathered extensions"
        );
        &self.extensions
    }

    /// Should the framework proceed with this host's default generation flow?
    pub fn run(&self) -> bool {
        self.execution_mode == ExecutionMode::Normal
    }

    /// Like [`run`](Self::run), with a completion callback.
    ///
    /// When suppressed the callback is invoked synchronously and `None` is
    /// returned. Otherwise the callback is handed back for the framework to
    /// call once its own flow completes.
    pub fn run_then<F: FnOnce()>(&self, on_complete: F) -> Option<F> {
        match self.execution_mode {
            ExecutionMode::Suppressed => {
                on_complete();
                None
            }
            ExecutionMode::Normal => Some(on_complete),
        }
    }

    pub fn generator_name(&self) -> &str {
        &self.generator_name
    }

    pub fn namespace(&self) -> &str {
        &self.options.namespace
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut GeneratorOptions {
        &mut self.options
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn set_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
    }

    pub fn env(&self) -> &Arc<dyn Environment> {
        &self.env
    }

    pub fn settings(&self) -> &DiscoverySettings {
        &self.settings
    }

    pub fn extensions(&self) -> &ExtensionMap {
        &self.extensions
    }

    /// Replace the namespace map, e.g. with one gathered elsewhere.
    pub fn set_extensions(&mut self, extensions: ExtensionMap) {
        self.extensions = extensions;
    }

    pub fn execution_mode(&self) -> ExecutionMode {
        self.execution_mode
    }

    /// Attach a value to the host. Extensions use this to add capabilities.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

impl std::fmt::Debug for GeneratorHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorHost")
            .field("generator_name", &self.generator_name)
            .field("options", &self.options)
            .field("args", &self.args)
            .field("extensions", &self.extensions)
            .field("execution_mode", &self.execution_mode)
            .finish_non_exhaustive()
    }
}

pub struct GeneratorHostBuilder {
    options: GeneratorOptions,
    args: Vec<String>,
    env: Option<Arc<dyn Environment>>,
    loader: Option<Arc<dyn ModuleLoader>>,
    settings: DiscoverySettings,
}

impl GeneratorHostBuilder {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            options: GeneratorOptions::new(namespace),
            args: Vec::new(),
            env: None,
            loader: None,
            settings: DiscoverySettings::default(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key, value);
        self
    }

    pub fn environment(mut self, env: Arc<dyn Environment>) -> Self {
        self.env = Some(env);
        self
    }

    pub fn loader(mut self, loader: Arc<dyn ModuleLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn settings(mut self, settings: DiscoverySettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn build(self) -> Result<GeneratorHost> {
        let generator_name = namespace::generator_name(&self.options.namespace).to_string();
        if generator_name.is_empty() {
            return Err(Error::InvalidNamespace {
                namespace: self.options.namespace,
                reason: "generator name must not be empty".into(),
            });
        }

        self.settings.validate()?;

        let env = self
            .env
            .ok_or_else(|| Error::Config("generator environment is required".into()))?;
        let loader = self
            .loader
            .ok_or_else(|| Error::Config("extension module loader is required".into()))?;

        Ok(GeneratorHost {
            generator_name,
            options: self.options,
            args: self.args,
            env,
            loader,
            settings: self.settings,
            extensions: ExtensionMap::new(),
            execution_mode: ExecutionMode::Normal,
            attributes: Map::new(),
        })
    }
}
