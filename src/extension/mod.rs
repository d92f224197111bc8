//! Extension module contract.
//!
//! An extension is a unit of behavior registered for one namespace. In static
//! mode every extension discovered for the host's namespace is loaded through a
//! [`ModuleLoader`] and applied to the host in discovery order.

mod registry;

pub use registry::ExtensionRegistry;

use std::path::Path;
use std::sync::Arc;

use crate::Result;
use crate::generator::GeneratorHost;

/// Extension trait for modifying a generator host in place.
///
/// # Example
///
/// ```rust,ignore
/// use pluggable_generator::extension::Extension;
/// use pluggable_generator::GeneratorHost;
///
/// pub struct Telemetry;
///
/// impl Extension for Telemetry {
///     fn apply(&self, host: &mut GeneratorHost) -> pluggable_generator::Result<()> {
///         host.set_attribute("telemetry", true);
///         Ok(())
///     }
/// }
/// ```
pub trait Extension: Send + Sync {
    /// Mutates `host`. Errors propagate to the caller of dispatch unchanged.
    fn apply(&self, host: &mut GeneratorHost) -> Result<()>;
}

impl<F> Extension for F
where
    F: Fn(&mut GeneratorHost) -> Result<()> + Send + Sync,
{
    fn apply(&self, host: &mut GeneratorHost) -> Result<()> {
        self(host)
    }
}

/// Wrapper for Arc<dyn Extension> to enable cloning.
#[derive(Clone)]
pub struct ExtensionRef(pub Arc<dyn Extension>);

impl ExtensionRef {
    pub fn apply(&self, host: &mut GeneratorHost) -> Result<()> {
        self.0.apply(host)
    }
}

impl std::fmt::Debug for ExtensionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ExtensionRef").finish_non_exhaustive()
    }
}

impl<E: Extension + 'static> From<E> for ExtensionRef {
    fn from(ext: E) -> Self {
        Self(Arc::new(ext))
    }
}

/// Resolves a discovered module path to a loadable extension.
pub trait ModuleLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<ExtensionRef>;
}
