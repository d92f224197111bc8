//! Generator framework environment.

use std::path::Path;

use super::GeneratorOptions;
use crate::Result;
use crate::plugins::namespace;

/// The framework environment a host generator runs in.
///
/// The host calls into it to derive namespaces for discovered modules, to
/// register and run dynamic sub-generators, and to report fatal errors.
/// Registration and run requests are fire-and-forget from the host's side:
/// scheduling belongs to the framework.
pub trait Environment: Send + Sync {
    /// Namespace segment for a module path relative to its lookup directory.
    fn namespace(&self, path: &Path) -> String {
        namespace::from_module_path(path)
    }

    /// Declare `module` as a runnable generator named `name`.
    fn register(&self, module: &Path, name: &str) -> Result<()>;

    /// Run a previously registered generator. `args[0]` is its name.
    fn run(&self, args: &[String], options: &GeneratorOptions) -> Result<()>;

    /// Report a fatal, user-visible error for the current run.
    fn error(&self, message: &str);
}
