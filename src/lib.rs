//! # pluggable-generator
//!
//! Plugin architecture for namespaced code generators.
//!
//! Third-party packages extend a generator (identified by a `name:sub`
//! namespace) without the generator author wiring them in. This crate covers
//! the two halves of that:
//!
//! - **Discovery**: resolve candidate install roots, find packages named
//!   `ext-<generator>-*` / `@scope/ext-<generator>-*`, and index their entry
//!   modules by namespace.
//! - **Dispatch**: apply matching extensions to the running generator in place,
//!   or, for a dynamic target such as `dummy:/testing`, register and run each
//!   one as an independent sub-generator.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pluggable_generator::{
//!     DispatchOutcome, ExtensionRegistry, GeneratorHost, ProcessEnv,
//! };
//!
//! let mut registry = ExtensionRegistry::new();
//! registry.add_fn("/usr/lib/node_modules/ext-dummy-ci/app/index.js", |host: &mut GeneratorHost| {
//!     host.set_attribute("ci", true);
//!     Ok(())
//! });
//!
//! let mut host = GeneratorHost::builder("dummy:app")
//!     .environment(Arc::new(framework_env))
//!     .loader(Arc::new(registry))
//!     .build()?;
//!
//! let process = ProcessEnv::capture()?;
//! match host.bootstrap(&process, process.cwd(), Some("dummy:app"))? {
//!     DispatchOutcome::Applied { count, .. } => println!("{count} extensions applied"),
//!     DispatchOutcome::NoExtensions { .. } => println!("running stock generator"),
//!     _ => {}
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod extension;
pub mod generator;
pub mod plugins;
pub mod prelude;

use std::path::PathBuf;

// Re-exports for convenience
pub use config::{ConfigError, DiscoverySettings, Platform, ProcessEnv};
pub use extension::{Extension, ExtensionRef, ExtensionRegistry, ModuleLoader};
pub use generator::{
    DYNAMIC_SENTINEL, DispatchOutcome, Environment, ExecutionMode, GeneratorHost,
    GeneratorHostBuilder, GeneratorOptions, InvocationTarget,
};
pub use plugins::{ExtensionLocator, ExtensionMap, NamespaceIndexer, SearchPaths};

/// Error type for pluggable-generator operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No extension is available for a discovered module path.
    #[error("Extension module not found: {}", path.display())]
    ModuleNotFound { path: PathBuf },

    /// An extension failed while modifying the host.
    #[error("Extension {} failed: {message}", path.display())]
    Extension { path: PathBuf, message: String },

    /// The environment could not register or run a generator.
    #[error("Generator '{name}' failed: {message}")]
    Generator { name: String, message: String },

    /// The host namespace is unusable.
    #[error("Invalid namespace '{namespace}': {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn extension(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Extension {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn generator(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Generator {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::InvalidNamespace { .. } | Error::Json(_)
        )
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::InvalidValue { key, message } => {
                Error::Config(format!("Invalid value for {}: {}", key, message))
            }
            config::ConfigError::Serialization(e) => Error::Json(e),
            config::ConfigError::Io(e) => Error::Io(e),
            config::ConfigError::ValidationErrors(errors) => Error::Config(errors.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
