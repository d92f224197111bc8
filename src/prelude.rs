//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```rust
//! use pluggable_generator::prelude::*;
//! ```

// Core types
pub use crate::Error;
pub use crate::Result;

// Host and dispatch
pub use crate::generator::{
    DispatchOutcome, Environment, ExecutionMode, GeneratorHost, GeneratorOptions,
    InvocationTarget,
};

// Extensions
pub use crate::extension::{Extension, ExtensionRegistry, ModuleLoader};

// Discovery
pub use crate::config::{DiscoverySettings, ProcessEnv};
pub use crate::plugins::ExtensionMap;
