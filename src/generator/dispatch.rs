use std::sync::Arc;

use super::{ExecutionMode, GeneratorHost, InvocationTarget};
use crate::Result;

/// Result of dispatching an invocation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Extensions were applied to the host in place.
    Applied { namespace: String, count: usize },
    /// No extensions exist for the host's namespace; nothing happened.
    NoExtensions { namespace: String },
    /// Extensions were registered and run as sub-generators, in order.
    Dispatched {
        namespace: String,
        generators: Vec<String>,
    },
    /// The dynamic target has no extensions; the environment was told.
    UnknownDynamic { namespace: String },
}

impl DispatchOutcome {
    /// True when extensions were applied or dispatched.
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Applied { .. } | Self::Dispatched { .. })
    }

    pub fn namespace(&self) -> &str {
        match self {
            Self::Applied { namespace, .. }
            | Self::NoExtensions { namespace }
            | Self::Dispatched { namespace, .. }
            | Self::UnknownDynamic { namespace } => namespace,
        }
    }
}

impl GeneratorHost {
    /// Apply or dispatch the extensions matching `target`.
    ///
    /// Loader and extension errors are returned unchanged. A missing dynamic
    /// target is reported once through [`Environment::error`](super::Environment::error).
    pub fn init(&mut self, target: &InvocationTarget) -> Result<DispatchOutcome> {
        match target {
            InvocationTarget::Static(_) => self.apply_extensions(),
            InvocationTarget::Dynamic(namespace) => self.dispatch_dynamic(namespace),
        }
    }

    fn apply_extensions(&mut self) -> Result<DispatchOutcome> {
        let namespace = self.options.namespace.clone();
        let Some(modules) = self.extensions.get(&namespace).map(|m| m.to_vec()) else {
            tracing::debug!(namespace = %namespace, "no extensions registered");
            return Ok(DispatchOutcome::NoExtensions { namespace });
        };

        let loader = Arc::clone(&self.loader);
        for module in &modules {
            tracing::debug!(namespace = %namespace, module = %module.display(), "applying extension");
            loader.load(module)?.apply(self)?;
        }

        Ok(DispatchOutcome::Applied {
            namespace,
            count: modules.len(),
        })
    }

    fn dispatch_dynamic(&mut self, namespace: &str) -> Result<DispatchOutcome> {
        self.execution_mode = ExecutionMode::Suppressed;

        let Some(modules) = self.extensions.get(namespace) else {
            self.env.error(&format!(
                "The dynamic sub-generator {} does not exist.",
                namespace
            ));
            return Ok(DispatchOutcome::UnknownDynamic {
                namespace: namespace.to_string(),
            });
        };

        let mut generators = Vec::with_capacity(modules.len());
        for (index, module) in modules.iter().enumerate() {
            let name = format!("{}{}", namespace, index);
            tracing::debug!(generator = %name, module = %module.display(), "dispatching sub-generator");

            self.env.register(module, &name)?;

            let args: Vec<String> = std::iter::once(name.clone())
                .chain(self.args.iter().cloned())
                .collect();
            self.env.run(&args, &self.options)?;

            generators.push(name);
        }

        Ok(DispatchOutcome::Dispatched {
            namespace: namespace.to_string(),
            generators,
        })
    }
}
