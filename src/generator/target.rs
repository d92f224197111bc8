//! Invocation target parsing.

use std::fmt;
use std::str::FromStr;

use crate::plugins::namespace::{self, NAMESPACE_SEP};

/// Prefix on the last namespace segment marking a dynamic sub-generator.
pub const DYNAMIC_SENTINEL: char = '/';

/// What the user asked to run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InvocationTarget {
    /// Apply extensions to the running generator in place.
    Static(String),
    /// Run every extension of the namespace as its own generator.
    Dynamic(String),
}

impl InvocationTarget {
    /// `dummy:app` is static; `dummy:/testing` is dynamic with namespace
    /// `dummy:testing`.
    pub fn parse(raw: &str) -> Self {
        let (head, last) = match raw.rsplit_once(NAMESPACE_SEP) {
            Some((head, last)) => (Some(head), last),
            None => (None, raw),
        };

        match last.strip_prefix(DYNAMIC_SENTINEL) {
            Some(rest) => Self::Dynamic(match head {
                Some(head) => namespace::namespaced(head, rest),
                None => rest.to_string(),
            }),
            None => Self::Static(raw.to_string()),
        }
    }

    /// Parse the first positional argument, if any.
    pub fn from_args<I, S>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        args.into_iter().next().map(|a| Self::parse(a.as_ref()))
    }

    pub fn namespace(&self) -> &str {
        match self {
            Self::Static(ns) | Self::Dynamic(ns) => ns,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }
}

impl FromStr for InvocationTarget {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for InvocationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(ns) => f.write_str(ns),
            Self::Dynamic(ns) => match ns.rsplit_once(NAMESPACE_SEP) {
                Some((head, last)) => {
                    write!(f, "{}{}{}{}", head, NAMESPACE_SEP, DYNAMIC_SENTINEL, last)
                }
                None => write!(f, "{}{}", DYNAMIC_SENTINEL, ns),
            },
        }
    }
}
