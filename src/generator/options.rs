use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Invocation options of a generator.
///
/// `namespace` is the generator's own invocation namespace; every other key
/// is forwarded untouched to dynamically dispatched sub-generators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    #[serde(default)]
    pub namespace: String,

    #[serde(flatten)]
    pub values: Map<String, Value>,
}

impl GeneratorOptions {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            values: Map::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }
}
