#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use pluggable_generator::{
    Environment, ExtensionRegistry, GeneratorHost, GeneratorOptions, Result,
};

#[derive(Debug, Default)]
pub struct Recorded {
    pub registered: Vec<(PathBuf, String)>,
    pub runs: Vec<(Vec<String>, GeneratorOptions)>,
    pub errors: Vec<String>,
}

/// Environment double that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingEnv {
    recorded: Mutex<Recorded>,
}

impl RecordingEnv {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn registered(&self) -> Vec<(PathBuf, String)> {
        self.recorded.lock().unwrap().registered.clone()
    }

    pub fn runs(&self) -> Vec<(Vec<String>, GeneratorOptions)> {
        self.recorded.lock().unwrap().runs.clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.recorded.lock().unwrap().errors.clone()
    }
}

impl Environment for RecordingEnv {
    fn register(&self, module: &Path, name: &str) -> Result<()> {
        self.recorded
            .lock()
            .unwrap()
            .registered
            .push((module.to_path_buf(), name.to_string()));
        Ok(())
    }

    fn run(&self, args: &[String], options: &GeneratorOptions) -> Result<()> {
        self.recorded
            .lock()
            .unwrap()
            .runs
            .push((args.to_vec(), options.clone()));
        Ok(())
    }

    fn error(&self, message: &str) {
        self.recorded.lock().unwrap().errors.push(message.to_string());
    }
}

pub fn host(namespace: &str, env: Arc<RecordingEnv>, registry: ExtensionRegistry) -> GeneratorHost {
    GeneratorHost::builder(namespace)
        .environment(env)
        .loader(Arc::new(registry))
        .build()
        .unwrap()
}

/// Create `file` under `root` with placeholder module content.
pub fn touch(root: &Path, file: &str) -> PathBuf {
    let path = root.join(file);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "module.exports = function(generator) {};").unwrap();
    path
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
