//! Process environment snapshot.
//!
//! Search-root resolution reads environment variables, the working directory
//! and the invoked script path. Those are captured once into a [`ProcessEnv`]
//! value and threaded through explicitly; nothing in discovery reads
//! `std::env` on its own.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Node-version-manager install path.
pub const NVM_PATH_VAR: &str = "NVM_PATH";
/// Module search path override, a delimiter-separated list of directories.
pub const NODE_PATH_VAR: &str = "NODE_PATH";
/// Per-user application data directory (Windows only).
pub const APPDATA_VAR: &str = "APPDATA";

/// Platform identifier controlling global install roots and path-list parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Platform {
    #[default]
    Unix,
    Windows,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }

    /// Separator used in list-valued variables such as `NODE_PATH`.
    pub fn path_delimiter(&self) -> char {
        match self {
            Platform::Unix => ':',
            Platform::Windows => ';',
        }
    }
}

/// Read-only view of the process state consumed by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEnv {
    vars: BTreeMap<String, String>,
    cwd: PathBuf,
    script: Option<PathBuf>,
    platform: Platform,
}

impl ProcessEnv {
    /// Create an empty environment rooted at `cwd` for the current platform.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            vars: BTreeMap::new(),
            cwd: cwd.into(),
            script: None,
            platform: Platform::current(),
        }
    }

    /// Snapshot the live process.
    ///
    /// Variables that are not valid unicode are skipped.
    pub fn capture() -> std::io::Result<Self> {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();

        Ok(Self {
            vars,
            cwd: std::env::current_dir()?,
            script: std::env::current_exe().ok(),
            platform: Platform::current(),
        })
    }

    pub fn var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.vars
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn script(mut self, script: impl Into<PathBuf>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Returns the value of `key`, treating an empty value as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn script_path(&self) -> Option<&Path> {
        self.script.as_deref()
    }

    pub fn platform_id(&self) -> Platform {
        self.platform
    }

    /// Directory containing the invoked script, used as the default
    /// reference directory for search-root resolution.
    pub fn install_dir(&self) -> Option<&Path> {
        self.script.as_deref().and_then(Path::parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_delimiter() {
        assert_eq!(Platform::Unix.path_delimiter(), ':');
        assert_eq!(Platform::Windows.path_delimiter(), ';');
        assert!(Platform::Windows.is_windows());
        assert!(!Platform::Unix.is_windows());
    }

    #[test]
    fn test_builder_and_get() {
        let env = ProcessEnv::new("/work/project")
            .var(NVM_PATH_VAR, "/home/me/.nvm/nvm.sh")
            .var(NODE_PATH_VAR, "")
            .script("/usr/local/bin/yo")
            .platform(Platform::Unix);

        assert_eq!(env.get(NVM_PATH_VAR), Some("/home/me/.nvm/nvm.sh"));
        assert_eq!(env.get(NODE_PATH_VAR), None);
        assert_eq!(env.get(APPDATA_VAR), None);
        assert_eq!(env.cwd(), Path::new("/work/project"));
        assert_eq!(env.install_dir(), Some(Path::new("/usr/local/bin")));
        assert_eq!(env.platform_id(), Platform::Unix);
    }

    #[test]
    fn test_vars_extend() {
        let env = ProcessEnv::new("/").vars([("A", "1"), ("B", "2")]);
        assert_eq!(env.get("A"), Some("1"));
        assert_eq!(env.get("B"), Some("2"));
        assert!(env.script_path().is_none());
    }

    #[test]
    fn test_capture() {
        let env = ProcessEnv::capture().unwrap();
        assert!(env.cwd().is_absolute());
        assert_eq!(env.platform_id(), Platform::current());
    }
}
