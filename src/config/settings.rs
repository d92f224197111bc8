//! Extension naming convention and lookup layout.
//!
//! ```json
//! {
//!   "lookups": [".", "extensions", "lib/extensions"],
//!   "packagePrefix": "ext",
//!   "indexStem": "index",
//!   "indexExtensions": ["js"],
//!   "excludedDir": "node_modules"
//! }
//! ```
//!
//! Every field is optional; missing fields take the defaults shown above.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ConfigError, ConfigResult, ValidationErrors};

pub const DEFAULT_LOOKUPS: [&str; 3] = [".", "extensions", "lib/extensions"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiscoverySettings {
    /// Relative directories probed inside each extension package, in order.
    pub lookups: Vec<String>,
    /// Packages are named `<prefix>-<generator>-*` or `@*/<prefix>-<generator>-*`.
    pub package_prefix: String,
    /// File stem of an extension's entry module.
    pub index_stem: String,
    /// Accepted entry module extensions, in priority order.
    pub index_extensions: Vec<String>,
    /// Directory name whose contents are never treated as extensions.
    pub excluded_dir: String,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            lookups: DEFAULT_LOOKUPS.iter().map(|s| s.to_string()).collect(),
            package_prefix: "ext".into(),
            index_stem: "index".into(),
            index_extensions: vec!["js".into()],
            excluded_dir: "node_modules".into(),
        }
    }
}

impl DiscoverySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate settings from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let settings: Self = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn lookups<I, S>(mut self, lookups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lookups = lookups.into_iter().map(Into::into).collect();
        self
    }

    pub fn package_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.package_prefix = prefix.into();
        self
    }

    pub fn index_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Glob patterns, relative to a search root, matching the extension
    /// packages of `generator`: unscoped first, then scoped.
    pub fn package_patterns(&self, generator: &str) -> [String; 2] {
        let base = format!("{}-{}-*", self.package_prefix, generator);
        [base.clone(), format!("@*/{}", base)]
    }

    /// Entry module file names, e.g. `index.js`.
    pub fn index_file_names(&self) -> Vec<String> {
        self.index_extensions
            .iter()
            .map(|ext| format!("{}.{}", self.index_stem, ext))
            .collect()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let mut errors = Vec::new();

        if self.lookups.is_empty() {
            errors.push(ConfigError::invalid("lookups", "must not be empty"));
        }
        for lookup in &self.lookups {
            if lookup.is_empty() || Path::new(lookup).is_absolute() {
                errors.push(ConfigError::invalid(
                    "lookups",
                    format!("'{}' must be a non-empty relative path", lookup),
                ));
            }
        }
        if self.package_prefix.is_empty() {
            errors.push(ConfigError::invalid("packagePrefix", "must not be empty"));
        }
        if self.index_stem.is_empty() {
            errors.push(ConfigError::invalid("indexStem", "must not be empty"));
        }
        if self.index_extensions.iter().all(|e| e.is_empty()) {
            errors.push(ConfigError::invalid(
                "indexExtensions",
                "must name at least one extension",
            ));
        }

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ConfigError::ValidationErrors(ValidationErrors(errors))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = DiscoverySettings::default();
        assert_eq!(settings.lookups, vec![".", "extensions", "lib/extensions"]);
        assert_eq!(settings.index_file_names(), vec!["index.js"]);
        assert_eq!(settings.excluded_dir, "node_modules");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_package_patterns() {
        let settings = DiscoverySettings::default();
        assert_eq!(
            settings.package_patterns("dummy"),
            ["ext-dummy-*".to_string(), "@*/ext-dummy-*".to_string()]
        );

        let settings = DiscoverySettings::new().package_prefix("plugin");
        assert_eq!(settings.package_patterns("app")[0], "plugin-app-*");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: DiscoverySettings =
            serde_json::from_str(r#"{"indexExtensions":["js","mjs"]}"#).unwrap();
        assert_eq!(settings.index_file_names(), vec!["index.js", "index.mjs"]);
        assert_eq!(settings.package_prefix, "ext");
        assert_eq!(settings.lookups.len(), 3);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let settings = DiscoverySettings::new().lookups(Vec::<String>::new());
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "lookups"
        ));

        let settings = DiscoverySettings::new()
            .lookups(["/abs"])
            .package_prefix("");
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ValidationErrors(ref e)) if e.0.len() == 2
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discovery.json");
        std::fs::write(&path, r#"{"lookups":["generators"],"packagePrefix":"addon"}"#).unwrap();

        let settings = DiscoverySettings::from_file(&path).unwrap();
        assert_eq!(settings.lookups, vec!["generators"]);
        assert_eq!(settings.package_prefix, "addon");

        std::fs::write(&path, r#"{"lookups":[]}"#).unwrap();
        assert!(DiscoverySettings::from_file(&path).is_err());

        assert!(matches!(
            DiscoverySettings::from_file(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
