//! Namespace index of discovered extension modules.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use super::discovery::glob_in;
use super::namespace;
use crate::config::DiscoverySettings;

/// Maps a namespace to the extension modules registered for it.
///
/// Module lists keep discovery order and retain duplicates; that order is the
/// order in which extensions are applied or run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionMap {
    entries: HashMap<String, Vec<PathBuf>>,
}

impl ExtensionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `module` to the list for `namespace`, creating it if needed.
    pub fn push(&mut self, namespace: impl Into<String>, module: impl Into<PathBuf>) {
        self.entries
            .entry(namespace.into())
            .or_default()
            .push(module.into());
    }

    pub fn get(&self, namespace: &str) -> Option<&[PathBuf]> {
        self.entries.get(namespace).map(Vec::as_slice)
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.entries.contains_key(namespace)
    }

    /// Number of namespaces.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Namespaces in sorted order.
    pub fn namespaces(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<N, I, P> FromIterator<(N, I)> for ExtensionMap
where
    N: Into<String>,
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (namespace, modules) in iter {
            let namespace = namespace.into();
            map.entries.entry(namespace.clone()).or_default();
            for module in modules {
                map.push(namespace.clone(), module);
            }
        }
        map
    }
}

/// Probes extension packages for index modules and builds an [`ExtensionMap`].
pub struct NamespaceIndexer<'a> {
    settings: &'a DiscoverySettings,
    generator: &'a str,
}

impl<'a> NamespaceIndexer<'a> {
    pub fn new(settings: &'a DiscoverySettings, generator: &'a str) -> Self {
        Self {
            settings,
            generator,
        }
    }

    /// Index every lookup directory of every package.
    ///
    /// Iteration is lookup-major: all packages are probed for the first
    /// lookup before any is probed for the second. Inside a lookup directory,
    /// one-level matches (`*/index.js`) precede two-level matches
    /// (`*/*/index.js`). `namer` turns a path relative to the lookup
    /// directory into the namespace segment appended to the generator name.
    pub fn index<F>(&self, packages: &[PathBuf], namer: F) -> ExtensionMap
    where
        F: Fn(&Path) -> String,
    {
        let mut map = ExtensionMap::new();
        let index_files = self.settings.index_file_names();

        for lookup in &self.settings.lookups {
            for package in packages {
                let dir = join_lookup(package, lookup);

                for depth in ["*", "*/*"] {
                    for file in &index_files {
                        for module in glob_in(&dir, &format!("{}/{}", depth, file)) {
                            let Ok(relative) = module.strip_prefix(&dir) else {
                                continue;
                            };
                            if !module.is_file() || self.is_excluded(relative) {
                                continue;
                            }
                            let ns = namespace::namespaced(self.generator, &namer(relative));
                            tracing::trace!(namespace = %ns, module = %module.display(), "indexed extension");
                            map.push(ns, module.clone());
                        }
                    }
                }
            }
        }

        tracing::debug!(namespaces = map.len(), "indexed extension namespaces");
        map
    }

    fn is_excluded(&self, relative: &Path) -> bool {
        relative
            .components()
            .any(|c| c.as_os_str() == self.settings.excluded_dir.as_str())
    }
}

/// `package` joined with `lookup`, dropping `.` segments so the root lookup
/// yields the package directory itself.
fn join_lookup(package: &Path, lookup: &str) -> PathBuf {
    let mut dir = package.to_path_buf();
    for component in Path::new(lookup).components() {
        if let Component::Normal(segment) = component {
            dir.push(segment);
        }
    }
    dir
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(root: &Path, file: &str) -> PathBuf {
        let path = root.join(file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "module.exports = () => {};").unwrap();
        path
    }

    #[test]
    fn test_join_lookup() {
        let pkg = Path::new("/nm/ext-dummy-a");
        assert_eq!(join_lookup(pkg, "."), PathBuf::from("/nm/ext-dummy-a"));
        assert_eq!(
            join_lookup(pkg, "lib/extensions"),
            PathBuf::from("/nm/ext-dummy-a/lib/extensions")
        );
    }

    #[test]
    fn test_extension_map_push_keeps_duplicates() {
        let mut map = ExtensionMap::new();
        map.push("dummy:app", "/a");
        map.push("dummy:app", "/a");
        map.push("dummy:other", "/b");

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("dummy:app").unwrap().len(), 2);
        assert_eq!(map.namespaces(), vec!["dummy:app", "dummy:other"]);
        assert!(map.get("dummy:none").is_none());
    }

    #[test]
    fn test_extension_map_from_iter() {
        let map: ExtensionMap = [("dummy:testing", vec!["path1", "path2"])]
            .into_iter()
            .collect();
        assert_eq!(
            map.get("dummy:testing").unwrap(),
            &[PathBuf::from("path1"), PathBuf::from("path2")]
        );
    }

    #[test]
    fn test_index_excludes_nested_dependencies() {
        let dir = tempdir().unwrap();
        let pkg = dir.path().join("ext-dummy-x");
        let kept = touch(&pkg, "app/index.js");
        touch(&pkg, "node_modules/dep/index.js");
        touch(&pkg, "app/helper.js");

        let settings = DiscoverySettings::default();
        let map = NamespaceIndexer::new(&settings, "dummy")
            .index(&[pkg], namespace::from_module_path);

        assert_eq!(map.namespaces(), vec!["dummy:app"]);
        assert_eq!(map.get("dummy:app").unwrap(), &[kept]);
    }

    #[test]
    fn test_index_depth_limit() {
        let dir = tempdir().unwrap();
        let pkg = dir.path().join("ext-dummy-x");
        touch(&pkg, "a/b/c/index.js");

        let settings = DiscoverySettings::default().lookups(["."]);
        let map = NamespaceIndexer::new(&settings, "dummy")
            .index(&[pkg], namespace::from_module_path);
        assert!(map.is_empty());
    }

    #[test]
    fn test_index_lookup_major_order() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("ext-dummy-a");
        let second = dir.path().join("ext-dummy-b");
        let a_root = touch(&first, "app/index.js");
        let a_ext = touch(&first, "extensions/app/index.js");
        let b_root = touch(&second, "app/index.js");

        let settings = DiscoverySettings::default().lookups([".", "extensions"]);
        let map = NamespaceIndexer::new(&settings, "dummy")
            .index(&[first, second], namespace::from_module_path);

        // `extensions/app/index.js` is also reachable from the package root.
        assert_eq!(
            map.get("dummy:app").unwrap(),
            &[a_root, a_ext.clone(), b_root, a_ext]
        );
    }
}
