use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

pub(crate) const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Finds installed extension packages under a set of search roots.
pub struct ExtensionLocator;

impl ExtensionLocator {
    /// Returns every directory matching one of `patterns` under each root.
    ///
    /// Roots are processed in the given order and their matches appended, so
    /// earlier roots' packages come first. Within a root, matches follow
    /// pattern order and are sorted by path. Missing or unreadable roots
    /// contribute nothing.
    pub fn locate(roots: &[PathBuf], patterns: &[String]) -> Vec<PathBuf> {
        let mut packages = Vec::new();

        for root in roots {
            if root.as_os_str().is_empty() {
                continue;
            }
            if !root.is_dir() {
                tracing::trace!(root = %root.display(), "search root does not exist");
                continue;
            }

            for pattern in patterns {
                packages.extend(glob_dirs(root, pattern));
            }
        }

        tracing::debug!(count = packages.len(), "located extension packages");
        packages
    }
}

/// Directories under `base` matching the relative glob `pattern`.
pub(crate) fn glob_dirs(base: &Path, pattern: &str) -> Vec<PathBuf> {
    glob_in(base, pattern)
        .into_iter()
        .filter(|p| p.is_dir())
        .collect()
}

/// Paths under `base` matching the relative glob `pattern`, in glob order.
pub(crate) fn glob_in(base: &Path, pattern: &str) -> Vec<PathBuf> {
    let Some(base_str) = base.to_str() else {
        tracing::warn!(path = %base.display(), "skipping non-UTF-8 directory");
        return Vec::new();
    };

    let full = format!("{}/{}", Pattern::escape(base_str.trim_end_matches('/')), pattern);
    let paths = match glob::glob_with(&full, MATCH_OPTIONS) {
        Ok(paths) => paths,
        Err(e) => {
            tracing::warn!(pattern = %full, error = %e, "invalid glob pattern");
            return Vec::new();
        }
    };

    paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::trace!(error = %e, "unreadable path skipped");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn patterns(generator: &str) -> Vec<String> {
        crate::config::DiscoverySettings::default()
            .package_patterns(generator)
            .to_vec()
    }

    fn mkdirs(root: &Path, dirs: &[&str]) {
        for dir in dirs {
            std::fs::create_dir_all(root.join(dir)).unwrap();
        }
    }

    #[test]
    fn test_locate_unscoped_and_scoped() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("node_modules");
        mkdirs(
            &root,
            &[
                "ext-dummy-b",
                "ext-dummy-a",
                "@scope/ext-dummy-c",
                "ext-other-a",
                "generator-dummy",
                "@scope/unrelated",
            ],
        );

        let found = ExtensionLocator::locate(&[root.clone()], &patterns("dummy"));
        assert_eq!(
            found,
            vec![
                root.join("ext-dummy-a"),
                root.join("ext-dummy-b"),
                root.join("@scope/ext-dummy-c"),
            ]
        );
    }

    #[test]
    fn test_locate_skips_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("ext-dummy-file"), "").unwrap();

        let found = ExtensionLocator::locate(&[dir.path().to_path_buf()], &patterns("dummy"));
        assert!(found.is_empty());
    }

    #[test]
    fn test_locate_root_order() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        mkdirs(first.path(), &["ext-dummy-one"]);
        mkdirs(second.path(), &["ext-dummy-two"]);

        let roots = vec![second.path().to_path_buf(), first.path().to_path_buf()];
        let found = ExtensionLocator::locate(&roots, &patterns("dummy"));
        assert_eq!(
            found,
            vec![
                second.path().join("ext-dummy-two"),
                first.path().join("ext-dummy-one"),
            ]
        );
    }

    #[test]
    fn test_locate_missing_and_empty_roots() {
        let roots = vec![PathBuf::new(), PathBuf::from("/nonexistent/node_modules")];
        assert!(ExtensionLocator::locate(&roots, &patterns("dummy")).is_empty());
    }

    #[test]
    fn test_glob_escapes_base() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("odd[dir]");
        mkdirs(&base, &["ext-dummy-x"]);

        assert_eq!(glob_dirs(&base, "ext-dummy-*"), vec![base.join("ext-dummy-x")]);
    }
}
