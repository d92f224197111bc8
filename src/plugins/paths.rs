//! Search-root resolution.
//!
//! Builds the ordered list of directories that may contain installed extension
//! packages. Roots are assembled from the most global location to the most
//! local one and then reversed, so the working directory's own
//! `node_modules` comes first.

use std::path::{Component, Path, PathBuf};

use crate::config::{APPDATA_VAR, NODE_PATH_VAR, NVM_PATH_VAR, ProcessEnv};

pub const MODULES_DIR: &str = "node_modules";

const UNIX_GLOBAL_ROOT: &str = "/usr/lib/node_modules";

pub struct SearchPaths;

impl SearchPaths {
    /// Resolve search roots for `process`, with `start_dir` as the reference
    /// directory (normally where the generator itself is installed).
    pub fn resolve(process: &ProcessEnv, start_dir: &Path) -> Vec<PathBuf> {
        let platform = process.platform_id();
        let mut paths = Vec::new();

        if let Some(nvm) = process.get(NVM_PATH_VAR) {
            let parent = Path::new(nvm).parent().unwrap_or_else(|| Path::new(""));
            paths.push(parent.join(MODULES_DIR));
        }

        if let Some(node_path) = process.get(NODE_PATH_VAR) {
            paths.extend(
                node_path
                    .split(platform.path_delimiter())
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from),
            );
        }

        // Framework installed as a regular dependency: the enclosing
        // node_modules sits four or two levels above the reference directory.
        paths.push(ancestor(start_dir, 4));
        paths.push(ancestor(start_dir, 2));

        // Linked installs resolve relative to the invoked script.
        if let Some(script) = process.script_path() {
            paths.push(ancestor(script, 3));
        }

        if platform.is_windows() {
            if let Some(app_data) = process.get(APPDATA_VAR) {
                paths.push(Path::new(app_data).join("npm").join(MODULES_DIR));
            }
        } else {
            paths.push(PathBuf::from(UNIX_GLOBAL_ROOT));
        }

        paths.extend(cwd_module_dirs(process.cwd()));

        paths.reverse();
        tracing::debug!(count = paths.len(), "resolved extension search roots");
        paths
    }
}

/// `path` with `levels` trailing components removed, clamped at the root.
fn ancestor(path: &Path, levels: usize) -> PathBuf {
    path.ancestors()
        .nth(levels)
        .or_else(|| path.ancestors().last())
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// One `node_modules` candidate per directory level, root first.
fn cwd_module_dirs(cwd: &Path) -> Vec<PathBuf> {
    let mut prefix = PathBuf::new();
    let mut dirs = Vec::new();

    for component in cwd.components() {
        prefix.push(component.as_os_str());
        // A drive prefix is folded into the following root component.
        if matches!(component, Component::Prefix(_)) {
            continue;
        }
        dirs.push(prefix.join(MODULES_DIR));
    }

    dirs
}
