//! Colon-delimited generator namespaces.
//!
//! The first segment of a namespace is always the host generator's name:
//! `dummy:app`, `dummy:testing`, `dummy:admin:users`.

use std::path::{Component, Path};

pub const NAMESPACE_SEP: char = ':';

/// Directory names stripped when deriving a namespace from a module path,
/// longest first so `lib/extensions` wins over `extensions`.
const STRIPPED_LOOKUPS: [&str; 4] = ["lib/extensions", "lib/generators", "extensions", "generators"];

const GENERATOR_MARKER: &str = "generator-";

pub fn namespaced(generator: &str, resource: &str) -> String {
    format!("{}{}{}", generator, NAMESPACE_SEP, resource)
}

pub fn parse(name: &str) -> Option<(&str, &str)> {
    name.split_once(NAMESPACE_SEP)
}

pub fn is_namespaced(name: &str) -> bool {
    name.contains(NAMESPACE_SEP)
}

/// First segment of a namespace. A bare name is its own generator name.
pub fn generator_name(name: &str) -> &str {
    name.split(NAMESPACE_SEP).next().unwrap_or(name)
}

pub fn resource_name(name: &str) -> Option<&str> {
    parse(name).map(|(_, r)| r)
}

/// Derive a namespace from a module path relative to a lookup directory.
///
/// `testing/index.js` becomes `testing`, `admin/users/index.js` becomes
/// `admin:users`, and lookup directories such as `extensions/` are dropped so
/// `extensions/ext-testing/index.js` becomes `ext-testing`.
pub fn from_module_path(path: &Path) -> String {
    let mut segments: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if let Some(last) = segments.last_mut() {
        let stem = Path::new(last.as_str())
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned());
        if let Some(stem) = stem {
            *last = stem;
        }
    }

    let scope = segments.iter().rev().find(|s| s.starts_with('@')).cloned();

    for lookup in STRIPPED_LOOKUPS {
        let needle: Vec<&str> = lookup.split('/').collect();
        strip_sequence(&mut segments, &needle);
    }

    let joined = segments.join("/");
    let (cleaned, consumed_scope) = match joined.rfind(GENERATOR_MARKER) {
        Some(idx) => (&joined[idx + GENERATOR_MARKER.len()..], true),
        None => (joined.as_str(), false),
    };

    let cleaned = cleaned
        .strip_suffix("/index")
        .or_else(|| cleaned.strip_suffix("/main"))
        .unwrap_or(cleaned)
        .trim_start_matches('/');

    let ns = cleaned
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(&NAMESPACE_SEP.to_string());

    match scope {
        Some(scope) if consumed_scope => format!("{}/{}", scope, ns),
        _ => ns,
    }
}

fn strip_sequence(segments: &mut Vec<String>, needle: &[&str]) {
    let mut i = 0;
    while i + needle.len() <= segments.len() {
        if segments[i..i + needle.len()]
            .iter()
            .zip(needle)
            .all(|(a, b)| a == b)
        {
            segments.drain(i..i + needle.len());
        } else {
            i += 1;
        }
    }
}
