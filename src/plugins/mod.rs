//! Extension discovery.
//!
//! Extensions are installed packages named `ext-<generator>-*` (or
//! `@scope/ext-<generator>-*`) living in any `node_modules`-style search root.
//! Each package may contain index modules under these lookups:
//! - `./` (the package root)
//! - `extensions/`
//! - `lib/extensions/`
//!
//! An index module at `<lookup>/<name>/index.js` extends the `<generator>:<name>`
//! namespace; one extra nesting level (`<lookup>/<a>/<b>/index.js`) maps to
//! `<generator>:<a>:<b>`.
//!
//! # Directory Structure
//!
//! ```text
//! node_modules/
//! ├── ext-dummy-testing/
//! │   ├── testing/
//! │   │   └── index.js              → dummy:testing
//! │   ├── extensions/
//! │   │   └── ext-testing/
//! │   │       └── index.js          → dummy:ext-testing
//! │   └── lib/extensions/
//! │       └── lib-ext-testing/
//! │           └── index.js          → dummy:lib-ext-testing
//! └── @acme/
//!     └── ext-dummy-extra/
//! ```
//!
//! Discovery runs in three steps: [`SearchPaths`] resolves candidate roots,
//! [`ExtensionLocator`] finds matching packages, [`NamespaceIndexer`] builds the
//! [`ExtensionMap`].

mod discovery;
mod index;
pub mod namespace;
mod paths;

pub use discovery::ExtensionLocator;
pub use index::{ExtensionMap, NamespaceIndexer};
pub use paths::{MODULES_DIR, SearchPaths};
