//! Portable path token substitution for stored builder content.
//!
//! Authored content references site assets by absolute path. Stored
//! verbatim, those references would break the moment the site moves to a
//! different base URL or file directory layout. Before storage, absolute
//! paths are replaced by fixed sentinel tokens ([`PathContext::insert_tokens`]);
//! at render time the tokens are expanded against the *current* request's
//! paths ([`PathContext::restore_tokens`]). The asymmetry is intentional:
//! content authored under one deployment renders correctly under another.
//!
//! # Example
//!
//! ```
//! use azb_tokens::PathContext;
//!
//! let paths = PathContext::new(
//!     "https://example.com/sub",
//!     "/sub",
//!     "sites/default/files",
//!     "sites/default/files-private",
//!     "modules/azbuilder",
//! );
//!
//! let stored = paths.insert_tokens(r#"<img src="/sub/page.png">"#);
//! assert_eq!(stored, r#"<img src="-base-url-/page.png">"#);
//! assert_eq!(paths.restore_tokens(&stored), r#"<img src="/sub/page.png">"#);
//! ```

mod context;
mod legacy;
mod replacements;

pub use context::{
    PathContext, TOKEN_BASE_URL, TOKEN_FILES_DIR, TOKEN_MODULE_DIR, TOKEN_PRIVATE_FILES_DIR,
};
pub use legacy::apply_legacy_renames;
pub use replacements::Replacements;
