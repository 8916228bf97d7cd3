//! CMS element identifiers and resolver ports for AZ Builder.
//!
//! Placeholder elements in authored markup reference CMS content through a
//! compact string identifier. This crate parses those identifiers into an
//! [`ElementDescriptor`], defines the ports through which the host CMS
//! renders blocks and views ([`BlockSource`], [`ViewSource`]), and resolves
//! a descriptor to markup with [`resolve_element`] — falling back to an
//! inert placeholder when the host produces nothing.

mod assets;
mod descriptor;
mod overrides;
mod resolve;

pub use assets::AttachedAssets;
pub use descriptor::{BlockTarget, ElementDescriptor, parse_identifier, strip_scheme_prefix};
pub use overrides::ViewOverrides;
pub use resolve::{
    BlockSource, EMPTY_PLACEHOLDER, NullBlockSource, NullViewSource, ViewSource, resolve_element,
};
