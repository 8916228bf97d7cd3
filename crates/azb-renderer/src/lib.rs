//! HTML recomposition pipeline for AZ Builder content.
//!
//! Takes builder-authored markup containing placeholder elements for CMS
//! content, resolves the placeholders against the host CMS through the
//! [`azb_elements`] ports, strips front-end asset references that are
//! attached as libraries instead, and produces the final fragment plus a
//! manifest of required client assets and settings.
//!
//! Stages, strictly ordered (see [`ContentRenderer::render`]):
//!
//! 1. restore portable path tokens
//! 2. detect static/dynamic mode
//! 3. parse the fragment tolerantly
//! 4. strip attached scripts/stylesheets (raw-HTML containers exempt)
//! 5. collect declared asset libraries
//! 6. resolve CMS element placeholders in place
//! 7. strip editor attributes (render mode only)
//! 8. serialize back to markup
//!
//! No stage fails: malformed markup is absorbed by the parser and missing
//! CMS content degrades to an inert placeholder div.

mod contract;
mod renderer;
mod response;

pub use contract::{
    ANIMATION_ATTR, BUILDER_CONTAINER_CLASS, BUILDER_ELEMENT_CLASS, CMS_ELEMENT_CLASS,
    DYNAMIC_ELEMENT_KINDS, EDITOR_ATTR_PREFIX, ELEMENT_ATTR, ELEMENT_KIND_PREFIX,
    FRONTEND_SCRIPT_MARKERS, ICON_FONT_FREE, ICON_FONT_PRO, LIBRARIES_ATTR, LIBRARY_NAMESPACE,
    RAW_HTML_CLASS, SETTINGS_ATTR,
};
pub use renderer::ContentRenderer;
pub use response::{RenderMode, RenderResponse};
