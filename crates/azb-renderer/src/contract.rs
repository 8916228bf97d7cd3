//! Wire contract with the client-side authoring tool.
//!
//! These identifiers are owned by the authoring tool and consumed bit-exact
//! from stored content; renaming any of them breaks every existing page.

/// Class marking a placeholder to be replaced with CMS content.
pub const CMS_ELEMENT_CLASS: &str = "az-cms-element";

/// Class marking a raw-HTML passthrough container. Script and stylesheet
/// tags under such a container are kept.
pub const RAW_HTML_CLASS: &str = "az-html";

/// Class carried by every builder element.
pub const BUILDER_ELEMENT_CLASS: &str = "az-element";

/// Class carried by builder layout containers.
pub const BUILDER_CONTAINER_CLASS: &str = "az-ctnr";

/// Attribute holding the scheme-prefixed element identifier.
pub const ELEMENT_ATTR: &str = "data-azb";

/// Attribute holding serialized per-element settings.
pub const SETTINGS_ATTR: &str = "data-azat-settings";

/// Prefix shared by all editor data attributes (matched case-insensitively).
pub const EDITOR_ATTR_PREFIX: &str = "data-az";

/// Attribute declaring an entrance animation; elements carrying it keep
/// their data attributes for the front-end script.
pub const ANIMATION_ATTR: &str = "data-azat-an_start";

/// Attribute declaring required asset libraries, space-separated.
pub const LIBRARIES_ATTR: &str = "data-dxpr-builder-libraries";

/// Namespace prepended to declared library keys.
pub const LIBRARY_NAMESPACE: &str = "dxpr_builder/elements.";

/// Icon font key rewritten to its free-tier equivalent.
pub const ICON_FONT_PRO: &str = "font_awesome_5_pro";

/// Free-tier replacement for [`ICON_FONT_PRO`].
pub const ICON_FONT_FREE: &str = "font_awesome_5_free";

/// Scheme prefix on element identifiers (`az_block-...`, `az_view-...`).
pub const ELEMENT_KIND_PREFIX: &str = "az_";

/// Front-end runtime script names whose presence makes a fragment dynamic.
pub const FRONTEND_SCRIPT_MARKERS: [&str; 2] = ["dxpr_frontend.min.js", "dxpr_frontend.js"];

/// Element kinds whose client-side behavior needs the data attributes even
/// outside the editor (animation, carousels, counters, video).
pub const DYNAMIC_ELEMENT_KINDS: [&str; 11] = [
    "accordion",
    "carousel",
    "container",
    "layers",
    "section",
    "tabs",
    "circle_counter",
    "countdown",
    "counter",
    "images_carousel",
    "video",
];
