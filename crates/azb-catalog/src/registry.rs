//! Registry ports onto the host CMS.
//!
//! The catalog never talks to the CMS directly; block, view and theme
//! listings come through these traits as plain data. All calls are
//! synchronous in-process lookups.

use std::path::PathBuf;

/// Failure reported by a registry backend.
///
/// Registry errors during batch catalog builds are logged and the broken
/// item is skipped; one bad definition never aborts a catalog.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// The backend could not produce the requested definition.
    #[error("registry backend failure: {0}")]
    Backend(String),

    /// The requested view does not exist.
    #[error("unknown view: {0}")]
    UnknownView(String),
}

/// One block plugin definition.
#[derive(Debug, Clone)]
pub struct BlockDefinition {
    /// Plugin id, e.g. `system_menu_block:main`.
    pub id: String,
    /// Human label shown in the element browser.
    pub admin_label: String,
    /// Category the block is grouped under.
    pub category: String,
    /// Providing module.
    pub provider: String,
}

/// Host port listing block plugins and answering access checks.
pub trait BlockRegistry {
    /// All known block plugin definitions.
    fn definitions(&self) -> Vec<BlockDefinition>;

    /// Whether the acting user may place the given block.
    fn block_access(&self, id: &str) -> bool;
}

/// One view with its displays.
#[derive(Debug, Clone)]
pub struct ViewDefinition {
    /// View machine name.
    pub id: String,
    /// Human label.
    pub label: String,
    /// Whether the view is enabled.
    pub enabled: bool,
    /// All displays, including the `default` display.
    pub displays: Vec<ViewDisplay>,
}

/// One display of a view.
///
/// `filters`, `use_ajax` and the argument flags distinguish "defined on
/// this display" from "inherited from the default display": `None` means
/// the display does not override the default.
#[derive(Debug, Clone)]
pub struct ViewDisplay {
    /// Display id (`default`, `page_1`, `block_2`, ...).
    pub id: String,
    /// Display title shown in the admin UI.
    pub label: String,
    /// Display plugin type (`page`, `block`, `embed`, ...).
    pub display_type: String,
    /// Rendered view title for this display; empty when none.
    pub title: String,
    /// Whether this display renders fields (as opposed to rows/entities).
    pub uses_fields: bool,
    /// Filters defined on this display, `None` when inherited.
    pub filters: Option<Vec<FilterRule>>,
    /// AJAX setting defined on this display, `None` when inherited.
    pub use_ajax: Option<bool>,
    /// Whether contextual filter arguments are inherited from the default
    /// display.
    pub inherits_arguments: bool,
    /// Whether this display defines contextual filter arguments of its own.
    pub has_arguments: bool,
    /// Fields defined on this display; empty when inherited.
    pub fields: Vec<FieldRule>,
    /// Pager defined on this display, `None` when inherited.
    pub pager: Option<PagerSettings>,
}

/// A filter on a view display.
#[derive(Debug, Clone)]
pub struct FilterRule {
    /// Exposed flag; `None` when the filter does not state it.
    pub exposed: Option<bool>,
}

/// A field on a view display.
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Admin label; `None` for a broken/missing handler.
    pub label: Option<String>,
    /// Backing table, used in the broken-handler fallback label.
    pub table: String,
    /// Backing field, used in the broken-handler fallback label.
    pub field: String,
    /// Label of the relationship the field hangs off, if any.
    pub relationship_label: Option<String>,
}

/// Pager limits of a view display.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PagerSettings {
    /// Items per page; `None` when unlimited.
    pub items_per_page: Option<u32>,
    /// Result offset.
    pub offset: Option<u32>,
}

/// Host port listing views.
///
/// Split into ids + per-id lookup so a broken view definition surfaces as
/// a per-item [`RegistryError`] the catalog can log and skip.
pub trait ViewRegistry {
    /// Machine names of all views.
    fn view_ids(&self) -> Vec<String>;

    /// Load one view definition.
    fn view(&self, id: &str) -> Result<ViewDefinition, RegistryError>;
}

/// One installed theme.
#[derive(Debug, Clone, Default)]
pub struct ThemeDefinition {
    /// Theme machine name.
    pub machine_name: String,
    /// Human label.
    pub label: String,
    /// Whether the theme is enabled.
    pub enabled: bool,
    /// Builder class options the theme contributes, as (value, label).
    pub builder_classes: Vec<(String, String)>,
    /// The theme's `elements` directory, when it ships one.
    pub elements_dir: Option<PathBuf>,
    /// Public URL of the `elements` directory.
    pub elements_url: Option<String>,
}

/// Host port listing installed themes.
pub trait ThemeRegistry {
    /// All installed themes.
    fn themes(&self) -> Vec<ThemeDefinition>;
}
