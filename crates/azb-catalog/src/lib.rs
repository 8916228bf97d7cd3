//! CMS metadata catalogs and editor settings for AZ Builder.
//!
//! The editor needs to know what it can place (blocks, view displays),
//! what the acting user may not place, how each view display can be
//! modified, and which button styles and class options exist. Those
//! listings are expensive to rebuild, so [`CatalogService`] layers a
//! request-scoped memo over the process cache, keyed by the persisted
//! settings revision (see `BuilderConfig::cache_etag`).
//!
//! All host-CMS data enters through the registry ports in [`registry`];
//! one broken definition is logged and skipped, never fatal to a catalog
//! build.

mod buttons;
mod catalog;
mod registry;
mod settings;
mod views;

pub use buttons::{ElementFolder, element_folders, scan_button_styles};
pub use catalog::{CatalogService, ElementCatalog};
pub use registry::{
    BlockDefinition, BlockRegistry, FieldRule, FilterRule, PagerSettings, RegistryError,
    ThemeDefinition, ThemeRegistry, ViewDefinition, ViewDisplay, ViewRegistry,
};
pub use settings::{ClassOption, EditorSettings};
pub use views::ViewDisplaySettings;
