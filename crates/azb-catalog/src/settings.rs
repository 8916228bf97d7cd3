//! Editor settings assembly.
//!
//! Gathers everything the client-side editor needs into one serializable
//! payload: where to load its assets from, which CMS elements exist (and
//! which the acting user may not place), view display metadata, button
//! styles, theme-contributed class options, and text editor configuration.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Serialize;

use azb_config::{AssetSource, BuilderConfig, StyleRule, normalize_font_list, parse_style_set};

use crate::buttons::{element_folders, scan_button_styles};
use crate::catalog::CatalogService;
use crate::registry::ThemeRegistry;
use crate::views::ViewDisplaySettings;

/// Libraries the editor always attaches.
const EDITOR_LIBRARIES: [&str; 12] = [
    "core/jquery.ui",
    "core/jquery.ui.tabs",
    "core/jquery.ui.sortable",
    "core/jquery.ui.droppable",
    "core/jquery.ui.draggable",
    "core/jquery.ui.accordian",
    "core/jquery.ui.selectable",
    "core/jquery.ui.resizable",
    "core/jquery.ui.slider",
    "core/drupalSettings",
    "dxpr_builder/twig.js",
    "dxpr_builder/editor.builder",
];

/// One option in the class dropdown. Optgroup headers use an
/// `optgroup-<theme>` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassOption {
    /// Class value (or optgroup marker).
    pub value: String,
    /// Label shown in the dropdown.
    pub label: String,
}

/// The assembled editor settings payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSettings {
    /// Base URL the editor loads its assets from.
    pub assets_url: String,
    /// Query parameters for asset requests (product key).
    pub assets_params: String,
    /// Placeable element id → label.
    pub cms_element_names: BTreeMap<String, String>,
    /// Elements the acting user may not place.
    pub cms_disallowed_elements: BTreeSet<String>,
    /// View display metadata, keyed by `az_view-...`.
    pub cms_element_views_settings: BTreeMap<String, ViewDisplaySettings>,
    /// Display key → owning view id.
    pub views_tags: BTreeMap<String, String>,
    /// Button style name → class list.
    pub button_styles: BTreeMap<String, String>,
    /// Theme-contributed class options.
    pub builder_classes: Vec<ClassOption>,
    /// Parsed text editor style set.
    pub style_set: Vec<StyleRule>,
    /// Normalized font list.
    pub fonts: String,
    /// Current interface language.
    pub language: String,
    /// Libraries the editor page must attach.
    pub editor_libraries: Vec<String>,
}

impl EditorSettings {
    /// Assemble the settings payload for one editor request.
    ///
    /// `base_path` is the current request's base path, used when assets are
    /// served locally.
    #[must_use]
    pub fn assemble(
        config: &BuilderConfig,
        base_path: &str,
        catalog: &CatalogService<'_>,
        themes: &dyn ThemeRegistry,
        language: &str,
    ) -> Self {
        let (assets_url, assets_params) = asset_source(config, base_path);
        let element_catalog = catalog.element_catalog();

        let folders = element_folders(Path::new(&config.paths.module_dir), themes);
        let button_styles = scan_button_styles(&folders);

        let style_set = parse_style_set(&config.editor.style_set).unwrap_or_else(|| {
            tracing::warn!("malformed editor style set; ignoring");
            Vec::new()
        });

        Self {
            assets_url,
            assets_params,
            cms_element_names: element_catalog.list,
            cms_disallowed_elements: element_catalog.disallowed,
            cms_element_views_settings: catalog.view_display_settings(),
            views_tags: catalog.views_tags(),
            button_styles,
            builder_classes: builder_class_options(themes),
            style_set,
            fonts: normalize_font_list(&config.editor.fonts),
            language: language.to_owned(),
            editor_libraries: EDITOR_LIBRARIES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

/// Resolve where editor assets load from.
///
/// Cloud source substitutes the asset version into the URL pattern and
/// authenticates with the product key; a missing key is logged and leaves
/// the params empty. Local source serves from the module directory.
fn asset_source(config: &BuilderConfig, base_path: &str) -> (String, String) {
    match config.assets.source {
        AssetSource::Cloud => {
            let url = config.assets.cloud_url.replace("VERSION", config.asset_version());
            let params = match &config.assets.product_key {
                Some(key) => format!("jwt={key}"),
                None => {
                    tracing::warn!("no product key configured; editor assets will not load");
                    String::new()
                }
            };
            (url, params)
        }
        AssetSource::Local => (
            format!("{base_path}/{}/assets/", config.paths.module_dir),
            String::new(),
        ),
    }
}

/// Class options contributed by enabled themes, each group headed by an
/// optgroup marker.
fn builder_class_options(themes: &dyn ThemeRegistry) -> Vec<ClassOption> {
    let mut options = Vec::new();
    for theme in themes.themes() {
        if !theme.enabled || theme.builder_classes.is_empty() {
            continue;
        }
        options.push(ClassOption {
            value: format!("optgroup-{}", theme.machine_name),
            label: theme.label.clone(),
        });
        options.extend(theme.builder_classes.iter().map(|(value, label)| ClassOption {
            value: value.clone(),
            label: label.clone(),
        }));
    }
    options
}

#[cfg(test)]
mod tests {
    use azb_cache::NullCache;

    use super::*;
    use crate::registry::{
        BlockDefinition, BlockRegistry, RegistryError, ThemeDefinition, ViewDefinition,
        ViewRegistry,
    };

    struct NoBlocks;

    impl BlockRegistry for NoBlocks {
        fn definitions(&self) -> Vec<BlockDefinition> {
            Vec::new()
        }

        fn block_access(&self, _id: &str) -> bool {
            true
        }
    }

    struct NoViews;

    impl ViewRegistry for NoViews {
        fn view_ids(&self) -> Vec<String> {
            Vec::new()
        }

        fn view(&self, id: &str) -> Result<ViewDefinition, RegistryError> {
            Err(RegistryError::UnknownView(id.to_owned()))
        }
    }

    struct StubThemes(Vec<ThemeDefinition>);

    impl ThemeRegistry for StubThemes {
        fn themes(&self) -> Vec<ThemeDefinition> {
            self.0.clone()
        }
    }

    fn assemble(config: &BuilderConfig, themes: &dyn ThemeRegistry) -> EditorSettings {
        let blocks = NoBlocks;
        let views = NoViews;
        let catalog = CatalogService::new(&NullCache, "rev1", "1", &blocks, &views);
        EditorSettings::assemble(config, "/sub", &catalog, themes, "en")
    }

    #[test]
    fn test_cloud_assets_substitute_version_and_key() {
        let mut config = BuilderConfig::default();
        config.assets.cloud_url = "https://cdn.example.com/azbuilder/VERSION/".to_owned();
        config.assets.version = "2.4.1".to_owned();
        config.assets.product_key = Some("tok.en".to_owned());

        let settings = assemble(&config, &StubThemes(vec![]));
        assert_eq!(settings.assets_url, "https://cdn.example.com/azbuilder/2.4.1/");
        assert_eq!(settings.assets_params, "jwt=tok.en");
    }

    #[test]
    fn test_cloud_assets_without_key_leave_params_empty() {
        let config = BuilderConfig::default();
        let settings = assemble(&config, &StubThemes(vec![]));
        assert_eq!(settings.assets_params, "");
    }

    #[test]
    fn test_local_assets_use_module_dir() {
        let mut config = BuilderConfig::default();
        config.assets.source = AssetSource::Local;

        let settings = assemble(&config, &StubThemes(vec![]));
        assert_eq!(settings.assets_url, "/sub/modules/azbuilder/assets/");
        assert_eq!(settings.assets_params, "");
    }

    #[test]
    fn test_theme_classes_grouped_under_optgroup() {
        let themes = StubThemes(vec![ThemeDefinition {
            machine_name: "aurora".to_owned(),
            label: "Aurora".to_owned(),
            enabled: true,
            builder_classes: vec![("hero-band".to_owned(), "Hero band".to_owned())],
            ..ThemeDefinition::default()
        }]);

        let settings = assemble(&BuilderConfig::default(), &themes);
        assert_eq!(
            settings.builder_classes,
            vec![
                ClassOption {
                    value: "optgroup-aurora".to_owned(),
                    label: "Aurora".to_owned(),
                },
                ClassOption {
                    value: "hero-band".to_owned(),
                    label: "Hero band".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_disabled_themes_contribute_nothing() {
        let themes = StubThemes(vec![ThemeDefinition {
            machine_name: "old".to_owned(),
            label: "Old".to_owned(),
            enabled: false,
            builder_classes: vec![("x".to_owned(), "X".to_owned())],
            ..ThemeDefinition::default()
        }]);

        let settings = assemble(&BuilderConfig::default(), &themes);
        assert!(settings.builder_classes.is_empty());
    }

    #[test]
    fn test_style_set_and_fonts_from_config() {
        let mut config = BuilderConfig::default();
        config.editor.style_set = "Lead=p.lead".to_owned();
        config.editor.fonts = "Inter\nRoboto".to_owned();

        let settings = assemble(&config, &StubThemes(vec![]));
        assert_eq!(settings.style_set.len(), 1);
        assert_eq!(settings.style_set[0].element, "p");
        assert_eq!(settings.fonts, "Inter;Roboto");
    }

    #[test]
    fn test_malformed_style_set_degrades_to_empty() {
        let mut config = BuilderConfig::default();
        config.editor.style_set = "not a rule".to_owned();

        let settings = assemble(&config, &StubThemes(vec![]));
        assert!(settings.style_set.is_empty());
    }

    #[test]
    fn test_editor_libraries_fixed_list() {
        let settings = assemble(&BuilderConfig::default(), &StubThemes(vec![]));
        assert_eq!(settings.editor_libraries.len(), 12);
        assert_eq!(settings.editor_libraries[0], "core/jquery.ui");
        assert_eq!(settings.language, "en");
    }

    #[test]
    fn test_payload_serializes_camel_case() {
        let settings = assemble(&BuilderConfig::default(), &StubThemes(vec![]));
        let json = serde_json::to_value(&settings).unwrap();
        assert!(json.get("cmsElementNames").is_some());
        assert!(json.get("cmsDisallowedElements").is_some());
        assert!(json.get("buttonStyles").is_some());
    }
}
