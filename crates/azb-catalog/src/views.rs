//! View display settings for the editor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use azb_dom::escape_html;

use crate::registry::{FieldRule, PagerSettings, ViewDefinition, ViewDisplay};

/// Per-display metadata the editor uses to offer view modifications.
///
/// Keyed by `az_view-<view_id>-<display_id>` in the settings payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDisplaySettings {
    /// Display plugin type.
    pub display_type: String,
    /// Whether the display has a title to toggle.
    pub title: bool,
    /// Whether contextual filters are available.
    pub contextual_filter: bool,
    /// Whether exposed filters are available.
    pub exposed_filter: bool,
    /// Whether the display uses AJAX.
    pub ajax_enabled: bool,
    /// Whether field toggles make sense (more than one field).
    pub use_fields: bool,
    /// Escaped field labels, in display order.
    pub field_list: Vec<String>,
    /// Pager limits, with default-display fallback applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pager: Option<PagerSettings>,
}

/// Compute settings for every display of a view.
///
/// Displays that define no filters, AJAX flag, fields or pager fall back to
/// the view's `default` display for that aspect.
pub(crate) fn display_settings_for_view(
    view: &ViewDefinition,
) -> BTreeMap<String, ViewDisplaySettings> {
    let default_display = view.displays.iter().find(|d| d.id == "default");
    let mut settings = BTreeMap::new();

    for display in &view.displays {
        let key = format!("az_view-{}-{}", view.id, display.id);
        settings.insert(key, settings_for_display(display, default_display));
    }
    settings
}

fn settings_for_display(
    display: &ViewDisplay,
    default_display: Option<&ViewDisplay>,
) -> ViewDisplaySettings {
    let default_filters = default_display
        .and_then(|d| d.filters.as_deref())
        .unwrap_or_default();
    let mut exposed_filter = default_filters.iter().any(|f| f.exposed == Some(true));
    if let Some(own_filters) = &display.filters {
        for filter in own_filters {
            match filter.exposed {
                Some(false) => exposed_filter = false,
                Some(true) => {
                    exposed_filter = true;
                    break;
                }
                None => {}
            }
        }
    }

    let mut ajax_enabled = default_display.and_then(|d| d.use_ajax).unwrap_or(false);
    // A display only overrides the default when it switches AJAX on
    if display.use_ajax == Some(true) {
        ajax_enabled = true;
    }

    let contextual_filter = if display.inherits_arguments {
        default_display.is_some_and(|d| d.has_arguments)
    } else {
        display.has_arguments
    };

    let mut fields: &[FieldRule] = &display.fields;
    if fields.is_empty()
        && display.uses_fields
        && let Some(default) = default_display
    {
        fields = &default.fields;
    }
    let field_list: Vec<String> = fields.iter().map(field_label).collect();

    let pager = display
        .pager
        .clone()
        .or_else(|| default_display.and_then(|d| d.pager.clone()));

    ViewDisplaySettings {
        display_type: display.display_type.clone(),
        title: !display.title.is_empty(),
        contextual_filter,
        exposed_filter,
        ajax_enabled,
        use_fields: field_list.len() > 1,
        field_list,
        pager,
    }
}

fn field_label(field: &FieldRule) -> String {
    let label = match &field.label {
        Some(label) => escape_html(label),
        None => format!("Broken/missing handler: {} > {}", field.table, field.field),
    };
    match &field.relationship_label {
        Some(relationship) => format!("({relationship}) {label}"),
        None => label,
    }
}
