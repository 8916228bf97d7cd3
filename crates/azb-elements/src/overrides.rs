//! Per-placeholder view overrides.

/// Per-instance view settings read from a placeholder's `data-azat-*`
/// attributes.
///
/// Values are kept as authored strings; missing attributes are empty. The
/// view collaborator interprets them (visibility toggles, pager override,
/// contextual filter arguments, field toggles).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOverrides {
    /// Whether to show the view title.
    pub display_title: String,
    /// Whether to show exposed filters.
    pub display_exposed_filters: String,
    /// Whether the pager settings below override the display's own.
    pub override_pager: String,
    /// Items per page.
    pub items: String,
    /// Result offset.
    pub offset: String,
    /// Contextual filter arguments.
    pub contextual_filter: String,
    /// Field visibility toggles.
    pub toggle_fields: String,
}

impl ViewOverrides {
    /// Build overrides from an attribute lookup.
    ///
    /// `lookup` returns the attribute value for a `data-azat-*` name, or
    /// `None` when absent.
    pub fn from_attrs<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let get = |name: &str| lookup(name).unwrap_or_default().to_owned();
        Self {
            display_title: get("data-azat-display_title"),
            display_exposed_filters: get("data-azat-display_exposed_filters"),
            override_pager: get("data-azat-override_pager"),
            items: get("data-azat-items"),
            offset: get("data-azat-offset"),
            contextual_filter: get("data-azat-contextual_filter"),
            toggle_fields: get("data-azat-toggle_fields"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_attrs_reads_known_names() {
        let attrs = vec![
            ("data-azat-display_title", "1"),
            ("data-azat-items", "5"),
            ("data-azat-contextual_filter", "42/7"),
        ];
        let overrides =
            ViewOverrides::from_attrs(|name| attrs.iter().find(|(k, _)| *k == name).map(|(_, v)| *v));

        assert_eq!(overrides.display_title, "1");
        assert_eq!(overrides.items, "5");
        assert_eq!(overrides.contextual_filter, "42/7");
        assert_eq!(overrides.offset, "");
    }

    #[test]
    fn test_missing_attrs_are_empty() {
        let overrides = ViewOverrides::from_attrs(|_| None);
        assert_eq!(overrides, ViewOverrides::default());
    }
}
