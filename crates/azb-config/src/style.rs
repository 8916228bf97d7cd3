//! Editor style-set parsing.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// `label=element.class[.class...]` line shape.
static STYLE_LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.+= *[a-zA-Z0-9]+(\.[a-zA-Z0-9_ -]+)*$").expect("invalid style line regex")
});

/// One parsed style rule for the text editor's style dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleRule {
    /// Label shown in the dropdown.
    pub name: String,
    /// Element the style applies to.
    pub element: String,
    /// Space-separated classes applied by the style, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<String>,
}

/// Parse a style-set definition, one rule per line.
///
/// Each non-empty line must match `label=element.class[.class...]`. A single
/// malformed line invalidates the whole set: the function returns `None`
/// and the caller decides what feedback to give. Empty input parses to an
/// empty set.
#[must_use]
pub fn parse_style_set(input: &str) -> Option<Vec<StyleRule>> {
    let mut rules = Vec::new();
    let input = input.trim();
    if input.is_empty() {
        return Some(rules);
    }

    // Handle both Unix and Windows line endings
    for line in input.replace('\r', "").split('\n') {
        let line = line.trim();
        if !STYLE_LINE_PATTERN.is_match(line) {
            return None;
        }
        let (label, selector) = line.split_once('=')?;
        let mut classes = selector.split('.');
        let element = classes.next().unwrap_or_default();

        let classes: Vec<&str> = classes.map(str::trim).collect();
        rules.push(StyleRule {
            name: label.trim().to_owned(),
            element: element.trim().to_owned(),
            classes: if classes.is_empty() {
                None
            } else {
                Some(classes.join(" "))
            },
        });
    }
    Some(rules)
}

/// Normalize a font list: line breaks become `;`, doubled `;` collapse.
#[must_use]
pub fn normalize_font_list(input: &str) -> String {
    input
        .replace(['\n', '\r'], ";")
        .replace(";;", ";")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_single_rule() {
        let rules = parse_style_set("Lead paragraph=p.lead").unwrap();
        assert_eq!(
            rules,
            vec![StyleRule {
                name: "Lead paragraph".to_owned(),
                element: "p".to_owned(),
                classes: Some("lead".to_owned()),
            }]
        );
    }

    #[test]
    fn test_parse_rule_without_classes() {
        let rules = parse_style_set("Quote=blockquote").unwrap();
        assert_eq!(rules[0].element, "blockquote");
        assert_eq!(rules[0].classes, None);
    }

    #[test]
    fn test_parse_multiple_classes() {
        let rules = parse_style_set("Fancy=div.card.shadow-lg").unwrap();
        assert_eq!(rules[0].classes.as_deref(), Some("card shadow-lg"));
    }

    #[test]
    fn test_parse_multiline_with_crlf() {
        let rules = parse_style_set("A=p.a\r\nB=span.b").unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].name, "B");
    }

    #[test]
    fn test_empty_input_is_empty_set() {
        assert_eq!(parse_style_set(""), Some(vec![]));
        assert_eq!(parse_style_set("   \n  "), Some(vec![]));
    }

    #[test]
    fn test_malformed_line_fails_whole_set() {
        assert_eq!(parse_style_set("A=p.a\nnot a rule\nB=span.b"), None);
        assert_eq!(parse_style_set("=p.a"), None);
        assert_eq!(parse_style_set("A=.classonly"), None);
    }

    #[test]
    fn test_normalize_font_list() {
        assert_eq!(
            normalize_font_list("Inter\nRoboto\r\nOpen Sans"),
            "Inter;Roboto;Open Sans"
        );
    }

    #[test]
    fn test_normalize_collapses_double_semicolons() {
        assert_eq!(normalize_font_list("A;;B"), "A;B");
    }
}
