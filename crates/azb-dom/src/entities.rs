//! HTML entity normalization for XML-based parsing.
//!
//! Authored content is HTML, the parser speaks XML. Before parsing, named
//! HTML entities are converted to their Unicode equivalents and stray
//! ampersands are escaped, so the parser never chokes on `&nbsp;` or on a
//! bare `&` in text. Standard XML entities (amp, lt, gt, quot, apos) are
//! preserved as-is. CDATA sections pass through untouched.

use std::sync::LazyLock;

use regex::Regex;

/// Pattern for matching named HTML entities.
static ENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&([a-zA-Z]+);").expect("invalid entity regex"));

/// Every `&`, optionally followed by a well-formed entity tail.
static AMPERSAND_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7};|#[xX][0-9a-fA-F]{1,6};|[a-zA-Z][a-zA-Z0-9]{0,31};)?")
        .expect("invalid ampersand regex")
});

/// Convert named HTML entities to Unicode characters.
///
/// Replaces named HTML entities (e.g. `&nbsp;`, `&mdash;`) with their
/// Unicode equivalents. Standard XML entities and unknown entities are left
/// unchanged.
#[must_use]
pub fn convert_html_entities(html: &str) -> String {
    ENTITY_PATTERN
        .replace_all(html, |caps: &regex::Captures| {
            let entity_name = &caps[1];
            entity_to_unicode(entity_name)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_owned())
        })
        .into_owned()
}

/// Prepare a fragment for XML parsing.
///
/// Outside CDATA sections: converts named HTML entities and escapes stray
/// ampersands. CDATA sections (script/style bodies masked by the parser)
/// are copied verbatim.
#[must_use]
pub(crate) fn prepare_for_parsing(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("<![CDATA[") {
        out.push_str(&prepare_segment(&rest[..start]));
        let after = &rest[start..];
        if let Some(end) = after.find("]]>") {
            out.push_str(&after[..end + 3]);
            rest = &after[end + 3..];
        } else {
            // Unterminated CDATA: keep the remainder verbatim
            out.push_str(after);
            return out;
        }
    }
    out.push_str(&prepare_segment(rest));
    out
}

fn prepare_segment(segment: &str) -> String {
    let converted = convert_html_entities(segment);
    AMPERSAND_PATTERN
        .replace_all(&converted, |caps: &regex::Captures| {
            if caps.get(1).is_some() {
                caps[0].to_owned()
            } else {
                "&amp;".to_owned()
            }
        })
        .into_owned()
}

/// Decode an entity reference name (without `&` and `;`).
///
/// Handles numeric character references and known named entities. Unknown
/// names are returned as literal `&name;` text.
pub(crate) fn decode_entity(name: &str) -> String {
    if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        if let Some(ch) = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
            return ch.to_string();
        }
    } else if let Some(dec) = name.strip_prefix('#') {
        if let Some(ch) = dec.parse::<u32>().ok().and_then(char::from_u32) {
            return ch.to_string();
        }
    } else {
        match name {
            "amp" => return "&".to_owned(),
            "lt" => return "<".to_owned(),
            "gt" => return ">".to_owned(),
            "quot" => return "\"".to_owned(),
            "apos" => return "'".to_owned(),
            other => {
                if let Some(unicode) = entity_to_unicode(other) {
                    return unicode.to_owned();
                }
            }
        }
    }
    format!("&{name};")
}

/// Map HTML entity name to Unicode character.
fn entity_to_unicode(name: &str) -> Option<&'static str> {
    Some(match name {
        // Common entities
        "nbsp" => "\u{00a0}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "bull" => "\u{2022}",
        "hellip" => "\u{2026}",

        // Arrows
        "rarr" => "\u{2192}",
        "larr" => "\u{2190}",
        "harr" => "\u{2194}",
        "uarr" => "\u{2191}",
        "darr" => "\u{2193}",

        // Math symbols
        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "ne" => "\u{2260}",
        "plusmn" => "\u{00b1}",
        "times" => "\u{00d7}",
        "divide" => "\u{00f7}",

        // Legal symbols
        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",

        // Currency
        "euro" => "\u{20ac}",
        "pound" => "\u{00a3}",
        "yen" => "\u{00a5}",
        "cent" => "\u{00a2}",

        // Misc symbols
        "deg" => "\u{00b0}",
        "para" => "\u{00b6}",
        "sect" => "\u{00a7}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",
        "iexcl" => "\u{00a1}",
        "iquest" => "\u{00bf}",

        // Fractions
        "frac14" => "\u{00bc}",
        "frac12" => "\u{00bd}",
        "frac34" => "\u{00be}",

        // Unknown entity - return None to preserve as-is
        _ => return None,
    })
}
