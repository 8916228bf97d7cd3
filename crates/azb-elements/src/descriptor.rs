//! Element identifier grammar.

use std::sync::LazyLock;

use regex::Regex;

/// `block-<provider>:<id>` — greedy provider match, so the last colon
/// separates provider from id.
static BLOCK_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^block-(.+):(.+)$").expect("invalid block id regex"));

/// Structured form of a placeholder identifier.
///
/// Derived purely from the identifier string; consumed once per resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementDescriptor {
    /// A CMS block, either custom content or a plugin.
    Block(BlockTarget),
    /// A view display.
    View {
        /// Machine name of the view (may itself contain dashes).
        view_id: String,
        /// Display identifier (never contains dashes).
        display_id: String,
    },
    /// Unrecognized identifier; resolves to no output.
    Unknown,
}

/// The block half of the descriptor grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockTarget {
    /// Custom content block, addressed by entity UUID.
    Content {
        /// The content entity UUID (opaque string).
        uuid: String,
    },
    /// Plugin block, addressed by plugin id (may contain colons).
    Plugin {
        /// The full plugin id, e.g. `system_menu_block:main`.
        id: String,
    },
}

/// Strip the 3-character scheme prefix (`az_`) off a raw placeholder value.
///
/// Returns an empty string for values shorter than the prefix, which parses
/// to [`ElementDescriptor::Unknown`].
#[must_use]
pub fn strip_scheme_prefix(raw: &str) -> &str {
    raw.get(3..).unwrap_or("")
}

/// Parse a placeholder identifier (scheme prefix already stripped).
///
/// The grammar is dash- and colon-delimited and inherently ambiguous: view
/// ids may contain dashes, so `view-a-b-c` always reads as view `a-b`,
/// display `c` — the last segment is taken as the display id and everything
/// between is re-joined. Identifiers that fit neither the block nor the
/// view shape yield [`ElementDescriptor::Unknown`]; parsing never fails.
#[must_use]
pub fn parse_identifier(identifier: &str) -> ElementDescriptor {
    if identifier.starts_with("block-") {
        parse_block_identifier(identifier)
    } else if identifier.starts_with("view-") {
        parse_view_identifier(identifier)
    } else {
        ElementDescriptor::Unknown
    }
}

fn parse_block_identifier(identifier: &str) -> ElementDescriptor {
    if let Some(captures) = BLOCK_ID_PATTERN.captures(identifier) {
        let provider = &captures[1];
        let rest = &captures[2];
        if provider == "block_content" {
            ElementDescriptor::Block(BlockTarget::Content {
                uuid: rest.to_owned(),
            })
        } else {
            ElementDescriptor::Block(BlockTarget::Plugin {
                id: format!("{provider}:{rest}"),
            })
        }
    } else {
        // No colon: everything after the first dash token is the plugin id
        let mut parts = identifier.split('-');
        parts.next();
        ElementDescriptor::Block(BlockTarget::Plugin {
            id: parts.collect::<Vec<_>>().join("-"),
        })
    }
}

fn parse_view_identifier(identifier: &str) -> ElementDescriptor {
    let mut parts: Vec<&str> = identifier.split('-').collect();
    parts.remove(0);
    let display_id = parts.pop().unwrap_or_default().to_owned();
    ElementDescriptor::View {
        view_id: parts.join("-"),
        display_id,
    }
}
