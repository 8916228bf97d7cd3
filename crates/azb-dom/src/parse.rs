//! Tolerant HTML fragment parser.
//!
//! Parses an authored fragment into an owned [`Node`] tree using quick-xml
//! events. The fragment is wrapped in a synthetic root, script/style bodies
//! are masked as CDATA, named entities are normalized, and the reader runs
//! with end-name checking disabled. Parse errors are absorbed: the
//! unparseable remainder is kept as text and logged at debug level, so the
//! pipeline never fails on malformed input.

use std::sync::LazyLock;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use regex::Regex;

use crate::entities::{decode_entity, prepare_for_parsing};
use crate::{Node, WRAPPER_TAG, is_void};

/// Script/style elements whose bodies must not be parsed as markup.
static RAW_TEXT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(<(?:script|style)\b[^>]*>)(.*?)(</(?:script|style)\s*>)")
        .expect("invalid raw text regex")
});

/// Parse an HTML fragment into a tree rooted at a synthetic wrapper node.
///
/// Never fails. Tolerates void elements, unquoted and valueless attributes,
/// named HTML entities, stray end tags and unclosed elements. Markup the
/// parser cannot make sense of is preserved verbatim as text content.
///
/// The returned root carries the fragment's leading text and top-level
/// nodes; serialize with [`serialize_fragment`](crate::serialize_fragment).
#[must_use]
pub fn parse_fragment(input: &str) -> Node {
    let masked = mask_raw_text(input);
    let prepared = prepare_for_parsing(&masked);
    let wrapped = format!("<{WRAPPER_TAG}>{prepared}</{WRAPPER_TAG}>");

    let mut reader = Reader::from_str(&wrapped);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut root = Node::new(WRAPPER_TAG);
    let mut parser = FragmentParser {
        reader,
        source: &wrapped,
    };
    // Consume the synthetic wrapper's own start tag, then parse its content
    if let Ok(Event::Start(_)) = parser.reader.read_event() {
        parser.parse_children(&mut root);
    }
    root
}

struct FragmentParser<'s> {
    reader: Reader<&'s [u8]>,
    source: &'s str,
}

impl FragmentParser<'_> {
    /// Parse events into `node` until its end tag (or EOF).
    ///
    /// Returns `false` when parsing must stop entirely (EOF or an absorbed
    /// error), so outer recursion levels unwind without reading further.
    fn parse_children(&mut self, node: &mut Node) -> bool {
        loop {
            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let mut child = self.element_from(&e);
                    if is_void(&child.tag) {
                        // Void elements have no content; don't recurse
                        node.children.push(child);
                    } else {
                        let keep_going = self.parse_children(&mut child);
                        node.children.push(child);
                        if !keep_going {
                            return false;
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    let child = self.element_from(&e);
                    node.children.push(child);
                }
                Ok(Event::Text(e)) => match self.reader.decoder().decode(&e) {
                    Ok(text) => append_text(node, &text),
                    Err(_) => append_text(node, &String::from_utf8_lossy(&e)),
                },
                Ok(Event::GeneralRef(e)) => {
                    let name = match self.reader.decoder().decode(&e) {
                        Ok(name) => name.into_owned(),
                        Err(_) => String::from_utf8_lossy(&e).into_owned(),
                    };
                    append_text(node, &decode_entity(&name));
                }
                Ok(Event::CData(e)) => {
                    append_text(node, &String::from_utf8_lossy(&e));
                }
                Ok(Event::Comment(e)) => {
                    let body = match self.reader.decoder().decode(&e) {
                        Ok(body) => body.into_owned(),
                        Err(_) => String::from_utf8_lossy(&e).into_owned(),
                    };
                    node.children.push(Node::comment(body));
                }
                Ok(Event::End(e)) => {
                    // A stray `</br>` or similar must not close the current
                    // element
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    if is_void(&name) {
                        continue;
                    }
                    return true;
                }
                Ok(Event::Eof) => return false,
                Ok(Event::Decl(_) | Event::PI(_) | Event::DocType(_)) => {}
                Err(e) => {
                    self.absorb_remainder(node, &e);
                    return false;
                }
            }
        }
    }

    fn element_from(&self, start: &BytesStart<'_>) -> Node {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut node = Node::new(tag);
        // html_attributes tolerates unquoted and valueless attributes;
        // individually malformed attributes are skipped
        for attr in start.html_attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = match attr.decode_and_unescape_value(self.reader.decoder()) {
                Ok(value) => value.into_owned(),
                Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
            };
            node.attrs.push((key, value));
        }
        node
    }

    /// Keep the unparsed remainder as text so no authored content is lost.
    fn absorb_remainder(&self, node: &mut Node, error: &quick_xml::Error) {
        let mut pos = usize::try_from(self.reader.buffer_position())
            .unwrap_or(usize::MAX)
            .min(self.source.len());
        while pos < self.source.len() && !self.source.is_char_boundary(pos) {
            pos += 1;
        }
        tracing::debug!(error = %error, position = pos, "absorbing unparseable markup as text");

        let close = format!("</{WRAPPER_TAG}>");
        let mut rest = &self.source[pos..];
        rest = rest.strip_suffix(close.as_str()).unwrap_or(rest);
        append_text(node, rest);
    }
}

fn append_text(node: &mut Node, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = node.children.last_mut() {
        last.tail.push_str(text);
    } else {
        node.text.push_str(text);
    }
}

/// Wrap script/style bodies in CDATA so their content is never parsed as
/// markup. Bodies already in CDATA, empty, or containing a CDATA terminator
/// are left alone.
fn mask_raw_text(input: &str) -> String {
    RAW_TEXT_PATTERN
        .replace_all(input, |caps: &regex::Captures| {
            let open = &caps[1];
            let body = &caps[2];
            let close = &caps[3];
            if body.is_empty() || body.starts_with("<![CDATA[") || body.contains("]]>") {
                caps[0].to_owned()
            } else {
                format!("{open}<![CDATA[{body}]]>{close}")
            }
        })
        .into_owned()
}
