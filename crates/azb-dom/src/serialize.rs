//! Fragment serialization back to HTML markup.

use std::fmt::Write;

use crate::{Node, is_raw_text, is_void};

/// Serialize a fragment tree to an HTML string.
///
/// The synthetic wrapper root is dropped: only its text and children are
/// written, so the output is the recomposed fragment. Void elements are
/// written without a closing tag; script/style bodies are written raw.
#[must_use]
pub fn serialize_fragment(root: &Node) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str(&escape_text(&root.text));
    for child in &root.children {
        serialize_node(child, &mut out);
    }
    out
}

/// Serialize a single node recursively.
fn serialize_node(node: &Node, out: &mut String) {
    if node.is_comment() {
        out.push_str("<!--");
        out.push_str(&node.text);
        out.push_str("-->");
        out.push_str(&escape_text(&node.tail));
        return;
    }

    out.push('<');
    out.push_str(&node.tag);
    for (key, value) in &node.attrs {
        write!(out, r#" {}="{}""#, key, escape_attr(value)).unwrap();
    }
    out.push('>');

    if !is_void(&node.tag) {
        if is_raw_text(&node.tag) {
            out.push_str(&node.text);
        } else {
            out.push_str(&escape_text(&node.text));
        }
        for child in &node.children {
            serialize_node(child, out);
        }
        write!(out, "</{}>", node.tag).unwrap();
    }

    out.push_str(&escape_text(&node.tail));
}

/// Escape text for HTML content (`&`, `<`, `>`).
fn escape_text(text: &str) -> String {
    escape(text, false)
}

/// Escape text for attribute values (adds quotes).
fn escape_attr(text: &str) -> String {
    escape(text, true)
}

/// Escape all HTML special characters, including quotes.
///
/// For embedding arbitrary labels in markup or settings payloads.
#[must_use]
pub fn escape_html(text: &str) -> String {
    escape(text, true)
}

fn escape(text: &str, escape_quotes: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if escape_quotes => result.push_str("&quot;"),
            '\'' if escape_quotes => result.push_str("&#39;"),
            _ => result.push(ch),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parse_fragment;

    #[test]
    fn test_roundtrip_simple() {
        let input = r#"<div class="row"><p>Hello</p></div>"#;
        assert_eq!(serialize_fragment(&parse_fragment(input)), input);
    }

    #[test]
    fn test_roundtrip_preserves_attribute_order() {
        let input = r#"<div data-azb="az_video" class="az-element" data-azat-url="v.mp4"></div>"#;
        assert_eq!(serialize_fragment(&parse_fragment(input)), input);
    }

    #[test]
    fn test_roundtrip_text_around_elements() {
        let input = "before<span>in</span>between<b>bold</b>after";
        assert_eq!(serialize_fragment(&parse_fragment(input)), input);
    }

    #[test]
    fn test_void_element_no_close_tag() {
        let input = r#"<img src="a.png"><br>"#;
        assert_eq!(serialize_fragment(&parse_fragment(input)), input);
    }

    #[test]
    fn test_empty_element_keeps_close_tag() {
        let input = "<div></div>";
        assert_eq!(serialize_fragment(&parse_fragment(input)), input);
    }

    #[test]
    fn test_script_body_roundtrips_raw() {
        let input = "<script>if (a < b && c) { run(); }</script>";
        assert_eq!(serialize_fragment(&parse_fragment(input)), input);
    }

    #[test]
    fn test_comment_roundtrip() {
        let input = "<!-- keep me --><div>x</div>";
        assert_eq!(serialize_fragment(&parse_fragment(input)), input);
    }

    #[test]
    fn test_text_escaped() {
        let root = Node::new("root")
            .with_children(vec![Node::new("p").with_text("a < b & c > d")]);
        assert_eq!(serialize_fragment(&root), "<p>a &lt; b &amp; c &gt; d</p>");
    }

    #[test]
    fn test_attr_escaped() {
        let root = Node::new("root")
            .with_children(vec![Node::new("div").with_attr("title", r#"say "hi" & go"#)]);
        assert_eq!(
            serialize_fragment(&root),
            r#"<div title="say &quot;hi&quot; &amp; go"></div>"#
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'y'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;y&#39;&lt;/a&gt;");
    }
}
