//! Owned HTML fragment tree for AZ Builder content recomposition.
//!
//! Builder-authored markup is parsed into an owned [`Node`] tree, rewritten
//! in place by the recomposition pipeline, and serialized back to a fragment
//! string. The tree is deliberately simple: indexed child lists, explicit
//! removal and insertion, no shared mutable iteration. Pipeline stages that
//! mutate the tree first materialize a snapshot of matching [`NodePath`]s
//! via [`Node::collect_paths`], then address nodes through the paths.
//!
//! Parsing is tolerant: malformed markup never produces an error. Whatever
//! cannot be parsed is preserved verbatim as text (see [`parse_fragment`]).
//!
//! # Example
//!
//! ```
//! use azb_dom::{parse_fragment, serialize_fragment};
//!
//! let doc = parse_fragment(r#"<div class="row"><p>Hello</p></div>"#);
//! assert_eq!(
//!     serialize_fragment(&doc),
//!     r#"<div class="row"><p>Hello</p></div>"#
//! );
//! ```

mod entities;
mod parse;
mod serialize;

pub use entities::convert_html_entities;
pub use parse::parse_fragment;
pub use serialize::{escape_html, serialize_fragment};

/// Synthetic root element wrapped around fragments during parsing.
pub(crate) const WRAPPER_TAG: &str = "azb-fragment";

/// Tag used internally for comment nodes.
const COMMENT_TAG: &str = "!comment";

/// HTML void elements: no closing tag, no content.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text content is serialized without escaping.
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

pub(crate) fn is_void(tag: &str) -> bool {
    VOID_TAGS.iter().any(|t| tag.eq_ignore_ascii_case(t))
}

pub(crate) fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_TAGS.iter().any(|t| tag.eq_ignore_ascii_case(t))
}

/// Index path addressing a node relative to an ancestor.
///
/// `[2, 0]` is the first child of the ancestor's third child. Paths come
/// from [`Node::collect_paths`] and stay valid as long as no node on or
/// before the path is removed.
pub type NodePath = Vec<usize>;

/// Node in a parsed HTML fragment tree.
///
/// Follows the text/tail model: `text` is the content before the first
/// child, each child's `tail` is the content between that child and the
/// next sibling. Attributes keep their authored order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Element tag name as authored.
    pub tag: String,
    /// Attributes in authored order.
    pub attrs: Vec<(String, String)>,
    /// Text before the first child (comment body for comment nodes).
    pub text: String,
    /// Text between this node and its next sibling.
    pub tail: String,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Node {
    /// Create a new element node with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Create a comment node.
    #[must_use]
    pub fn comment(body: impl Into<String>) -> Self {
        Self {
            tag: COMMENT_TAG.to_owned(),
            text: body.into(),
            ..Self::default()
        }
    }

    /// Set text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Append an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Set children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Whether this node is a comment.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.tag == COMMENT_TAG
    }

    /// Case-insensitive tag comparison.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Get an attribute value by exact name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value or appending.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.attrs.iter_mut().find(|(k, _)| *k == name) {
            entry.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    /// Remove an attribute. Returns whether it was present.
    pub fn remove_attr(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|(k, _)| k != name);
        self.attrs.len() != before
    }

    /// Substring match against the `class` attribute.
    ///
    /// The authoring contract matches class markers by substring (the
    /// original `contains(@class, ...)` selectors), not by token, so
    /// `class_contains("az-element")` also matches `class="az-element-x"`.
    #[must_use]
    pub fn class_contains(&self, needle: &str) -> bool {
        self.attr("class").is_some_and(|c| c.contains(needle))
    }

    /// Remove all content (text and children), keeping attributes and tail.
    pub fn clear_content(&mut self) {
        self.text.clear();
        self.children.clear();
    }

    /// Replace this node's content with a parsed fragment's content.
    ///
    /// The node keeps its tag, attributes and tail; text and children are
    /// taken from the fragment root.
    pub fn set_content_from(&mut self, fragment: Node) {
        self.text = fragment.text;
        self.children = fragment.children;
    }

    /// Collect paths of all descendants matching the predicate.
    ///
    /// Depth-first preorder, i.e. document order. The receiver itself is not
    /// tested; paths are relative to it.
    #[must_use]
    pub fn collect_paths(&self, matches: &dyn Fn(&Node) -> bool) -> Vec<NodePath> {
        let mut paths = Vec::new();
        let mut prefix = Vec::new();
        collect_into(self, matches, &mut prefix, &mut paths);
        paths
    }

    /// Get the node at a path.
    #[must_use]
    pub fn node_at(&self, path: &[usize]) -> Option<&Node> {
        let mut node = self;
        for &idx in path {
            node = node.children.get(idx)?;
        }
        Some(node)
    }

    /// Get the node at a path, mutably.
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let mut node = self;
        for &idx in path {
            node = node.children.get_mut(idx)?;
        }
        Some(node)
    }

    /// Remove the node at a path, returning it.
    ///
    /// The removed node's tail is reattached to the preceding sibling (or
    /// the parent's text), so surrounding content is not lost. Returns
    /// `None` for the empty path or a dangling index.
    pub fn remove_at(&mut self, path: &[usize]) -> Option<Node> {
        let (&idx, parent_path) = path.split_last()?;
        let parent = self.node_at_mut(parent_path)?;
        if idx >= parent.children.len() {
            return None;
        }
        let node = parent.children.remove(idx);
        if !node.tail.is_empty() {
            if idx == 0 {
                parent.text.push_str(&node.tail);
            } else {
                parent.children[idx - 1].tail.push_str(&node.tail);
            }
        }
        Some(node)
    }
}

fn collect_into(
    node: &Node,
    matches: &dyn Fn(&Node) -> bool,
    prefix: &mut Vec<usize>,
    paths: &mut Vec<NodePath>,
) {
    for (idx, child) in node.children.iter().enumerate() {
        prefix.push(idx);
        if matches(child) {
            paths.push(prefix.clone());
        }
        collect_into(child, matches, prefix, paths);
        prefix.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Node {
        // <root><div class="a"><span/></div><p/></root>
        Node::new("root").with_children(vec![
            Node::new("div")
                .with_attr("class", "a")
                .with_children(vec![Node::new("span")]),
            Node::new("p"),
        ])
    }

    #[test]
    fn test_attr_lookup_and_update() {
        let mut node = Node::new("div").with_attr("id", "x").with_attr("class", "a b");
        assert_eq!(node.attr("id"), Some("x"));
        assert_eq!(node.attr("missing"), None);

        node.set_attr("id", "y");
        assert_eq!(node.attr("id"), Some("y"));

        node.set_attr("data-new", "1");
        assert_eq!(node.attrs.len(), 3);

        assert!(node.remove_attr("class"));
        assert!(!node.remove_attr("class"));
    }

    #[test]
    fn test_class_contains_is_substring_match() {
        let node = Node::new("div").with_attr("class", "row az-element-wide");
        assert!(node.class_contains("az-element"));
        assert!(!node.class_contains("az-ctnr"));

        let bare = Node::new("div");
        assert!(!bare.class_contains("az-element"));
    }

    #[test]
    fn test_collect_paths_document_order() {
        let tree = sample_tree();
        let all = tree.collect_paths(&|_| true);
        assert_eq!(all, vec![vec![0], vec![0, 0], vec![1]]);

        let divs = tree.collect_paths(&|n| n.has_tag("div"));
        assert_eq!(divs, vec![vec![0]]);
    }

    #[test]
    fn test_node_at_path() {
        let tree = sample_tree();
        assert_eq!(tree.node_at(&[0, 0]).map(|n| n.tag.as_str()), Some("span"));
        assert_eq!(tree.node_at(&[]).map(|n| n.tag.as_str()), Some("root"));
        assert!(tree.node_at(&[5]).is_none());
    }

    #[test]
    fn test_remove_at_reattaches_tail() {
        // <root>a<b/>mid<c/>end</root>
        let mut tree = Node::new("root").with_text("a").with_children(vec![
            Node::new("b").with_text("").with_children(vec![]),
            Node::new("c"),
        ]);
        tree.children[0].tail = "mid".to_owned();
        tree.children[1].tail = "end".to_owned();

        let removed = tree.remove_at(&[0]).unwrap();
        assert_eq!(removed.tag, "b");
        // "mid" moved to the parent's text since <b> was the first child
        assert_eq!(tree.text, "amid");
        assert_eq!(tree.children.len(), 1);

        let removed = tree.remove_at(&[0]).unwrap();
        assert_eq!(removed.tag, "c");
        assert_eq!(tree.text, "amidend");
    }

    #[test]
    fn test_clear_and_splice_content() {
        let mut node = Node::new("div")
            .with_attr("data-azb", "az_block-x")
            .with_text("old")
            .with_children(vec![Node::new("span")]);
        node.tail = "after".to_owned();

        node.clear_content();
        assert!(node.text.is_empty());
        assert!(node.children.is_empty());

        let fragment = Node::new(WRAPPER_TAG)
            .with_text("new")
            .with_children(vec![Node::new("p")]);
        node.set_content_from(fragment);

        assert_eq!(node.text, "new");
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.attr("data-azb"), Some("az_block-x"));
        assert_eq!(node.tail, "after");
    }
}
