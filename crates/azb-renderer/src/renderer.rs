//! The recomposition pipeline.

use azb_dom::{Node, parse_fragment, serialize_fragment};
use azb_elements::{
    AttachedAssets, BlockSource, ViewOverrides, ViewSource, parse_identifier, resolve_element,
    strip_scheme_prefix,
};
use azb_tokens::PathContext;

use crate::contract::{
    ANIMATION_ATTR, BUILDER_CONTAINER_CLASS, BUILDER_ELEMENT_CLASS, CMS_ELEMENT_CLASS,
    DYNAMIC_ELEMENT_KINDS, EDITOR_ATTR_PREFIX, ELEMENT_ATTR, ELEMENT_KIND_PREFIX,
    FRONTEND_SCRIPT_MARKERS, ICON_FONT_FREE, ICON_FONT_PRO, LIBRARIES_ATTR, LIBRARY_NAMESPACE,
    RAW_HTML_CLASS, SETTINGS_ATTR,
};
use crate::response::{RenderMode, RenderResponse};

/// Recomposes builder-authored fragments against live CMS state.
///
/// One renderer serves one request: the path context is request-scoped and
/// the collaborators are synchronous in-process ports. Stages run in a
/// fixed order over a single owned document; no stage is re-entrant.
///
/// # Example
///
/// ```
/// use azb_elements::{NullBlockSource, NullViewSource};
/// use azb_renderer::ContentRenderer;
/// use azb_tokens::PathContext;
///
/// let paths = PathContext::new("https://example.com", "", "files", "private", "modules/azb");
/// let renderer = ContentRenderer::new(&paths, &NullBlockSource, &NullViewSource);
///
/// let response = renderer.render("<p>Hello</p>", false);
/// assert_eq!(response.output, "<p>Hello</p>");
/// ```
pub struct ContentRenderer<'a> {
    paths: &'a PathContext,
    blocks: &'a dyn BlockSource,
    views: &'a dyn ViewSource,
}

impl<'a> ContentRenderer<'a> {
    /// Create a renderer over the given request paths and collaborators.
    #[must_use]
    pub fn new(
        paths: &'a PathContext,
        blocks: &'a dyn BlockSource,
        views: &'a dyn ViewSource,
    ) -> Self {
        Self {
            paths,
            blocks,
            views,
        }
    }

    /// Recompose a stored fragment into final markup plus its asset
    /// manifest.
    ///
    /// With `editor_enabled`, editor data attributes are preserved verbatim
    /// for the client-side builder; otherwise they are stripped from
    /// non-dynamic elements.
    #[must_use]
    pub fn render(&self, content: &str, editor_enabled: bool) -> RenderResponse {
        let mut response = RenderResponse::new(self.paths.restore_tokens(content));
        detect_mode(&mut response);

        let mut doc = parse_fragment(&response.output);
        strip_attached_assets(&mut doc);
        collect_libraries(&doc, &mut response);
        self.resolve_cms_elements(&mut doc, &mut response);
        if !editor_enabled {
            cleanup_editor_attributes(&mut doc);
        }
        response.output = serialize_fragment(&doc);
        response
    }

    /// Replace every CMS placeholder with rendered host content.
    fn resolve_cms_elements(&self, doc: &mut Node, response: &mut RenderResponse) {
        let placeholders =
            doc.collect_paths(&|n| n.has_tag("div") && n.class_contains(CMS_ELEMENT_CLASS));

        for path in &placeholders {
            let Some(node) = doc.node_at_mut(path) else {
                continue;
            };
            node.clear_content();

            let raw_id = node.attr(ELEMENT_ATTR).unwrap_or_default().to_owned();
            let settings = node.attr(SETTINGS_ATTR).unwrap_or_default().to_owned();
            let overrides = ViewOverrides::from_attrs(|name| node.attr(name));
            let descriptor = parse_identifier(strip_scheme_prefix(&raw_id));

            let mut assets = AttachedAssets::new();
            let html = resolve_element(
                &descriptor,
                &settings,
                &overrides,
                &mut assets,
                self.blocks,
                self.views,
            );
            node.set_content_from(parse_fragment(&html));

            response.library.extend(assets.libraries);
            for (key, value) in assets.settings {
                response.settings.insert(key, value);
            }
        }
    }
}

/// Mark the response dynamic when the fragment references the front-end
/// runtime script (circle counters, parallax and video backgrounds, ...).
fn detect_mode(response: &mut RenderResponse) {
    if FRONTEND_SCRIPT_MARKERS
        .iter()
        .any(|marker| response.output.contains(marker))
    {
        response.mode = RenderMode::Dynamic;
    }
}

/// Strip `<script src>` and stylesheet `<link>` tags; their assets are
/// attached through libraries instead.
///
/// The first element whose parent is a raw-HTML passthrough container halts
/// the entire pass — stylesheets included when hit from the script loop.
/// Long-standing behavior that existing content relies on.
fn strip_attached_assets(doc: &mut Node) {
    let scripts = doc.collect_paths(&|n| n.has_tag("script") && n.attr("src").is_some());
    // Reverse document order so each removal leaves the remaining paths
    // valid
    for path in scripts.iter().rev() {
        if parent_is_raw_html(doc, path) {
            return;
        }
        doc.remove_at(path);
    }

    let stylesheets =
        doc.collect_paths(&|n| n.has_tag("link") && n.attr("rel") == Some("stylesheet"));
    for path in stylesheets.iter().rev() {
        if parent_is_raw_html(doc, path) {
            return;
        }
        doc.remove_at(path);
    }
}

fn parent_is_raw_html(doc: &Node, path: &[usize]) -> bool {
    let Some((_, parent_path)) = path.split_last() else {
        return false;
    };
    doc.node_at(parent_path)
        .is_some_and(|parent| parent.class_contains(RAW_HTML_CLASS))
}

/// Aggregate declared asset libraries in document order.
fn collect_libraries(doc: &Node, response: &mut RenderResponse) {
    let declaring = doc.collect_paths(&|n| n.attr(LIBRARIES_ATTR).is_some());

    for path in &declaring {
        let Some(keys) = doc.node_at(path).and_then(|n| n.attr(LIBRARIES_ATTR)) else {
            continue;
        };
        for key in keys.split_whitespace() {
            let key = if key == ICON_FONT_PRO {
                ICON_FONT_FREE
            } else {
                key
            };
            response.library.push(format!("{LIBRARY_NAMESPACE}{key}"));
        }
    }
}

/// Remove editor data attributes from builder elements.
///
/// Dynamic element kinds and animated elements keep theirs: the front-end
/// script reads them outside the editor too.
fn cleanup_editor_attributes(doc: &mut Node) {
    let builder_elements = doc.collect_paths(&|n| {
        n.class_contains(BUILDER_ELEMENT_CLASS) || n.class_contains(BUILDER_CONTAINER_CLASS)
    });

    for path in &builder_elements {
        let Some(node) = doc.node_at_mut(path) else {
            continue;
        };
        let kind = node
            .attr(ELEMENT_ATTR)
            .unwrap_or_default()
            .replace(ELEMENT_KIND_PREFIX, "");
        let animated = !node.attr(ANIMATION_ATTR).unwrap_or_default().is_empty();
        if kind.is_empty() || DYNAMIC_ELEMENT_KINDS.contains(&kind.as_str()) || animated {
            continue;
        }
        node.attrs
            .retain(|(name, _)| !name.to_ascii_lowercase().starts_with(EDITOR_ATTR_PREFIX));
    }
}

#[cfg(test)]
mod tests {
    use azb_elements::{NullBlockSource, NullViewSource};
    use azb_tokens::PathContext;

    use super::*;

    fn test_paths() -> PathContext {
        PathContext::new(
            "https://example.com",
            "",
            "sites/default/files",
            "sites/default/files-private",
            "modules/azbuilder",
        )
    }

    #[test]
    fn test_mode_static_without_frontend_script() {
        let paths = test_paths();
        let renderer = ContentRenderer::new(&paths, &NullBlockSource, &NullViewSource);
        let response = renderer.render("<p>plain</p>", false);
        assert_eq!(response.mode, RenderMode::Static);
    }

    #[test]
    fn test_mode_dynamic_with_frontend_script() {
        let paths = test_paths();
        let renderer = ContentRenderer::new(&paths, &NullBlockSource, &NullViewSource);
        let content = r#"<script src="/modules/azbuilder/dxpr_frontend.min.js"></script><p>x</p>"#;
        let response = renderer.render(content, false);
        assert_eq!(response.mode, RenderMode::Dynamic);
    }

    #[test]
    fn test_script_with_src_stripped() {
        let paths = test_paths();
        let renderer = ContentRenderer::new(&paths, &NullBlockSource, &NullViewSource);
        let content = r#"<div><script src="x.js"></script><p>kept</p></div>"#;
        let response = renderer.render(content, false);
        assert_eq!(response.output, "<div><p>kept</p></div>");
    }

    #[test]
    fn test_inline_script_kept() {
        let paths = test_paths();
        let renderer = ContentRenderer::new(&paths, &NullBlockSource, &NullViewSource);
        let content = "<div><script>var a = 1;</script></div>";
        let response = renderer.render(content, false);
        assert_eq!(response.output, content);
    }

    #[test]
    fn test_stylesheet_link_stripped_other_links_kept() {
        let paths = test_paths();
        let renderer = ContentRenderer::new(&paths, &NullBlockSource, &NullViewSource);
        let content = r#"<link rel="stylesheet" href="a.css"><link rel="preload" href="b.js">"#;
        let response = renderer.render(content, false);
        assert_eq!(response.output, r#"<link rel="preload" href="b.js">"#);
    }

    #[test]
    fn test_raw_html_container_halts_strip_pass() {
        let paths = test_paths();
        let renderer = ContentRenderer::new(&paths, &NullBlockSource, &NullViewSource);
        // The protected script is hit first (last in document order), so
        // the earlier script and the stylesheet all survive
        let content = concat!(
            r#"<div><script src="first.js"></script></div>"#,
            r#"<div class="az-html"><script src="protected.js"></script></div>"#,
            r#"<link rel="stylesheet" href="style.css">"#,
        );
        let response = renderer.render(content, false);
        assert!(response.output.contains("first.js"));
        assert!(response.output.contains("protected.js"));
        assert!(response.output.contains("style.css"));
    }

    #[test]
    fn test_library_collection_order_and_rewrite() {
        let paths = test_paths();
        let renderer = ContentRenderer::new(&paths, &NullBlockSource, &NullViewSource);
        let content = concat!(
            r#"<div data-dxpr-builder-libraries="slider font_awesome_5_pro"><p>a</p></div>"#,
            r#"<div data-dxpr-builder-libraries="slider"><p>b</p></div>"#,
        );
        let response = renderer.render(content, false);
        assert_eq!(
            response.library,
            vec![
                "dxpr_builder/elements.slider",
                "dxpr_builder/elements.font_awesome_5_free",
                "dxpr_builder/elements.slider",
            ]
        );
    }
}
