//! Descriptor resolution against the host CMS.

use crate::{AttachedAssets, BlockTarget, ElementDescriptor, ViewOverrides};

/// Markup substituted for a placeholder that resolved to nothing.
///
/// Guarantees every placeholder is replaced and the output is well-formed;
/// no unresolved marker ever reaches the final fragment.
pub const EMPTY_PLACEHOLDER: &str = r#"<div class="empty-cms-block-placeholder"></div>"#;

/// Host collaborator that renders CMS blocks.
///
/// The implementation owns access control, block instantiation, and
/// flattening the render result into HTML. Returning `None` (or empty
/// markup) means "no output": the element degrades to the inert
/// placeholder, never an error.
pub trait BlockSource {
    /// Render a block to HTML, attaching any assets it needs.
    fn render(
        &self,
        target: &BlockTarget,
        settings: &str,
        overrides: &ViewOverrides,
        assets: &mut AttachedAssets,
    ) -> Option<String>;
}

/// Host collaborator that renders view displays.
///
/// The implementation applies display-level overrides (title and exposed
/// filter visibility, pager override, item count and offset, contextual
/// filter arguments, field toggles).
pub trait ViewSource {
    /// Render a view display to HTML, attaching any assets it needs.
    fn render(
        &self,
        view_id: &str,
        display_id: &str,
        settings: &str,
        overrides: &ViewOverrides,
        assets: &mut AttachedAssets,
    ) -> Option<String>;
}

/// [`BlockSource`] that renders nothing.
///
/// Every block placeholder degrades to [`EMPTY_PLACEHOLDER`]. Used for
/// previews outside a host CMS and in tests.
#[derive(Debug, Default)]
pub struct NullBlockSource;

impl BlockSource for NullBlockSource {
    fn render(
        &self,
        _target: &BlockTarget,
        _settings: &str,
        _overrides: &ViewOverrides,
        _assets: &mut AttachedAssets,
    ) -> Option<String> {
        None
    }
}

/// [`ViewSource`] that renders nothing.
#[derive(Debug, Default)]
pub struct NullViewSource;

impl ViewSource for NullViewSource {
    fn render(
        &self,
        _view_id: &str,
        _display_id: &str,
        _settings: &str,
        _overrides: &ViewOverrides,
        _assets: &mut AttachedAssets,
    ) -> Option<String> {
        None
    }
}

/// Resolve a descriptor to markup.
///
/// Dispatches to the matching collaborator; any missing, empty, or unknown
/// result yields exactly one [`EMPTY_PLACEHOLDER`] div.
pub fn resolve_element(
    descriptor: &ElementDescriptor,
    settings: &str,
    overrides: &ViewOverrides,
    assets: &mut AttachedAssets,
    blocks: &dyn BlockSource,
    views: &dyn ViewSource,
) -> String {
    let output = match descriptor {
        ElementDescriptor::Block(target) => blocks.render(target, settings, overrides, assets),
        ElementDescriptor::View {
            view_id,
            display_id,
        } => views.render(view_id, display_id, settings, overrides, assets),
        ElementDescriptor::Unknown => None,
    };

    match output {
        Some(html) if !html.is_empty() => html,
        _ => EMPTY_PLACEHOLDER.to_owned(),
    }
}
