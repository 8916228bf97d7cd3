//! Assets attached by resolved CMS elements.

use serde_json::{Map, Value};

/// Client assets a resolved element needs: asset library identifiers and
/// settings for the front-end.
///
/// Created per placeholder, filled by the rendering collaborator, merged
/// into the render response, and discarded. Libraries keep attachment
/// order and may repeat; settings merge with later writes overriding.
#[derive(Debug, Clone, Default)]
pub struct AttachedAssets {
    /// Asset library identifiers, in attachment order.
    pub libraries: Vec<String>,
    /// Front-end settings contributed by the element.
    pub settings: Map<String, Value>,
}

impl AttachedAssets {
    /// Create an empty asset set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an asset library.
    pub fn add_library(&mut self, library: impl Into<String>) {
        self.libraries.push(library.into());
    }

    /// Attach a front-end setting.
    pub fn add_setting(&mut self, key: impl Into<String>, value: Value) {
        self.settings.insert(key.into(), value);
    }
}
