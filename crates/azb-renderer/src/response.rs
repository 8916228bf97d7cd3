//! Render response returned to the caller.

use serde::Serialize;
use serde_json::{Map, Value};

/// Whether the rendered fragment needs the front-end processing script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Plain markup; no client-side processing required.
    Static,
    /// The fragment references the front-end runtime (animations, counters,
    /// parallax, ...) and the caller must attach it.
    Dynamic,
}

/// Result of recomposing one fragment.
///
/// Created fresh per render request and mutated through the pipeline
/// stages. `library` keeps discovery order and may contain duplicates;
/// `settings` merges with later writes overriding earlier ones.
#[derive(Debug, Clone, Serialize)]
pub struct RenderResponse {
    /// The recomposed HTML fragment.
    pub output: String,
    /// Required asset library identifiers, in discovery order.
    pub library: Vec<String>,
    /// Front-end settings aggregated from resolved elements.
    pub settings: Map<String, Value>,
    /// Processing mode hint for the caller.
    pub mode: RenderMode,
}

impl RenderResponse {
    /// Create a static response wrapping unprocessed output.
    #[must_use]
    pub fn new(output: String) -> Self {
        Self {
            output,
            library: Vec::new(),
            settings: Map::new(),
            mode: RenderMode::Static,
        }
    }
}
