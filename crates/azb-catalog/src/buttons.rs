//! Button style discovery.
//!
//! Button styles are probed from small `.html` fragments shipped in element
//! folders (the builder module's own, plus any an enabled theme provides).
//! Each probe's first `class="..."` attribute is taken, framework button
//! classes and the trailing element marker are stripped, and what remains
//! is the style's class list.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::registry::ThemeRegistry;

/// First class attribute in a probe fragment.
static CLASS_ATTR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"class="(.*?)""#).expect("invalid class attr regex"));

/// Framework button classes and the trailing element marker.
static BUTTON_NOISE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(btn\s)|(btn-\w+\s)|(\saz-\w+$)").expect("invalid noise regex"));

/// An element folder: filesystem path plus its public URL.
#[derive(Debug, Clone)]
pub struct ElementFolder {
    /// Filesystem path of the folder.
    pub path: PathBuf,
    /// URL the folder is served under.
    pub url: String,
}

/// Element folders to scan: the builder module's `elements` folder plus
/// each enabled theme's `elements` directory.
#[must_use]
pub fn element_folders(module_dir: &Path, themes: &dyn ThemeRegistry) -> Vec<ElementFolder> {
    let mut folders = vec![ElementFolder {
        path: module_dir.join("elements"),
        url: format!("/{}/elements", module_dir.display()),
    }];

    for theme in themes.themes() {
        if !theme.enabled {
            continue;
        }
        if let Some(dir) = theme.elements_dir {
            folders.push(ElementFolder {
                path: dir,
                url: theme.elements_url.unwrap_or_default(),
            });
        }
    }
    folders
}

/// Scan element folders for button style probes.
///
/// Returns style name (probe file stem) → class list. Unreadable or
/// malformed probes are skipped; a probe whose classes strip to nothing is
/// dropped.
#[must_use]
pub fn scan_button_styles(folders: &[ElementFolder]) -> BTreeMap<String, String> {
    let mut styles = BTreeMap::new();

    for folder in folders {
        let buttons_dir = folder.path.join("Buttons");
        if !buttons_dir.is_dir() {
            continue;
        }
        let pattern = format!("{}/**/*.html", buttons_dir.display());
        let entries = match glob::glob(&pattern) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid button style glob pattern");
                continue;
            }
        };

        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read button style entry");
                    continue;
                }
            };
            let markup = match std::fs::read_to_string(&path) {
                Ok(markup) => markup,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to read button style probe");
                    continue;
                }
            };
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Some(classes) = extract_button_classes(&markup) {
                styles.insert(name.to_owned(), classes);
            }
        }
    }
    styles
}

fn extract_button_classes(markup: &str) -> Option<String> {
    let classes = CLASS_ATTR_PATTERN.captures(markup)?.get(1)?.as_str();
    let stripped = BUTTON_NOISE_PATTERN.replace_all(classes, "").into_owned();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped)
    }
}
