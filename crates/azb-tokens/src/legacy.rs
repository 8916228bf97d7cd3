//! Legacy identifier migration for stored content.

use crate::Replacements;

/// Fixed rename table for content authored under the builder's previous
/// product name. The last two entries map new names back to the legacy
/// on-disk directories, which were never migrated.
const LEGACY_RENAMES: &[(&str, &str)] = &[
    ("glazed_builder", "dxpr_builder"),
    ("glazed-builder", "dxpr-builder"),
    ("glazed_frontend", "dxpr_frontend"),
    ("glazedBuilder", "dxprBuilder"),
    ("glazed-util", "dxpr-theme-util"),
    ("panel-glazed", "panel-dxpr"),
    ("glazed.css", "dxpr.css"),
    ("files/dxpr-builder", "files/glazed-builder"),
    ("dxpr_builder_images", "glazed_builder_images"),
];

/// Migrate legacy product identifiers in stored content.
#[must_use]
pub fn apply_legacy_renames(content: &str) -> String {
    let mut replacements = Replacements::with_capacity(LEGACY_RENAMES.len());
    for (from, to) in LEGACY_RENAMES {
        replacements.add(*from, *to);
    }
    let mut out = content.to_owned();
    replacements.apply(&mut out);
    out
}
