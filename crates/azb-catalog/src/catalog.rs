//! The catalog service: cached CMS metadata listings.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use azb_cache::{Cache, CacheBucket, CacheBucketExt, Memo};

use crate::registry::{BlockRegistry, ViewRegistry};
use crate::views::{ViewDisplaySettings, display_settings_for_view};

/// Bucket holding all catalog entries.
const BUCKET: &str = "catalog";

/// Cache key for the block element listing.
const KEY_BLOCKS: &str = "cms_elements_blocks";
/// Cache key for the view element listing.
const KEY_VIEWS: &str = "cms_elements_views";
/// Cache key prefix for the per-user disallowed set.
const KEY_DISALLOWED: &str = "cms_disallowed_elements";
/// Cache key for view display settings.
const KEY_VIEW_SETTINGS: &str = "cms_view_elements_settings";
/// Cache key for view tags.
const KEY_VIEWS_TAGS: &str = "cms_views_tags";

/// Blocks that never appear in the element browser: page-variant-only
/// blocks, entity blocks that make no sense standalone, and the fallback
/// plugin.
const BLOCK_BLACKLIST: &[&str] = &[
    "page_title_block",
    "system_main_block",
    "entity_block:block",
    "entity_block:block_content",
    "entity_block:contact_message",
    "entity_block:content_moderation_state",
    "entity_block:crop",
    "entity_block:file",
    "entity_block:menu_link_content",
    "entity_block:path_alias",
    "entity_block:redirect",
    "entity_block:shortcut",
    "entity_block:webform",
    "entity_block:webform_submission",
    "broken",
];

/// Disallowed entries that are always allowed back in.
const DISALLOWED_EXEMPTIONS: &[&str] = &[
    "az_block-user_login_block",
    "az_block-dxpr_theme_helper_user_registersdf",
];

/// The element browser catalog: placeable elements and, per acting user,
/// the elements access control rules out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementCatalog {
    /// Identifier → display label, blocks and view displays combined.
    pub list: BTreeMap<String, String>,
    /// Identifiers the acting user may not place.
    pub disallowed: BTreeSet<String>,
}

/// Memoized, cached access to CMS metadata listings.
///
/// Lookup order per listing: request memo → process cache (validated by the
/// settings etag) → recompute from the registries. The memo lives for one
/// request; call [`reset_request_memo`](Self::reset_request_memo) at request
/// boundaries. Cache invalidation is external — saving builder settings
/// changes the etag — but [`invalidate`](Self::invalidate) also removes the
/// keys outright.
pub struct CatalogService<'a> {
    bucket: Box<dyn CacheBucket>,
    etag: String,
    user_id: String,
    blocks: &'a dyn BlockRegistry,
    views: &'a dyn ViewRegistry,
    elements: Memo<ElementCatalog>,
    view_settings: Memo<BTreeMap<String, ViewDisplaySettings>>,
    views_tags: Memo<BTreeMap<String, String>>,
}

impl<'a> CatalogService<'a> {
    /// Create a catalog service for one request.
    ///
    /// `etag` is the settings revision (see `BuilderConfig::cache_etag`);
    /// `user_id` identifies the acting user for permission-sensitive
    /// listings.
    #[must_use]
    pub fn new(
        cache: &dyn Cache,
        etag: impl Into<String>,
        user_id: impl Into<String>,
        blocks: &'a dyn BlockRegistry,
        views: &'a dyn ViewRegistry,
    ) -> Self {
        Self {
            bucket: cache.bucket(BUCKET),
            etag: etag.into(),
            user_id: user_id.into(),
            blocks,
            views,
            elements: Memo::new(),
            view_settings: Memo::new(),
            views_tags: Memo::new(),
        }
    }

    /// The element browser catalog for the acting user.
    #[must_use]
    pub fn element_catalog(&self) -> ElementCatalog {
        self.elements.get_or_compute(|| self.build_element_catalog())
    }

    /// View display settings for every enabled view.
    #[must_use]
    pub fn view_display_settings(&self) -> BTreeMap<String, ViewDisplaySettings> {
        self.view_settings.get_or_compute(|| {
            if let Some(cached) = self.bucket.get_json(KEY_VIEW_SETTINGS, &self.etag) {
                return cached;
            }
            let settings = self.build_view_display_settings();
            self.bucket.set_json(KEY_VIEW_SETTINGS, &self.etag, &settings);
            settings
        })
    }

    /// Display key → owning view id, for filtering the element browser.
    #[must_use]
    pub fn views_tags(&self) -> BTreeMap<String, String> {
        self.views_tags.get_or_compute(|| {
            if let Some(cached) = self.bucket.get_json(KEY_VIEWS_TAGS, &self.etag) {
                return cached;
            }
            let tags = self.build_views_tags();
            self.bucket.set_json(KEY_VIEWS_TAGS, &self.etag, &tags);
            tags
        })
    }

    /// Drop the request-scoped memos. Call at request boundaries.
    pub fn reset_request_memo(&self) {
        self.elements.reset();
        self.view_settings.reset();
        self.views_tags.reset();
    }

    /// Remove all catalog entries from the process cache.
    pub fn invalidate(&self) {
        self.bucket.remove(KEY_BLOCKS);
        self.bucket.remove(KEY_VIEWS);
        self.bucket.remove(&self.disallowed_key());
        self.bucket.remove(KEY_VIEW_SETTINGS);
        self.bucket.remove(KEY_VIEWS_TAGS);
        self.reset_request_memo();
    }

    fn disallowed_key(&self) -> String {
        format!("{KEY_DISALLOWED}:{}", self.user_id)
    }

    fn build_element_catalog(&self) -> ElementCatalog {
        let disallowed_key = self.disallowed_key();

        let cached_blocks: Option<BTreeMap<String, String>> =
            self.bucket.get_json(KEY_BLOCKS, &self.etag);
        let cached_disallowed: Option<BTreeSet<String>> =
            self.bucket.get_json(&disallowed_key, &self.etag);

        let (block_elements, disallowed) = match (cached_blocks, cached_disallowed) {
            (Some(blocks), Some(disallowed)) => (blocks, disallowed),
            _ => {
                let (blocks, disallowed) = self.build_block_elements();
                self.bucket.set_json(KEY_BLOCKS, &self.etag, &blocks);
                self.bucket.set_json(&disallowed_key, &self.etag, &disallowed);
                (blocks, disallowed)
            }
        };

        let view_elements: BTreeMap<String, String> =
            if let Some(cached) = self.bucket.get_json(KEY_VIEWS, &self.etag) {
                cached
            } else {
                let views = self.build_view_elements();
                self.bucket.set_json(KEY_VIEWS, &self.etag, &views);
                views
            };

        let mut list = block_elements;
        list.extend(view_elements);
        ElementCatalog { list, disallowed }
    }

    fn build_block_elements(&self) -> (BTreeMap<String, String>, BTreeSet<String>) {
        let mut elements = BTreeMap::new();
        let mut disallowed = BTreeSet::new();

        for definition in self.blocks.definitions() {
            let blacklisted = BLOCK_BLACKLIST.contains(&definition.id.as_str());
            let is_view = definition.provider == "views";
            let is_ctools = definition.provider == "ctools";
            if blacklisted || is_view || is_ctools {
                continue;
            }

            // Entity block access depends solely on the entity configured on
            // the placed instance, which does not exist yet here; list them
            // unconditionally
            let access = definition.id.contains("entity_block")
                || self.blocks.block_access(&definition.id);
            if !access {
                disallowed.insert(format!("az_block-{}", definition.id));
            }

            elements.insert(
                format!("block-{}", definition.id),
                format!(
                    "Block: {}: {}",
                    ucfirst(&definition.category),
                    definition.admin_label
                ),
            );
        }

        for exemption in DISALLOWED_EXEMPTIONS {
            disallowed.remove(*exemption);
        }

        (elements, disallowed)
    }

    fn build_view_elements(&self) -> BTreeMap<String, String> {
        let mut elements = BTreeMap::new();

        for id in self.views.view_ids() {
            let view = match self.views.view(&id) {
                Ok(view) => view,
                Err(e) => {
                    tracing::warn!(view = %id, error = %e, "Failed to load view definition");
                    continue;
                }
            };
            if !view.enabled {
                continue;
            }
            for display in &view.displays {
                elements.insert(
                    format!("view-{}-{}", view.id, display.id),
                    format!("View: {} ({})", view.label, display.label),
                );
            }
        }
        elements
    }

    fn build_view_display_settings(&self) -> BTreeMap<String, ViewDisplaySettings> {
        let mut settings = BTreeMap::new();

        for id in self.views.view_ids() {
            let view = match self.views.view(&id) {
                Ok(view) => view,
                Err(e) => {
                    tracing::warn!(view = %id, error = %e, "Failed to load view definition");
                    continue;
                }
            };
            if !view.enabled {
                continue;
            }
            settings.extend(display_settings_for_view(&view));
        }
        settings
    }

    fn build_views_tags(&self) -> BTreeMap<String, String> {
        let mut tags = BTreeMap::new();

        for id in self.views.view_ids() {
            let view = match self.views.view(&id) {
                Ok(view) => view,
                Err(e) => {
                    tracing::warn!(view = %id, error = %e, "Failed to load view definition");
                    continue;
                }
            };
            if !view.enabled {
                continue;
            }
            for display in &view.displays {
                tags.insert(format!("az_view-{}-{}", view.id, display.id), view.id.clone());
            }
        }
        tags
    }
}

fn ucfirst(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
