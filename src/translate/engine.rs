//! In-place translation of fixed page regions.

use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

use crate::dom::{
    Document,
    NodeId,
};
use crate::locale::Locale;

use super::dictionary::UiDictionary;

/// Selector set the engine expects from the page theme.
///
/// Every selector is optional at runtime: a region whose node is missing is
/// skipped silently and simply stays untranslated.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSelectors {
    /// Navigation container; every descendant label is translated.
    pub nav_id: String,
    /// Search input carrying a `placeholder` attribute.
    pub search_input_id: String,
    /// Search cancel control.
    pub search_cancel_id: String,
    /// Sidebar/panel headings.
    pub panel_heading_class: String,
    /// Post-meta posted/updated prefix spans (label only, date lives in a
    /// sibling node).
    pub post_meta_class: String,
    /// Share label.
    pub share_label_id: String,
    /// Related-posts heading.
    pub related_heading_id: String,
    /// Previous-post button carrying an `aria-label`.
    pub prev_button_id: String,
    /// Next-post button carrying an `aria-label`.
    pub next_button_id: String,
    /// Footer license text container.
    pub footer_license_id: String,
    /// External call-to-action button.
    pub cta_id: String,
    /// Tag tokens (trending tags and per-post tags).
    pub tag_class: String,
    /// Known post titles in recently-updated and related-posts lists.
    pub update_item_class: String,
    /// Post titles on a listing page.
    pub post_title_class: String,
    /// Post descriptions on a listing page.
    pub post_desc_class: String,
    /// Post links on a listing page carrying an `href`.
    pub post_link_class: String,
    /// Dedicated article title (payload substitution).
    pub article_title_id: String,
    /// Dedicated article body container (payload substitution).
    pub article_content_id: String,
    /// Transient locale-change toast.
    pub toast_id: String,
    /// Locale toggle control.
    pub toggle_control_id: String,
}

impl Default for EngineSelectors {
    fn default() -> Self {
        Self {
            nav_id: "site-nav".to_string(),
            search_input_id: "search-input".to_string(),
            search_cancel_id: "search-cancel".to_string(),
            panel_heading_class: "panel-heading".to_string(),
            post_meta_class: "post-meta-label".to_string(),
            share_label_id: "share-label".to_string(),
            related_heading_id: "related-heading".to_string(),
            prev_button_id: "post-prev".to_string(),
            next_button_id: "post-next".to_string(),
            footer_license_id: "footer-license".to_string(),
            cta_id: "sponsor-cta".to_string(),
            tag_class: "post-tag".to_string(),
            update_item_class: "update-item".to_string(),
            post_title_class: "post-title".to_string(),
            post_desc_class: "post-desc".to_string(),
            post_link_class: "post-link".to_string(),
            article_title_id: "article-title".to_string(),
            article_content_id: "article-content".to_string(),
            toast_id: "lang-toast".to_string(),
            toggle_control_id: "lang-toggle".to_string(),
        }
    }
}

/// Applies dictionaries to the fixed page regions, reversibly.
///
/// Toward the secondary locale, a region's current text/attribute is looked
/// up in the dictionary; on a hit the original value is cached on the node
/// (first mutation only) and overwritten. Toward the primary locale the
/// cached original is restored, so no primary-direction dictionary exists.
#[derive(Debug, Clone)]
pub struct DomTranslationEngine {
    /// Immutable dictionary tables.
    dictionary: UiDictionary,
    /// Page region selectors.
    selectors: EngineSelectors,
}

impl DomTranslationEngine {
    /// Creates an engine over the given dictionaries and selectors.
    #[must_use]
    pub const fn new(dictionary: UiDictionary, selectors: EngineSelectors) -> Self {
        Self { dictionary, selectors }
    }

    /// The selector configuration.
    #[must_use]
    pub const fn selectors(&self) -> &EngineSelectors {
        &self.selectors
    }

    /// Rewrites every known region of `doc` for `target`.
    pub fn apply(&self, doc: &mut Document, target: Locale) {
        self.apply_navigation(doc, target);
        self.apply_search(doc, target);
        self.apply_labels(doc, target);
        self.apply_tags(doc, target);
        self.apply_listing(doc, target);
    }

    /// Navigation labels: every descendant of the nav container.
    fn apply_navigation(&self, doc: &mut Document, target: Locale) {
        let Some(nav) = doc.by_id(&self.selectors.nav_id) else {
            tracing::debug!("navigation container not found; region skipped");
            return;
        };
        for node in doc.descendants(nav) {
            translate_text(doc, node, &self.dictionary.labels, target);
        }
    }

    /// Search placeholder and cancel label.
    fn apply_search(&self, doc: &mut Document, target: Locale) {
        if let Some(input) = doc.by_id(&self.selectors.search_input_id) {
            translate_attr(doc, input, "placeholder", &self.dictionary.labels, target);
        }
        if let Some(cancel) = doc.by_id(&self.selectors.search_cancel_id) {
            translate_text(doc, cancel, &self.dictionary.labels, target);
        }
    }

    /// Whole-string label regions: panel headings, post-meta prefixes, share
    /// and related labels, footer license, CTA button, prev/next aria-labels.
    fn apply_labels(&self, doc: &mut Document, target: Locale) {
        for node in doc.by_class(&self.selectors.panel_heading_class) {
            translate_text(doc, node, &self.dictionary.labels, target);
        }
        for node in doc.by_class(&self.selectors.post_meta_class) {
            translate_text(doc, node, &self.dictionary.labels, target);
        }

        let text_regions = [
            &self.selectors.share_label_id,
            &self.selectors.related_heading_id,
            &self.selectors.footer_license_id,
            &self.selectors.cta_id,
        ];
        for id in text_regions {
            let Some(node) = doc.by_id(id) else {
                tracing::debug!("label region '{id}' not found; skipped");
                continue;
            };
            translate_text(doc, node, &self.dictionary.labels, target);
        }

        for id in [&self.selectors.prev_button_id, &self.selectors.next_button_id] {
            if let Some(node) = doc.by_id(id) {
                translate_attr(doc, node, "aria-label", &self.dictionary.labels, target);
            }
        }
    }

    /// Tag tokens against the fixed tag vocabulary.
    fn apply_tags(&self, doc: &mut Document, target: Locale) {
        for node in doc.by_class(&self.selectors.tag_class) {
            translate_text(doc, node, &self.dictionary.tags, target);
        }
    }

    /// Known post titles, descriptions and links in lists and on listing
    /// pages.
    fn apply_listing(&self, doc: &mut Document, target: Locale) {
        for node in doc.by_class(&self.selectors.update_item_class) {
            translate_text(doc, node, &self.dictionary.titles, target);
        }
        for node in doc.by_class(&self.selectors.post_title_class) {
            translate_text(doc, node, &self.dictionary.titles, target);
        }
        for node in doc.by_class(&self.selectors.post_desc_class) {
            self.translate_description(doc, node, target);
        }
        for node in doc.by_class(&self.selectors.post_link_class) {
            translate_attr(doc, node, "href", &self.dictionary.paths, target);
        }
    }

    /// Descriptions: whole-string lookup first, then the ordered
    /// partial-substring phrase fallback.
    ///
    /// When zero phrases match, the text is left untouched and no cache
    /// entry is created, so a later restore never clobbers untranslated
    /// text.
    fn translate_description(&self, doc: &mut Document, node: NodeId, target: Locale) {
        match target {
            Locale::Secondary => {
                let Some(current) = doc.text(node) else {
                    return;
                };
                let translated = if let Some(whole) = self.dictionary.descriptions.get(current) {
                    whole.clone()
                } else if let Some(partial) = self.dictionary.apply_phrases(current) {
                    partial
                } else {
                    return;
                };
                doc.cache_original_text(node);
                doc.set_text(node, translated);
            }
            Locale::Primary => restore_text(doc, node),
        }
    }
}

/// Dictionary-driven text mutation with first-write original caching.
fn translate_text(doc: &mut Document, node: NodeId, table: &HashMap<String, String>, target: Locale) {
    match target {
        Locale::Secondary => {
            let Some(current) = doc.text(node) else {
                return;
            };
            let Some(translated) = table.get(current).cloned() else {
                return;
            };
            doc.cache_original_text(node);
            doc.set_text(node, translated);
        }
        Locale::Primary => restore_text(doc, node),
    }
}

/// Restores the cached original text, if one exists.
fn restore_text(doc: &mut Document, node: NodeId) {
    if let Some(original) = doc.original_text(node).map(ToString::to_string) {
        doc.set_text(node, original);
    }
}

/// Dictionary-driven attribute mutation with first-write original caching.
fn translate_attr(
    doc: &mut Document,
    node: NodeId,
    name: &str,
    table: &HashMap<String, String>,
    target: Locale,
) {
    match target {
        Locale::Secondary => {
            let Some(current) = doc.attr(node, name) else {
                return;
            };
            let Some(translated) = table.get(current).cloned() else {
                return;
            };
            doc.cache_original_attr(node, name);
            doc.set_attr(node, name, translated);
        }
        Locale::Primary => {
            if let Some(original) = doc.original_attr(node, name).map(ToString::to_string) {
                doc.set_attr(node, name, original);
            }
        }
    }
}
