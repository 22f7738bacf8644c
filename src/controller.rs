//! Locale toggle orchestration.
//!
//! One controller is constructed per page load. All of its work is
//! synchronous and runs to completion: the persistence write in [`toggle`]
//! happens before any document mutation, so a reload observes the chosen
//! locale even if the in-page pass were interrupted.
//!
//! [`toggle`]: ToggleController::toggle

use crate::dom::Document;
use crate::locale::{
    Locale,
    LocaleStore,
    ResolverConfig,
};
use crate::routes::RouteMap;
use crate::translate::{
    ContentRenderer,
    DomTranslationEngine,
    TranslationPayload,
};

/// What kind of document the controller is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Dedicated per-locale document; toggling navigates to the counterpart.
    Post,
    /// Listing or aggregated view; toggling rewrites markup in place.
    Listing,
}

/// The page the controller was constructed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Absolute path of the current document.
    pub path: String,
    /// Document kind.
    pub kind: PageKind,
}

/// Result of a toggle, for the host to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Navigate to the dedicated document at this path; the in-page
    /// lifecycle ends here.
    Redirect(String),
    /// The current document was rewritten in place.
    TranslatedInPlace,
}

/// Which policy one toggle resolved to.
enum TogglePolicy {
    /// Navigate away.
    Redirect(String),
    /// Rewrite in place.
    InPlace,
}

/// Cycles the page between the two locales.
///
/// The state machine has exactly the two locale states and no terminal
/// state; `toggle` flips between them for the lifetime of the page.
#[derive(Debug)]
pub struct ToggleController {
    /// Active locale.
    locale: Locale,
    /// Locale the document's markup was rendered in.
    document_default: Locale,
    /// Current page.
    page: PageContext,
    /// Persisted preference.
    store: LocaleStore,
    /// Dedicated-document table.
    routes: RouteMap,
    /// In-place translation engine.
    engine: DomTranslationEngine,
    /// Article body renderer.
    renderer: ContentRenderer,
    /// Embedded payload for this document, if any.
    payload: Option<TranslationPayload>,
}

impl ToggleController {
    /// Creates a controller for one page load.
    ///
    /// The initial locale comes from the resolver: URL prefix first, then
    /// the stored preference, then the primary default.
    #[must_use]
    pub fn new(
        page: PageContext,
        resolver: &ResolverConfig,
        store: LocaleStore,
        routes: RouteMap,
        engine: DomTranslationEngine,
        payload: Option<TranslationPayload>,
    ) -> Self {
        let locale = resolver.resolve(&page.path, store.get(), Locale::Primary);
        // With no stored or default signal, the path alone tells us which
        // locale the markup was rendered in.
        let document_default = resolver.resolve(&page.path, None, Locale::Primary);
        Self {
            locale,
            document_default,
            page,
            store,
            routes,
            engine,
            renderer: ContentRenderer::new(),
            payload,
        }
    }

    /// The active locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Applies the resolved locale to a freshly loaded document.
    ///
    /// A no-op when the active locale matches the locale the markup was
    /// rendered in.
    pub fn on_load(&mut self, doc: &mut Document) {
        if self.locale == self.document_default {
            return;
        }
        self.engine.apply(doc, self.locale);
        self.apply_payload(doc, self.locale);
    }

    /// Flips the locale and executes the toggle policy.
    ///
    /// The preference is persisted before any document mutation.
    pub fn toggle(&mut self, doc: &mut Document) -> ToggleOutcome {
        let next = self.locale.other();
        self.locale = next;
        self.store.set(next);

        match self.decide(next) {
            TogglePolicy::Redirect(path) => ToggleOutcome::Redirect(path),
            TogglePolicy::InPlace => {
                self.engine.apply(doc, next);
                self.apply_payload(doc, next);
                self.show_notice(doc, next);
                ToggleOutcome::TranslatedInPlace
            }
        }
    }

    /// Marks the toggle control as bound; returns whether it was newly
    /// bound.
    ///
    /// Rebinding is safe to repeat: only the first call returns `true`, so a
    /// host that re-runs its wiring never attaches a second handler.
    pub fn bind_toggle_control(&self, doc: &mut Document) -> bool {
        let Some(control) = doc.by_id(&self.engine.selectors().toggle_control_id) else {
            tracing::debug!("toggle control not found; nothing to bind");
            return false;
        };
        if doc.attr(control, "data-toggle-bound").is_some() {
            return false;
        }
        doc.set_attr(control, "data-toggle-bound", "true");
        true
    }

    /// Picks the policy for one toggle.
    ///
    /// This is the single decision point: redirect and in-place can never
    /// both fire for the same toggle. A post page without a route entry
    /// falls through to in-place, which may leave the old address visible —
    /// accepted degraded behavior, not an error.
    fn decide(&self, next: Locale) -> TogglePolicy {
        if self.page.kind == PageKind::Post
            && let Some(path) = self.routes.translate(&self.page.path, next)
        {
            return TogglePolicy::Redirect(path.to_string());
        }
        TogglePolicy::InPlace
    }

    /// Full-body substitution from the embedded payload.
    ///
    /// Originals are cached once; restoring toward primary prefers the
    /// cached markup (byte-exact) over re-rendering the payload's primary
    /// side. A payload side missing for `target` leaves the body untouched
    /// and creates no cache entry.
    fn apply_payload(&self, doc: &mut Document, target: Locale) {
        let Some(payload) = &self.payload else {
            return;
        };
        let selectors = self.engine.selectors();

        if let Some(title) = doc.by_id(&selectors.article_title_id) {
            if target == Locale::Primary
                && let Some(original) = doc.original_text(title).map(ToString::to_string)
            {
                doc.set_text(title, original);
            } else if let Some(text) = payload.title.get(target).map(ToString::to_string) {
                doc.cache_original_text(title);
                doc.set_text(title, text);
            } else {
                tracing::warn!("translation payload has no {target} title; leaving title as-is");
            }
        }

        if let Some(content) = doc.by_id(&selectors.article_content_id) {
            if target == Locale::Primary
                && let Some(original) = doc.original_markup(content).map(ToString::to_string)
            {
                doc.set_markup(content, original);
            } else if let Some(raw) = payload.content.get(target) {
                let rendered = self.renderer.render(raw);
                doc.cache_original_markup(content);
                doc.set_markup(content, rendered);
            } else {
                tracing::warn!("translation payload has no {target} content; leaving body as-is");
            }
        }
    }

    /// Transient visual acknowledgement of the new locale. Cosmetic only.
    fn show_notice(&self, doc: &mut Document, locale: Locale) {
        let Some(toast) = doc.by_id(&self.engine.selectors().toast_id) else {
            return;
        };
        doc.set_text(toast, locale.as_str());
        doc.set_attr(toast, "data-visible", "true");
    }
}
