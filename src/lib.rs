//! page-i18n
//!
//! In-place bilingual translation for statically rendered pages: resolves the
//! visitor's active locale, redirects to dedicated translated documents where
//! they exist, and rewrites the current markup in place where they do not.

pub mod controller;
pub mod dom;
pub mod locale;
pub mod routes;
pub mod translate;

// ToggleController を再エクスポート
pub use controller::ToggleController;
