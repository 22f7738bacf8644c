//! Minimal element tree the translation engine operates on.

/// Arena-backed document and node handles
mod document;

pub use document::{
    Document,
    Element,
    NodeId,
};
