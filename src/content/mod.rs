//! Content helpers for rendering user-supplied markup inside templates.

pub mod tag_escaper;

pub use tag_escaper::{TagEscaper, DEFAULT_TAGS};
