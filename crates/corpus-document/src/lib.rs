//! Section splitting and title derivation for corpus.
//!
//! This crate turns one converted markdown document into an ordered list of
//! self-contained sections, each carrying a display title and a URL-safe
//! slug. It supports:
//! - Splitting at h1-h3 heading boundaries, treating code fences as opaque
//! - Title derivation from front matter, headings, or the bare first line
//! - Slug generation matching the anchors published by the rendered docs

#![warn(missing_docs)]

mod split;
mod title;

use serde::Serialize;

pub use split::split_sections;
pub use title::{TitleSlug, TitleSource};

/// A heading-delimited section of a document, ready for staging.
///
/// The body is the verbatim slice of the source document, including the
/// leading heading line when one is present. Joining section bodies with
/// `"\n"`, in order, reconstructs the document exactly.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    /// Human-readable section title.
    pub title: String,
    /// URL-safe anchor slug derived from the title.
    pub slug: String,
    /// Verbatim section text.
    pub body: String,
}

/// Splits a document body into sections with derived titles and slugs.
///
/// Sections are returned in document order. A document whose body yields no
/// lines produces an empty vector; the caller decides how to treat that.
pub fn parse_sections(content: &str) -> Vec<Section> {
    split_sections(content)
        .into_iter()
        .map(|body| {
            let TitleSlug { title, slug } = TitleSlug::derive(&body);
            Section { title, slug, body }
        })
        .collect()
}
