//! Title and slug derivation for sections.
//!
//! Each section gets a display title and a URL-safe slug. The slug must
//! match the anchor the rendered documentation publishes for that heading,
//! so the transformation order below is a compatibility contract: later
//! replacements operate on the result of earlier ones (backticks are
//! stripped before lower-casing, spaces become hyphens before `/`, `(`,
//! and `)` are dropped).

use serde::Serialize;

/// Leading front-matter prefix that carries a document title.
const FRONT_MATTER_PREFIX: &str = "---\ntitle:";

/// Where a section's title text was found.
///
/// Resolved by precedence: a front-matter block wins over the first line.
/// A heading-less section falls back to its bare first line, which may be
/// arbitrary prose; the resulting slug is kept as-is because published
/// anchors already depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource<'a> {
    /// `title:` value from a leading `---`-delimited front-matter block.
    FrontMatter(&'a str),
    /// Leading h1-h3 heading line.
    Heading(&'a str),
    /// Bare first line of a heading-less section.
    FirstLine(&'a str),
}

impl<'a> TitleSource<'a> {
    /// Classifies where a section's title comes from.
    pub fn classify(section: &'a str) -> Self {
        if let Some(rest) = section.strip_prefix(FRONT_MATTER_PREFIX) {
            // Title text runs to the closing delimiter; an unterminated
            // block takes the whole remainder.
            let text = rest.find("---").map_or(rest, |end| &rest[..end]);
            return Self::FrontMatter(text);
        }

        let first_line = section.lines().next().unwrap_or("");
        if first_line.trim_start().starts_with('#') {
            Self::Heading(first_line)
        } else {
            Self::FirstLine(first_line)
        }
    }

    /// Raw title text before cleaning, with `{...}` attribute spans
    /// removed from line-based sources.
    fn raw_text(self) -> String {
        match self {
            Self::FrontMatter(text) => text.to_string(),
            Self::Heading(line) | Self::FirstLine(line) => strip_attribute_span(line),
        }
    }
}

/// A display title and its URL-safe slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleSlug {
    /// Human-readable title: `#` markers and backticks removed, trimmed.
    pub title: String,
    /// Anchor slug: title rules plus space→`-`, `/`/`(`/`)` removed,
    /// lower-cased.
    pub slug: String,
}

impl TitleSlug {
    /// Derives the title pair for one section body.
    pub fn derive(section: &str) -> Self {
        let raw = TitleSource::classify(section).raw_text();
        Self {
            title: clean_title(&raw),
            slug: url_slug(&raw),
        }
    }
}

/// Removes the first well-formed `{...}` span from a heading line.
///
/// Converted markup can carry attribute spans like `{#anchor .class}` on
/// headings; they are never part of the title.
fn strip_attribute_span(line: &str) -> String {
    match (line.find('{'), line.find('}')) {
        (Some(start), Some(end)) if start < end => {
            format!("{}{}", &line[..start], &line[end + 1..])
        }
        _ => line.to_string(),
    }
}

/// Cleans raw title text for display.
fn clean_title(raw: &str) -> String {
    raw.replace('#', "").trim().replace('`', "")
}

/// Derives the URL-safe slug from raw title text.
fn url_slug(raw: &str) -> String {
    raw.replace('#', "")
        .trim()
        .replace('`', "")
        .replace(' ', "-")
        .replace('/', "")
        .replace('(', "")
        .replace(')', "")
        .to_lowercase()
}
