//! Heading-boundary section splitting.
//!
//! Documents are split at h1-h3 headings using a single line scan:
//! - A line whose trimmed form starts with ``` toggles code-fence state
//! - Inside a fence every line is body text, headings included
//! - Outside a fence an h1-h3 heading seals the current section and
//!   starts the next one; h4+ headings are ordinary body text

/// Marker that opens and closes a code fence.
const FENCE: &str = "```";

/// Splits a document body into sections at h1-h3 heading boundaries.
///
/// Sections are returned in document order and contain their lines joined
/// with `"\n"`, leading heading line included. Content before the first
/// heading becomes a heading-less leading section. Code-fence interiors are
/// never split, even when they contain heading-shaped lines.
///
/// Joining the returned sections with `"\n"`, in order, reconstructs the
/// input exactly (up to a trailing newline, which line iteration drops).
pub fn split_sections(content: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_code_fence = false;

    for line in content.lines() {
        let trimmed = line.trim();

        // The fence line itself flips state first, so an opening marker is
        // appended via the in-fence branch and a closing marker falls
        // through to ordinary accumulation. Neither can start a section.
        if trimmed.starts_with(FENCE) {
            in_code_fence = !in_code_fence;
        }

        if in_code_fence {
            current.push(line);
        } else if is_section_heading(trimmed) {
            if !current.is_empty() {
                sections.push(current.join("\n"));
                current = Vec::new();
            }
            current.push(line);
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        sections.push(current.join("\n"));
    }

    sections
}

/// Returns true if a trimmed line is an h1, h2, or h3 heading.
///
/// Deeper headings never open a section. The trailing space in each prefix
/// already excludes `####` and beyond; the explicit `######` guard mirrors
/// the published anchor-generation behavior.
fn is_section_heading(trimmed: &str) -> bool {
    (trimmed.starts_with("# ") || trimmed.starts_with("## ") || trimmed.starts_with("### "))
        && !trimmed.starts_with("######")
}
