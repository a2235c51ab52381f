//! Provenance metadata records for staged artifacts.
//!
//! Every content artifact gets a sibling `.metadata.json` describing where
//! the passage came from. The field names and the `MD`/`PLAIN_TEXT`
//! content-type values are a hard compatibility contract with the external
//! search-indexing service; they must serialize exactly as written here.

use serde::{Deserialize, Serialize};

/// Content type of a staged artifact, as the indexer understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    /// Markdown section content.
    #[serde(rename = "MD")]
    Md,
    /// Verbatim plain-text content.
    #[serde(rename = "PLAIN_TEXT")]
    PlainText,
}

/// Custom attributes attached to an indexed artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataAttributes {
    /// Canonical URL of the passage, anchor included for sections.
    #[serde(rename = "_source_uri")]
    pub source_uri: String,
    /// Which ingestion pass produced the artifact.
    pub data_source: String,
}

/// The metadata record written next to every content artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMetadata {
    /// Custom attributes.
    #[serde(rename = "Attributes")]
    pub attributes: MetadataAttributes,
    /// Display title of the passage.
    #[serde(rename = "Title")]
    pub title: String,
    /// Content type of the sibling artifact.
    #[serde(rename = "ContentType")]
    pub content_type: ContentType,
}

impl SectionMetadata {
    /// Builds the record for one documentation section.
    ///
    /// The source URI is `<base_url><html_path>#<slug>`, pointing at the
    /// rendered page anchor the section corresponds to.
    pub fn for_section(
        base_url: &str,
        html_path: &str,
        slug: &str,
        title: &str,
        data_source: &str,
    ) -> Self {
        Self {
            attributes: MetadataAttributes {
                source_uri: format!("{base_url}{html_path}#{slug}"),
                data_source: data_source.to_string(),
            },
            title: title.to_string(),
            content_type: ContentType::Md,
        }
    }

    /// Builds the record for one plain-text file staged verbatim.
    pub fn for_file(source_uri: &str, title: &str, data_source: &str) -> Self {
        Self {
            attributes: MetadataAttributes {
                source_uri: source_uri.to_string(),
                data_source: data_source.to_string(),
            },
            title: title.to_string(),
            content_type: ContentType::PlainText,
        }
    }

    /// Serializes the record as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
