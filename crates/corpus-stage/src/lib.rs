//! Staging-area writer and pipeline driver for corpus.
//!
//! This crate owns everything between a converted document tree and the
//! staging area the external search indexer ingests:
//! - [`SectionMetadata`]: the provenance record written next to every
//!   content artifact (exact schema contract with the indexer)
//! - [`Pipeline`]: the driver that splits, titles, and stages a whole
//!   tree, and the end-to-end convert-then-stage flow
//! - [`annotate_tree`]: the pass that stages already-plain-text files
//!   (chat transcripts) with metadata but without splitting

#![warn(missing_docs)]

mod annotate;
mod driver;
mod error;
mod metadata;

pub use annotate::{AnnotateStats, annotate_tree};
pub use driver::{Pipeline, RunStats, StageStats};
pub use error::StageError;
pub use metadata::{ContentType, MetadataAttributes, SectionMetadata};
