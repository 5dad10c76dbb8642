//! # quilt-story
//!
//! Story document parsing for Quilt.
//!
//! A story is a markdown requirement document following the
//! `story_<major>_<minor>*.md` naming convention. This crate turns those
//! documents into [`quilt_core::story::Story`] records, infers the services
//! a story touches when the document does not declare them, and keeps the
//! parsed set queryable through [`catalog::StoryCatalog`].

pub mod catalog;
pub mod error;
pub mod inference;
pub mod parser;

pub use catalog::{CatalogStatistics, StoryCatalog};
pub use error::StoryError;
pub use inference::{InferenceResult, ServiceInference};
pub use parser::StoryParser;
