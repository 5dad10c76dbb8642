//! # quilt-gen
//!
//! The generation half of Quilt: example payload synthesis from scanned
//! entity metadata, production test source generation per (story, service)
//! pair, cross-service flow specs for multi-service stories, and plan export
//! to JSON and Markdown.

pub mod error;
pub mod export;
pub mod flow;
pub mod payload;
pub mod production;

pub use error::GenError;
pub use export::{PlanExporter, write_generated_files};
pub use flow::FlowTestGenerator;
pub use production::{
    GeneratedTestFile, GenerationOutput, ProductionTestGenerator, classify_intent,
};
