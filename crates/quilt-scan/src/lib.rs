//! # quilt-scan
//!
//! Workspace analysis for Quilt: walks an external codebase and extracts the
//! symbols test generation needs. Backend extraction targets Java sources
//! (classes, Spring endpoints, JPA entity fields); frontend extraction
//! targets React components. Everything is regex-based source scanning over
//! conventional layouts, not language parsing.
//!
//! Scanning runs two passes over the backend tree: the first builds the
//! repository-wide [`registry::EnumRegistry`], the second parses classes
//! against it.

pub mod error;
pub mod frontend;
pub mod java;
pub mod registry;
pub mod relevance;
pub mod scanner;

pub use error::ScanError;
pub use registry::EnumRegistry;
pub use scanner::{WorkspaceScanResult, WorkspaceScanner};
