//! # quilt-core
//!
//! Core types shared across all Quilt crates.
//!
//! This crate provides the foundational model of the story-to-test pipeline:
//! - The `Story` record and its validation result
//! - Test plan records produced by the planner
//! - The workspace context symbol table (classes, components, endpoints,
//!   entities, field metadata)
//! - Service, test-type, role, and intent enums
//! - CLI response types

pub mod enums;
pub mod plan;
pub mod responses;
pub mod story;
pub mod workspace;
