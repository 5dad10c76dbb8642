//! # quilt-plan
//!
//! Turns parsed stories into per-service test plans: which test categories
//! each involved service owes the story, where those tests live, and how much
//! work the story represents.

pub mod catalog;
pub mod estimators;
pub mod planner;

pub use catalog::TestPlanCatalog;
pub use estimators::{complexity, complexity_score, recommended_test_count};
pub use planner::TestPlanner;
