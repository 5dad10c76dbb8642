//! Service, test-type, status, role, and intent enums for Quilt.
//!
//! All enums use fixed serde renames matching the tokens that appear in story
//! documents and generated reports. Enums that appear in story documents also
//! implement `FromStr` so the parser can validate raw tokens.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// ServiceName
// ---------------------------------------------------------------------------

/// The fixed four-member service taxonomy a story can declare or be inferred
/// to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceName {
    Frontend,
    Backend,
    Gateway,
    RiskEngine,
}

impl ServiceName {
    /// All services, in declaration order.
    pub const ALL: [Self; 4] = [Self::Frontend, Self::Backend, Self::Gateway, Self::RiskEngine];

    /// The token form used in story documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Gateway => "gateway",
            Self::RiskEngine => "risk-engine",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frontend" => Ok(Self::Frontend),
            "backend" => Ok(Self::Backend),
            "gateway" => Ok(Self::Gateway),
            "risk-engine" => Ok(Self::RiskEngine),
            _ => Err(()),
        }
    }
}

// ---------------------------------------------------------------------------
// TestType
// ---------------------------------------------------------------------------

/// Categories of tests the planner can assign to a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    Unit,
    Component,
    Api,
    Integration,
    Flow,
}

impl TestType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Component => "component",
            Self::Api => "api",
            Self::Integration => "integration",
            Self::Flow => "flow",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ServicesStatus
// ---------------------------------------------------------------------------

/// Outcome of parsing (or inferring) a story's services declaration.
///
/// `Invalid` wins over everything: any unrecognized token in the section
/// marks the whole story invalid. `Missing` means the section is absent or
/// empty and inference (if enabled) produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServicesStatus {
    Present,
    Missing,
    Invalid,
}

impl ServicesStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "PRESENT",
            Self::Missing => "MISSING",
            Self::Invalid => "INVALID",
        }
    }
}

impl fmt::Display for ServicesStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Confidence
// ---------------------------------------------------------------------------

/// Advisory confidence tier reported by the service inference engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Tier from the number of inferred candidate services.
    #[must_use]
    pub const fn from_candidate_count(count: usize) -> Self {
        match count {
            0 => Self::Low,
            1 | 2 => Self::Medium,
            _ => Self::High,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Complexity
// ---------------------------------------------------------------------------

/// Reporting-only complexity tier for a test plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ClassRole
// ---------------------------------------------------------------------------

/// Structural role of a scanned backend class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClassRole {
    Service,
    Repository,
    Controller,
    Entity,
    Config,
    Dto,
    Util,
}

impl ClassRole {
    /// Suffix stripped from a class name when grouping by domain
    /// (e.g. `TradeService` groups under `Trade`).
    #[must_use]
    pub const fn name_suffix(self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Repository => "Repository",
            Self::Controller => "Controller",
            Self::Entity => "Entity",
            Self::Config => "Config",
            Self::Dto => "DTO",
            Self::Util => "",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Repository => "repository",
            Self::Controller => "controller",
            Self::Entity => "entity",
            Self::Config => "config",
            Self::Dto => "dto",
            Self::Util => "util",
        }
    }
}

impl fmt::Display for ClassRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// JsonType
// ---------------------------------------------------------------------------

/// JSON-shaped type derived for an entity field, used by payload generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum JsonType {
    String,
    Number,
    Boolean,
    Date,
    Datetime,
    Enum,
    Object,
}

impl JsonType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Enum => "enum",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// HttpMethod
// ---------------------------------------------------------------------------

/// HTTP verb of a scanned API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CriterionIntent
// ---------------------------------------------------------------------------

/// Classified purpose of an acceptance criterion's text.
///
/// The variant selects which test-generation strategy applies. Classification
/// is first-match-wins in the declaration order below; `SmokeRender` is the
/// fallback so no criterion is ever left uncovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CriterionIntent {
    FieldDisplay,
    Validation,
    Submission,
    StateTransition,
    EnumeratedOptions,
    SmokeRender,
}

impl CriterionIntent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FieldDisplay => "field_display",
            Self::Validation => "validation",
            Self::Submission => "submission",
            Self::StateTransition => "state_transition",
            Self::EnumeratedOptions => "enumerated_options",
            Self::SmokeRender => "smoke_render",
        }
    }
}

impl fmt::Display for CriterionIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
