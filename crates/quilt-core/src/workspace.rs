//! Workspace context: the symbol table produced by scanning an external
//! codebase.
//!
//! A `WorkspaceContext` is produced once per generation run by the analyzer
//! and is read-only afterward; no downstream component mutates it.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::enums::{ClassRole, HttpMethod, JsonType};

/// A backend class discovered during a scan.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BackendClass {
    pub class_name: String,
    pub package_name: String,
    /// `package_name.class_name`.
    pub fully_qualified_name: String,
    pub role: ClassRole,
    pub file_path: String,
    pub methods: Option<Vec<String>>,
    pub fields: Option<Vec<String>>,
    pub annotations: Vec<String>,
}

/// A frontend component discovered during a scan.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FrontendComponent {
    pub component_name: String,
    pub file_path: String,
    /// Path relative to the frontend source root.
    pub relative_path: String,
    pub exports: Vec<String>,
    /// Hook-style call identifiers found in the source.
    pub hooks: Vec<String>,
    /// True when the relative path contains a pages/views/routes segment.
    pub is_page: bool,
}

/// An HTTP endpoint extracted from a controller class.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ApiEndpoint {
    pub method: HttpMethod,
    /// Base path + method path, e.g. "/api/trades/{id}".
    pub path: String,
    pub controller_class: String,
}

/// Field metadata extracted from a persisted entity.
///
/// Identifier fields are excluded at extraction time, so every field here is
/// a candidate for generated payloads.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EntityFieldMetadata {
    pub name: String,
    /// Declared type in the scanned source, e.g. "BigDecimal".
    pub source_type: String,
    /// JSON-shaped type derived from `source_type` plus annotation context.
    pub json_type: JsonType,
    pub nullable: bool,
    pub max_length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    /// Ordered constant names when the field is enum-typed.
    pub enum_values: Option<Vec<String>>,
}

/// A persisted entity with its field metadata.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DatabaseEntity {
    pub entity_name: String,
    pub table_name: Option<String>,
    pub package_name: String,
    pub fields: Vec<EntityFieldMetadata>,
}

/// Immutable snapshot of one workspace scan.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WorkspaceContext {
    pub workspace_root: String,
    pub backend_root: String,
    pub frontend_root: String,

    pub backend_classes: Vec<BackendClass>,
    pub frontend_components: Vec<FrontendComponent>,
    pub api_endpoints: Vec<ApiEndpoint>,
    pub entities: Vec<DatabaseEntity>,

    /// Service classes grouped by domain name (class name minus role suffix).
    pub services_by_name: BTreeMap<String, Vec<BackendClass>>,
    pub repositories_by_name: BTreeMap<String, Vec<BackendClass>>,
    pub controllers_by_name: BTreeMap<String, Vec<BackendClass>>,
    /// Components grouped by their top-level source directory.
    pub components_by_domain: BTreeMap<String, Vec<FrontendComponent>>,

    pub scanned_at: DateTime<Utc>,
}

impl WorkspaceContext {
    /// Find an entity by name: exact match first, then containment in either
    /// direction (e.g. "Trade" matches "CDSTrade" and vice versa).
    #[must_use]
    pub fn find_entity(&self, entity_name: &str) -> Option<&DatabaseEntity> {
        let needle = entity_name.to_lowercase();
        self.entities
            .iter()
            .find(|e| e.entity_name == entity_name)
            .or_else(|| {
                self.entities
                    .iter()
                    .find(|e| e.entity_name.to_lowercase().contains(&needle))
            })
            .or_else(|| {
                self.entities
                    .iter()
                    .find(|e| needle.contains(&e.entity_name.to_lowercase()))
            })
    }
}

/// Counters reported with every scan result.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WorkspaceScanStats {
    pub backend_classes_found: usize,
    pub frontend_components_found: usize,
    pub endpoints_found: usize,
    pub entities_found: usize,
}
