//! The workspace scanner: walks a target codebase and builds the
//! [`WorkspaceContext`] symbol table.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Serialize;
use tracing::{debug, info, warn};

use quilt_config::ScanConfig;
use quilt_core::enums::ClassRole;
use quilt_core::workspace::{
    ApiEndpoint, BackendClass, DatabaseEntity, FrontendComponent, WorkspaceContext,
    WorkspaceScanStats,
};

use crate::error::ScanError;
use crate::frontend::{component_domain, parse_component};
use crate::java::parse_java_source;
use crate::registry::EnumRegistry;

const JAVA_EXTENSIONS: [&str; 1] = ["java"];
const FRONTEND_EXTENSIONS: [&str; 2] = ["tsx", "jsx"];

/// Outcome of one workspace scan.
///
/// `success` is false when any file could not be read; the context still
/// holds everything that was extracted.
#[derive(Debug, Serialize)]
pub struct WorkspaceScanResult {
    pub success: bool,
    pub context: WorkspaceContext,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: WorkspaceScanStats,
    pub duration_ms: u64,
}

/// Scans a workspace per its [`ScanConfig`].
pub struct WorkspaceScanner {
    config: ScanConfig,
    excludes: GlobSet,
}

impl WorkspaceScanner {
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.exclude_patterns {
            // A `**/target/**` pattern must also match the `target` directory
            // itself so the walker can prune the subtree without entering it.
            let mut forms = vec![pattern.as_str()];
            if let Some(dir_form) = pattern.strip_suffix("/**") {
                forms.push(dir_form);
            }
            for form in forms {
                let glob = Glob::new(form).map_err(|source| ScanError::InvalidExcludePattern {
                    pattern: pattern.clone(),
                    source,
                })?;
                builder.add(glob);
            }
        }
        let excludes = builder
            .build()
            .map_err(|source| ScanError::InvalidExcludePattern {
                pattern: config.exclude_patterns.join(", "),
                source,
            })?;
        Ok(Self { config, excludes })
    }

    /// Scan the workspace rooted at `workspace_root`.
    ///
    /// A missing workspace root is fatal; missing backend or frontend
    /// subtrees only produce warnings.
    pub fn scan(&self, workspace_root: &Path) -> Result<WorkspaceScanResult, ScanError> {
        let started = Instant::now();
        if !workspace_root.is_dir() {
            return Err(ScanError::WorkspaceRootNotFound(
                workspace_root.to_path_buf(),
            ));
        }

        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let backend_root = workspace_root.join(&self.config.backend_path);
        let frontend_root = workspace_root.join(&self.config.frontend_path);

        let mut backend_classes: Vec<BackendClass> = Vec::new();
        let mut api_endpoints: Vec<ApiEndpoint> = Vec::new();
        let mut entities: Vec<DatabaseEntity> = Vec::new();
        let mut frontend_components: Vec<FrontendComponent> = Vec::new();

        if self.config.scan_backend {
            if backend_root.is_dir() {
                self.scan_backend(
                    &backend_root,
                    &mut backend_classes,
                    &mut api_endpoints,
                    &mut entities,
                    &mut errors,
                );
            } else {
                warnings.push(format!(
                    "backend root not found, skipping: {}",
                    backend_root.display()
                ));
            }
        }

        if self.config.scan_frontend {
            if frontend_root.is_dir() {
                self.scan_frontend(&frontend_root, &mut frontend_components, &mut errors);
            } else {
                warnings.push(format!(
                    "frontend root not found, skipping: {}",
                    frontend_root.display()
                ));
            }
        }

        let stats = WorkspaceScanStats {
            backend_classes_found: backend_classes.len(),
            frontend_components_found: frontend_components.len(),
            endpoints_found: api_endpoints.len(),
            entities_found: entities.len(),
        };

        let context = WorkspaceContext {
            workspace_root: workspace_root.to_string_lossy().into_owned(),
            backend_root: backend_root.to_string_lossy().into_owned(),
            frontend_root: frontend_root.to_string_lossy().into_owned(),
            services_by_name: group_classes(&backend_classes, ClassRole::Service),
            repositories_by_name: group_classes(&backend_classes, ClassRole::Repository),
            controllers_by_name: group_classes(&backend_classes, ClassRole::Controller),
            components_by_domain: group_components(&frontend_components),
            backend_classes,
            frontend_components,
            api_endpoints,
            entities,
            scanned_at: Utc::now(),
        };

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            classes = stats.backend_classes_found,
            components = stats.frontend_components_found,
            endpoints = stats.endpoints_found,
            entities = stats.entities_found,
            duration_ms,
            "workspace scan finished"
        );

        Ok(WorkspaceScanResult {
            success: errors.is_empty(),
            context,
            errors,
            warnings,
            stats,
            duration_ms,
        })
    }

    fn scan_backend(
        &self,
        backend_root: &Path,
        classes: &mut Vec<BackendClass>,
        endpoints: &mut Vec<ApiEndpoint>,
        entities: &mut Vec<DatabaseEntity>,
        errors: &mut Vec<String>,
    ) {
        let files = self.collect_files(backend_root, &JAVA_EXTENSIONS);
        let mut sources: Vec<(PathBuf, String)> = Vec::with_capacity(files.len());
        for path in files {
            match std::fs::read_to_string(&path) {
                Ok(source) => sources.push((path, source)),
                Err(error) => errors.push(format!("failed to read {}: {error}", path.display())),
            }
        }

        // Pass 1: the enum registry must be complete before any class is
        // parsed, so field extraction sees every enum no matter which file
        // declared it.
        let mut registry = EnumRegistry::new();
        for (_, source) in &sources {
            registry.collect_from_source(source);
        }
        debug!(enums = registry.len(), "enum registry built");

        // Pass 2: classes, endpoints, entities.
        for (path, source) in &sources {
            let Some(output) = parse_java_source(
                source,
                &path.to_string_lossy(),
                &registry,
                self.config.extract_methods,
                self.config.extract_endpoints,
            ) else {
                continue;
            };
            endpoints.extend(output.endpoints);
            if let Some(entity) = output.entity {
                entities.push(entity);
            }
            classes.push(output.class);
        }
    }

    fn scan_frontend(
        &self,
        frontend_root: &Path,
        components: &mut Vec<FrontendComponent>,
        errors: &mut Vec<String>,
    ) {
        for path in self.collect_files(frontend_root, &FRONTEND_EXTENSIONS) {
            let source = match std::fs::read_to_string(&path) {
                Ok(source) => source,
                Err(error) => {
                    errors.push(format!("failed to read {}: {error}", path.display()));
                    continue;
                }
            };
            let relative = path
                .strip_prefix(frontend_root)
                .unwrap_or(&path)
                .to_string_lossy()
                .into_owned();
            components.push(parse_component(
                &source,
                &path.to_string_lossy(),
                &relative,
            ));
        }
    }

    /// Walk `root` collecting files with one of `extensions`. Exclusion globs
    /// prune matching directories before they are descended into. Sorted for
    /// deterministic output.
    fn collect_files(&self, root: &Path, extensions: &[&str]) -> Vec<PathBuf> {
        let excludes = self.excludes.clone();
        let mut files: Vec<PathBuf> = ignore::WalkBuilder::new(root)
            .filter_entry(move |entry| !excludes.is_match(entry.path()))
            .build()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .map(ignore::DirEntry::into_path)
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| extensions.contains(&ext))
            })
            .filter(|path| !self.excludes.is_match(path))
            .collect();
        files.sort();
        files
    }
}

/// Group classes of `role` by domain: the class name minus the role suffix.
fn group_classes(
    classes: &[BackendClass],
    role: ClassRole,
) -> BTreeMap<String, Vec<BackendClass>> {
    let mut groups: BTreeMap<String, Vec<BackendClass>> = BTreeMap::new();
    for class in classes.iter().filter(|c| c.role == role) {
        let domain = class
            .class_name
            .strip_suffix(role.name_suffix())
            .filter(|stripped| !stripped.is_empty())
            .unwrap_or(&class.class_name)
            .to_string();
        groups.entry(domain).or_default().push(class.clone());
    }
    groups
}

fn group_components(
    components: &[FrontendComponent],
) -> BTreeMap<String, Vec<FrontendComponent>> {
    let mut groups: BTreeMap<String, Vec<FrontendComponent>> = BTreeMap::new();
    for component in components {
        groups
            .entry(component_domain(&component.relative_path))
            .or_default()
            .push(component.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclude_patterns_prune_directories() {
        let scanner = WorkspaceScanner::new(ScanConfig::default()).unwrap();
        // The walker filter sees directory entries; the subtree pattern must
        // match the directory itself so it is never descended into.
        assert!(scanner.excludes.is_match("repo/backend/target"));
        assert!(scanner.excludes.is_match("repo/frontend/node_modules"));
        assert!(
            scanner
                .excludes
                .is_match("repo/frontend/node_modules/pkg/index.jsx")
        );
        assert!(!scanner.excludes.is_match("repo/backend/src"));
    }
}
