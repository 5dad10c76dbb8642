//! Plan export: JSON and Markdown per plan, plus a catalog index.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use quilt_core::responses::ExportReport;
use quilt_core::plan::TestPlan;
use quilt_core::workspace::WorkspaceContext;
use quilt_plan::{complexity, recommended_test_count};

use crate::error::GenError;
use crate::payload::{invalid_payload, valid_payload};
use crate::production::{GeneratedTestFile, analyze};

/// Serializable view of one exported plan.
#[derive(Debug, Serialize)]
struct PlanExport<'a> {
    story_id: &'a str,
    normalized_id: &'a str,
    title: &'a str,
    epic: Option<&'a str>,
    services: Vec<&'static str>,
    tests: Vec<TestExport<'a>>,
    acceptance_criteria: &'a [String],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    test_scenarios: &'a [String],
    requires_flow_tests: bool,
    recommended_test_count: usize,
    complexity: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample_payloads: Option<SamplePayloads>,
}

#[derive(Debug, Serialize)]
struct TestExport<'a> {
    service: &'static str,
    test_types: Vec<&'static str>,
    target_path: &'a str,
}

#[derive(Debug, Serialize)]
struct SamplePayloads {
    entity: String,
    valid: Value,
    invalid: Value,
}

/// Writes plan exports under a fixed output directory.
pub struct PlanExporter {
    output_dir: PathBuf,
}

impl PlanExporter {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Export every plan as `<NORMALIZED_ID>.json` and `<NORMALIZED_ID>.md`,
    /// plus an `INDEX.md` catalog report.
    pub fn export(
        &self,
        plans: &[&TestPlan],
        context: Option<&WorkspaceContext>,
    ) -> Result<ExportReport, GenError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| GenError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let mut files_written = Vec::new();
        for plan in plans {
            let export = build_export(plan, context);

            let json_path = self.output_dir.join(format!("{}.json", plan.normalized_id));
            let json = serde_json::to_string_pretty(&export)?;
            write_file(&json_path, &json)?;
            files_written.push(json_path.to_string_lossy().into_owned());

            let md_path = self.output_dir.join(format!("{}.md", plan.normalized_id));
            write_file(&md_path, &render_markdown(&export))?;
            files_written.push(md_path.to_string_lossy().into_owned());
        }

        let index_path = self.output_dir.join("INDEX.md");
        write_file(&index_path, &render_index(plans))?;
        files_written.push(index_path.to_string_lossy().into_owned());

        info!(plans = plans.len(), dir = %self.output_dir.display(), "exported test plans");
        Ok(ExportReport {
            output_dir: self.output_dir.to_string_lossy().into_owned(),
            plans_exported: plans.len(),
            files_written,
        })
    }
}

fn build_export<'a>(plan: &'a TestPlan, context: Option<&WorkspaceContext>) -> PlanExport<'a> {
    let sample_payloads = context.and_then(|ctx| {
        let analysis = analyze(&plan.story, Some(ctx));
        analysis.entity.map(|entity| SamplePayloads {
            valid: valid_payload(&entity),
            invalid: invalid_payload(&entity),
            entity: entity.entity_name,
        })
    });

    PlanExport {
        story_id: &plan.story_id,
        normalized_id: &plan.normalized_id,
        title: &plan.title,
        epic: plan.story.epic_title.as_deref(),
        services: plan.planned_services.iter().map(|s| s.as_str()).collect(),
        tests: plan
            .planned_tests
            .iter()
            .map(|test| TestExport {
                service: test.service.as_str(),
                test_types: test.test_types.iter().map(|t| t.as_str()).collect(),
                target_path: &test.target_path,
            })
            .collect(),
        acceptance_criteria: &plan.story.acceptance_criteria,
        test_scenarios: &plan.story.test_scenarios,
        requires_flow_tests: plan.requires_flow_tests,
        recommended_test_count: recommended_test_count(plan),
        complexity: complexity(plan).as_str(),
        sample_payloads,
    }
}

fn render_markdown(export: &PlanExport<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Test Plan: {} - {}\n", export.story_id, export.title);
    if let Some(epic) = export.epic {
        let _ = writeln!(out, "Epic: {epic}\n");
    }
    let _ = writeln!(
        out,
        "Services: {} | Flow tests: {} | Recommended tests: {} | Complexity: {}\n",
        export.services.join(", "),
        if export.requires_flow_tests { "yes" } else { "no" },
        export.recommended_test_count,
        export.complexity,
    );

    let _ = writeln!(out, "## Planned Tests\n");
    let _ = writeln!(out, "| Service | Test Types | Target |");
    let _ = writeln!(out, "|---------|------------|--------|");
    for test in &export.tests {
        let _ = writeln!(
            out,
            "| {} | {} | `{}` |",
            test.service,
            test.test_types.join(", "),
            test.target_path
        );
    }

    let _ = writeln!(out, "\n## Acceptance Criteria\n");
    for (index, criterion) in export.acceptance_criteria.iter().enumerate() {
        let _ = writeln!(out, "{}. {criterion}", index + 1);
    }

    if !export.test_scenarios.is_empty() {
        let _ = writeln!(out, "\n## Test Scenarios\n");
        for (index, scenario) in export.test_scenarios.iter().enumerate() {
            let _ = writeln!(out, "{}. {scenario}", index + 1);
        }
    }

    if let Some(payloads) = &export.sample_payloads {
        let _ = writeln!(out, "\n## Sample Payloads ({})\n", payloads.entity);
        let _ = writeln!(out, "Valid:\n\n```json\n{}\n```", pretty(&payloads.valid));
        let _ = writeln!(out, "\nInvalid:\n\n```json\n{}\n```", pretty(&payloads.invalid));
    }
    out
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn render_index(plans: &[&TestPlan]) -> String {
    let mut out = String::from("# Test Plan Index\n\n");
    let _ = writeln!(out, "| Story | Title | Services | Flow | Recommended |");
    let _ = writeln!(out, "|-------|-------|----------|------|-------------|");
    for plan in plans {
        let services: Vec<&str> = plan.planned_services.iter().map(|s| s.as_str()).collect();
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            plan.story_id,
            plan.title,
            services.join(", "),
            if plan.requires_flow_tests { "yes" } else { "no" },
            recommended_test_count(plan),
        );
    }

    let mut by_service: std::collections::BTreeMap<&str, usize> = std::collections::BTreeMap::new();
    for plan in plans {
        for service in &plan.planned_services {
            *by_service.entry(service.as_str()).or_default() += 1;
        }
    }
    let _ = writeln!(out, "\n## Stories per Service\n");
    for (service, count) in by_service {
        let _ = writeln!(out, "- {service}: {count}");
    }
    out
}

/// Write generated test sources under `root`, mirroring each file's relative
/// path. With `dry_run` nothing touches the disk; the paths that would be
/// written are still returned.
pub fn write_generated_files(
    root: &Path,
    files: &[GeneratedTestFile],
    dry_run: bool,
) -> Result<Vec<String>, GenError> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = root.join(&file.path);
        if !dry_run {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| GenError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            write_file(&path, &file.content)?;
        }
        written.push(path.to_string_lossy().into_owned());
    }
    Ok(written)
}

fn write_file(path: &Path, content: &str) -> Result<(), GenError> {
    fs::write(path, content).map_err(|source| GenError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quilt_core::enums::ServiceName;
    use quilt_plan::TestPlanner;
    use quilt_story::StoryParser;

    fn plan() -> TestPlan {
        let story = StoryParser::new()
            .parse_content(
                "# Story 3.2 - Credit Event Capture\n\n## Acceptance Criteria\n\n- Event Type is required\n\n## Services Involved\n\n- frontend\n- backend\n\n## Test Scenarios\n\n1. Submit a valid event\n",
                "epic_3_credit_events/story_3_2.md",
            )
            .story;
        TestPlanner::new().plan(&story)
    }

    #[test]
    fn exports_json_markdown_and_index() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = PlanExporter::new(dir.path());
        let plan = plan();
        let report = exporter.export(&[&plan], None).unwrap();

        assert_eq!(report.plans_exported, 1);
        assert_eq!(report.files_written.len(), 3);

        let json: Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join("STORY_3_2.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(json["story_id"], "Story 3.2");
        assert_eq!(json["epic"], "Credit Events");
        assert_eq!(json["requires_flow_tests"], true);
        assert_eq!(json["recommended_test_count"], 3);
        assert!(json.get("sample_payloads").is_none());

        let markdown = fs::read_to_string(dir.path().join("STORY_3_2.md")).unwrap();
        assert!(markdown.contains("# Test Plan: Story 3.2 - Credit Event Capture"));
        assert!(markdown.contains("| frontend | component, unit, flow |"));

        let index = fs::read_to_string(dir.path().join("INDEX.md")).unwrap();
        assert!(index.contains("| Story 3.2 |"));
        assert!(index.contains("- backend: 1"));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![GeneratedTestFile {
            path: "frontend/src/__tests__/STORY_3_2/X.test.tsx".to_string(),
            service: Some(ServiceName::Frontend),
            content: "// test".to_string(),
            test_cases: 1,
        }];
        let written = write_generated_files(dir.path(), &files, true).unwrap();
        assert_eq!(written.len(), 1);
        assert!(!dir.path().join("frontend").exists());

        let written = write_generated_files(dir.path(), &files, false).unwrap();
        assert_eq!(written.len(), 1);
        assert!(dir
            .path()
            .join("frontend/src/__tests__/STORY_3_2/X.test.tsx")
            .exists());
    }
}
