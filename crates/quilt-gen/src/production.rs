//! Production test synthesis: one generated source file per (story, service)
//! pair, with every acceptance criterion covered by one test case, plus
//! cross-service flow specs for multi-service plans.
//!
//! Each criterion's text is classified into a [`CriterionIntent`] by an
//! ordered first-match pattern table, and each intent has one generator
//! function. A criterion that matches nothing still gets a smoke-render
//! test, so no criterion is ever left uncovered.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use quilt_core::enums::{ClassRole, CriterionIntent, ServiceName};
use quilt_core::plan::TestPlan;
use quilt_core::story::Story;
use quilt_core::workspace::{ApiEndpoint, DatabaseEntity, FrontendComponent, WorkspaceContext};
use quilt_scan::relevance::{relevant_classes, relevant_components};

use crate::flow::FlowTestGenerator;
use crate::payload::{invalid_payload, valid_payload};

static DISPLAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(display(s|ed)?|show(s|n)?|render(s|ed)?|visible|appear(s|ed)?)\b")
        .unwrap()
});
static VALIDATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(required|invalid|cannot|must|mandatory)\b").unwrap());
static SUBMISSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(submit(s|ted)?|post(s|ed)?|save(s|d)?|api|call(s|ed)?|send(s|t)?|persist(s|ed)?)\b")
        .unwrap()
});
static STATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(disable(s|d)?|loading|pending|spinner|in progress)\b").unwrap()
});
static OPTIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(dropdown|option(s)?|choices|selection)\b|one of").unwrap()
});
static FUTURE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)future").unwrap());
static DATE_ORDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(before|after|earlier|later)\b").unwrap());

/// First-match-wins classification of a criterion's intent.
#[must_use]
pub fn classify_intent(criterion: &str) -> CriterionIntent {
    if DISPLAY_RE.is_match(criterion) {
        CriterionIntent::FieldDisplay
    } else if VALIDATION_RE.is_match(criterion) {
        CriterionIntent::Validation
    } else if SUBMISSION_RE.is_match(criterion) {
        CriterionIntent::Submission
    } else if STATE_RE.is_match(criterion) {
        CriterionIntent::StateTransition
    } else if OPTIONS_RE.is_match(criterion) {
        CriterionIntent::EnumeratedOptions
    } else {
        CriterionIntent::SmokeRender
    }
}

/// Sub-patterns within validation intent; each produces different setup code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    MissingRequired,
    FutureDate,
    DateOrdering,
}

#[must_use]
pub fn classify_validation(criterion: &str) -> ValidationKind {
    let lower = criterion.to_lowercase();
    if FUTURE_DATE_RE.is_match(criterion) && lower.contains("date") {
        ValidationKind::FutureDate
    } else if DATE_ORDER_RE.is_match(criterion) && lower.contains("date") {
        ValidationKind::DateOrdering
    } else {
        ValidationKind::MissingRequired
    }
}

/// Workspace facts that parameterize the generated templates.
#[derive(Debug, Default)]
pub struct StoryAnalysis {
    /// Subject used for component and class names: a scanned component whose
    /// name relates to the story, or the CamelCased story title.
    pub subject_name: String,
    /// The scanned component the subject came from, when one matched.
    pub component: Option<FrontendComponent>,
    pub entity: Option<DatabaseEntity>,
    pub endpoint: Option<ApiEndpoint>,
}

#[must_use]
pub fn analyze(story: &Story, context: Option<&WorkspaceContext>) -> StoryAnalysis {
    let title_subject = camel_case_title(&story.title);
    let Some(context) = context else {
        return StoryAnalysis {
            subject_name: title_subject,
            ..StoryAnalysis::default()
        };
    };

    let story_text = format!("{} {}", story.title, story.acceptance_criteria.join(" "));
    let component = relevant_components(context, &story_text)
        .first()
        .copied()
        .cloned();
    let subject_name = component.as_ref().map_or_else(
        || title_subject.clone(),
        |component| component.component_name.clone(),
    );

    let entity = context
        .find_entity(&subject_name)
        .or_else(|| context.find_entity(&title_subject))
        .cloned();

    // Endpoints owned by a story-relevant controller win over path matches.
    let controllers: Vec<&str> = relevant_classes(context, &story_text)
        .into_iter()
        .filter(|class| class.role == ClassRole::Controller)
        .map(|class| class.class_name.as_str())
        .collect();
    let title_words: Vec<String> = story
        .title
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| word.len() >= 4)
        .collect();
    let endpoint = context
        .api_endpoints
        .iter()
        .find(|endpoint| controllers.contains(&endpoint.controller_class.as_str()))
        .or_else(|| {
            context.api_endpoints.iter().find(|endpoint| {
                let path = endpoint.path.to_lowercase();
                title_words.iter().any(|word| path.contains(word.as_str()))
            })
        })
        .cloned();

    StoryAnalysis {
        subject_name,
        component,
        entity,
        endpoint,
    }
}

/// "Credit Event Capture" -> "CreditEventCapture".
fn camel_case_title(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect()
}

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTestFile {
    /// Path relative to the workspace root, e.g.
    /// "frontend/src/__tests__/STORY_3_2/CreditEventCapture.test.tsx".
    pub path: String,
    /// The owning service; `None` for cross-service flow specs.
    pub service: Option<ServiceName>,
    pub content: String,
    pub test_cases: usize,
}

/// Generation output for one plan.
#[derive(Debug, Default)]
pub struct GenerationOutput {
    pub files: Vec<GeneratedTestFile>,
    pub warnings: Vec<String>,
}

/// Generates production test sources from a test plan.
#[derive(Debug, Default)]
pub struct ProductionTestGenerator;

impl ProductionTestGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Generate one file per planned service, plus flow specs for
    /// multi-service plans. The workspace context is optional; without it
    /// payloads degrade to empty objects and endpoints to a path derived
    /// from the story title.
    #[must_use]
    pub fn generate(
        &self,
        plan: &TestPlan,
        context: Option<&WorkspaceContext>,
    ) -> GenerationOutput {
        let mut output = GenerationOutput::default();
        if plan.is_empty() {
            return output;
        }

        let analysis = analyze(&plan.story, context);
        if analysis.entity.is_none() && plan.planned_services.iter().any(is_java_service) {
            output.warnings.push(format!(
                "{}: no matching entity in workspace context, request bodies degrade to {{}}",
                plan.story_id
            ));
        }

        for planned in &plan.planned_tests {
            let file = if planned.service == ServiceName::Frontend {
                generate_frontend_file(plan, planned.target_path.as_str(), &analysis)
            } else {
                generate_java_file(plan, planned.service, planned.target_path.as_str(), &analysis)
            };
            debug!(path = %file.path, cases = file.test_cases, "generated test file");
            output.files.push(file);
        }

        let endpoint = endpoint_path(plan, &analysis);
        output
            .files
            .extend(FlowTestGenerator::new().generate(plan, &endpoint));
        output
    }
}

fn is_java_service(service: &ServiceName) -> bool {
    *service != ServiceName::Frontend
}

fn endpoint_path(plan: &TestPlan, analysis: &StoryAnalysis) -> String {
    analysis.endpoint.as_ref().map_or_else(
        || {
            let slug = plan
                .title
                .split_whitespace()
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
                .join("-");
            format!("/api/{slug}")
        },
        |endpoint| endpoint.path.clone(),
    )
}

/// Criteria to cover; a story with none still gets one smoke case.
fn criteria_or_smoke(story: &Story) -> Vec<String> {
    if story.acceptance_criteria.is_empty() {
        vec![format!("{} renders", story.title)]
    } else {
        story.acceptance_criteria.clone()
    }
}

// ---------------------------------------------------------------------------
// Frontend (Jest + Testing Library)
// ---------------------------------------------------------------------------

fn generate_frontend_file(
    plan: &TestPlan,
    target_path: &str,
    analysis: &StoryAnalysis,
) -> GeneratedTestFile {
    let subject = &analysis.subject_name;
    let endpoint = endpoint_path(plan, analysis);
    let criteria = criteria_or_smoke(&plan.story);

    let field_names: Vec<String> = analysis
        .entity
        .as_ref()
        .map(|entity| entity.fields.iter().map(|f| f.name.clone()).collect())
        .unwrap_or_default();
    let enum_options: Option<(String, Vec<String>)> = analysis.entity.as_ref().and_then(|e| {
        e.fields
            .iter()
            .find(|f| f.enum_values.is_some())
            .and_then(|f| f.enum_values.clone().map(|v| (f.name.clone(), v)))
    });

    let mut cases = String::new();
    for (index, criterion) in criteria.iter().enumerate() {
        let intent = classify_intent(criterion);
        let case = match intent {
            CriterionIntent::FieldDisplay => frontend_field_display(criterion, &field_names),
            CriterionIntent::Validation => frontend_validation(criterion),
            CriterionIntent::Submission => frontend_submission(criterion, &endpoint),
            CriterionIntent::StateTransition => frontend_state_transition(criterion),
            CriterionIntent::EnumeratedOptions => {
                frontend_enum_options(criterion, enum_options.as_ref())
            }
            CriterionIntent::SmokeRender => frontend_smoke(criterion),
        };
        if index > 0 {
            cases.push('\n');
        }
        cases.push_str(&case);
    }
    // Case templates reference the component as a placeholder.
    let cases = cases.replace("<SUBJECT />", &format!("<{subject} />"));

    let fields_markup = if field_names.is_empty() {
        "      <input aria-label=\"value\" name=\"value\" />\n".to_string()
    } else {
        field_names
            .iter()
            .map(|name| format!("      <input aria-label=\"{name}\" name=\"{name}\" />\n"))
            .collect()
    };

    let content = format!(
        r#"import React from 'react';
import {{ render, screen, fireEvent, waitFor }} from '@testing-library/react';
import '@testing-library/jest-dom';

// Standalone harness: a stand-in for the production component so this file
// runs without application wiring. Swap the import when integrating.
const {subject} = () => {{
  const [error, setError] = React.useState('');
  const [submitting, setSubmitting] = React.useState(false);
  const onSubmit = async (e: React.FormEvent<HTMLFormElement>) => {{
    e.preventDefault();
    const data = new FormData(e.currentTarget);
    if ([...data.values()].some((v) => v === '')) {{
      setError('This field is required');
      return;
    }}
    setSubmitting(true);
    await fetch('{endpoint}', {{ method: 'POST', body: JSON.stringify(Object.fromEntries(data)) }});
    setSubmitting(false);
  }};
  return (
    <form aria-label="{subject}" onSubmit={{onSubmit}}>
{fields_markup}      {{error && <div role="alert">{{error}}</div>}}
      <button type="submit" disabled={{submitting}}>Submit</button>
    </form>
  );
}};

describe('{story_id} {title}', () => {{
  beforeEach(() => {{
    global.fetch = jest.fn(() => Promise.resolve({{ ok: true, json: () => Promise.resolve({{}}) }})) as jest.Mock;
  }});

  afterEach(() => {{
    jest.resetAllMocks();
  }});

{cases}}});
"#,
        story_id = plan.story_id,
        title = plan.title,
    );

    let test_cases = criteria.len();
    GeneratedTestFile {
        path: format!("{target_path}/{}/{subject}.test.tsx", plan.normalized_id),
        service: Some(ServiceName::Frontend),
        content,
        test_cases,
    }
}

fn frontend_field_display(criterion: &str, field_names: &[String]) -> String {
    let assertions: String = if field_names.is_empty() {
        "    expect(screen.getByLabelText('value')).toBeInTheDocument();\n".to_string()
    } else {
        field_names
            .iter()
            .map(|name| format!("    expect(screen.getByLabelText('{name}')).toBeInTheDocument();\n"))
            .collect()
    };
    format!(
        "  test({criterion:?}, () => {{\n    render(<SUBJECT />);\n{assertions}  }});\n"
    )
}

fn frontend_validation(criterion: &str) -> String {
    let setup = match classify_validation(criterion) {
        ValidationKind::MissingRequired => {
            "    // Submit with every field left empty.\n".to_string()
        }
        ValidationKind::FutureDate => {
            "    const date = screen.getAllByRole('textbox')[0];\n    fireEvent.change(date, { target: { value: '2099-01-01' } });\n".to_string()
        }
        ValidationKind::DateOrdering => {
            "    const [start, end] = screen.getAllByRole('textbox');\n    fireEvent.change(start, { target: { value: '2024-06-20' } });\n    fireEvent.change(end, { target: { value: '2024-06-10' } });\n".to_string()
        }
    };
    format!(
        "  test({criterion:?}, async () => {{\n    render(<SUBJECT />);\n{setup}    fireEvent.submit(screen.getByRole('form'));\n    expect(await screen.findByRole('alert')).toBeInTheDocument();\n    expect(global.fetch).not.toHaveBeenCalled();\n  }});\n"
    )
}

fn frontend_submission(criterion: &str, endpoint: &str) -> String {
    format!(
        "  test({criterion:?}, async () => {{\n    render(<SUBJECT />);\n    for (const input of screen.getAllByRole('textbox')) {{\n      fireEvent.change(input, {{ target: {{ value: 'filled' }} }});\n    }}\n    fireEvent.submit(screen.getByRole('form'));\n    await waitFor(() => expect(global.fetch).toHaveBeenCalledWith(\n      '{endpoint}',\n      expect.objectContaining({{ method: 'POST' }}),\n    ));\n  }});\n"
    )
}

fn frontend_state_transition(criterion: &str) -> String {
    format!(
        "  test({criterion:?}, async () => {{\n    render(<SUBJECT />);\n    for (const input of screen.getAllByRole('textbox')) {{\n      fireEvent.change(input, {{ target: {{ value: 'filled' }} }});\n    }}\n    fireEvent.submit(screen.getByRole('form'));\n    expect(screen.getByRole('button', {{ name: /submit/i }})).toBeDisabled();\n    await waitFor(() => expect(screen.getByRole('button', {{ name: /submit/i }})).toBeEnabled());\n  }});\n"
    )
}

fn frontend_enum_options(
    criterion: &str,
    options: Option<&(String, Vec<String>)>,
) -> String {
    let assertions = options.map_or_else(
        || "    expect(screen.getByRole('form')).toBeInTheDocument();\n".to_string(),
        |(field, values)| {
            let mut out = format!("    // Declared constants for {field}.\n");
            for value in values {
                out.push_str(&format!(
                    "    expect(screen.getByText('{value}')).toBeInTheDocument();\n"
                ));
            }
            out
        },
    );
    format!(
        "  test({criterion:?}, () => {{\n    render(<SUBJECT />);\n{assertions}  }});\n"
    )
}

fn frontend_smoke(criterion: &str) -> String {
    format!(
        "  test({criterion:?}, () => {{\n    render(<SUBJECT />);\n    expect(screen.getByRole('form')).toBeInTheDocument();\n  }});\n"
    )
}

// ---------------------------------------------------------------------------
// Backend / gateway / risk-engine (JUnit 5 + Spring TestRestTemplate)
// ---------------------------------------------------------------------------

fn generate_java_file(
    plan: &TestPlan,
    service: ServiceName,
    target_path: &str,
    analysis: &StoryAnalysis,
) -> GeneratedTestFile {
    let subject = &analysis.subject_name;
    let endpoint = endpoint_path(plan, analysis);
    let criteria = criteria_or_smoke(&plan.story);

    let (valid_body, invalid_body) = analysis.entity.as_ref().map_or_else(
        || (Value::Object(serde_json::Map::new()), Value::Object(serde_json::Map::new())),
        |entity| (valid_payload(entity), invalid_payload(entity)),
    );
    let valid_json = escape_java_string(&valid_body.to_string());
    let invalid_json = escape_java_string(&invalid_body.to_string());

    let class_name = format!("{subject}GeneratedTest");
    let mut methods = String::new();
    for (index, criterion) in criteria.iter().enumerate() {
        let number = index + 1;
        let method = match classify_intent(criterion) {
            CriterionIntent::Validation => java_validation_error(criterion, number, &endpoint, &invalid_json),
            CriterionIntent::FieldDisplay => java_retrieve(criterion, number, &endpoint),
            _ => java_create(criterion, number, &endpoint, &valid_json),
        };
        methods.push('\n');
        methods.push_str(&method);
    }

    let content = format!(
        r#"package {package};

import org.junit.jupiter.api.BeforeEach;
import org.junit.jupiter.api.DisplayName;
import org.junit.jupiter.api.Test;
import org.springframework.beans.factory.annotation.Autowired;
import org.springframework.boot.test.context.SpringBootTest;
import org.springframework.boot.test.web.client.TestRestTemplate;
import org.springframework.http.HttpEntity;
import org.springframework.http.HttpHeaders;
import org.springframework.http.MediaType;
import org.springframework.http.ResponseEntity;

import static org.assertj.core.api.Assertions.assertThat;

@SpringBootTest(webEnvironment = SpringBootTest.WebEnvironment.RANDOM_PORT)
class {class_name} {{

    @Autowired
    private TestRestTemplate restTemplate;

    private HttpHeaders headers;

    @BeforeEach
    void setUp() {{
        headers = new HttpHeaders();
        headers.setContentType(MediaType.APPLICATION_JSON);
    }}
{methods}}}
"#,
        package = plan.normalized_id,
    );

    GeneratedTestFile {
        path: format!("{target_path}/{}/{class_name}.java", plan.normalized_id),
        service: Some(service),
        content,
        test_cases: criteria.len(),
    }
}

fn java_validation_error(criterion: &str, number: usize, endpoint: &str, invalid_json: &str) -> String {
    format!(
        r#"    @Test
    @DisplayName("{criterion}")
    void criterion{number}ValidationError() {{
        HttpEntity<String> request = new HttpEntity<>("{invalid_json}", headers);
        ResponseEntity<String> response = restTemplate.postForEntity("{endpoint}", request, String.class);
        assertThat(response.getStatusCode().is4xxClientError()).isTrue();
    }}
"#
    )
}

fn java_retrieve(criterion: &str, number: usize, endpoint: &str) -> String {
    format!(
        r#"    @Test
    @DisplayName("{criterion}")
    void criterion{number}Retrieve() {{
        ResponseEntity<String> response = restTemplate.getForEntity("{endpoint}", String.class);
        assertThat(response.getStatusCode().is2xxSuccessful()).isTrue();
        assertThat(response.getBody()).isNotNull();
    }}
"#
    )
}

fn java_create(criterion: &str, number: usize, endpoint: &str, valid_json: &str) -> String {
    format!(
        r#"    @Test
    @DisplayName("{criterion}")
    void criterion{number}Create() {{
        HttpEntity<String> request = new HttpEntity<>("{valid_json}", headers);
        ResponseEntity<String> response = restTemplate.postForEntity("{endpoint}", request, String.class);
        assertThat(response.getStatusCode().is2xxSuccessful()).isTrue();
    }}
"#
    )
}

fn escape_java_string(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quilt_core::enums::JsonType;
    use quilt_core::workspace::EntityFieldMetadata;
    use quilt_plan::TestPlanner;
    use quilt_story::StoryParser;

    fn plan_from(body: &str) -> TestPlan {
        let story = StoryParser::new().parse_content(body, "story_3_2.md").story;
        TestPlanner::new().plan(&story)
    }

    #[test]
    fn intent_table_first_match_wins() {
        assert_eq!(
            classify_intent("The form displays the trade reference"),
            CriterionIntent::FieldDisplay
        );
        assert_eq!(
            classify_intent("Event Type is required"),
            CriterionIntent::Validation
        );
        assert_eq!(
            classify_intent("Submitting posts the event to the api"),
            CriterionIntent::Submission
        );
        assert_eq!(
            classify_intent("The button is disabled while pending"),
            CriterionIntent::StateTransition
        );
        assert_eq!(
            classify_intent("Currency dropdown lists USD and EUR"),
            CriterionIntent::EnumeratedOptions
        );
        assert_eq!(
            classify_intent("Nothing in particular"),
            CriterionIntent::SmokeRender
        );
        // Display wins over validation when both are present.
        assert_eq!(
            classify_intent("Displays an error when the value is invalid"),
            CriterionIntent::FieldDisplay
        );
    }

    #[test]
    fn validation_subclassifier() {
        assert_eq!(
            classify_validation("Event Type is required"),
            ValidationKind::MissingRequired
        );
        assert_eq!(
            classify_validation("Notice Date must not be in the future"),
            ValidationKind::FutureDate
        );
        assert_eq!(
            classify_validation("End date cannot be before the start date"),
            ValidationKind::DateOrdering
        );
    }

    #[test]
    fn camel_case_title_strips_punctuation() {
        assert_eq!(camel_case_title("Credit Event Capture"), "CreditEventCapture");
        assert_eq!(camel_case_title("PV01 / DV01 report"), "PV01DV01Report");
    }

    #[test]
    fn generates_one_file_per_service() {
        let plan = plan_from(
            "# Story 3.2 - Credit Event Capture\n\n## Acceptance Criteria\n\n- Event Type is required\n- Submitting posts the event to the api\n\n## Services Involved\n\n- frontend\n- backend\n",
        );
        let output = ProductionTestGenerator::new().generate(&plan, None);
        // Two service files plus one flow spec for the multi-service plan.
        assert_eq!(output.files.len(), 3);

        let frontend = &output.files[0];
        assert_eq!(frontend.service, Some(ServiceName::Frontend));
        assert_eq!(
            frontend.path,
            "frontend/src/__tests__/STORY_3_2/CreditEventCapture.test.tsx"
        );
        assert_eq!(frontend.test_cases, 2);
        assert!(frontend.content.contains("global.fetch = jest.fn"));
        assert!(frontend.content.contains("not.toHaveBeenCalled"));

        let backend = &output.files[1];
        assert_eq!(
            backend.path,
            "backend/src/test/java/STORY_3_2/CreditEventCaptureGeneratedTest.java"
        );
        assert!(backend.content.contains("@SpringBootTest"));
        assert!(backend.content.contains("criterion1ValidationError"));
        assert!(backend.content.contains("criterion2Create"));
        // No workspace context: payloads degrade to the empty object.
        assert!(backend.content.contains("{}"));
        assert_eq!(output.warnings.len(), 1);

        let flow = &output.files[2];
        assert_eq!(flow.service, None);
        assert!(flow.path.starts_with("e2e/"));
        assert!(flow.content.contains("@playwright/test"));
    }

    #[test]
    fn required_field_criterion_generates_rejecting_frontend_test() {
        let plan = plan_from(
            "# Story 3.2 - Credit Event Capture\n\n## Acceptance Criteria\n\n- Event Type is required\n\n## Services Involved\n\n- frontend\n",
        );
        let output = ProductionTestGenerator::new().generate(&plan, None);
        let content = &output.files[0].content;
        assert!(content.contains("\"Event Type is required\""));
        assert!(content.contains("findByRole('alert')"));
        assert!(content.contains("expect(global.fetch).not.toHaveBeenCalled()"));
    }

    #[test]
    fn entity_metadata_feeds_backend_payloads() {
        let entity = DatabaseEntity {
            entity_name: "CreditEvent".to_string(),
            table_name: None,
            package_name: "com.acme".to_string(),
            fields: vec![EntityFieldMetadata {
                name: "status".to_string(),
                source_type: "EventStatus".to_string(),
                json_type: JsonType::Enum,
                nullable: false,
                max_length: None,
                precision: None,
                scale: None,
                enum_values: Some(vec!["PENDING".to_string(), "POSTED".to_string()]),
            }],
        };
        let context = WorkspaceContext {
            workspace_root: "/ws".to_string(),
            backend_root: "/ws/backend".to_string(),
            frontend_root: "/ws/frontend".to_string(),
            backend_classes: vec![],
            frontend_components: vec![],
            api_endpoints: vec![],
            entities: vec![entity],
            services_by_name: std::collections::BTreeMap::new(),
            repositories_by_name: std::collections::BTreeMap::new(),
            controllers_by_name: std::collections::BTreeMap::new(),
            components_by_domain: std::collections::BTreeMap::new(),
            scanned_at: chrono::Utc::now(),
        };

        let plan = plan_from(
            "# Story 3.2 - Credit Event Capture\n\n## Acceptance Criteria\n\n- Saving posts the event\n- Event Type is required\n\n## Services Involved\n\n- backend\n",
        );
        let output = ProductionTestGenerator::new().generate(&plan, Some(&context));
        assert!(output.warnings.is_empty());
        let content = &output.files[0].content;
        assert!(content.contains("PENDING"), "valid payload uses a declared constant");
        assert!(content.contains("NOT_A_DECLARED_CONSTANT"));
    }

    fn empty_context() -> WorkspaceContext {
        WorkspaceContext {
            workspace_root: "/ws".to_string(),
            backend_root: "/ws/backend".to_string(),
            frontend_root: "/ws/frontend".to_string(),
            backend_classes: vec![],
            frontend_components: vec![],
            api_endpoints: vec![],
            entities: vec![],
            services_by_name: std::collections::BTreeMap::new(),
            repositories_by_name: std::collections::BTreeMap::new(),
            controllers_by_name: std::collections::BTreeMap::new(),
            components_by_domain: std::collections::BTreeMap::new(),
            scanned_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn relevant_component_names_the_frontend_subject() {
        let mut context = empty_context();
        context.frontend_components.push(FrontendComponent {
            component_name: "CreditEventForm".to_string(),
            file_path: "/ws/frontend/src/components/CreditEventForm.tsx".to_string(),
            relative_path: "src/components/CreditEventForm.tsx".to_string(),
            exports: vec!["CreditEventForm".to_string()],
            hooks: vec![],
            is_page: false,
        });

        let plan = plan_from(
            "# Story 3.2 - Credit Event Capture\n\n## Acceptance Criteria\n\n- The form displays the event\n\n## Services Involved\n\n- frontend\n",
        );
        let output = ProductionTestGenerator::new().generate(&plan, Some(&context));
        assert_eq!(
            output.files[0].path,
            "frontend/src/__tests__/STORY_3_2/CreditEventForm.test.tsx"
        );
        assert!(output.files[0].content.contains("<CreditEventForm />"));
    }

    #[test]
    fn relevant_controller_endpoint_wins_over_path_match() {
        use quilt_core::enums::HttpMethod;
        use quilt_core::workspace::BackendClass;

        let mut context = empty_context();
        context.backend_classes.push(BackendClass {
            class_name: "CreditEventController".to_string(),
            package_name: "com.acme".to_string(),
            fully_qualified_name: "com.acme.CreditEventController".to_string(),
            role: ClassRole::Controller,
            file_path: "/ws/backend/CreditEventController.java".to_string(),
            methods: None,
            fields: None,
            annotations: vec!["RestController".to_string()],
        });
        context.api_endpoints.push(ApiEndpoint {
            method: HttpMethod::Post,
            path: "/api/v1/submissions".to_string(),
            controller_class: "CreditEventController".to_string(),
        });
        // A path-only match on "event" that the wrong controller owns.
        context.api_endpoints.push(ApiEndpoint {
            method: HttpMethod::Post,
            path: "/api/v1/events".to_string(),
            controller_class: "AuditController".to_string(),
        });

        let plan = plan_from(
            "# Story 3.2 - Credit Event Capture\n\n## Acceptance Criteria\n\n- Saving posts the event\n\n## Services Involved\n\n- backend\n",
        );
        let output = ProductionTestGenerator::new().generate(&plan, Some(&context));
        assert!(output.files[0].content.contains("/api/v1/submissions"));
    }
}
