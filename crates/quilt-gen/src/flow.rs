//! Cross-service flow test synthesis.
//!
//! A multi-service plan gets one Playwright spec exercising the story as an
//! end-to-end journey, plus an error-scenario companion for the API-driven
//! flow kinds. The flow kind is read off the story title.

use quilt_core::plan::TestPlan;
use tracing::debug;

use crate::production::GeneratedTestFile;

/// The journey shape a flow test exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    UserJourney,
    ApiOrchestration,
    CrossService,
    E2eIntegration,
    PerformanceFlow,
}

impl FlowKind {
    /// Directory segment in generated paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserJourney => "user_journey",
            Self::ApiOrchestration => "api_orchestration",
            Self::CrossService => "cross_service",
            Self::E2eIntegration => "e2e_integration",
            Self::PerformanceFlow => "performance_flow",
        }
    }

    const fn feature(self) -> &'static str {
        match self {
            Self::UserJourney => "User Journeys",
            Self::ApiOrchestration => "API Orchestration",
            Self::CrossService => "Cross-Service Integration",
            Self::E2eIntegration => "End-to-End Integration",
            Self::PerformanceFlow => "Performance Testing",
        }
    }

    /// Error companions only make sense where a request can fail mid-flow.
    const fn has_error_companion(self) -> bool {
        matches!(
            self,
            Self::ApiOrchestration | Self::CrossService | Self::E2eIntegration
        )
    }
}

/// Flow kind from the story title, defaulting to a plain user journey.
#[must_use]
pub fn classify_flow(title: &str) -> FlowKind {
    let text = title.to_lowercase();
    if text.contains("api") && (text.contains("orchestrat") || text.contains("coordinat")) {
        FlowKind::ApiOrchestration
    } else if text.contains("cross-service") || text.contains("service-to-service") {
        FlowKind::CrossService
    } else if text.contains("performance") || text.contains("load") {
        FlowKind::PerformanceFlow
    } else if text.contains("e2e") || text.contains("end-to-end") {
        FlowKind::E2eIntegration
    } else {
        FlowKind::UserJourney
    }
}

/// Generates Playwright flow specs for multi-service plans.
#[derive(Debug, Default)]
pub struct FlowTestGenerator;

impl FlowTestGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// One spec per multi-service plan, plus an error-scenario spec for the
    /// API-driven flow kinds. Single-service plans produce nothing.
    #[must_use]
    pub fn generate(&self, plan: &TestPlan, endpoint: &str) -> Vec<GeneratedTestFile> {
        if !plan.requires_flow_tests {
            return Vec::new();
        }

        let kind = classify_flow(&plan.title);
        let base = file_path(plan, kind);
        debug!(path = %base, kind = kind.as_str(), "generated flow spec");

        let mut files = vec![GeneratedTestFile {
            path: base.clone(),
            service: None,
            content: main_spec(plan, kind, endpoint),
            test_cases: 1,
        }];
        if kind.has_error_companion() {
            files.push(GeneratedTestFile {
                path: base.replace(".spec.", ".error.spec."),
                service: None,
                content: error_spec(plan, endpoint),
                test_cases: 2,
            });
        }
        files
    }
}

fn file_path(plan: &TestPlan, kind: FlowKind) -> String {
    let epic = plan
        .story
        .epic_path
        .as_deref()
        .and_then(|path| path.rsplit('/').next())
        .unwrap_or("unknown-epic");
    let story_slug: String = plan
        .story_id
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("e2e/{epic}/{}/{story_slug}.spec.ts", kind.as_str())
}

fn header(plan: &TestPlan, kind: FlowKind) -> String {
    let services: Vec<&str> = plan.planned_services.iter().map(|s| s.as_str()).collect();
    format!(
        "import {{ test, expect }} from '@playwright/test';\n\n\
         /**\n\
         \x20* {story_id}: {title}\n\
         \x20* @feature {feature}\n\
         \x20* @services {services}\n\
         \x20*/\n\n",
        story_id = plan.story_id,
        title = plan.title,
        feature = kind.feature(),
        services = services.join(", "),
    )
}

fn main_spec(plan: &TestPlan, kind: FlowKind, endpoint: &str) -> String {
    let body = match kind {
        FlowKind::UserJourney => user_journey_body(),
        FlowKind::ApiOrchestration => api_orchestration_body(endpoint),
        FlowKind::CrossService => cross_service_body(endpoint),
        FlowKind::E2eIntegration => e2e_integration_body(endpoint),
        FlowKind::PerformanceFlow => performance_body(),
    };
    format!(
        "{header}test.describe('{title}', () => {{\n{body}}});\n",
        header = header(plan, kind),
        title = plan.title,
    )
}

fn user_journey_body() -> String {
    "  test('completes the user journey', async ({ page }) => {\n\
     \x20   await page.goto('/');\n\
     \x20   await page.waitForSelector('[data-testid=\"main-content\"]');\n\
     \x20   await expect(page.locator('[data-testid=\"main-content\"]')).toBeVisible();\n\
     \x20 });\n"
        .to_string()
}

fn api_orchestration_body(endpoint: &str) -> String {
    format!(
        "  test('orchestrates calls across services', async ({{ request }}) => {{\n\
         \x20   const first = await request.get('{endpoint}');\n\
         \x20   expect(first.status()).toBe(200);\n\
         \x20   const created = await first.json();\n\
         \x20   const second = await request.post('{endpoint}', {{ data: {{ id: created.id }} }});\n\
         \x20   expect(second.status()).toBe(201);\n\
         \x20 }});\n"
    )
}

fn cross_service_body(endpoint: &str) -> String {
    format!(
        "  test('integrates across services', async ({{ request }}) => {{\n\
         \x20   const createResponse = await request.post('{endpoint}', {{ data: {{ name: 'Test' }} }});\n\
         \x20   const resourceId = (await createResponse.json()).id;\n\
         \x20   const processResponse = await request.post(`{endpoint}/${{resourceId}}`);\n\
         \x20   expect(processResponse.status()).toBe(200);\n\
         \x20 }});\n"
    )
}

fn e2e_integration_body(endpoint: &str) -> String {
    format!(
        "  test('completes the end-to-end flow', async ({{ page, request }}) => {{\n\
         \x20   await page.goto('/');\n\
         \x20   await page.click('[data-testid=\"action-button\"]');\n\
         \x20   const apiResponse = await request.get('{endpoint}');\n\
         \x20   expect(apiResponse.status()).toBe(200);\n\
         \x20   await expect(page.locator('[data-testid=\"result\"]')).toBeVisible();\n\
         \x20 }});\n"
    )
}

fn performance_body() -> String {
    "  test('completes the flow within the threshold', async ({ page }) => {\n\
     \x20   const startTime = Date.now();\n\
     \x20   await page.goto('/');\n\
     \x20   await page.waitForLoadState('networkidle');\n\
     \x20   expect(Date.now() - startTime).toBeLessThan(5000);\n\
     \x20 });\n"
        .to_string()
}

fn error_spec(plan: &TestPlan, endpoint: &str) -> String {
    let services: Vec<&str> = plan.planned_services.iter().map(|s| s.as_str()).collect();
    format!(
        "import {{ test, expect }} from '@playwright/test';\n\n\
         /**\n\
         \x20* {story_id}: {title} - error scenarios\n\
         \x20* @services {services}\n\
         \x20*/\n\n\
         test.describe('{title} - error handling', () => {{\n\
         \x20 test('handles an unavailable service', async ({{ request }}) => {{\n\
         \x20   const response = await request.get('{endpoint}/unavailable').catch(() => null);\n\
         \x20   expect(response).toBeNull();\n\
         \x20 }});\n\n\
         \x20 test('rejects invalid data', async ({{ request }}) => {{\n\
         \x20   const response = await request.post('{endpoint}', {{ data: {{ invalid: true }} }});\n\
         \x20   expect(response.status()).toBe(400);\n\
         \x20 }});\n\
         }});\n",
        story_id = plan.story_id,
        title = plan.title,
        services = services.join(", "),
    )
}
