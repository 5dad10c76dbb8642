//! Serde roundtrip and JsonSchema validation tests for core model types.

use chrono::Utc;
use schemars::schema_for;
use std::collections::BTreeMap;

use quilt_core::enums::*;
use quilt_core::plan::*;
use quilt_core::story::*;
use quilt_core::workspace::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_story() -> Story {
    Story {
        story_id: "Story 3.2".into(),
        normalized_id: "STORY_3_2".into(),
        title: "Credit Event Capture".into(),
        file_path: "user-stories/epic_3_credit_events/story_3_2_capture.md".into(),
        actor: Some("an operations user".into()),
        capability: Some("to record credit events against a trade".into()),
        benefit: Some("settlement workflows can begin".into()),
        acceptance_criteria: vec![
            "Event Type is required".into(),
            "Form submits to the credit events endpoint".into(),
        ],
        test_scenarios: vec!["Submit a bankruptcy event and verify persistence".into()],
        services_involved: vec![ServiceName::Frontend, ServiceName::Gateway],
        services_status: ServicesStatus::Present,
        implementation_guidance: Some(vec!["Reuse the trade detail modal".into()]),
        deliverables: None,
        dependencies: None,
        epic_path: Some("epic_3_credit_events".into()),
        epic_title: Some("Credit Events".into()),
    }
}

roundtrip_and_validate!(story_roundtrip, Story, sample_story());

roundtrip_and_validate!(
    parsed_story_roundtrip,
    ParsedStory,
    ParsedStory {
        story: sample_story(),
        validation: ValidationResult {
            errors: vec![],
            warnings: vec![ValidationIssue::warning(
                "services_involved",
                "services inferred from story text: frontend, gateway",
                "user-stories/epic_3_credit_events/story_3_2_capture.md",
            )],
        },
    }
);

roundtrip_and_validate!(
    test_plan_roundtrip,
    TestPlan,
    TestPlan {
        story_id: "Story 3.2".into(),
        normalized_id: "STORY_3_2".into(),
        title: "Credit Event Capture".into(),
        planned_services: vec![ServiceName::Frontend, ServiceName::Gateway],
        planned_tests: vec![PlannedTest {
            service: ServiceName::Frontend,
            test_types: vec![TestType::Component, TestType::Unit, TestType::Flow],
            target_path: "frontend/src/__tests__".into(),
            acceptance_criteria: vec![0, 1],
            test_scenarios: vec![0],
        }],
        requires_flow_tests: true,
        story: sample_story(),
    }
);

roundtrip_and_validate!(
    backend_class_roundtrip,
    BackendClass,
    BackendClass {
        class_name: "CreditEventService".into(),
        package_name: "com.example.platform.service".into(),
        fully_qualified_name: "com.example.platform.service.CreditEventService".into(),
        role: ClassRole::Service,
        file_path: "backend/src/main/java/CreditEventService.java".into(),
        methods: Some(vec!["recordEvent".into(), "findByTrade".into()]),
        fields: Some(vec!["repository".into()]),
        annotations: vec!["Service".into()],
    }
);

roundtrip_and_validate!(
    database_entity_roundtrip,
    DatabaseEntity,
    DatabaseEntity {
        entity_name: "CreditEvent".into(),
        table_name: Some("credit_events".into()),
        package_name: "com.example.platform.model".into(),
        fields: vec![EntityFieldMetadata {
            name: "eventType".into(),
            source_type: "EventType".into(),
            json_type: JsonType::Enum,
            nullable: false,
            max_length: None,
            precision: None,
            scale: None,
            enum_values: Some(vec!["BANKRUPTCY".into(), "RESTRUCTURING".into()]),
        }],
    }
);

roundtrip_and_validate!(
    workspace_context_roundtrip,
    WorkspaceContext,
    WorkspaceContext {
        workspace_root: "/ws".into(),
        backend_root: "/ws/backend".into(),
        frontend_root: "/ws/frontend".into(),
        backend_classes: vec![],
        frontend_components: vec![FrontendComponent {
            component_name: "CreditEventModal".into(),
            file_path: "/ws/frontend/src/components/CreditEventModal.tsx".into(),
            relative_path: "components/CreditEventModal.tsx".into(),
            exports: vec!["CreditEventModal".into()],
            hooks: vec!["useState".into(), "useEffect".into()],
            is_page: false,
        }],
        api_endpoints: vec![ApiEndpoint {
            method: HttpMethod::Post,
            path: "/api/cds-trades/{id}/credit-events".into(),
            controller_class: "CreditEventController".into(),
        }],
        entities: vec![],
        services_by_name: BTreeMap::new(),
        repositories_by_name: BTreeMap::new(),
        controllers_by_name: BTreeMap::new(),
        components_by_domain: BTreeMap::new(),
        scanned_at: Utc::now(),
    }
);
