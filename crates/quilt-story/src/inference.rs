//! Keyword-based service inference.
//!
//! When a story declares no services, the inference engine scores each
//! service's fixed keyword vocabulary against the story text (title,
//! criteria, guidance, deliverables). Matching is whole-word and
//! case-insensitive. Any service with at least one hit becomes a candidate,
//! then architectural propagation applies: a frontend hit implies the
//! gateway, and a gateway hit implies the backend.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::RegexBuilder;

use quilt_core::enums::{Confidence, ServiceName};

const FRONTEND_KEYWORDS: &[&str] = &[
    "ui",
    "form",
    "component",
    "react",
    "view",
    "display",
    "dashboard",
    "button",
    "input",
    "modal",
    "table",
    "chart",
    "responsive",
];

const GATEWAY_KEYWORDS: &[&str] = &[
    "endpoint",
    "api",
    "rest",
    "controller",
    "route",
    "http",
    "request",
    "response",
    "validation",
    "authentication",
];

const BACKEND_KEYWORDS: &[&str] = &[
    "service",
    "repository",
    "entity",
    "persistence",
    "database",
    "business logic",
    "calculation",
    "workflow",
    "domain model",
];

const RISK_ENGINE_KEYWORDS: &[&str] = &[
    "pricing",
    "valuation",
    "risk",
    "pv01",
    "dv01",
    "sensitivity",
    "ore",
    "curve",
    "scenario",
    "monte carlo",
    "simulation",
];

/// Compiled whole-word matchers, one alternation per service.
static MATCHERS: LazyLock<Vec<(ServiceName, regex::Regex)>> = LazyLock::new(|| {
    let vocabularies = [
        (ServiceName::Frontend, FRONTEND_KEYWORDS),
        (ServiceName::Gateway, GATEWAY_KEYWORDS),
        (ServiceName::Backend, BACKEND_KEYWORDS),
        (ServiceName::RiskEngine, RISK_ENGINE_KEYWORDS),
    ];
    vocabularies
        .into_iter()
        .map(|(service, keywords)| {
            let alternation = keywords
                .iter()
                .map(|kw| regex::escape(kw))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"\b(?:{alternation})\b");
            let re = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .unwrap();
            (service, re)
        })
        .collect()
});

/// Outcome of one inference run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceResult {
    /// Candidate services plus propagated dependencies, ordered by the
    /// service taxonomy.
    pub services: Vec<ServiceName>,
    /// Advisory tier from the keyword-matched candidate count, before
    /// propagation.
    pub confidence: Confidence,
    /// Keyword hit counts per matched service.
    pub scores: BTreeMap<String, usize>,
}

/// Scores story text against the per-service keyword vocabularies.
#[derive(Debug, Default)]
pub struct ServiceInference;

impl ServiceInference {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Infer services from the story's free text.
    #[must_use]
    pub fn infer(
        &self,
        title: &str,
        criteria: &[String],
        guidance: Option<&[String]>,
        deliverables: Option<&[String]>,
    ) -> InferenceResult {
        let mut text = title.to_lowercase();
        for line in criteria
            .iter()
            .chain(guidance.unwrap_or_default())
            .chain(deliverables.unwrap_or_default())
        {
            text.push(' ');
            text.push_str(&line.to_lowercase());
        }
        self.infer_from_text(&text)
    }

    /// Infer services from already-concatenated text.
    #[must_use]
    pub fn infer_from_text(&self, text: &str) -> InferenceResult {
        let mut candidates = Vec::new();
        let mut scores = BTreeMap::new();
        for (service, matcher) in MATCHERS.iter() {
            let hits = matcher.find_iter(text).count();
            if hits > 0 {
                candidates.push(*service);
                scores.insert(service.as_str().to_string(), hits);
            }
        }

        let confidence = Confidence::from_candidate_count(candidates.len());

        // A UI story needs its gateway; a gateway story needs its backend.
        let mut services = candidates;
        if services.contains(&ServiceName::Frontend) && !services.contains(&ServiceName::Gateway) {
            services.push(ServiceName::Gateway);
        }
        if services.contains(&ServiceName::Gateway) && !services.contains(&ServiceName::Backend) {
            services.push(ServiceName::Backend);
        }
        services.sort_by_key(|service| {
            ServiceName::ALL
                .iter()
                .position(|candidate| candidate == service)
        });

        InferenceResult {
            services,
            confidence,
            scores,
        }
    }
}
