//! In-memory index over parsed stories.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use quilt_core::enums::{ServiceName, ServicesStatus};
use quilt_core::story::ParsedStory;

/// Keyed story store with the query surface the planner and CLI need.
///
/// Stories are keyed by their human id ("Story 3.2"). Hard-invalid stories
/// (validation errors) are stored so they can be reported, but are excluded
/// from [`Self::plannable`].
#[derive(Debug, Default)]
pub struct StoryCatalog {
    stories: BTreeMap<String, ParsedStory>,
}

/// Aggregate counts over the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStatistics {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub by_service: BTreeMap<String, usize>,
    pub by_epic: BTreeMap<String, usize>,
    pub by_status: BTreeMap<String, usize>,
    pub multi_service: usize,
}

impl StoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parsed story, replacing any story with the same id.
    pub fn insert(&mut self, parsed: ParsedStory) {
        debug!(story_id = %parsed.story.story_id, valid = parsed.validation.is_valid(), "cataloging story");
        self.stories.insert(parsed.story.story_id.clone(), parsed);
    }

    /// Insert a batch of parsed stories.
    pub fn insert_all(&mut self, parsed: impl IntoIterator<Item = ParsedStory>) {
        for story in parsed {
            self.insert(story);
        }
    }

    #[must_use]
    pub fn get(&self, story_id: &str) -> Option<&ParsedStory> {
        self.stories.get(story_id)
    }

    #[must_use]
    pub fn get_by_normalized_id(&self, normalized_id: &str) -> Option<&ParsedStory> {
        self.stories
            .values()
            .find(|parsed| parsed.story.normalized_id == normalized_id)
    }

    /// All stories, ordered by numeric story id (major, then minor).
    #[must_use]
    pub fn list(&self) -> Vec<&ParsedStory> {
        let mut stories: Vec<&ParsedStory> = self.stories.values().collect();
        stories.sort_by_key(|parsed| numeric_id(&parsed.story.story_id));
        stories
    }

    /// Valid stories eligible for test planning.
    #[must_use]
    pub fn plannable(&self) -> Vec<&ParsedStory> {
        self.list()
            .into_iter()
            .filter(|parsed| parsed.validation.is_valid())
            .collect()
    }

    /// Stories involving `service`.
    #[must_use]
    pub fn by_service(&self, service: ServiceName) -> Vec<&ParsedStory> {
        self.list()
            .into_iter()
            .filter(|parsed| parsed.story.involves(service))
            .collect()
    }

    /// Stories involving every service in `services`.
    #[must_use]
    pub fn by_services(&self, services: &[ServiceName]) -> Vec<&ParsedStory> {
        self.list()
            .into_iter()
            .filter(|parsed| services.iter().all(|s| parsed.story.involves(*s)))
            .collect()
    }

    /// Stories under the given epic path segment.
    #[must_use]
    pub fn by_epic(&self, epic_path: &str) -> Vec<&ParsedStory> {
        self.list()
            .into_iter()
            .filter(|parsed| parsed.story.epic_path.as_deref() == Some(epic_path))
            .collect()
    }

    /// Stories carrying at least one validation error.
    #[must_use]
    pub fn invalid(&self) -> Vec<&ParsedStory> {
        self.list()
            .into_iter()
            .filter(|parsed| !parsed.validation.is_valid())
            .collect()
    }

    /// Stories whose services declaration resolved to MISSING.
    #[must_use]
    pub fn missing_services(&self) -> Vec<&ParsedStory> {
        self.list()
            .into_iter()
            .filter(|parsed| parsed.story.services_status == ServicesStatus::Missing)
            .collect()
    }

    #[must_use]
    pub fn statistics(&self) -> CatalogStatistics {
        let mut stats = CatalogStatistics {
            total: self.stories.len(),
            ..CatalogStatistics::default()
        };
        for parsed in self.stories.values() {
            if parsed.validation.is_valid() {
                stats.valid += 1;
            } else {
                stats.invalid += 1;
            }
            for service in &parsed.story.services_involved {
                *stats.by_service.entry(service.as_str().to_string()).or_default() += 1;
            }
            if let Some(epic) = &parsed.story.epic_path {
                *stats.by_epic.entry(epic.clone()).or_default() += 1;
            }
            *stats
                .by_status
                .entry(parsed.story.services_status.as_str().to_string())
                .or_default() += 1;
            if parsed.story.services_involved.len() > 1 {
                stats.multi_service += 1;
            }
        }
        stats
    }

    pub fn clear(&mut self) {
        self.stories.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }
}

/// "Story 10.2" -> (10, 2); unknown ids sort last.
fn numeric_id(story_id: &str) -> (u32, u32) {
    story_id
        .strip_prefix("Story ")
        .and_then(|rest| {
            let (major, minor) = rest.split_once('.')?;
            Some((major.parse().ok()?, minor.parse().ok()?))
        })
        .unwrap_or((u32::MAX, u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::StoryParser;
    use pretty_assertions::assert_eq;

    fn story(file: &str, body: &str) -> ParsedStory {
        StoryParser::new().parse_content(body, file)
    }

    fn sample_catalog() -> StoryCatalog {
        let mut catalog = StoryCatalog::new();
        catalog.insert(story(
            "epic_1_trading/story_1_1.md",
            "# Story 1.1 - Blotter\n\n## Acceptance Criteria\n\n- Shows trades\n\n## Services Involved\n\n- frontend\n- gateway\n",
        ));
        catalog.insert(story(
            "epic_1_trading/story_1_2.md",
            "# Story 1.2 - Booking\n\n## Acceptance Criteria\n\n- Persists the trade\n\n## Services Involved\n\n- backend\n",
        ));
        catalog.insert(story(
            "epic_2_risk/story_2_1.md",
            "# Story 2.1 - Exposure\n\n## Acceptance Criteria\n\n- Computes exposure\n\n## Services Involved\n\n- backend\n- excel\n",
        ));
        catalog.insert(story(
            "epic_2_risk/story_10_1.md",
            "# Story 10.1 - Report\n\n## Acceptance Criteria\n\n- Prints the report\n\n## Services Involved\n\n- backend\n- risk-engine\n",
        ));
        catalog
    }

    #[test]
    fn list_orders_numerically_not_lexically() {
        let catalog = sample_catalog();
        let ids: Vec<&str> = catalog
            .list()
            .iter()
            .map(|p| p.story.story_id.as_str())
            .collect();
        assert_eq!(ids, vec!["Story 1.1", "Story 1.2", "Story 2.1", "Story 10.1"]);
    }

    #[test]
    fn plannable_excludes_invalid_stories() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 4);
        let plannable = catalog.plannable();
        assert_eq!(plannable.len(), 3);
        assert!(plannable.iter().all(|p| p.story.story_id != "Story 2.1"));
    }

    #[test]
    fn lookup_by_either_id_form() {
        let catalog = sample_catalog();
        assert!(catalog.get("Story 1.2").is_some());
        assert!(catalog.get_by_normalized_id("STORY_1_2").is_some());
        assert!(catalog.get("Story 9.9").is_none());
    }

    #[test]
    fn by_service_and_by_services() {
        let catalog = sample_catalog();
        assert_eq!(catalog.by_service(ServiceName::Backend).len(), 3);
        assert_eq!(
            catalog
                .by_services(&[ServiceName::Backend, ServiceName::RiskEngine])
                .len(),
            1
        );
    }

    #[test]
    fn by_epic_filters_on_path_segment() {
        let catalog = sample_catalog();
        assert_eq!(catalog.by_epic("epic_1_trading").len(), 2);
        assert_eq!(catalog.by_epic("epic_2_risk").len(), 2);
        assert_eq!(catalog.by_epic("epic_3_none").len(), 0);
    }

    #[test]
    fn statistics_aggregate_counts() {
        let catalog = sample_catalog();
        let stats = catalog.statistics();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.valid, 3);
        assert_eq!(stats.invalid, 1);
        assert_eq!(stats.by_service.get("backend"), Some(&3));
        assert_eq!(stats.by_epic.get("epic_2_risk"), Some(&2));
        assert_eq!(stats.by_status.get("PRESENT"), Some(&3));
        assert_eq!(stats.by_status.get("INVALID"), Some(&1));
        assert_eq!(stats.multi_service, 2);
    }

    #[test]
    fn insert_replaces_same_id_and_clear_empties() {
        let mut catalog = sample_catalog();
        catalog.insert(story(
            "epic_1_trading/story_1_1.md",
            "# Story 1.1 - Blotter v2\n\n## Acceptance Criteria\n\n- Shows trades faster\n\n## Services Involved\n\n- frontend\n",
        ));
        assert_eq!(catalog.len(), 4);
        assert_eq!(
            catalog.get("Story 1.1").unwrap().story.title,
            "Blotter v2"
        );
        catalog.clear();
        assert!(catalog.is_empty());
    }
}
