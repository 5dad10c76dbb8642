//! Markdown story document parser.
//!
//! Parsing is regex-driven and line-oriented. Section headings are matched
//! case-insensitively and tolerate decoration (emoji, numbering) between the
//! `##` marker and the section name; a section body runs to the next `##`
//! heading or end of file.

use std::path::Path;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use quilt_core::enums::{ServiceName, ServicesStatus};
use quilt_core::story::{ParsedStory, Story, ValidationIssue, ValidationResult};

use crate::error::StoryError;
use crate::inference::ServiceInference;

static STORY_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)story_(\d+)_(\d+)").unwrap());
static EPIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^epic_\d+_(.+)$").unwrap());
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());
static TITLE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^story\s+\d+\.\d+\s*[-–—:]\s*").unwrap());
static ACTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*\*\*as\s+([^*\n]+?)\*\*").unwrap());
static CAPABILITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*i want\s+(.+?)\s*$").unwrap());
static BENEFIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*so that\s+(.+?)\s*$").unwrap());
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*]\s+(.*)$").unwrap());
static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s+(.*)$").unwrap());
static STORY_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^story_\d+_\d+.*\.md$").unwrap());

/// Parses story markdown documents into [`ParsedStory`] records.
pub struct StoryParser {
    inference: Option<ServiceInference>,
}

impl StoryParser {
    /// A parser that reports absent services sections as MISSING.
    #[must_use]
    pub fn new() -> Self {
        Self { inference: None }
    }

    /// A parser that infers services when the document declares none.
    #[must_use]
    pub fn with_inference() -> Self {
        Self {
            inference: Some(ServiceInference::new()),
        }
    }

    /// Parse one story file from disk.
    pub fn parse_file(&self, path: &Path) -> Result<ParsedStory, StoryError> {
        let content = std::fs::read_to_string(path).map_err(|source| StoryError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.parse_content(&content, &path.to_string_lossy()))
    }

    /// Recursively parse every story file under `dir`.
    ///
    /// Story files match `story_<major>_<minor>*.md` (case-insensitive);
    /// files whose name contains `TEMPLATE` are skipped. Files that cannot
    /// be read are logged and skipped rather than failing the whole walk.
    pub fn parse_directory(&self, dir: &Path) -> Result<Vec<ParsedStory>, StoryError> {
        if !dir.is_dir() {
            return Err(StoryError::DirectoryNotFound(dir.to_path_buf()));
        }

        let mut files: Vec<std::path::PathBuf> = ignore::WalkBuilder::new(dir)
            .build()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .map(ignore::DirEntry::into_path)
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| {
                        STORY_FILE_RE.is_match(name) && !name.contains("TEMPLATE")
                    })
            })
            .collect();
        files.sort();

        let mut parsed = Vec::with_capacity(files.len());
        for path in files {
            match self.parse_file(&path) {
                Ok(story) => parsed.push(story),
                Err(error) => warn!(path = %path.display(), %error, "skipping unreadable story file"),
            }
        }
        debug!(count = parsed.len(), dir = %dir.display(), "parsed story directory");
        Ok(parsed)
    }

    /// Parse story markdown already held in memory.
    ///
    /// `file_path` supplies the story id (from the file name) and the epic
    /// metadata (from the directory segments); it is recorded on the story
    /// verbatim.
    #[must_use]
    pub fn parse_content(&self, content: &str, file_path: &str) -> ParsedStory {
        let (story_id, normalized_id) = derive_ids(file_path);
        let (epic_path, epic_title) = derive_epic(file_path);
        let title = extract_title(content).unwrap_or_else(|| story_id.clone());
        let (actor, capability, benefit) = extract_narrative(content);

        let acceptance_criteria = extract_section(content, "Acceptance Criteria")
            .map(|body| extract_bullets(&body))
            .unwrap_or_default();
        let test_scenarios = extract_section(content, "Test Scenarios")
            .map(|body| extract_numbered(&body))
            .unwrap_or_default();
        let implementation_guidance = optional_bullets(content, "Implementation Guidance");
        let deliverables = optional_bullets(content, "Deliverables");
        let dependencies = optional_bullets(content, "Dependencies");

        let mut validation = ValidationResult::default();

        let (services_involved, services_status) = self.resolve_services(
            content,
            &title,
            &acceptance_criteria,
            implementation_guidance.as_deref(),
            deliverables.as_deref(),
            file_path,
            &mut validation,
        );

        if acceptance_criteria.is_empty() && test_scenarios.is_empty() {
            validation.errors.push(ValidationIssue::error(
                "acceptance_criteria",
                "story has no acceptance criteria and no test scenarios",
                file_path,
            ));
        }

        let story = Story {
            story_id,
            normalized_id,
            title,
            file_path: file_path.to_string(),
            actor,
            capability,
            benefit,
            acceptance_criteria,
            test_scenarios,
            services_involved,
            services_status,
            implementation_guidance,
            deliverables,
            dependencies,
            epic_path,
            epic_title,
        };

        ParsedStory { story, validation }
    }

    #[allow(clippy::too_many_arguments)]
    fn resolve_services(
        &self,
        content: &str,
        title: &str,
        criteria: &[String],
        guidance: Option<&[String]>,
        deliverables: Option<&[String]>,
        file_path: &str,
        validation: &mut ValidationResult,
    ) -> (Vec<ServiceName>, ServicesStatus) {
        let tokens: Vec<String> = extract_section(content, "Services Involved")
            .map(|body| extract_bullets(&body))
            .unwrap_or_default()
            .iter()
            .map(|token| token.trim().to_lowercase())
            .filter(|token| !token.is_empty())
            .collect();

        if !tokens.is_empty() {
            let mut services = Vec::new();
            let mut unknown = Vec::new();
            for token in &tokens {
                match token.parse::<ServiceName>() {
                    Ok(service) => {
                        if !services.contains(&service) {
                            services.push(service);
                        }
                    }
                    Err(()) => {
                        if !unknown.contains(token) {
                            unknown.push(token.clone());
                        }
                    }
                }
            }
            if unknown.is_empty() {
                return (services, ServicesStatus::Present);
            }
            validation.errors.push(ValidationIssue::error(
                "services_involved",
                format!("unrecognized services: {}", unknown.join(", ")),
                file_path,
            ));
            return (services, ServicesStatus::Invalid);
        }

        // No declaration. Try inference when enabled.
        if let Some(inference) = &self.inference {
            let result = inference.infer(title, criteria, guidance, deliverables);
            if !result.services.is_empty() {
                let names: Vec<&str> = result.services.iter().map(|s| s.as_str()).collect();
                validation.warnings.push(ValidationIssue::warning(
                    "services_involved",
                    format!(
                        "services not declared; inferred {} (confidence: {})",
                        names.join(", "),
                        result.confidence
                    ),
                    file_path,
                ));
                return (result.services, ServicesStatus::Present);
            }
        }

        validation.warnings.push(ValidationIssue::warning(
            "services_involved",
            "no services declared",
            file_path,
        ));
        (Vec::new(), ServicesStatus::Missing)
    }
}

impl Default for StoryParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Human ("Story 3.2") and normalized ("STORY_3_2") ids from the file name.
fn derive_ids(file_path: &str) -> (String, String) {
    let file_name = Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    STORY_ID_RE.captures(&file_name).map_or_else(
        || ("Unknown".to_string(), "UNKNOWN".to_string()),
        |caps| {
            let (major, minor) = (&caps[1], &caps[2]);
            (
                format!("Story {major}.{minor}"),
                format!("STORY_{major}_{minor}"),
            )
        },
    )
}

/// Epic directory segment and its Title Cased name, when the path has one.
fn derive_epic(file_path: &str) -> (Option<String>, Option<String>) {
    for segment in Path::new(file_path)
        .components()
        .filter_map(|c| c.as_os_str().to_str())
    {
        if let Some(caps) = EPIC_RE.captures(segment) {
            let title = title_case(&caps[1]);
            return (Some(segment.to_string()), Some(title));
        }
    }
    (None, None)
}

fn title_case(slug: &str) -> String {
    slug.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// First `# ` heading, with any `Story X.Y -` prefix stripped.
fn extract_title(content: &str) -> Option<String> {
    let raw = TITLE_RE.captures(content)?.get(1)?.as_str().trim();
    let cleaned = TITLE_PREFIX_RE.replace(raw, "").trim().to_string();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn extract_narrative(content: &str) -> (Option<String>, Option<String>, Option<String>) {
    let actor = ACTOR_RE
        .captures(content)
        .map(|caps| caps[1].trim().trim_end_matches(',').to_string());
    let capability = CAPABILITY_RE
        .captures(content)
        .map(|caps| caps[1].trim().trim_end_matches([',', '.']).to_string());
    let benefit = BENEFIT_RE
        .captures(content)
        .map(|caps| caps[1].trim().trim_end_matches([',', '.']).to_string());
    (actor, capability, benefit)
}

/// Body of the `## … {name}` section, or None when the heading is absent.
fn extract_section(content: &str, name: &str) -> Option<String> {
    let pattern = format!(r"(?m)^##[^#\n]*{}[^\n]*$", regex::escape(name));
    let heading_re = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .ok()?;
    let heading = heading_re.find(content)?;
    let rest = &content[heading.end()..];
    let body = rest.find("\n##").map_or(rest, |next| &rest[..next]);
    Some(body.trim().to_string())
}

/// `- ` / `* ` items, one entry per bullet. Continuation lines are ignored.
fn extract_bullets(body: &str) -> Vec<String> {
    body.lines()
        .filter_map(|line| BULLET_RE.captures(line))
        .map(|caps| caps[1].trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// `1.` items; indented continuation lines are appended with a single space.
/// A blank line or heading closes the current item, and lines after a closed
/// item belong to no item.
fn extract_numbered(body: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    let mut open = false;
    for line in body.lines() {
        if let Some(caps) = NUMBERED_RE.captures(line) {
            items.push(caps[1].trim().to_string());
            open = true;
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            open = false;
            continue;
        }
        if open && let Some(last) = items.last_mut() {
            if !last.is_empty() {
                last.push(' ');
            }
            last.push_str(trimmed);
        }
    }
    items.retain(|item| !item.is_empty());
    items
}

fn optional_bullets(content: &str, name: &str) -> Option<Vec<String>> {
    let bullets = extract_section(content, name).map(|body| extract_bullets(&body))?;
    if bullets.is_empty() {
        None
    } else {
        Some(bullets)
    }
}
