//! Regex-based Java source extraction: class shape, endpoints, and entity
//! field metadata.
//!
//! This is deliberately not a Java parser. The patterns target the
//! conventional Spring/JPA layout (one public class per file, annotations on
//! the preceding lines) and degrade to skipping what they cannot read.

use std::sync::LazyLock;

use regex::Regex;

use quilt_core::enums::{ClassRole, HttpMethod, JsonType};
use quilt_core::workspace::{ApiEndpoint, BackendClass, DatabaseEntity, EntityFieldMetadata};

use crate::registry::EnumRegistry;

static PACKAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^package\s+([\w.]+)\s*;").unwrap());
static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:public\s+)?(?:final\s+)?(?:abstract\s+)?class\s+(\w+)").unwrap()
});
static ANNOTATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*@(\w+)").unwrap());
static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:public|protected)\s+(?:static\s+)?(?:final\s+)?[\w<>\[\],.? ]+\s+(\w+)\s*\(")
        .unwrap()
});
static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:private|protected|public)\s+(?:final\s+)?[\w<>\[\],.? ]+?\s+(\w+)\s*[=;]")
        .unwrap()
});
static BASE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@RequestMapping\s*\(\s*(?:value\s*=\s*)?"([^"]*)""#).unwrap()
});
static MAPPING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@(Get|Post|Put|Delete|Patch)Mapping(?:\s*\(\s*(?:value\s*=\s*)?"([^"]*)"[^)]*\))?"#)
        .unwrap()
});
static TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"@Table\s*\([^)]*name\s*=\s*"([^"]*)""#).unwrap());
static ENTITY_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:private|protected)\s+(?:final\s+)?([\w.]+(?:<[\w., ]+>)?)\s+(\w+)\s*(?:=[^;]*)?;")
        .unwrap()
});
static COLUMN_NULLABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"nullable\s*=\s*false").unwrap());
static COLUMN_LENGTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"length\s*=\s*(\d+)").unwrap());
static COLUMN_PRECISION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"precision\s*=\s*(\d+)").unwrap());
static COLUMN_SCALE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"scale\s*=\s*(\d+)").unwrap());

const RELATIONSHIP_ANNOTATIONS: [&str; 4] =
    ["@OneToOne", "@OneToMany", "@ManyToOne", "@ManyToMany"];

/// How many lines above a field declaration are searched for annotations.
const ANNOTATION_WINDOW: usize = 5;

/// Everything extracted from one Java source file.
#[derive(Debug)]
pub struct JavaParseOutput {
    pub class: BackendClass,
    pub endpoints: Vec<ApiEndpoint>,
    pub entity: Option<DatabaseEntity>,
}

/// Parse one Java source file. Returns None when no class declaration is
/// found (interfaces, enums-only files, package-info).
#[must_use]
pub fn parse_java_source(
    source: &str,
    file_path: &str,
    registry: &EnumRegistry,
    extract_methods: bool,
    extract_endpoints: bool,
) -> Option<JavaParseOutput> {
    let class_match = CLASS_RE.captures(source)?;
    let class_name = class_match[1].to_string();
    let package_name = PACKAGE_RE
        .captures(source)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();
    let fully_qualified_name = if package_name.is_empty() {
        class_name.clone()
    } else {
        format!("{package_name}.{class_name}")
    };

    // Annotations above the class declaration classify its role.
    let prelude = &source[..class_match.get(0).map_or(0, |m| m.start())];
    let annotations: Vec<String> = ANNOTATION_RE
        .captures_iter(prelude)
        .map(|caps| caps[1].to_string())
        .collect();
    let role = classify_role(&class_name, &annotations);

    let methods = if extract_methods {
        let mut names: Vec<String> = METHOD_RE
            .captures_iter(source)
            .map(|caps| caps[1].to_string())
            .filter(|name| name != &class_name)
            .collect();
        names.dedup();
        (!names.is_empty()).then_some(names)
    } else {
        None
    };

    let fields = {
        let names: Vec<String> = FIELD_RE
            .captures_iter(source)
            .map(|caps| caps[1].to_string())
            .collect();
        (!names.is_empty()).then_some(names)
    };

    let endpoints = if extract_endpoints && role == ClassRole::Controller {
        extract_endpoints_from(source, &class_name)
    } else {
        Vec::new()
    };

    let entity = (role == ClassRole::Entity).then(|| DatabaseEntity {
        entity_name: class_name.clone(),
        table_name: TABLE_RE.captures(source).map(|caps| caps[1].to_string()),
        package_name: package_name.clone(),
        fields: extract_entity_fields(source, registry),
    });

    Some(JavaParseOutput {
        class: BackendClass {
            class_name,
            package_name,
            fully_qualified_name,
            role,
            file_path: file_path.to_string(),
            methods,
            fields,
            annotations,
        },
        endpoints,
        entity,
    })
}

/// Annotation markers first, name suffixes second, `Util` as the default.
fn classify_role(class_name: &str, annotations: &[String]) -> ClassRole {
    for annotation in annotations {
        match annotation.as_str() {
            "Service" => return ClassRole::Service,
            "Repository" => return ClassRole::Repository,
            "RestController" | "Controller" => return ClassRole::Controller,
            "Entity" => return ClassRole::Entity,
            "Configuration" => return ClassRole::Config,
            _ => {}
        }
    }
    if class_name.ends_with("Service") {
        ClassRole::Service
    } else if class_name.ends_with("Repository") {
        ClassRole::Repository
    } else if class_name.ends_with("Controller") {
        ClassRole::Controller
    } else if class_name.ends_with("Entity") {
        ClassRole::Entity
    } else if class_name.ends_with("Config") {
        ClassRole::Config
    } else if class_name.ends_with("DTO")
        || class_name.ends_with("Dto")
        || class_name.ends_with("Request")
        || class_name.ends_with("Response")
    {
        ClassRole::Dto
    } else {
        ClassRole::Util
    }
}

fn extract_endpoints_from(source: &str, class_name: &str) -> Vec<ApiEndpoint> {
    let base = BASE_PATH_RE
        .captures(source)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();

    MAPPING_RE
        .captures_iter(source)
        .map(|caps| {
            let method = match &caps[1] {
                "Get" => HttpMethod::Get,
                "Post" => HttpMethod::Post,
                "Put" => HttpMethod::Put,
                "Delete" => HttpMethod::Delete,
                _ => HttpMethod::Patch,
            };
            let suffix = caps.get(2).map_or("", |m| m.as_str());
            ApiEndpoint {
                method,
                path: join_paths(&base, suffix),
                controller_class: class_name.to_string(),
            }
        })
        .collect()
}

/// Concatenate base and method paths with exactly one slash between them.
fn join_paths(base: &str, suffix: &str) -> String {
    let base = base.trim_end_matches('/');
    let suffix = suffix.trim_start_matches('/');
    match (base.is_empty(), suffix.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{suffix}"),
        (false, true) => base.to_string(),
        (false, false) => format!("{base}/{suffix}"),
    }
}

/// Extract payload-relevant field metadata from an entity class body.
///
/// For each field declaration, the annotations on up to [`ANNOTATION_WINDOW`]
/// preceding lines apply; the window stops early at a blank line or another
/// field declaration. `@Id` fields are excluded.
fn extract_entity_fields(source: &str, registry: &EnumRegistry) -> Vec<EntityFieldMetadata> {
    let lines: Vec<&str> = source.lines().collect();
    let mut fields = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let Some(caps) = ENTITY_FIELD_RE.captures(line) else {
            continue;
        };
        let source_type = caps[1].to_string();
        let name = caps[2].to_string();

        let window = annotation_window(&lines, index);
        if window.iter().any(|l| l.contains("@Id")) {
            continue;
        }

        let annotation_text = window.join("\n");
        let nullable = !COLUMN_NULLABLE_RE.is_match(&annotation_text);
        let max_length = capture_u32(&COLUMN_LENGTH_RE, &annotation_text);
        let precision = capture_u32(&COLUMN_PRECISION_RE, &annotation_text);
        let scale = capture_u32(&COLUMN_SCALE_RE, &annotation_text);

        let is_relationship = RELATIONSHIP_ANNOTATIONS
            .iter()
            .any(|marker| annotation_text.contains(marker));
        let is_enumerated = annotation_text.contains("@Enumerated");

        let simple_type = source_type.rsplit('.').next().unwrap_or(&source_type);
        let (json_type, enum_values) = if is_relationship {
            (JsonType::Object, None)
        } else if is_enumerated {
            (
                JsonType::Enum,
                registry.get(simple_type).map(<[String]>::to_vec),
            )
        } else {
            map_java_type(simple_type, registry)
        };

        fields.push(EntityFieldMetadata {
            name,
            source_type,
            json_type,
            nullable,
            max_length,
            precision,
            scale,
            enum_values,
        });
    }

    fields
}

/// Annotation lines that apply to the field declared at `field_index`.
fn annotation_window<'a>(lines: &[&'a str], field_index: usize) -> Vec<&'a str> {
    let mut window = Vec::new();
    for offset in 1..=ANNOTATION_WINDOW {
        let Some(index) = field_index.checked_sub(offset) else {
            break;
        };
        let line = lines[index];
        if line.trim().is_empty() || ENTITY_FIELD_RE.is_match(line) {
            break;
        }
        window.push(line);
    }
    window
}

fn capture_u32(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text).and_then(|caps| caps[1].parse().ok())
}

/// Java declared type to the JSON shape generated payloads will use.
///
/// An unannotated field whose capitalized type name is in the enum registry
/// is still treated as an enum; a plain class sharing an enum's name would be
/// misread, which is accepted for conventional codebases.
fn map_java_type(simple_type: &str, registry: &EnumRegistry) -> (JsonType, Option<Vec<String>>) {
    match simple_type {
        "String" => (JsonType::String, None),
        "BigDecimal" | "Integer" | "Long" | "int" | "long" | "Double" | "double" => {
            (JsonType::Number, None)
        }
        "Boolean" | "boolean" => (JsonType::Boolean, None),
        "LocalDate" | "Date" => (JsonType::Date, None),
        "LocalDateTime" | "ZonedDateTime" | "Instant" => (JsonType::Datetime, None),
        other => {
            if other.starts_with(char::is_uppercase) && registry.contains(other) {
                (JsonType::Enum, registry.get(other).map(<[String]>::to_vec))
            } else {
                (JsonType::Object, None)
            }
        }
    }
}
