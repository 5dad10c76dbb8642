//! Example payload synthesis from entity field metadata.
//!
//! Values are selected deterministically so regenerating a test plan never
//! produces a diff. Field names steer valid values toward domain-plausible
//! literals (currencies, dates, notionals); everything else falls back to a
//! type-shaped sample.

use serde_json::{Map, Value, json};

use quilt_core::enums::JsonType;
use quilt_core::workspace::{DatabaseEntity, EntityFieldMetadata};

/// A structurally valid example object for the entity.
///
/// Nullable fields are emitted as `null`; required fields get a value that
/// satisfies every recorded constraint. Entities without field metadata
/// degrade to `{}`.
#[must_use]
pub fn valid_payload(entity: &DatabaseEntity) -> Value {
    let mut object = Map::new();
    for field in &entity.fields {
        let value = if field.nullable {
            Value::Null
        } else {
            valid_value(field)
        };
        object.insert(field.name.clone(), value);
    }
    Value::Object(object)
}

/// An example object violating one constraint per field.
///
/// Per-field violations, by type: over-length or empty strings, non-numeric
/// strings for numbers, malformed dates, out-of-enum literals. Fields with
/// no violable constraint keep their valid value.
#[must_use]
pub fn invalid_payload(entity: &DatabaseEntity) -> Value {
    let mut object = Map::new();
    for field in &entity.fields {
        object.insert(field.name.clone(), invalid_value(field));
    }
    Value::Object(object)
}

fn valid_value(field: &EntityFieldMetadata) -> Value {
    if let Some(values) = field.enum_values.as_deref()
        && let Some(first) = values.first()
    {
        return json!(first);
    }
    if let Some(value) = name_keyed_value(field) {
        return value;
    }
    match field.json_type {
        JsonType::String => json!(sample_string(field)),
        JsonType::Number => {
            if field.scale.is_some_and(|s| s > 0) {
                json!(100.25)
            } else {
                json!(100)
            }
        }
        JsonType::Boolean => json!(true),
        JsonType::Date => json!("2024-06-15"),
        JsonType::Datetime => json!("2024-06-15T10:30:00Z"),
        // Enum-typed with no recorded constants, or a nested object.
        JsonType::Enum | JsonType::Object => json!({}),
    }
}

/// Domain-plausible values for conventionally named fields.
fn name_keyed_value(field: &EntityFieldMetadata) -> Option<Value> {
    let name = field.name.to_lowercase();
    match field.json_type {
        JsonType::String if name.contains("currency") => Some(json!("USD")),
        JsonType::String if name.contains("frequency") => Some(json!("QUARTERLY")),
        JsonType::Number if name.contains("notional") || name.contains("amount") => {
            Some(json!(1_000_000))
        }
        JsonType::Number if name.contains("rate") || name.contains("spread") => {
            Some(json!(0.0125))
        }
        JsonType::Date if name.contains("maturity") => Some(json!("2030-06-20")),
        JsonType::Date if name.contains("effective") => Some(json!("2024-06-20")),
        _ => None,
    }
}

fn sample_string(field: &EntityFieldMetadata) -> String {
    let base = format!("SAMPLE_{}", field.name.to_uppercase());
    match field.max_length {
        Some(max) => {
            let max = usize::try_from(max).unwrap_or(usize::MAX);
            base.chars().take(max).collect()
        }
        None => base,
    }
}

fn invalid_value(field: &EntityFieldMetadata) -> Value {
    if field.enum_values.is_some() {
        return json!("NOT_A_DECLARED_CONSTANT");
    }
    match field.json_type {
        JsonType::String => match field.max_length {
            Some(max) => {
                let len = usize::try_from(max).unwrap_or(0) + 1;
                json!("X".repeat(len))
            }
            // Empty string violates required-ness; for nullable fields it is
            // still a shape mismatch the API should reject or ignore.
            None => json!(""),
        },
        JsonType::Number => json!("not-a-number"),
        JsonType::Date | JsonType::Datetime => json!("not-a-date"),
        JsonType::Boolean => json!("not-a-boolean"),
        JsonType::Enum => json!("NOT_A_DECLARED_CONSTANT"),
        JsonType::Object => Value::Null,
    }
}

/// Java construction snippet for backend tests: instantiate the entity and
/// populate its required fields through setters.
#[must_use]
pub fn java_construction(entity: &DatabaseEntity, variable: &str) -> String {
    let mut lines = vec![format!(
        "{name} {variable} = new {name}();",
        name = entity.entity_name
    )];
    for field in &entity.fields {
        if field.nullable {
            continue;
        }
        if let Some(literal) = java_literal(field) {
            lines.push(format!(
                "{variable}.set{setter}({literal});",
                setter = capitalize(&field.name)
            ));
        }
    }
    lines.join("\n")
}

fn java_literal(field: &EntityFieldMetadata) -> Option<String> {
    if let Some(values) = field.enum_values.as_deref()
        && let Some(first) = values.first()
    {
        let simple = field.source_type.rsplit('.').next().unwrap_or("String");
        return Some(format!("{simple}.{first}"));
    }
    let value = match field.json_type {
        JsonType::String => format!("\"{}\"", sample_string(field)),
        JsonType::Number => match field.source_type.as_str() {
            "BigDecimal" => "new BigDecimal(\"100.25\")".to_string(),
            "Long" | "long" => "100L".to_string(),
            _ => "100".to_string(),
        },
        JsonType::Boolean => "true".to_string(),
        JsonType::Date => "LocalDate.parse(\"2024-06-15\")".to_string(),
        JsonType::Datetime => "LocalDateTime.parse(\"2024-06-15T10:30:00\")".to_string(),
        JsonType::Enum | JsonType::Object => return None,
    };
    Some(value)
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn field(name: &str, json_type: JsonType) -> EntityFieldMetadata {
        EntityFieldMetadata {
            name: name.to_string(),
            source_type: "String".to_string(),
            json_type,
            nullable: false,
            max_length: None,
            precision: None,
            scale: None,
            enum_values: None,
        }
    }

    fn credit_event() -> DatabaseEntity {
        DatabaseEntity {
            entity_name: "CreditEvent".to_string(),
            table_name: Some("credit_events".to_string()),
            package_name: "com.acme.domain".to_string(),
            fields: vec![
                EntityFieldMetadata {
                    name: "status".to_string(),
                    source_type: "EventStatus".to_string(),
                    json_type: JsonType::Enum,
                    nullable: false,
                    max_length: None,
                    precision: None,
                    scale: None,
                    enum_values: Some(vec![
                        "PENDING".to_string(),
                        "POSTED".to_string(),
                        "FAILED".to_string(),
                        "CANCELLED".to_string(),
                    ]),
                },
                EntityFieldMetadata {
                    max_length: Some(50),
                    ..field("referenceId", JsonType::String)
                },
                EntityFieldMetadata {
                    source_type: "BigDecimal".to_string(),
                    precision: Some(19),
                    scale: Some(4),
                    ..field("notional", JsonType::Number)
                },
                EntityFieldMetadata {
                    nullable: true,
                    ..field("comment", JsonType::String)
                },
                field("noticeDate", JsonType::Date),
            ],
        }
    }

    #[test]
    fn valid_status_is_a_declared_constant() {
        let payload = valid_payload(&credit_event());
        let status = payload["status"].as_str().unwrap();
        assert!(["PENDING", "POSTED", "FAILED", "CANCELLED"].contains(&status));
    }

    #[test]
    fn invalid_status_is_out_of_enum() {
        let payload = invalid_payload(&credit_event());
        let status = payload["status"].as_str().unwrap();
        assert!(!["PENDING", "POSTED", "FAILED", "CANCELLED"].contains(&status));
    }

    #[test]
    fn valid_payload_respects_constraints() {
        let payload = valid_payload(&credit_event());
        let reference = payload["referenceId"].as_str().unwrap();
        assert!(!reference.is_empty());
        assert!(reference.len() <= 50);
        assert_eq!(payload["notional"], json!(1_000_000));
        assert_eq!(payload["comment"], Value::Null);
        assert_eq!(payload["noticeDate"], json!("2024-06-15"));
    }

    #[test]
    fn invalid_payload_violates_a_constraint_per_field() {
        let entity = credit_event();
        let valid = valid_payload(&entity);
        let invalid = invalid_payload(&entity);

        assert!(invalid["referenceId"].as_str().unwrap().len() > 50);
        assert!(invalid["notional"].is_string());
        assert_eq!(invalid["noticeDate"], json!("not-a-date"));
        for field in &entity.fields {
            assert_ne!(valid[&field.name], invalid[&field.name], "{}", field.name);
        }
    }

    #[test]
    fn empty_metadata_degrades_to_empty_object() {
        let entity = DatabaseEntity {
            entity_name: "Opaque".to_string(),
            table_name: None,
            package_name: String::new(),
            fields: vec![],
        };
        assert_eq!(valid_payload(&entity), json!({}));
        assert_eq!(invalid_payload(&entity), json!({}));
    }

    #[test]
    fn name_keyed_values_apply() {
        let entity = DatabaseEntity {
            entity_name: "Trade".to_string(),
            table_name: None,
            package_name: String::new(),
            fields: vec![
                field("currency", JsonType::String),
                field("maturityDate", JsonType::Date),
            ],
        };
        let payload = valid_payload(&entity);
        assert_eq!(payload["currency"], json!("USD"));
        assert_eq!(payload["maturityDate"], json!("2030-06-20"));
    }

    #[test]
    fn java_construction_covers_required_fields() {
        let snippet = java_construction(&credit_event(), "event");
        assert!(snippet.starts_with("CreditEvent event = new CreditEvent();"));
        assert!(snippet.contains("event.setStatus(EventStatus.PENDING);"));
        assert!(snippet.contains("event.setNotional(new BigDecimal(\"100.25\"));"));
        assert!(snippet.contains("event.setNoticeDate(LocalDate.parse(\"2024-06-15\"));"));
        // Nullable fields are left unset.
        assert!(!snippet.contains("setComment"));
    }
}
