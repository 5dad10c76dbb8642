//! Matching scanned symbols against story text.

use quilt_core::workspace::{BackendClass, FrontendComponent, WorkspaceContext};

/// Minimum CamelCase word length considered for matching; short words
/// ("Id", "To") hit everywhere.
const MIN_WORD_LEN: usize = 4;

/// Backend classes whose names relate to `story_text`.
#[must_use]
pub fn relevant_classes<'a>(
    context: &'a WorkspaceContext,
    story_text: &str,
) -> Vec<&'a BackendClass> {
    let text = story_text.to_lowercase();
    context
        .backend_classes
        .iter()
        .filter(|class| name_matches(&class.class_name, &text))
        .collect()
}

/// Frontend components whose names relate to `story_text`.
#[must_use]
pub fn relevant_components<'a>(
    context: &'a WorkspaceContext,
    story_text: &str,
) -> Vec<&'a FrontendComponent> {
    let text = story_text.to_lowercase();
    context
        .frontend_components
        .iter()
        .filter(|component| name_matches(&component.component_name, &text))
        .collect()
}

/// A name matches when the whole lowered name appears in the text, or any
/// sufficiently long CamelCase word does.
fn name_matches(name: &str, text_lower: &str) -> bool {
    if text_lower.contains(&name.to_lowercase()) {
        return true;
    }
    camel_words(name)
        .iter()
        .any(|word| word.len() >= MIN_WORD_LEN && text_lower.contains(word.as_str()))
}

/// "CreditEventForm" -> ["credit", "event", "form"].
fn camel_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for ch in name.chars() {
        if ch.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_camel_case() {
        assert_eq!(camel_words("CreditEventForm"), vec!["credit", "event", "form"]);
        assert_eq!(camel_words("trade"), vec!["trade"]);
    }

    #[test]
    fn matches_on_long_words_only() {
        assert!(name_matches("CreditEventService", "record a credit event"));
        assert!(!name_matches("IdGenerator", "record a credit event"));
        assert!(name_matches("TradeBlotter", "the blotter shows trades"));
    }

    #[test]
    fn matches_full_name_containment() {
        assert!(name_matches(
            "CreditEventForm",
            "render the crediteventform widget"
        ));
    }
}
