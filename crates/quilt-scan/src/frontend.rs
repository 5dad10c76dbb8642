//! React component extraction from frontend source files.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use quilt_core::workspace::FrontendComponent;

static EXPORT_DECL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*export\s+(?:default\s+)?(?:async\s+)?(?:function|const|class)\s+(\w+)")
        .unwrap()
});
static EXPORT_DEFAULT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*export\s+default\s+(\w+)\s*;?\s*$").unwrap());
static HOOK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(use[A-Z]\w*)\s*\(").unwrap());

const PAGE_SEGMENTS: [&str; 3] = ["pages", "views", "routes"];

/// Parse one frontend source file into a component record.
///
/// The component name comes from the file name; `relative_path` is the path
/// under the frontend source root and drives page detection and domain
/// grouping.
#[must_use]
pub fn parse_component(source: &str, file_path: &str, relative_path: &str) -> FrontendComponent {
    let component_name = Path::new(relative_path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut exports: Vec<String> = Vec::new();
    for caps in EXPORT_DECL_RE.captures_iter(source) {
        let name = caps[1].to_string();
        if !exports.contains(&name) {
            exports.push(name);
        }
    }
    for caps in EXPORT_DEFAULT_RE.captures_iter(source) {
        let name = caps[1].to_string();
        if !matches!(name.as_str(), "function" | "class" | "async") && !exports.contains(&name) {
            exports.push(name);
        }
    }

    let hooks: Vec<String> = HOOK_RE
        .captures_iter(source)
        .map(|caps| caps[1].to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let is_page = Path::new(relative_path)
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .any(|segment| PAGE_SEGMENTS.contains(&segment));

    FrontendComponent {
        component_name,
        file_path: file_path.to_string(),
        relative_path: relative_path.to_string(),
        exports,
        hooks,
        is_page,
    }
}

/// Grouping key for a component: its top-level source directory (ignoring a
/// leading `src`), or "common" for files sitting directly in the root.
#[must_use]
pub fn component_domain(relative_path: &str) -> String {
    let mut segments: Vec<&str> = Path::new(relative_path)
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();
    if segments.first() == Some(&"src") {
        segments.remove(0);
    }
    if segments.len() < 2 {
        return "common".to_string();
    }
    segments[0].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const COMPONENT: &str = r#"import React, { useState } from 'react';
import { useQuery } from '@tanstack/react-query';

export function CreditEventForm({ tradeId }) {
    const [eventType, setEventType] = useState('');
    const { data } = useQuery(['trade', tradeId], fetchTrade);
    return <form>{data?.reference}</form>;
}

const helper = () => {};

export default CreditEventForm;
"#;

    #[test]
    fn extracts_name_exports_and_hooks() {
        let component = parse_component(
            COMPONENT,
            "frontend/src/components/credit/CreditEventForm.tsx",
            "components/credit/CreditEventForm.tsx",
        );
        assert_eq!(component.component_name, "CreditEventForm");
        assert_eq!(component.exports, vec!["CreditEventForm"]);
        assert_eq!(component.hooks, vec!["useQuery", "useState"]);
        assert!(!component.is_page);
    }

    #[test]
    fn page_detection_from_path_segment() {
        let component = parse_component("export default Home;", "x", "pages/Home.tsx");
        assert!(component.is_page);
        let component = parse_component("export default Home;", "x", "components/Home.tsx");
        assert!(!component.is_page);
    }

    #[test]
    fn domain_from_top_segment_or_common() {
        assert_eq!(component_domain("components/credit/Form.tsx"), "components");
        assert_eq!(component_domain("src/pages/Home.tsx"), "pages");
        assert_eq!(component_domain("App.tsx"), "common");
        assert_eq!(component_domain("src/App.tsx"), "common");
    }
}
