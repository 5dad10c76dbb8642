//! Repository-wide enum registry, built in its own pass before any class
//! parsing so field extraction can resolve enum types regardless of file
//! visitation order.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

static ENUM_DECL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:public\s+)?enum\s+(\w+)\s*\{([^}]+)\}").unwrap());
static CONSTANT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z_][A-Z0-9_]*$").unwrap());

/// Enum name to ordered constant names, collected across the whole backend
/// tree.
#[derive(Debug, Default)]
pub struct EnumRegistry {
    enums: BTreeMap<String, Vec<String>>,
}

impl EnumRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every `enum NAME { ... }` declaration in `source`.
    ///
    /// Constant candidates are split on `,` and `;`, truncated at the first
    /// `(` or whitespace (constructor arguments, doc noise), and kept only
    /// when they look like SCREAMING_SNAKE_CASE identifiers. Declarations
    /// that yield no constants are ignored.
    pub fn collect_from_source(&mut self, source: &str) {
        for caps in ENUM_DECL_RE.captures_iter(source) {
            let name = caps[1].to_string();
            let body = &caps[2];
            let constants: Vec<String> = body
                .split([',', ';'])
                .filter_map(|segment| {
                    let trimmed = segment.trim();
                    let token = trimmed
                        .split(['(', ' ', '\t', '\n'])
                        .next()
                        .unwrap_or_default();
                    CONSTANT_RE.is_match(token).then(|| token.to_string())
                })
                .collect();
            if !constants.is_empty() {
                trace!(enum_name = %name, count = constants.len(), "registered enum");
                self.enums.insert(name, constants);
            }
        }
    }

    #[must_use]
    pub fn get(&self, enum_name: &str) -> Option<&[String]> {
        self.enums.get(enum_name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, enum_name: &str) -> bool {
        self.enums.contains_key(enum_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.enums.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}
