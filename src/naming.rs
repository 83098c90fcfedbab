//! Identifier derivation: JSON keys → Swift member and type names.
use std::borrow::Cow;
use std::collections::HashSet;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::diagnostic::{Diagnostic, DiagnosticKind};

// Word characters are Unicode letters, digits and `_` (a superset of
// `[A-Za-z0-9_]`); combining marks may follow but never lead.
static LEADING_NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\p{Alphabetic}\p{Nd}_]+").expect("static regex"));

static SEPARATOR_THEN_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{Alphabetic}\p{M}\p{Nd}_]+(.)").expect("static regex"));

static SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{Alphabetic}\p{M}\p{Nd}_]").expect("static regex"));

/// Swift keywords that need back-quotes when used as a member name.
const SWIFT_KEYWORDS: &[&str] = &[
    "Any", "Self", "as", "associatedtype", "await", "break", "case", "catch", "class",
    "continue", "default", "defer", "deinit", "do", "else", "enum", "extension",
    "fallthrough", "false", "fileprivate", "for", "func", "guard", "if", "import", "in",
    "init", "inout", "internal", "is", "let", "nil", "open", "operator", "precedencegroup",
    "private", "protocol", "public", "repeat", "rethrows", "return", "self", "static",
    "struct", "subscript", "super", "switch", "throw", "throws", "true", "try",
    "typealias", "var", "where", "while",
];

/// Type names a nested declaration must not take: they would shadow the
/// generated `CodingKeys` or the primitive types used by sibling members.
const RESERVED_TYPE_NAMES: &[&str] = &[
    "CodingKeys", "String", "Int", "Float", "Bool", "Any", "Self", "Type", "Protocol",
    "Optional", "Array",
];

/// Title-case a raw key into camelCase (`capitalize_first == false`) or
/// PascalCase (`true`).
///
/// May return an empty string (e.g. for `"!!!"`); callers pick the fallback.
pub fn derive_identifier(raw_key: &str, capitalize_first: bool) -> String {
    let stripped = LEADING_NON_WORD.replace(raw_key, "");
    let joined = SEPARATOR_THEN_CHAR.replace_all(&stripped, |caps: &regex::Captures| {
        caps[1].to_uppercase()
    });
    let cleaned = SEPARATOR.replace_all(&joined, "");
    recase_first(&cleaned, capitalize_first)
}

fn recase_first(s: &str, upper: bool) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out: String = if upper {
                first.to_uppercase().collect()
            } else {
                first.to_lowercase().collect()
            };
            out.push_str(chars.as_str());
            out
        }
    }
}

/// Back-quote keywords so they can be used as `let` / `case` names.
pub fn render_identifier(identifier: &str) -> Cow<'_, str> {
    if SWIFT_KEYWORDS.contains(&identifier) {
        Cow::Owned(format!("`{identifier}`"))
    } else {
        Cow::Borrowed(identifier)
    }
}

/// A set of names already used in one declaration.
#[derive(Debug, Default)]
struct Scope {
    taken: HashSet<String>,
}

impl Scope {
    fn reserving(names: &[&str]) -> Self {
        Self { taken: names.iter().map(|s| s.to_string()).collect() }
    }

    /// Take `wanted`, or the first free `wanted2`, `wanted3`, ...
    fn claim(&mut self, wanted: &str) -> String {
        let mut chosen = wanted.to_string();
        let mut n = 2u32;
        while self.taken.contains(&chosen) {
            chosen = format!("{wanted}{n}");
            n += 1;
        }
        self.taken.insert(chosen.clone());
        chosen
    }
}

/// Member and nested-type names for one declaration, with fallbacks and
/// collision suffixes applied.
///
/// Properties and nested types share one Swift namespace, so both draw from
/// the same set; it starts out holding [`RESERVED_TYPE_NAMES`].
#[derive(Debug)]
pub struct DeclarationScope {
    names: Scope,
}

impl Default for DeclarationScope {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationScope {
    pub fn new() -> Self {
        Self { names: Scope::reserving(RESERVED_TYPE_NAMES) }
    }

    /// camelCase member name for `key` (1-based `position` in its object).
    pub fn member_identifier(
        &mut self,
        key: &str,
        position: usize,
        path: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> String {
        let wanted = valid_or_fallback(key, false, position, path, diagnostics);
        claim_reporting(&mut self.names, key, wanted, path, diagnostics)
    }

    /// PascalCase name for the nested declaration introduced by `key`.
    pub fn type_name(
        &mut self,
        key: &str,
        position: usize,
        path: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> String {
        let wanted = valid_or_fallback(key, true, position, path, diagnostics);
        claim_reporting(&mut self.names, key, wanted, path, diagnostics)
    }
}

/// Whether `name` would shadow `CodingKeys` or a primitive type.
pub fn is_reserved_type_name(name: &str) -> bool {
    RESERVED_TYPE_NAMES.contains(&name)
}

fn valid_or_fallback(
    key: &str,
    capitalize_first: bool,
    position: usize,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    let derived = derive_identifier(key, capitalize_first);
    // a bare `_` is Swift's wildcard, not a name
    if derived.is_empty() || derived == "_" {
        let fallback = if capitalize_first {
            format!("Field{position}")
        } else {
            format!("field{position}")
        };
        diagnostics.push(Diagnostic {
            path: path.to_string(),
            kind: DiagnosticKind::EmptyIdentifier {
                key: key.to_string(),
                fallback: fallback.clone(),
            },
        });
        return fallback;
    }
    if derived.starts_with(|c: char| c.is_numeric()) {
        return format!("_{derived}");
    }
    derived
}

fn claim_reporting(
    scope: &mut Scope,
    key: &str,
    wanted: String,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    let chosen = scope.claim(&wanted);
    if chosen != wanted {
        diagnostics.push(Diagnostic {
            path: path.to_string(),
            kind: DiagnosticKind::IdentifierCollision {
                key: key.to_string(),
                wanted,
                chosen: chosen.clone(),
            },
        });
    }
    chosen
}
