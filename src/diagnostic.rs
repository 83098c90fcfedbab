//! Non-fatal notes about fallbacks taken while building the declaration tree.
use std::fmt;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// JSON path of the value that triggered it, e.g. `$.users[0].name`.
    pub path: String,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// `[]` gives no element to infer from; typed as `[Any?]`.
    EmptyArray,
    /// First element is null; typed as `[Any?]`.
    NullFirstElement,
    /// Element at `index` has a different JSON kind than element 0.
    MixedArray { index: usize, first: &'static str, found: &'static str },
    /// Key reduced to an empty name.
    EmptyIdentifier { key: String, fallback: String },
    /// Derived name already used in the same declaration.
    IdentifierCollision { key: String, wanted: String, chosen: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.path)?;
        match &self.kind {
            DiagnosticKind::EmptyArray => {
                write!(f, "empty array, element type defaults to `Any?`")
            }
            DiagnosticKind::NullFirstElement => {
                write!(f, "first array element is null, element type defaults to `Any?`")
            }
            DiagnosticKind::MixedArray { index, first, found } => write!(
                f,
                "element {index} is {found} but element 0 is {first}; typed from element 0"
            ),
            DiagnosticKind::EmptyIdentifier { key, fallback } => {
                write!(f, "key {key:?} has no usable identifier characters, using `{fallback}`")
            }
            DiagnosticKind::IdentifierCollision { key, wanted, chosen } => {
                write!(f, "key {key:?} derives `{wanted}`, already taken; using `{chosen}`")
            }
        }
    }
}

/// Extend a JSON path with an object key.
pub fn key_path(parent: &str, key: &str) -> String {
    let plain = !key.is_empty()
        && !key.starts_with(|c: char| c.is_ascii_digit())
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        format!("{parent}.{key}")
    } else {
        // serde_json gives a quoted, escaped literal
        let quoted = serde_json::Value::from(key).to_string();
        format!("{parent}[{quoted}]")
    }
}

/// Extend a JSON path with an array index.
pub fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_quote_keys_that_are_not_plain() {
        assert_eq!(key_path("$", "user"), "$.user");
        assert_eq!(key_path("$", "user name"), "$[\"user name\"]");
        assert_eq!(key_path("$.a", "say \"hi\""), "$.a[\"say \\\"hi\\\"\"]");
        assert_eq!(index_path("$.list", 0), "$.list[0]");
    }

    #[test]
    fn serializes_with_flattened_kind_tag() {
        let d = Diagnostic { path: "$.list".into(), kind: DiagnosticKind::EmptyArray };
        assert_eq!(
            serde_json::to_value(&d).unwrap(),
            serde_json::json!({ "path": "$.list", "kind": "empty_array" })
        );
        assert_eq!(d.to_string(), "$.list: empty array, element type defaults to `Any?`");
    }
}
