//! JSON document → nested Swift `Decodable` declarations.
//!
//! ```
//! let out = json_decodable::json_to_swift(r#"{"user name": "Ann"}"#, &Default::default()).unwrap();
//! assert!(out.source.contains(r#"case userName = "user name""#));
//! ```
pub mod cli;
pub mod codegen;
pub mod diagnostic;
pub mod error;
pub mod inference;
pub mod ir;
pub mod naming;

use serde_json::Value;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::ConvertError;

pub const DEFAULT_ROOT_NAME: &str = "JsonDecodable";

/// Per-invocation settings.
#[derive(Debug, Clone)]
pub struct Options {
    /// Name of the top-level declaration.
    pub root_name: String,
    /// Deepest allowed nesting of objects/arrays below the root; scalars
    /// inside the deepest container are fine.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { root_name: DEFAULT_ROOT_NAME.to_string(), max_depth: 128 }
    }
}

/// A successful conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Swift source, ending in exactly one newline.
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Conversion {
    /// Language label for the document the host opens.
    pub const LANGUAGE: &'static str = "swift";
}

/// Parse → shape check → infer → emit.
pub fn json_to_swift(text: &str, options: &Options) -> Result<Conversion, ConvertError> {
    let json = serde_json::from_str::<Value>(text)?;
    let Value::Object(map) = &json else {
        return Err(ConvertError::Shape { found: inference::kind_of(&json) });
    };

    let mut inf = inference::Inference::new(options.max_depth);
    let root = inf.declaration(options.root_name.clone(), map)?;

    let mut cg = codegen::Codegen::new();
    cg.emit(&root, 0);
    let mut source = cg.into_string();
    source.push('\n');

    Ok(Conversion { source, diagnostics: inf.into_diagnostics() })
}
