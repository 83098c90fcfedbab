//! Type inference engine (single sample).
//!
//! Walk one parsed JSON document and build the declaration tree directly:
//! every object becomes a `DeclarationNode`, every key a `Member`, and every
//! value is classified into a `TypeDescriptor`.
//!
//! Rules, first match wins:
//! - null → `Any?`; string → `String`; boolean → `Bool`.
//! - number → `Float` when the literal as written contains `.`, else `Int`.
//!   This looks at the token text (`arbitrary_precision`), not the value.
//! - array → typed from element 0 only; `[]` has no element and becomes
//!   `[Any?]` with a diagnostic.
//! - object → nested declaration named after its key.
use serde_json::{Map, Value};

use crate::diagnostic::{index_path, key_path, Diagnostic, DiagnosticKind};
use crate::error::{ConvertError, Result};
use crate::ir::{DeclarationNode, Member, Primitive, TypeDescriptor};
use crate::naming::DeclarationScope;

pub const ROOT_PATH: &str = "$";

/// JSON kind name, used in shape errors and diagnostics.
pub fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ------------------------------- Front API -------------------------------- //

pub struct Inference {
    max_depth: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Inference {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth, diagnostics: Vec::new() }
    }

    /// Build the top-level declaration for an object document.
    pub fn declaration(&mut self, name: String, map: &Map<String, Value>) -> Result<DeclarationNode> {
        self.object(name, map, ROOT_PATH, 0)
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    // ------------------------------ Observe ------------------------------- //

    fn object(
        &mut self,
        name: String,
        map: &Map<String, Value>,
        path: &str,
        depth: usize,
    ) -> Result<DeclarationNode> {
        let mut scope = DeclarationScope::new();
        let mut members = Vec::with_capacity(map.len());
        for (i, (key, value)) in map.iter().enumerate() {
            let position = i + 1;
            let member_path = key_path(path, key);
            let identifier =
                scope.member_identifier(key, position, &member_path, &mut self.diagnostics);
            let ty = self.infer(&mut scope, key, position, value, &member_path, depth + 1)?;
            members.push(Member { source_key: key.clone(), identifier, ty });
        }
        Ok(DeclarationNode { name, members })
    }

    /// Classify `value`, found under `key` at 1-based `position` of the
    /// enclosing object whose names are tracked by `scope`.
    fn infer(
        &mut self,
        scope: &mut DeclarationScope,
        key: &str,
        position: usize,
        value: &Value,
        path: &str,
        depth: usize,
    ) -> Result<TypeDescriptor> {
        let ty = match value {
            Value::Null => TypeDescriptor::Primitive(Primitive::OptionalAny),
            Value::String(_) => TypeDescriptor::Primitive(Primitive::String),
            Value::Number(n) => {
                // literal text, e.g. "1.0" stays "1.0"
                if n.to_string().contains('.') {
                    TypeDescriptor::Primitive(Primitive::Float)
                } else {
                    TypeDescriptor::Primitive(Primitive::Int)
                }
            }
            Value::Bool(_) => TypeDescriptor::Primitive(Primitive::Boolean),
            Value::Array(xs) => {
                self.check_depth(path, depth)?;
                let element = self.element(scope, key, position, xs, path, depth)?;
                TypeDescriptor::Array(Box::new(element))
            }
            Value::Object(map) => {
                self.check_depth(path, depth)?;
                let name = scope.type_name(key, position, path, &mut self.diagnostics);
                TypeDescriptor::Named(self.object(name, map, path, depth)?)
            }
        };
        Ok(ty)
    }

    fn element(
        &mut self,
        scope: &mut DeclarationScope,
        key: &str,
        position: usize,
        xs: &[Value],
        path: &str,
        depth: usize,
    ) -> Result<TypeDescriptor> {
        let Some(first) = xs.first() else {
            self.report(path, DiagnosticKind::EmptyArray);
            return Ok(TypeDescriptor::Unknown);
        };
        if first.is_null() {
            self.report(path, DiagnosticKind::NullFirstElement);
        }
        let first_kind = kind_of(first);
        let mismatch = xs.iter().enumerate().skip(1).find(|(_, x)| kind_of(x) != first_kind);
        if let Some((index, other)) = mismatch {
            self.report(path, DiagnosticKind::MixedArray {
                index,
                first: first_kind,
                found: kind_of(other),
            });
        }
        self.infer(scope, key, position, first, &index_path(path, 0), depth + 1)
    }

    /// Only containers count toward the limit; scalars never recurse.
    fn check_depth(&self, path: &str, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(ConvertError::DepthLimit { limit: self.max_depth, path: path.to_string() });
        }
        Ok(())
    }

    fn report(&mut self, path: &str, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic { path: path.to_string(), kind });
    }
}

// ------------------------------- Tests ------------------------------------ //
