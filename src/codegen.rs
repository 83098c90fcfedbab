//! Declaration tree → Swift `Decodable` source.
use std::fmt::Write;

use crate::ir::{DeclarationNode, Member, Primitive, TypeDescriptor};
use crate::naming::render_identifier;

const INDENT: &str = "    ";

pub struct Codegen {
    out: String,
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}

impl Codegen {
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    pub fn into_string(self) -> String {
        self.out
    }

    /// Append one declaration block at `indent_level`, nested blocks
    /// included. No trailing newline after the closing brace.
    pub fn emit(&mut self, node: &DeclarationNode, indent_level: usize) {
        let ind = INDENT.repeat(indent_level);
        if node.is_empty() {
            let _ = write!(self.out, "{ind}struct {}: Decodable {{}}", node.name);
            return;
        }

        let _ = writeln!(self.out, "{ind}struct {}: Decodable {{", node.name);
        for m in &node.members {
            let _ = writeln!(
                self.out,
                "{ind}{INDENT}let {}: {}",
                render_identifier(&m.identifier),
                render_type(&m.ty)
            );
        }

        if node.needs_coding_keys() {
            // complete table: every member gets a case
            let _ = writeln!(self.out);
            let _ = writeln!(self.out, "{ind}{INDENT}enum CodingKeys: String, CodingKey {{");
            for m in &node.members {
                self.emit_coding_key(m, &ind);
            }
            let _ = writeln!(self.out, "{ind}{INDENT}}}");
        }

        for nested in node.nested() {
            self.out.push('\n');
            self.emit(nested, indent_level + 1);
            self.out.push('\n');
        }

        let _ = write!(self.out, "{ind}}}");
    }

    fn emit_coding_key(&mut self, m: &Member, ind: &str) {
        let ident = render_identifier(&m.identifier);
        if m.matches_key() {
            let _ = writeln!(self.out, "{ind}{INDENT}{INDENT}case {ident}");
        } else {
            let _ = writeln!(
                self.out,
                "{ind}{INDENT}{INDENT}case {ident} = \"{}\"",
                escape_string_literal(&m.source_key)
            );
        }
    }
}

pub fn render_type(ty: &TypeDescriptor) -> String {
    match ty {
        TypeDescriptor::Primitive(p) => render_primitive(*p).to_string(),
        TypeDescriptor::Array(inner) => format!("[{}]", render_type(inner)),
        TypeDescriptor::Named(node) => node.name.clone(),
        TypeDescriptor::Unknown => "Any?".to_string(),
    }
}

fn render_primitive(p: Primitive) -> &'static str {
    match p {
        Primitive::String => "String",
        Primitive::Int => "Int",
        Primitive::Float => "Float",
        Primitive::Boolean => "Bool",
        Primitive::OptionalAny => "Any?",
    }
}

/// Body of a Swift string literal. Only `\`, `"` and control characters are
/// escaped; everything else is copied as-is.
fn escape_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prim(p: Primitive) -> TypeDescriptor {
        TypeDescriptor::Primitive(p)
    }

    fn member(key: &str, ident: &str, ty: TypeDescriptor) -> Member {
        Member { source_key: key.into(), identifier: ident.into(), ty }
    }

    fn render(node: &DeclarationNode, level: usize) -> String {
        let mut cg = Codegen::new();
        cg.emit(node, level);
        cg.into_string()
    }

    #[test]
    fn empty_node_is_single_line_at_its_indent() {
        let node = DeclarationNode { name: "Empty".into(), members: vec![] };
        assert_eq!(render(&node, 0), "struct Empty: Decodable {}");
        assert_eq!(render(&node, 2), "        struct Empty: Decodable {}");
    }

    #[test]
    fn types_render_swift_spelling() {
        assert_eq!(render_type(&prim(Primitive::Boolean)), "Bool");
        assert_eq!(render_type(&prim(Primitive::OptionalAny)), "Any?");
        assert_eq!(
            render_type(&TypeDescriptor::Array(Box::new(TypeDescriptor::Array(Box::new(
                prim(Primitive::Float)
            ))))),
            "[[Float]]"
        );
        assert_eq!(render_type(&TypeDescriptor::Array(Box::new(TypeDescriptor::Unknown))), "[Any?]");
    }

    #[test]
    fn mapping_table_lists_every_member() {
        let node = DeclarationNode {
            name: "Root".into(),
            members: vec![
                member("id", "id", prim(Primitive::Int)),
                member("user name", "userName", prim(Primitive::String)),
            ],
        };
        let expected = "\
struct Root: Decodable {
    let id: Int
    let userName: String

    enum CodingKeys: String, CodingKey {
        case id
        case userName = \"user name\"
    }
}";
        assert_eq!(render(&node, 0), expected);
    }

    #[test]
    fn nested_blocks_follow_members_one_level_deeper() {
        let geo = DeclarationNode {
            name: "Geo".into(),
            members: vec![member("lat", "lat", prim(Primitive::Float))],
        };
        let address = DeclarationNode {
            name: "Address".into(),
            members: vec![
                member("city", "city", prim(Primitive::String)),
                member("geo", "geo", TypeDescriptor::Named(geo)),
            ],
        };
        let node = DeclarationNode {
            name: "Root".into(),
            members: vec![
                member("address", "address", TypeDescriptor::Named(address)),
                member("flags", "flags", TypeDescriptor::Array(Box::new(TypeDescriptor::Named(
                    DeclarationNode { name: "Flags".into(), members: vec![] },
                )))),
            ],
        };
        let expected = "\
struct Root: Decodable {
    let address: Address
    let flags: [Flags]

    struct Address: Decodable {
        let city: String
        let geo: Geo

        struct Geo: Decodable {
            let lat: Float
        }
    }

    struct Flags: Decodable {}
}";
        assert_eq!(render(&node, 0), expected);
    }

    #[test]
    fn keywords_are_quoted_in_members_and_cases() {
        let node = DeclarationNode {
            name: "Root".into(),
            members: vec![
                member("default", "default", prim(Primitive::Boolean)),
                member("Class", "class", prim(Primitive::String)),
            ],
        };
        let out = render(&node, 0);
        assert!(out.contains("    let `default`: Bool\n"));
        assert!(out.contains("        case `default`\n"));
        assert!(out.contains("        case `class` = \"Class\"\n"));
    }

    #[test]
    fn source_keys_keep_unicode_and_escape_quotes() {
        assert_eq!(escape_string_literal("naïve 名前 #1"), "naïve 名前 #1");
        assert_eq!(escape_string_literal("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_string_literal("a\\b"), "a\\\\b");
        assert_eq!(escape_string_literal("tab\there"), "tab\\there");
        assert_eq!(escape_string_literal("\u{1}"), "\\u{1}");
    }
}
