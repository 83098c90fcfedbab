// Strongly-typed declaration tree for codegen. No serde_json::Value here.

/// One generated `struct`, built from one JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationNode {
    pub name: String,
    pub members: Vec<Member>, // original key order
}

/// One `let` member, built from one key/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub source_key: String,  // raw JSON key, byte-for-byte
    pub identifier: String,  // derived camelCase name
    pub ty: TypeDescriptor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Int,
    Float,
    Boolean,
    OptionalAny,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Primitive(Primitive),
    Array(Box<TypeDescriptor>),
    /// Owns the nested declaration exclusively.
    Named(DeclarationNode),
    /// Element type of an empty array.
    Unknown,
}

impl DeclarationNode {
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether any identifier was altered from its source key.
    pub fn needs_coding_keys(&self) -> bool {
        self.members.iter().any(|m| !m.matches_key())
    }

    /// Nested declarations in member order.
    pub fn nested(&self) -> impl Iterator<Item = &DeclarationNode> {
        self.members.iter().filter_map(|m| m.ty.declaration())
    }
}

impl Member {
    pub fn matches_key(&self) -> bool {
        self.identifier == self.source_key
    }
}

impl TypeDescriptor {
    /// The declaration this descriptor introduces, looking through arrays.
    pub fn declaration(&self) -> Option<&DeclarationNode> {
        match self {
            TypeDescriptor::Named(node) => Some(node),
            TypeDescriptor::Array(inner) => inner.declaration(),
            TypeDescriptor::Primitive(_) | TypeDescriptor::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(key: &str, ident: &str, ty: TypeDescriptor) -> Member {
        Member { source_key: key.into(), identifier: ident.into(), ty }
    }

    #[test]
    fn nested_looks_through_arrays_in_member_order() {
        let inner_a = DeclarationNode { name: "A".into(), members: vec![] };
        let inner_b = DeclarationNode { name: "B".into(), members: vec![] };
        let node = DeclarationNode {
            name: "Root".into(),
            members: vec![
                member("b", "b", TypeDescriptor::Array(Box::new(TypeDescriptor::Array(
                    Box::new(TypeDescriptor::Named(inner_b)),
                )))),
                member("x", "x", TypeDescriptor::Primitive(Primitive::Int)),
                member("a", "a", TypeDescriptor::Named(inner_a)),
            ],
        };
        let names: Vec<&str> = node.nested().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
        assert!(!node.needs_coding_keys());
    }

    #[test]
    fn one_renamed_member_requires_coding_keys() {
        let node = DeclarationNode {
            name: "Root".into(),
            members: vec![
                member("id", "id", TypeDescriptor::Primitive(Primitive::Int)),
                member("user name", "userName", TypeDescriptor::Primitive(Primitive::String)),
            ],
        };
        assert!(node.needs_coding_keys());
    }
}
