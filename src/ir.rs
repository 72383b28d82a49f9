// Closed type language for static-mode generation. Declarations are plain
// data: either built in code or deserialized from JSON via the registry.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeNode {
    Null,
    Undefined,                       // optional slot with no JSON spelling
    String,
    Number,
    Boolean,
    Array {
        // None models a provider that could not determine the element type
        #[serde(default)]
        element: Option<Box<TypeNode>>,
    },
    Object { fields: Vec<FieldDecl> },
    Union { members: Vec<TypeNode> },
    Ref { name: String },            // named type, resolved via provider or override
    Opaque { rendered: String },     // anything the type language cannot express
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeNode,
    #[serde(default)]
    pub optional: bool,
}

impl TypeNode {
    pub fn array_of(element: TypeNode) -> Self {
        TypeNode::Array { element: Some(Box::new(element)) }
    }

    pub fn object(fields: impl IntoIterator<Item = FieldDecl>) -> Self {
        TypeNode::Object { fields: fields.into_iter().collect() }
    }

    pub fn union(members: impl IntoIterator<Item = TypeNode>) -> Self {
        TypeNode::Union { members: members.into_iter().collect() }
    }

    /// Reference to a type registered under `name`.
    pub fn named(name: impl Into<String>) -> Self {
        TypeNode::Ref { name: name.into() }
    }

    pub fn opaque(rendered: impl Into<String>) -> Self {
        TypeNode::Opaque { rendered: rendered.into() }
    }
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
        FieldDecl { name: name.into(), ty, optional: false }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Compact type-string rendering, used in error messages.
impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Null => f.write_str("null"),
            TypeNode::Undefined => f.write_str("undefined"),
            TypeNode::String => f.write_str("string"),
            TypeNode::Number => f.write_str("number"),
            TypeNode::Boolean => f.write_str("boolean"),
            TypeNode::Array { element } => match element {
                Some(element) => write!(f, "{element}[]"),
                None => f.write_str("unknown[]"),
            },
            TypeNode::Object { fields } => {
                f.write_str("{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    let opt = if field.optional { "?" } else { "" };
                    write!(f, "{}{}: {}", field.name, opt, field.ty)?;
                }
                f.write_str(" }")
            }
            TypeNode::Union { members } => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
            TypeNode::Ref { name } => f.write_str(name),
            TypeNode::Opaque { rendered } => f.write_str(rendered),
        }
    }
}
