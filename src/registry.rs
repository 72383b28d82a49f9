// Named type declarations and their lookup. The engine only ever sees the
// `TypeProvider` trait, so a real introspection backend can replace the
// in-memory registry without touching generation code.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use crate::engine::GenerateError;
use crate::ir::TypeNode;

/// Resolves a type name to its structure. Static-mode generation starts here
/// and returns [`GenerateError::TypeNotFound`] for unknown names.
pub trait TypeProvider {
    fn resolve_type(&self, name: &str) -> Result<TypeNode, GenerateError>;
}

/// In-memory provider: an ordered set of named declarations, built in code
/// or loaded from JSON declaration files.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, TypeNode>,
}

/// Declaration-file problems. These are configuration failures, separate from
/// the engine's generation errors.
#[derive(Debug, thiserror::Error)]
pub enum DeclError {
    #[error("failed to read declaration file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid declaration at JSON path {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `ty` under `name`. A repeated name replaces the earlier
    /// declaration.
    pub fn declare(&mut self, name: impl Into<String>, ty: TypeNode) -> &mut Self {
        self.types.insert(name.into(), ty);
        self
    }

    /// Parse a declaration document: a JSON object mapping type names to
    /// `TypeNode` declarations.
    pub fn from_json_str(src: &str) -> Result<Self, DeclError> {
        let mut registry = Self::new();
        registry.extend_from_json_str(src)?;
        Ok(registry)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DeclError> {
        let mut registry = Self::new();
        registry.extend_from_json_file(path)?;
        Ok(registry)
    }

    pub fn extend_from_json_str(&mut self, src: &str) -> Result<(), DeclError> {
        let decls: IndexMap<String, TypeNode> = from_str_with_path(src)?;
        self.types.extend(decls);
        Ok(())
    }

    pub fn extend_from_json_file(&mut self, path: impl AsRef<Path>) -> Result<(), DeclError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| DeclError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.extend_from_json_str(&src)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeProvider for TypeRegistry {
    fn resolve_type(&self, name: &str) -> Result<TypeNode, GenerateError> {
        self.types
            .get(name)
            .cloned()
            .ok_or_else(|| GenerateError::TypeNotFound(name.to_string()))
    }
}

/// Deserialize with JSON-path context in error messages.
fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, DeclError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        DeclError::Parse { path, source: err.into_inner() }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::FieldDecl;

    const DECLS: &str = r#"
    {
        "TagItem": {"kind": "object", "fields": [
            {"name": "name", "type": {"kind": "string"}},
            {"name": "value", "type": {"kind": "number"}}
        ]},
        "Product": {"kind": "object", "fields": [
            {"name": "id", "type": {"kind": "string"}},
            {"name": "title", "type": {"kind": "union", "members": [
                {"kind": "string"}, {"kind": "null"}
            ]}},
            {"name": "tags", "type": {"kind": "array", "element": {"kind": "ref", "name": "TagItem"}}, "optional": true}
        ]}
    }
    "#;

    #[test]
    fn declared_types_resolve_by_name() {
        let mut registry = TypeRegistry::new();
        registry.declare("WithId", TypeNode::object([FieldDecl::new("id", TypeNode::String)]));
        let ty = registry.resolve_type("WithId").unwrap();
        assert_eq!(ty, TypeNode::object([FieldDecl::new("id", TypeNode::String)]));
    }

    #[test]
    fn unknown_names_report_type_not_found() {
        let registry = TypeRegistry::new();
        let err = registry.resolve_type("Ghost").unwrap_err();
        assert_eq!(err, GenerateError::TypeNotFound("Ghost".to_string()));
        assert!(err.to_string().contains("\"Ghost\""));
    }

    #[test]
    fn declaration_documents_load_in_order() {
        let registry = TypeRegistry::from_json_str(DECLS).unwrap();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["TagItem", "Product"]);
        let product = registry.resolve_type("Product").unwrap();
        let TypeNode::Object { fields } = product else {
            panic!("expected object declaration");
        };
        assert_eq!(fields.len(), 3);
        assert!(fields[2].optional);
        assert_eq!(fields[2].ty, TypeNode::array_of(TypeNode::named("TagItem")));
    }

    #[test]
    fn repeated_declarations_replace_earlier_ones() {
        let mut registry = TypeRegistry::from_json_str(DECLS).unwrap();
        registry
            .extend_from_json_str(r#"{"TagItem": {"kind": "string"}}"#)
            .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve_type("TagItem").unwrap(), TypeNode::String);
    }

    #[test]
    fn parse_failures_carry_the_json_path() {
        let bad = r#"{"Product": {"kind": "object", "fields": [
            {"name": "id", "type": {"kind": "stringg"}}
        ]}}"#;
        let err = TypeRegistry::from_json_str(bad).unwrap_err();
        let DeclError::Parse { path, .. } = &err else {
            panic!("expected a parse error, got {err:?}");
        };
        assert!(path.contains("Product"), "unhelpful path: {path}");
    }
}
