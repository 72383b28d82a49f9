// Closed template model for sample-driven generation. Classification happens
// once, at the JSON boundary; everything downstream is an exhaustive `match`.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

/// A generator slot embedded in a template or an override table.
pub type GenFn = Arc<dyn Fn() -> Value + Send + Sync>;

/// A sample value whose *shape* (not content) drives dynamic-mode generation.
///
/// `Undefined` and `Gen` have no JSON spelling, which is why this is not just
/// `serde_json::Value`: templates can mark optional slots and embed ad-hoc
/// leaf generators.
#[derive(Clone)]
pub enum Template {
    Null,
    Undefined,
    Str(String),
    Num(f64),
    Bool(bool),
    Array(Vec<Template>),
    Object(IndexMap<String, Template>),
    /// Invoked with no arguments when reached at the root or as an array
    /// element; skipped entirely as an object field (those slots belong to
    /// the override table).
    Gen(GenFn),
}

impl Template {
    /// Canonical string sample: empty, which the leaf rules map to a UUID.
    pub fn string() -> Self {
        Template::Str(String::new())
    }

    /// Canonical number sample: zero, generated in the default range.
    pub fn number() -> Self {
        Template::Num(0.0)
    }

    /// Canonical boolean sample. The literal is only a type tag.
    pub fn boolean() -> Self {
        Template::Bool(false)
    }

    /// Wrap a closure as an embedded leaf generator.
    pub fn generator<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Template::Gen(Arc::new(f))
    }

    /// Build an object template from `(name, template)` pairs, preserving
    /// the given field order.
    pub fn object<K, T, I>(fields: I) -> Self
    where
        K: Into<String>,
        T: Into<Template>,
        I: IntoIterator<Item = (K, T)>,
    {
        Template::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build an array template from element templates.
    pub fn array<T, I>(elements: I) -> Self
    where
        T: Into<Template>,
        I: IntoIterator<Item = T>,
    {
        Template::Array(elements.into_iter().map(Into::into).collect())
    }
}

/// Identity passthrough kept from the original API: anchors a literal JSON
/// sample as a `Template` at the call site.
pub fn define_type(template: impl Into<Template>) -> Template {
    template.into()
}

impl From<Value> for Template {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => Template::Null,
            Value::Bool(b) => Template::Bool(b),
            Value::Number(n) => Template::Num(n.as_f64().unwrap_or_default()),
            Value::String(s) => Template::Str(s),
            Value::Array(xs) => Template::Array(xs.into_iter().map(Template::from).collect()),
            Value::Object(m) => {
                Template::Object(m.into_iter().map(|(k, v)| (k, Template::from(v))).collect())
            }
        }
    }
}

impl From<&Value> for Template {
    fn from(v: &Value) -> Self {
        Template::from(v.clone())
    }
}

impl From<&str> for Template {
    fn from(s: &str) -> Self {
        Template::Str(s.to_string())
    }
}

impl From<String> for Template {
    fn from(s: String) -> Self {
        Template::Str(s)
    }
}

impl From<f64> for Template {
    fn from(n: f64) -> Self {
        Template::Num(n)
    }
}

impl From<i64> for Template {
    fn from(n: i64) -> Self {
        Template::Num(n as f64)
    }
}

impl From<i32> for Template {
    fn from(n: i32) -> Self {
        Template::Num(n as f64)
    }
}

impl From<bool> for Template {
    fn from(b: bool) -> Self {
        Template::Bool(b)
    }
}

impl From<Vec<Template>> for Template {
    fn from(xs: Vec<Template>) -> Self {
        Template::Array(xs)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Null => f.write_str("Null"),
            Template::Undefined => f.write_str("Undefined"),
            Template::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Template::Num(n) => f.debug_tuple("Num").field(n).finish(),
            Template::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Template::Array(xs) => f.debug_tuple("Array").field(xs).finish(),
            Template::Object(m) => f.debug_tuple("Object").field(m).finish(),
            Template::Gen(_) => f.write_str("Gen(<generator>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_values_convert_structurally() {
        let t = Template::from(json!({"id": "", "count": 3, "tags": ["a"], "gone": null}));
        let Template::Object(fields) = t else {
            panic!("expected object template");
        };
        assert!(matches!(fields["id"], Template::Str(ref s) if s.is_empty()));
        assert!(matches!(fields["count"], Template::Num(n) if n == 3.0));
        assert!(matches!(fields["tags"], Template::Array(ref xs) if xs.len() == 1));
        assert!(matches!(fields["gone"], Template::Null));
    }

    #[test]
    fn object_builder_preserves_field_order() {
        let t = Template::object([("b", 1i64), ("a", 2i64), ("c", 3i64)]);
        let Template::Object(fields) = t else {
            panic!("expected object template");
        };
        let keys: Vec<_> = fields.keys().cloned().collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn leaf_shortcuts_build_canonical_samples() {
        let t = Template::object([
            ("id", Template::string()),
            ("count", Template::number()),
            ("active", Template::boolean()),
        ]);
        let Template::Object(fields) = t else {
            panic!("expected object template");
        };
        assert!(matches!(fields["id"], Template::Str(ref s) if s.is_empty()));
        assert!(matches!(fields["count"], Template::Num(n) if n == 0.0));
        assert!(matches!(fields["active"], Template::Bool(false)));
    }

    #[test]
    fn define_type_is_identity_conversion() {
        let t = define_type(json!({"name": "x"}));
        assert!(matches!(t, Template::Object(_)));
    }

    #[test]
    fn generator_slots_render_opaquely() {
        let t = Template::generator(|| json!(1));
        assert_eq!(format!("{t:?}"), "Gen(<generator>)");
    }
}
