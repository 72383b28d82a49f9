// One-level shape classification for sample values. Pure, no randomness, no
// recursion: arrays are judged by their first element only.

use crate::template::Template;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Null,
    Undefined,
    String,
    Number,
    Boolean,
    Object,
    Array,
    /// Generator slots and anything else without a data classification.
    Any,
}

/// What one sample value tells us about its field: the kind, the element kind
/// for arrays (unknown when the sample array is empty), and whether the
/// sample itself marked the field nullable (`null`) or optional (`undefined`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub element: Option<ShapeKind>,
    pub nullable: bool,
    pub optional: bool,
}

pub fn analyze(sample: &Template) -> Shape {
    let plain = |kind| Shape { kind, element: None, nullable: false, optional: false };
    match sample {
        Template::Null => Shape { nullable: true, ..plain(ShapeKind::Null) },
        Template::Undefined => Shape { optional: true, ..plain(ShapeKind::Undefined) },
        Template::Array(elements) => Shape {
            element: elements.first().map(kind_of),
            ..plain(ShapeKind::Array)
        },
        Template::Object(_) => plain(ShapeKind::Object),
        other => plain(kind_of(other)),
    }
}

fn kind_of(sample: &Template) -> ShapeKind {
    match sample {
        Template::Null => ShapeKind::Null,
        Template::Undefined => ShapeKind::Undefined,
        Template::Str(_) => ShapeKind::String,
        Template::Num(_) => ShapeKind::Number,
        Template::Bool(_) => ShapeKind::Boolean,
        Template::Array(_) => ShapeKind::Array,
        Template::Object(_) => ShapeKind::Object,
        Template::Gen(_) => ShapeKind::Any,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_marks_nullable_and_undefined_marks_optional() {
        let null_shape = analyze(&Template::Null);
        assert_eq!(null_shape.kind, ShapeKind::Null);
        assert!(null_shape.nullable);
        assert!(!null_shape.optional);

        let undef_shape = analyze(&Template::Undefined);
        assert_eq!(undef_shape.kind, ShapeKind::Undefined);
        assert!(undef_shape.optional);
        assert!(!undef_shape.nullable);
    }

    #[test]
    fn arrays_classify_by_first_element_only() {
        let shape = analyze(&Template::from(json!(["a", 1, true])));
        assert_eq!(shape.kind, ShapeKind::Array);
        assert_eq!(shape.element, Some(ShapeKind::String));

        let empty = analyze(&Template::from(json!([])));
        assert_eq!(empty.kind, ShapeKind::Array);
        assert_eq!(empty.element, None);
    }

    #[test]
    fn scalars_and_objects_classify_directly() {
        assert_eq!(analyze(&Template::from(json!("x"))).kind, ShapeKind::String);
        assert_eq!(analyze(&Template::from(json!(3.5))).kind, ShapeKind::Number);
        assert_eq!(analyze(&Template::from(json!(false))).kind, ShapeKind::Boolean);
        assert_eq!(analyze(&Template::from(json!({"a": 1}))).kind, ShapeKind::Object);
    }

    #[test]
    fn generator_slots_classify_as_any() {
        let shape = analyze(&Template::generator(|| json!(0)));
        assert_eq!(shape.kind, ShapeKind::Any);
        assert!(!shape.nullable);
        assert!(!shape.optional);
    }
}
