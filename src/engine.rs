//! Recursive fixture generation (single-file engine).
//!
//! Two entry algorithms share one set of generation policies: sample-driven
//! generation walks a `Template`, type-driven generation walks a `TypeNode`
//! graph resolved through a `TypeProvider`. A third, flatter entry point
//! (`make_from_type`) generates from per-field example values using
//! field-name heuristics.
//!
//! Conventions:
//! - Every random draw goes through the engine's `RandomSource`, so a seeded
//!   engine replays byte-for-byte.
//! - "undefined" travels internally as `Option<Value>::None` and collapses at
//!   the JSON boundary: omitted key in objects, `null` in arrays and at a
//!   public root.
//! - Override tables are consulted per field name and passed unchanged
//!   through the whole recursion.

use serde_json::Value;

use indexmap::IndexMap;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::ir::TypeNode;
use crate::overrides::{Override, Overrides};
use crate::registry::TypeProvider;
use crate::rng::RandomSource;
use crate::sequence::{self, ArrayOptions};
use crate::shape::{self, Shape, ShapeKind};
use crate::template::Template;

// ------------------------------- Policy ---------------------------------- //

/// Chance that a union containing `null` resolves to `null`.
pub const UNION_NULL_CHANCE: f64 = 0.2;
/// Chance that an optional field is omitted from a generated object.
pub const OPTIONAL_SKIP_CHANCE: f64 = 0.3;
/// Chance that a nullable field shape resolves to `null` (`make_from_type`).
pub const NULLABLE_CHANCE: f64 = 0.2;

// ------------------------------- Errors ----------------------------------- //

/// Static-mode failures. Sample-driven generation has no failure conditions.
///
/// All of these are caller-contract or declaration problems; the engine never
/// catches them internally and never returns a partially generated value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("no type named {0:?} is declared")]
    TypeNotFound(String),
    #[error("array element type for field {0:?} could not be determined")]
    ArrayElementUnresolved(String),
    /// Nested named types never expand automatically; the caller opts in per
    /// field, usually with a generator that calls `make` for that type.
    #[error("custom type {type_name:?} for field {field:?} requires an override (e.g. a generator that calls make for that type)")]
    UnresolvedCustomType { type_name: String, field: String },
    #[error("unsupported type for field {field:?}: {rendered}")]
    UnsupportedType { field: String, rendered: String },
}

// ------------------------------- Engine ----------------------------------- //

/// The fixture engine. Holds nothing but its randomness source; every call
/// runs to completion and leaks no state into the next one.
pub struct Mimic<R: RandomSource = StdRng> {
    rng: R,
}

impl Mimic<StdRng> {
    /// Engine with an entropy-seeded generator.
    pub fn new() -> Self {
        Mimic { rng: StdRng::from_entropy() }
    }

    /// Engine with a fixed seed. Identical seeds replay identical fixtures.
    pub fn seeded(seed: u64) -> Self {
        Mimic { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for Mimic<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Mimic<R> {
    /// Engine over a caller-supplied randomness source.
    pub fn with_source(rng: R) -> Self {
        Mimic { rng }
    }

    // ---- public entry points ---- //

    /// Type-driven generation: resolve `type_name` through `provider`, then
    /// walk its structure.
    ///
    /// Fields whose type is a named declaration are never expanded
    /// automatically; supply an override for them or the call fails with
    /// [`GenerateError::UnresolvedCustomType`]. Self-referential declarations
    /// and alias cycles recurse without a guard.
    pub fn make<P: TypeProvider>(
        &mut self,
        provider: &P,
        type_name: &str,
        overrides: &Overrides,
    ) -> Result<Value, GenerateError> {
        let root = provider.resolve_type(type_name)?;
        let value = self.for_node(provider, &root, type_name, None, true, overrides)?;
        Ok(value.unwrap_or(Value::Null))
    }

    /// Sample-driven generation: the template's shape decides what gets
    /// generated, its content only steers the leaf rules. Never fails.
    pub fn make_dynamic(&mut self, template: &Template, overrides: &Overrides) -> Value {
        self.for_template(template, overrides).unwrap_or(Value::Null)
    }

    /// Field-shape generation: walk the definition object's fields in order
    /// and produce each value from its example's one-level shape plus the
    /// field-name heuristics. Non-object definitions yield an empty object.
    pub fn make_from_type(&mut self, definition: &Template, overrides: &Overrides) -> Value {
        let Template::Object(fields) = definition else {
            return Value::Object(serde_json::Map::new());
        };
        let mut out = serde_json::Map::new();
        for (name, sample) in fields {
            if let Some(over) = overrides.get(name) {
                out.insert(name.clone(), over.resolve());
                continue;
            }
            let shape = shape::analyze(sample);
            if let Some(value) = self.for_shape(name, shape) {
                out.insert(name.clone(), value);
            }
        }
        Value::Object(out)
    }

    /// Sample a length within `options`, then invoke `generate` that many
    /// times.
    pub fn array_of<T>(&mut self, generate: impl FnMut() -> T, options: ArrayOptions) -> Vec<T> {
        sequence::array_of(&mut self.rng, generate, options)
    }

    /// Uniform choice from `values`; `None` when empty.
    pub fn one_of<'a, T>(&mut self, values: &'a [T]) -> Option<&'a T> {
        sequence::one_of(&mut self.rng, values)
    }

    // ---- sample-driven recursion ---- //

    fn for_template(&mut self, template: &Template, overrides: &Overrides) -> Option<Value> {
        match template {
            Template::Null => Some(Value::Null),
            Template::Undefined => None,
            Template::Str(sample) => Some(Value::String(self.string_like(sample))),
            Template::Num(sample) => Some(Value::from(self.number_near(*sample))),
            Template::Bool(_) => Some(Value::Bool(self.rng.uniform_bool())),
            Template::Array(elements) => Some(self.array_from_sample(elements, overrides)),
            Template::Object(fields) => Some(self.object_from_sample(fields, overrides)),
            // reached at the root or as an array element; object fields skip
            // generator slots before getting here
            Template::Gen(f) => Some(f()),
        }
    }

    fn string_like(&mut self, sample: &str) -> String {
        if sample.is_empty() || sample.to_lowercase().contains("id") {
            return self.rng.uuid_hyphenated();
        }
        self.rng.short_word()
    }

    fn number_near(&mut self, sample: f64) -> i64 {
        if sample == 0.0 {
            return self.rng.uniform_int(0, 100);
        }
        if sample < 100.0 {
            // the literal hints at magnitude; bounds clamp so low <= high
            // even for negative samples
            let low = (sample - 10.0).max(0.0);
            let high = (sample + 10.0).max(low);
            return self.rng.uniform_int(low as i64, high as i64);
        }
        self.rng.uniform_int(0, 1000)
    }

    fn array_from_sample(&mut self, elements: &[Template], overrides: &Overrides) -> Value {
        let len = self.sample_len();
        let Some(element) = elements.first() else {
            // empty sample: no element shape is knowable
            return Value::Array(vec![Value::Null; len]);
        };
        let items = (0..len)
            .map(|_| self.for_template(element, overrides).unwrap_or(Value::Null))
            .collect();
        Value::Array(items)
    }

    fn object_from_sample(
        &mut self,
        fields: &IndexMap<String, Template>,
        overrides: &Overrides,
    ) -> Value {
        let mut out = serde_json::Map::new();
        for (name, sample) in fields {
            // generator slots in field position are reserved for overrides
            if matches!(sample, Template::Gen(_)) {
                continue;
            }
            if let Some(over) = overrides.get(name) {
                out.insert(name.clone(), over.resolve());
                continue;
            }
            if let Some(value) = self.for_template(sample, overrides) {
                out.insert(name.clone(), value);
            }
        }
        Value::Object(out)
    }

    // ---- type-driven recursion ---- //

    fn for_node<P: TypeProvider>(
        &mut self,
        provider: &P,
        node: &TypeNode,
        field: &str,
        over: Option<&Override>,
        is_root: bool,
        overrides: &Overrides,
    ) -> Result<Option<Value>, GenerateError> {
        if let Some(over) = over {
            return Ok(Some(over.resolve()));
        }

        match node {
            TypeNode::Array { element } => {
                let element = element
                    .as_deref()
                    .ok_or_else(|| GenerateError::ArrayElementUnresolved(field.to_string()))?;
                let len = self.sample_len();
                let mut items = Vec::with_capacity(len);
                for _ in 0..len {
                    // elements keep the field name, so a named element type
                    // still resolves through overrides[field]
                    let item = self.for_node(provider, element, field, None, false, overrides)?;
                    items.push(item.unwrap_or(Value::Null));
                }
                Ok(Some(Value::Array(items)))
            }
            TypeNode::String => {
                let value = if field.eq_ignore_ascii_case("id") {
                    self.rng.uuid_hyphenated()
                } else {
                    self.rng.short_word()
                };
                Ok(Some(Value::String(value)))
            }
            TypeNode::Number => Ok(Some(Value::from(self.rng.uniform_int(0, 100)))),
            TypeNode::Boolean => Ok(Some(Value::Bool(self.rng.uniform_bool()))),
            TypeNode::Null => Ok(Some(Value::Null)),
            TypeNode::Undefined => Ok(None),
            TypeNode::Union { members } => {
                let members: Vec<&TypeNode> = members
                    .iter()
                    .filter(|m| !matches!(m, TypeNode::Undefined))
                    .collect();
                if members.is_empty() {
                    return Ok(None);
                }
                let non_null: Vec<&TypeNode> = members
                    .iter()
                    .copied()
                    .filter(|m| !matches!(m, TypeNode::Null))
                    .collect();
                if !non_null.is_empty()
                    && self.rng.uniform_float(0.0, 1.0) > UNION_NULL_CHANCE
                {
                    if let Some(member) = self.rng.choice(&non_null).copied() {
                        return self.for_node(provider, member, field, None, false, overrides);
                    }
                }
                Ok(Some(Value::Null))
            }
            TypeNode::Object { fields } => {
                let mut out = serde_json::Map::new();
                for decl in fields {
                    // the root object's own optional fields always generate;
                    // the skip roll only applies one level down
                    if decl.optional
                        && !is_root
                        && self.rng.uniform_float(0.0, 1.0) < OPTIONAL_SKIP_CHANCE
                    {
                        continue;
                    }
                    let value = self.for_node(
                        provider,
                        &decl.ty,
                        &decl.name,
                        overrides.get(&decl.name),
                        false,
                        overrides,
                    )?;
                    if let Some(value) = value {
                        out.insert(decl.name.clone(), value);
                    }
                }
                Ok(Some(Value::Object(out)))
            }
            TypeNode::Ref { name } => {
                if is_root {
                    // alias chain: resolve and keep treating the target as
                    // the root
                    let target = provider.resolve_type(name)?;
                    return self.for_node(provider, &target, field, None, true, overrides);
                }
                match overrides.get(field) {
                    Some(over) => Ok(Some(over.resolve())),
                    None => Err(GenerateError::UnresolvedCustomType {
                        type_name: name.clone(),
                        field: field.to_string(),
                    }),
                }
            }
            TypeNode::Opaque { rendered } => Err(GenerateError::UnsupportedType {
                field: field.to_string(),
                rendered: rendered.clone(),
            }),
        }
    }

    // ---- field-shape generation ---- //

    fn for_shape(&mut self, field: &str, shape: Shape) -> Option<Value> {
        if shape.nullable && self.rng.uniform_float(0.0, 1.0) < NULLABLE_CHANCE {
            return Some(Value::Null);
        }
        if shape.optional && self.rng.uniform_float(0.0, 1.0) < OPTIONAL_SKIP_CHANCE {
            return None;
        }
        let value = match shape.kind {
            ShapeKind::String => Value::String(self.string_for_field(field)),
            ShapeKind::Number => Value::from(self.number_for_field(field)),
            ShapeKind::Boolean => Value::Bool(self.rng.uniform_bool()),
            ShapeKind::Null => Value::Null,
            ShapeKind::Undefined => return None,
            ShapeKind::Array => self.array_for_element(shape.element),
            ShapeKind::Object => Value::Object(serde_json::Map::new()),
            ShapeKind::Any => Value::Null,
        };
        Some(value)
    }

    /// Field-name rules for string fields, checked in listed order against
    /// the case-folded name.
    fn string_for_field(&mut self, field: &str) -> String {
        let name = field.to_lowercase();
        if name.contains("id") {
            return self.rng.uuid_hyphenated();
        }
        if name.contains("email") {
            return format!("{}@example.com", self.rng.short_word());
        }
        // names and everything else fall back to a plain word
        self.rng.short_word()
    }

    fn number_for_field(&mut self, field: &str) -> i64 {
        let name = field.to_lowercase();
        if name.contains("price") || name.contains("cost") {
            return self.rng.uniform_int(10, 1000);
        }
        if name.contains("age") {
            return self.rng.uniform_int(18, 80);
        }
        if name.contains("rating") {
            return self.rng.uniform_int(1, 5);
        }
        self.rng.uniform_int(0, 100)
    }

    fn array_for_element(&mut self, element: Option<ShapeKind>) -> Value {
        let len = self.sample_len();
        let items = (0..len)
            .map(|_| match element {
                Some(ShapeKind::String) => Value::String(self.rng.short_word()),
                Some(ShapeKind::Number) => Value::from(self.rng.uniform_int(0, 100)),
                Some(ShapeKind::Boolean) => Value::Bool(self.rng.uniform_bool()),
                _ => Value::Null,
            })
            .collect();
        Value::Array(items)
    }

    fn sample_len(&mut self) -> usize {
        let (min, max) = ArrayOptions::default().clamped();
        self.rng.uniform_int(min as i64, max as i64) as usize
    }
}

// ------------------------------- Tests ------------------------------------ //
