//! Type-driven fixtures: named declarations in, fixtures (or errors) out.

use json_mimic::{ArrayOptions, FieldDecl, Mimic, Overrides, TypeNode, TypeRegistry};
use serde_json::Value;

fn demo_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .declare(
            "TagItem",
            TypeNode::object([
                FieldDecl::new("name", TypeNode::String),
                FieldDecl::new("value", TypeNode::Number),
            ]),
        )
        .declare(
            "Product",
            TypeNode::object([
                FieldDecl::new("id", TypeNode::String),
                FieldDecl::new("title", TypeNode::union([TypeNode::String, TypeNode::Null])),
                FieldDecl::new("price", TypeNode::Number),
                FieldDecl::new("tags", TypeNode::array_of(TypeNode::named("TagItem"))).optional(),
                FieldDecl::new("inStock", TypeNode::Boolean),
            ]),
        );
    registry
}

fn main() -> anyhow::Result<()> {
    let registry = demo_registry();
    let mut mimic = Mimic::new();

    // Named nested types never expand on their own, so as declared the tags
    // field always demands an override.
    let err = mimic
        .make(&registry, "Product", &Overrides::new())
        .expect_err("tags has a named element type");
    println!("as declared: {err}");

    // The usual escape hatch: a generator producing the nested fixtures.
    let overrides = Overrides::new().generator("tags", || {
        let mut mimic = Mimic::new();
        let tags = mimic.array_of(
            || {
                Mimic::new()
                    .make(&demo_registry(), "TagItem", &Overrides::new())
                    .unwrap_or(Value::Null)
            },
            ArrayOptions::new(2, 5),
        );
        Value::Array(tags)
    });
    let fixture = mimic.make(&registry, "Product", &overrides)?;
    println!("product: {fixture:#}");

    // Identical seeds replay identical fixtures.
    let replay = |seed| {
        Mimic::seeded(seed)
            .make(&demo_registry(), "TagItem", &Overrides::new())
            .map(|v| v.to_string())
    };
    println!("seed 42 once:  {}", replay(42)?);
    println!("seed 42 again: {}", replay(42)?);

    Ok(())
}
