//! End-to-end checks for the public json-mimic surface, run as a binary.
//!
//! Unlike the unit tests, every registry here is loaded from a declaration
//! document, the way a project would feed the CLI; the checks then drive
//! both generation modes through the library's front door and assert the
//! engine's contract properties.

use json_mimic::{ArrayOptions, GenerateError, Mimic, Overrides, TypeRegistry, define_type};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Value, json};

static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap()
});

const DECLS: &str = r#"
{
    "TagItem": { "kind": "object", "fields": [
        { "name": "name",  "type": { "kind": "string" } },
        { "name": "value", "type": { "kind": "number" } }
    ]},
    "Product": { "kind": "object", "fields": [
        { "name": "id",    "type": { "kind": "string" } },
        { "name": "title", "type": { "kind": "union", "members": [
            { "kind": "string" }, { "kind": "null" }
        ]}},
        { "name": "price", "type": { "kind": "number" } },
        { "name": "tags",  "type": { "kind": "array",
            "element": { "kind": "ref", "name": "TagItem" } }, "optional": true },
        { "name": "inStock", "type": { "kind": "boolean" } }
    ]},
    "Article": { "kind": "object", "fields": [
        { "name": "meta", "type": { "kind": "object", "fields": [
            { "name": "author", "type": { "kind": "string" } },
            { "name": "tags", "type": { "kind": "array",
                "element": { "kind": "string" } }, "optional": true }
        ]}}
    ]}
}
"#;

fn registry() -> TypeRegistry {
    TypeRegistry::from_json_str(DECLS).expect("declaration document must parse")
}

/// Product.tags is an array of a named type, so callers supply the nested
/// fixtures themselves.
fn product_overrides() -> Overrides {
    Overrides::new().generator("tags", || {
        let registry = registry();
        let tags = Mimic::new().array_of(
            || {
                Mimic::new()
                    .make(&registry, "TagItem", &Overrides::new())
                    .expect("TagItem generates without overrides")
            },
            ArrayOptions::new(2, 4),
        );
        Value::Array(tags)
    })
}

fn check_length_bounds() {
    let mut engine = Mimic::seeded(101);
    let table = [
        (3usize, 8usize, 3usize, 8usize),
        (5, 10, 5, 10),
        (15, 10, 10, 10),
        (0, 0, 0, 0),
        (0, 2000, 0, 1000),
        (2000, 5000, 1000, 1000),
    ];
    for (min, max, lo, hi) in table {
        for _ in 0..32 {
            let xs = engine.array_of(|| "x", ArrayOptions::new(min, max));
            assert!(
                (lo..=hi).contains(&xs.len()),
                "len {} out of [{lo}, {hi}] for min={min} max={max}",
                xs.len()
            );
            assert!(xs.iter().all(|x| *x == "x"));
        }
    }
}

fn check_id_fields() {
    let mut engine = Mimic::seeded(102);
    let registry = registry();
    let overrides = product_overrides();
    for _ in 0..16 {
        let product = engine.make(&registry, "Product", &overrides).unwrap();
        let id = product["id"].as_str().unwrap();
        assert!(UUID_RE.is_match(id), "static id not a uuid: {id}");
    }
    // dynamic mode reads the sample text instead of the field name
    let template = define_type(json!({"sku": "ID-1", "note": "plain"}));
    for _ in 0..16 {
        let fixture = engine.make_dynamic(&template, &Overrides::new());
        assert!(UUID_RE.is_match(fixture["sku"].as_str().unwrap()));
        assert!(!UUID_RE.is_match(fixture["note"].as_str().unwrap()));
    }
}

fn check_field_name_heuristics() {
    let mut engine = Mimic::seeded(103);
    let profile = define_type(json!({
        "userId": "",
        "email": "",
        "displayName": "",
        "price": 0,
        "age": 0,
        "rating": 0
    }));
    for _ in 0..32 {
        let fixture = engine.make_from_type(&profile, &Overrides::new());
        assert!(UUID_RE.is_match(fixture["userId"].as_str().unwrap()));
        let email = fixture["email"].as_str().unwrap();
        assert!(email.ends_with("@example.com"), "not an email: {email}");
        assert!(fixture["displayName"].is_string());
        assert!((10..=1000).contains(&fixture["price"].as_i64().unwrap()));
        assert!((18..=80).contains(&fixture["age"].as_i64().unwrap()));
        assert!((1..=5).contains(&fixture["rating"].as_i64().unwrap()));
    }
}

fn check_booleans() {
    let mut engine = Mimic::seeded(104);
    let registry = registry();
    let overrides = product_overrides();
    let (mut seen_true, mut seen_false) = (false, false);
    for _ in 0..100 {
        let product = engine.make(&registry, "Product", &overrides).unwrap();
        match product["inStock"].as_bool().unwrap() {
            true => seen_true = true,
            false => seen_false = true,
        }
    }
    assert!(seen_true && seen_false, "boolean generation is degenerate");
}

fn check_custom_type_contract() {
    let mut engine = Mimic::seeded(105);
    let registry = registry();
    // without an override the named element type is a hard failure
    let err = engine.make(&registry, "Product", &Overrides::new()).unwrap_err();
    assert!(matches!(err, GenerateError::UnresolvedCustomType { .. }), "got {err:?}");
    let message = err.to_string();
    assert!(message.contains("\"TagItem\"") && message.contains("\"tags\""), "bad context: {message}");
    // an override unblocks it and pins the field to the override's output
    let overrides = Overrides::new().generator("tags", || json!([{"name": "t", "value": 1}]));
    for _ in 0..16 {
        let product = engine.make(&registry, "Product", &overrides).unwrap();
        assert_eq!(product["tags"], json!([{"name": "t", "value": 1}]));
    }
}

fn check_union_members() {
    let mut engine = Mimic::seeded(106);
    let registry = registry();
    let overrides = product_overrides();
    let (mut nulls, mut strings) = (0usize, 0usize);
    for _ in 0..200 {
        let product = engine.make(&registry, "Product", &overrides).unwrap();
        match &product["title"] {
            Value::Null => nulls += 1,
            Value::String(_) => strings += 1,
            other => panic!("union produced a foreign kind: {other:?}"),
        }
    }
    assert!(nulls > 0 && strings > 0, "union branches unbalanced: {nulls}/{strings}");
}

fn check_optional_distribution() {
    let mut engine = Mimic::seeded(107);
    let registry = registry();
    let (mut omitted, mut present) = (0usize, 0usize);
    for _ in 0..200 {
        let article = engine.make(&registry, "Article", &Overrides::new()).unwrap();
        assert!(article["meta"]["author"].is_string());
        match article["meta"].get("tags") {
            None => omitted += 1,
            Some(tags) => {
                present += 1;
                assert!(tags.as_array().unwrap().iter().all(Value::is_string));
            }
        }
    }
    assert!(omitted > 0 && present > 0, "skip roll unbalanced: {omitted}/{present}");
}

fn check_override_idempotence() {
    let mut engine = Mimic::seeded(108);
    let registry = registry();
    let overrides = product_overrides().literal("id", "fixture-0001").literal("price", 9.99);
    for _ in 0..32 {
        let product = engine.make(&registry, "Product", &overrides).unwrap();
        assert_eq!(product["id"], json!("fixture-0001"));
        assert_eq!(product["price"], json!(9.99));
    }
    // the same table steers dynamic mode by field name
    let template = define_type(json!({"id": "", "price": 0}));
    for _ in 0..32 {
        let fixture = engine.make_dynamic(&template, &overrides);
        assert_eq!(fixture["id"], json!("fixture-0001"));
        assert_eq!(fixture["price"], json!(9.99));
    }
}

fn check_sample_scenario() {
    let mut engine = Mimic::seeded(109);
    let template = define_type(json!({"name": "", "age": 0, "active": false}));
    for _ in 0..32 {
        let fixture = engine.make_dynamic(&template, &Overrides::new());
        assert!(fixture["name"].is_string());
        assert!(fixture["age"].is_number());
        assert!(fixture["active"].is_boolean());
    }
}

fn check_sequence_helpers() {
    let mut engine = Mimic::seeded(110);
    for _ in 0..32 {
        let xs = engine.array_of(|| "x", ArrayOptions::new(5, 10));
        assert!((5..=10).contains(&xs.len()));
        assert!(xs.iter().all(|x| *x == "x"));
    }
    for _ in 0..32 {
        let picked = engine.one_of(&["A", "B", "C"]).copied();
        assert!(matches!(picked, Some("A" | "B" | "C")));
    }
    assert!(engine.one_of::<Value>(&[]).is_none());
}

fn check_declaration_diagnostics() {
    let bad = r#"{"Broken": {"kind": "object", "fields": [
        {"name": "id", "type": {"kind": "uuid"}}
    ]}}"#;
    let err = TypeRegistry::from_json_str(bad).expect_err("unknown kind must fail");
    let message = err.to_string();
    assert!(message.contains("Broken"), "path missing from: {message}");

    let mut engine = Mimic::seeded(111);
    let err = engine.make(&registry(), "Ghost", &Overrides::new()).unwrap_err();
    assert_eq!(err, GenerateError::TypeNotFound("Ghost".to_string()));
}

fn check_seeded_replay() {
    let run = |seed: u64| -> Vec<Value> {
        let registry = registry();
        let mut engine = Mimic::seeded(seed);
        let overrides = Overrides::new().literal("tags", json!([]));
        let mut out = Vec::new();
        for _ in 0..4 {
            out.push(engine.make(&registry, "Product", &overrides).unwrap());
            out.push(engine.make_dynamic(&define_type(json!({"id": "", "n": 5})), &Overrides::new()));
            out.push(
                engine.make_from_type(&define_type(json!({"email": "", "rating": 0})), &Overrides::new()),
            );
        }
        out
    };
    assert_eq!(run(42), run(42), "identical seeds must replay identically");
    assert_ne!(run(42), run(43), "distinct seeds should diverge");
}

fn main() {
    let checks: &[(&str, fn())] = &[
        ("array length bounds", check_length_bounds),
        ("id fields become uuids", check_id_fields),
        ("field-name heuristics", check_field_name_heuristics),
        ("booleans are nondegenerate", check_booleans),
        ("custom types demand overrides", check_custom_type_contract),
        ("unions stay within members", check_union_members),
        ("optional fields skip at depth", check_optional_distribution),
        ("overrides pin fields in every mode", check_override_idempotence),
        ("dynamic sample scenario", check_sample_scenario),
        ("sequence helpers", check_sequence_helpers),
        ("declaration diagnostics", check_declaration_diagnostics),
        ("seeded replay", check_seeded_replay),
    ];
    for (name, check) in checks {
        check();
        eprintln!("✅ {name}");
    }
    eprintln!("all {} checks passed", checks.len());
}
