//! Sample-driven fixtures: a JSON template in, randomized look-alikes out.

use json_mimic::{ArrayOptions, Mimic, Overrides, define_type};
use serde_json::json;

fn main() {
    let mut mimic = Mimic::new();

    // Shapes drive generation; contents only steer the leaf rules
    // (empty or id-like strings become UUIDs, numbers hint at magnitude).
    let product = define_type(json!({
        "id": "",
        "title": "hello",
        "price": 0,
        "tags": [{"name": "", "value": 0, "isActive": false}],
        "inStock": false
    }));

    let fixture = mimic.make_dynamic(&product, &Overrides::new());
    println!("product: {fixture:#}");

    // Overrides pin fields wherever their name appears in the template.
    let tags = mimic.array_of(|| json!({"name": "sale", "value": 1}), ArrayOptions::new(5, 10));
    let overrides = Overrides::new()
        .literal("price", 9.99)
        .literal("tags", json!(tags));
    let pinned = mimic.make_dynamic(&product, &overrides);
    println!("pinned product: {pinned:#}");

    // Field-name heuristics over example values.
    let profile = define_type(json!({
        "userId": "",
        "email": "",
        "displayName": "",
        "age": 0,
        "price": 0
    }));
    let from_fields = mimic.make_from_type(&profile, &Overrides::new());
    println!("profile: {from_fields:#}");

    if let Some(plan) = mimic.one_of(&["basic", "pro", "enterprise"]) {
        println!("plan: {plan}");
    }
}
