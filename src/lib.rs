//! Synthetic fixtures for JSON-shaped data.
//!
//! Two generation modes share one recursive engine:
//! - *static*: walk a named type declaration resolved through a
//!   [`TypeProvider`], failing loudly on anything unresolvable.
//! - *dynamic*: walk a runtime sample value ([`Template`]); its shape decides
//!   what gets generated, its content only steers the leaf rules.
//!
//! All randomness flows through one [`RandomSource`], so seeded engines
//! replay identical fixtures.
//!
//! Static mode, from a registry of declarations:
//!
//! ```
//! use json_mimic::{FieldDecl, Mimic, Overrides, TypeNode, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! registry.declare(
//!     "User",
//!     TypeNode::object([
//!         FieldDecl::new("id", TypeNode::String),
//!         FieldDecl::new("age", TypeNode::Number),
//!     ]),
//! );
//!
//! let mut mimic = Mimic::seeded(7);
//! let user = mimic.make(&registry, "User", &Overrides::new()).unwrap();
//! assert!(user["id"].as_str().unwrap().contains('-'));
//! assert!(user["age"].is_number());
//! ```
//!
//! Dynamic mode, from a sample value:
//!
//! ```
//! use json_mimic::{Mimic, Overrides, define_type};
//! use serde_json::json;
//!
//! let mut mimic = Mimic::seeded(7);
//! let template = define_type(json!({"id": "", "title": "hello", "price": 0}));
//! let overrides = Overrides::new().literal("title", "pinned");
//! let fixture = mimic.make_dynamic(&template, &overrides);
//! assert_eq!(fixture["title"], json!("pinned"));
//! assert!(fixture["price"].as_i64().unwrap() <= 100);
//! ```

pub mod cli;
pub mod engine;
pub mod ir;
pub mod overrides;
pub mod registry;
pub mod rng;
pub mod sequence;
pub mod shape;
pub mod template;

pub use engine::{GenerateError, Mimic};
pub use ir::{FieldDecl, TypeNode};
pub use overrides::{Override, Overrides};
pub use registry::{DeclError, TypeProvider, TypeRegistry};
pub use rng::RandomSource;
pub use sequence::{ArrayOptions, MAX_SEQUENCE_LEN, array_of, one_of};
pub use shape::{Shape, ShapeKind};
pub use template::{GenFn, Template, define_type};
