//! # Value encoder
//!
//! Turns request bodies into JSON-compatible trees while honoring field
//! inclusion/exclusion, aliases, unset-field tracking and null handling.
//!
//! - [`node`] - the value graph ([`Node`]) and the traits that lower Rust values into it
//! - [`registry`] - ordered type-to-converter tables, including the default table
//! - [`options`] - [`EncodeOptions`] and [`FieldSet`]
//! - [`jsonable`] - the dispatch itself ([`jsonable_encoder`], [`JsonableEncoder`])
//!
//! ```
//! use petstore_client::encoder::{jsonable_encoder, EncodeOptions};
//! use serde_json::json;
//!
//! let body = json!({"name": "doggie", "tag": null});
//! let encoded = jsonable_encoder(&body, &EncodeOptions::default().include_none(false)).unwrap();
//! assert_eq!(encoded, json!({"name": "doggie"}));
//! ```

pub mod jsonable;
pub mod node;
pub mod options;
pub mod registry;

pub use jsonable::{jsonable_encoder, JsonableEncoder};
pub use node::{Encodable, Model, ModelField, ModelNode, Node, OpaqueValue, Scalar};
pub use options::{EncodeOptions, FieldSet};
pub use registry::{Converter, EncoderRegistry, TypeMatcher};
