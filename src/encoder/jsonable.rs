//! Reduction of a value graph to a `serde_json::Value`.
//!
//! Dispatch order, first match wins: model, enum member, path, scalar,
//! mapping, sequence, caller/model converters, default converters, and
//! finally the opaque value's own mapping or attribute view.

use serde_json::{Map, Value};

use super::node::{Encodable, Node, OpaqueValue};
use super::options::{EncodeOptions, FieldSet};
use super::registry::EncoderRegistry;
use crate::error::EncodeError;

/// Flags forwarded unchanged through every level of the walk.
#[derive(Debug, Clone, Copy)]
struct Flags {
    by_alias: bool,
    exclude_unset: bool,
    include_none: bool,
    sqlalchemy_safe: bool,
}

impl From<&EncodeOptions> for Flags {
    fn from(options: &EncodeOptions) -> Self {
        Self {
            by_alias: options.by_alias,
            exclude_unset: options.effective_exclude_unset(),
            include_none: options.include_none,
            sqlalchemy_safe: options.sqlalchemy_safe,
        }
    }
}

/// Encoder bound to a default converter table.
#[derive(Debug, Clone, Copy)]
pub struct JsonableEncoder<'d> {
    defaults: &'d EncoderRegistry,
}

impl JsonableEncoder<'static> {
    pub fn new() -> Self {
        Self {
            defaults: EncoderRegistry::defaults(),
        }
    }
}

impl Default for JsonableEncoder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'d> JsonableEncoder<'d> {
    pub fn with_defaults(defaults: &'d EncoderRegistry) -> Self {
        Self { defaults }
    }

    pub fn encode<T: Encodable + ?Sized>(
        &self,
        value: &T,
        options: &EncodeOptions,
    ) -> Result<Value, EncodeError> {
        self.encode_node(
            &value.to_node(),
            options.include.as_ref(),
            options.exclude.as_ref(),
            Flags::from(options),
            &options.custom_encoder,
        )
    }

    fn encode_node(
        &self,
        node: &Node,
        include: Option<&FieldSet>,
        exclude: Option<&FieldSet>,
        flags: Flags,
        custom: &EncoderRegistry,
    ) -> Result<Value, EncodeError> {
        match node {
            Node::Model(model) => {
                let mut encoders = model.encoders.clone();
                encoders.merge(custom);
                let fields = model.to_mapping(include, exclude, flags.by_alias, flags.exclude_unset);
                self.encode_node(&fields, None, None, flags, &encoders)
            }
            Node::Enum(value) => Ok(value.to_json()),
            Node::Path(path) => path
                .to_str()
                .map(|s| Value::String(s.to_string()))
                .ok_or_else(|| EncodeError::NonUtf8Path { path: path.clone() }),
            Node::Scalar(value) => Ok(value.to_json()),
            Node::Mapping(entries) => self.encode_mapping(entries, include, exclude, flags, custom),
            Node::Sequence(items) => items
                .iter()
                .map(|item| self.encode_node(item, include, exclude, flags, custom))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Node::Opaque(value) => self.encode_opaque(&**value, flags, custom),
        }
    }

    /// `include`/`exclude` filter this level only; they are not passed down.
    fn encode_mapping(
        &self,
        entries: &[(Node, Node)],
        include: Option<&FieldSet>,
        exclude: Option<&FieldSet>,
        flags: Flags,
        custom: &EncoderRegistry,
    ) -> Result<Value, EncodeError> {
        let mut encoded = Map::new();
        for (key, value) in entries {
            if flags.sqlalchemy_safe && key.is_reserved_key() {
                continue;
            }
            if value.is_null() && !flags.include_none {
                continue;
            }
            let keep = match (include, exclude) {
                (Some(include), _) => include.contains_key(key),
                (None, Some(exclude)) => !exclude.contains_key(key),
                (None, None) => true,
            };
            if !keep {
                continue;
            }

            let encoded_key = self.encode_node(key, None, None, flags, custom)?;
            let encoded_key = object_key(encoded_key, key)?;
            let encoded_value = self.encode_node(value, None, None, flags, custom)?;
            encoded.insert(encoded_key, encoded_value);
        }
        Ok(Value::Object(encoded))
    }

    fn encode_opaque(
        &self,
        value: &dyn OpaqueValue,
        flags: Flags,
        custom: &EncoderRegistry,
    ) -> Result<Value, EncodeError> {
        if let Some(convert) = custom.lookup(value) {
            return convert(value);
        }
        if let Some(convert) = self.defaults.lookup(value) {
            return convert(value);
        }

        tracing::trace!(type_name = value.type_name(), "no converter registered, trying views");
        let mut failures = Vec::with_capacity(2);
        let entries = match value.as_mapping() {
            Ok(entries) => entries,
            Err(mapping_failure) => {
                failures.push(mapping_failure);
                match value.as_attributes() {
                    Ok(attributes) => attributes
                        .into_iter()
                        .map(|(name, node)| (Node::string(name), node))
                        .collect(),
                    Err(attribute_failure) => {
                        failures.push(attribute_failure);
                        return Err(EncodeError::Unencodable {
                            type_name: value.type_name(),
                            failures,
                        });
                    }
                }
            }
        };
        self.encode_mapping(&entries, None, None, flags, custom)
    }
}

fn object_key(encoded: Value, key: &Node) -> Result<String, EncodeError> {
    match encoded {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Array(_) | Value::Object(_) => Err(EncodeError::InvalidKey {
            type_name: key.kind_name(),
        }),
    }
}

/// Encodes `value` with the built-in default converters.
pub fn jsonable_encoder<T: Encodable + ?Sized>(
    value: &T,
    options: &EncodeOptions,
) -> Result<Value, EncodeError> {
    JsonableEncoder::new().encode(value, options)
}
