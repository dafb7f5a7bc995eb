//! The value graph the encoder walks.
//!
//! Anything that can be sent as a request body is first lowered into a
//! [`Node`]. The set of shapes is closed: structured models, enumeration
//! members, filesystem paths, scalars, mappings, sequences, and opaque values
//! that only a registered converter (or their own mapping/attribute view) can
//! make sense of.

use std::any::Any;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use super::options::FieldSet;
use super::registry::EncoderRegistry;

/// A JSON-primitive leaf. `Null` is the absence marker.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
}

impl Scalar {
    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Int(i) => Value::from(*i),
            Scalar::UInt(u) => Value::from(*u),
            // serde_json maps NaN and infinities to null
            Scalar::Float(f) => Value::from(*f),
            Scalar::String(s) => Value::String(s.clone()),
        }
    }
}

/// One node of a value graph.
#[derive(Debug, Clone)]
pub enum Node {
    Model(ModelNode),
    Enum(Scalar),
    Path(PathBuf),
    Scalar(Scalar),
    Mapping(Vec<(Node, Node)>),
    Sequence(Vec<Node>),
    Opaque(Arc<dyn OpaqueValue>),
}

impl Node {
    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Node::Scalar(Scalar::String(s.into()))
    }

    /// An enumeration member, represented by its underlying value.
    pub fn enumeration(value: Scalar) -> Self {
        Node::Enum(value)
    }

    pub fn model<M: Model + ?Sized>(model: &M) -> Self {
        Node::Model(ModelNode {
            name: model.model_name(),
            fields: model.model_fields(),
            encoders: model.json_encoders(),
        })
    }

    pub fn opaque<T: OpaqueValue>(value: T) -> Self {
        Node::Opaque(Arc::new(value))
    }

    pub fn mapping<K, V, I>(entries: I) -> Self
    where
        K: Encodable,
        V: Encodable,
        I: IntoIterator<Item = (K, V)>,
    {
        Node::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_node(), v.to_node()))
                .collect(),
        )
    }

    /// Drains a one-shot iterator into a sequence node.
    pub fn sequence_from_iter<T, I>(items: I) -> Self
    where
        T: Encodable,
        I: IntoIterator<Item = T>,
    {
        Node::Sequence(items.into_iter().map(|item| item.to_node()).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(Scalar::Null))
    }

    /// Name used when error messages refer to this node.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Model(m) => m.name,
            Node::Enum(_) => "enum",
            Node::Path(_) => "path",
            Node::Scalar(Scalar::Null) => "null",
            Node::Scalar(Scalar::Bool(_)) => "bool",
            Node::Scalar(Scalar::Int(_)) | Node::Scalar(Scalar::UInt(_)) => "int",
            Node::Scalar(Scalar::Float(_)) => "float",
            Node::Scalar(Scalar::String(_)) => "string",
            Node::Mapping(_) => "mapping",
            Node::Sequence(_) => "sequence",
            Node::Opaque(v) => (**v).type_name(),
        }
    }

    /// The key as it is matched against include/exclude sets.
    pub(crate) fn field_name(&self) -> Option<Cow<'_, str>> {
        match self {
            Node::Scalar(Scalar::String(s)) | Node::Enum(Scalar::String(s)) => {
                Some(Cow::Borrowed(s.as_str()))
            }
            Node::Scalar(Scalar::Int(i)) | Node::Enum(Scalar::Int(i)) => {
                Some(Cow::Owned(i.to_string()))
            }
            Node::Scalar(Scalar::UInt(u)) | Node::Enum(Scalar::UInt(u)) => {
                Some(Cow::Owned(u.to_string()))
            }
            _ => None,
        }
    }

    /// String keys starting with `_sa` are ORM bookkeeping, never payload.
    pub(crate) fn is_reserved_key(&self) -> bool {
        matches!(self, Node::Scalar(Scalar::String(s)) if s.starts_with("_sa"))
    }

    /// Replaces every nested model with its field mapping.
    pub(crate) fn flatten_models(self, by_alias: bool, exclude_unset: bool) -> Node {
        match self {
            Node::Model(model) => model.to_mapping(None, None, by_alias, exclude_unset),
            Node::Mapping(entries) => Node::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| {
                        (
                            k.flatten_models(by_alias, exclude_unset),
                            v.flatten_models(by_alias, exclude_unset),
                        )
                    })
                    .collect(),
            ),
            Node::Sequence(items) => Node::Sequence(
                items
                    .into_iter()
                    .map(|item| item.flatten_models(by_alias, exclude_unset))
                    .collect(),
            ),
            other => other,
        }
    }
}

/// Snapshot of a structured model taken when it is lowered into a [`Node`].
#[derive(Debug, Clone)]
pub struct ModelNode {
    pub name: &'static str,
    pub fields: Vec<ModelField>,
    pub encoders: EncoderRegistry,
}

impl ModelNode {
    /// Field mapping honoring include, exclude, alias and unset rules.
    ///
    /// Both filters are applied on declared field names: `include` first,
    /// then `exclude`.
    pub(crate) fn to_mapping(
        &self,
        include: Option<&FieldSet>,
        exclude: Option<&FieldSet>,
        by_alias: bool,
        exclude_unset: bool,
    ) -> Node {
        let entries = self
            .fields
            .iter()
            .filter(|f| include.map_or(true, |set| set.contains(f.name)))
            .filter(|f| !exclude.is_some_and(|set| set.contains(f.name)))
            .filter(|f| !exclude_unset || f.is_set)
            .map(|f| {
                (
                    Node::string(f.key(by_alias)),
                    f.value.clone().flatten_models(by_alias, exclude_unset),
                )
            })
            .collect();
        Node::Mapping(entries)
    }
}

/// One declared field of a model.
#[derive(Debug, Clone)]
pub struct ModelField {
    pub name: &'static str,
    pub alias: Option<&'static str>,
    pub value: Node,
    /// Whether the field was given a value, as opposed to left at its default.
    pub is_set: bool,
}

impl ModelField {
    pub fn new<T: Encodable + ?Sized>(name: &'static str, value: &T) -> Self {
        Self {
            name,
            alias: None,
            value: value.to_node(),
            is_set: true,
        }
    }

    /// A field backed by an `Option`; `None` counts as unset.
    pub fn optional<T: Encodable>(name: &'static str, value: &Option<T>) -> Self {
        Self {
            name,
            alias: None,
            value: value.to_node(),
            is_set: value.is_some(),
        }
    }

    pub fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn key(&self, by_alias: bool) -> &'static str {
        match (by_alias, self.alias) {
            (true, Some(alias)) => alias,
            _ => self.name,
        }
    }
}

/// A structured record with declared fields.
pub trait Model {
    fn model_name(&self) -> &'static str;

    fn model_fields(&self) -> Vec<ModelField>;

    /// Per-type converters, consulted before the caller's and the defaults.
    fn json_encoders(&self) -> EncoderRegistry {
        EncoderRegistry::new()
    }
}

/// Type identity for opaque values. Blanket-implemented; never implement by hand.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A value outside the closed set of node shapes.
///
/// Such values are handled by a matching converter from a registry. Failing
/// that, the encoder falls back to the mapping view, then the attribute view.
pub trait OpaqueValue: AsAny + fmt::Debug + Send + Sync {
    fn as_mapping(&self) -> Result<Vec<(Node, Node)>, String> {
        Err(format!("`{}` cannot be viewed as a mapping", self.type_name()))
    }

    fn as_attributes(&self) -> Result<Vec<(String, Node)>, String> {
        Err(format!("`{}` has no named attributes", self.type_name()))
    }
}

/// Lowers a Rust value into the encoder's value graph.
pub trait Encodable {
    fn to_node(&self) -> Node;
}

impl Encodable for Node {
    fn to_node(&self) -> Node {
        self.clone()
    }
}

impl<T: Encodable + ?Sized> Encodable for &T {
    fn to_node(&self) -> Node {
        (**self).to_node()
    }
}

impl<T: Encodable + ?Sized> Encodable for Box<T> {
    fn to_node(&self) -> Node {
        (**self).to_node()
    }
}

impl Encodable for bool {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::Bool(*self))
    }
}

macro_rules! encodable_scalar {
    ($variant:ident as $target:ty => $($t:ty),+) => {
        $(
            impl Encodable for $t {
                fn to_node(&self) -> Node {
                    Node::Scalar(Scalar::$variant(*self as $target))
                }
            }
        )+
    };
}

encodable_scalar!(Int as i64 => i8, i16, i32, i64, isize);
encodable_scalar!(UInt as u64 => u8, u16, u32, u64, usize);
encodable_scalar!(Float as f64 => f32, f64);

impl Encodable for str {
    fn to_node(&self) -> Node {
        Node::string(self)
    }
}

impl Encodable for String {
    fn to_node(&self) -> Node {
        Node::string(self.as_str())
    }
}

impl Encodable for char {
    fn to_node(&self) -> Node {
        Node::string(self.to_string())
    }
}

impl<T: Encodable> Encodable for Option<T> {
    fn to_node(&self) -> Node {
        match self {
            Some(value) => value.to_node(),
            None => Node::null(),
        }
    }
}

impl<T: Encodable> Encodable for [T] {
    fn to_node(&self) -> Node {
        Node::Sequence(self.iter().map(Encodable::to_node).collect())
    }
}

impl<T: Encodable, const N: usize> Encodable for [T; N] {
    fn to_node(&self) -> Node {
        self.as_slice().to_node()
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn to_node(&self) -> Node {
        self.as_slice().to_node()
    }
}

impl<T: Encodable> Encodable for VecDeque<T> {
    fn to_node(&self) -> Node {
        Node::Sequence(self.iter().map(Encodable::to_node).collect())
    }
}

impl<T: Encodable, S> Encodable for HashSet<T, S> {
    fn to_node(&self) -> Node {
        Node::Sequence(self.iter().map(Encodable::to_node).collect())
    }
}

impl<T: Encodable> Encodable for BTreeSet<T> {
    fn to_node(&self) -> Node {
        Node::Sequence(self.iter().map(Encodable::to_node).collect())
    }
}

impl<K: Encodable, V: Encodable, S> Encodable for HashMap<K, V, S> {
    fn to_node(&self) -> Node {
        Node::mapping(self.iter())
    }
}

impl<K: Encodable, V: Encodable> Encodable for BTreeMap<K, V> {
    fn to_node(&self) -> Node {
        Node::mapping(self.iter())
    }
}

macro_rules! encodable_tuple {
    ($($name:ident),+) => {
        impl<$($name: Encodable),+> Encodable for ($($name,)+) {
            #[allow(non_snake_case)]
            fn to_node(&self) -> Node {
                let ($($name,)+) = self;
                Node::Sequence(vec![$($name.to_node()),+])
            }
        }
    };
}

encodable_tuple!(A);
encodable_tuple!(A, B);
encodable_tuple!(A, B, C);
encodable_tuple!(A, B, C, D);

impl Encodable for Path {
    fn to_node(&self) -> Node {
        Node::Path(self.to_path_buf())
    }
}

impl Encodable for PathBuf {
    fn to_node(&self) -> Node {
        Node::Path(self.clone())
    }
}

impl Encodable for Value {
    fn to_node(&self) -> Node {
        match self {
            Value::Null => Node::null(),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Node::Scalar(Scalar::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Node::Scalar(Scalar::UInt(u))
                } else {
                    Node::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Value::String(s) => Node::string(s.as_str()),
            Value::Array(items) => Node::Sequence(items.iter().map(Encodable::to_node).collect()),
            Value::Object(map) => Node::Mapping(
                map.iter()
                    .map(|(k, v)| (Node::string(k.as_str()), v.to_node()))
                    .collect(),
            ),
        }
    }
}

// Types the default registry knows how to convert.
macro_rules! encodable_opaque {
    ($($t:ty),+ $(,)?) => {
        $(
            impl OpaqueValue for $t {}

            impl Encodable for $t {
                fn to_node(&self) -> Node {
                    Node::opaque(self.clone())
                }
            }
        )+
    };
}

encodable_opaque!(
    chrono::DateTime<chrono::Utc>,
    chrono::DateTime<chrono::FixedOffset>,
    chrono::NaiveDate,
    chrono::NaiveDateTime,
    chrono::NaiveTime,
    uuid::Uuid,
    std::time::Duration,
    std::net::IpAddr,
    std::net::Ipv4Addr,
    std::net::Ipv6Addr,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_none_lowers_to_null() {
        let value: Option<i32> = None;
        assert!(value.to_node().is_null());
        assert!(matches!(Some(3).to_node(), Node::Scalar(Scalar::Int(3))));
    }

    #[test]
    fn field_name_covers_string_and_integer_keys() {
        assert_eq!(Node::string("name").field_name().as_deref(), Some("name"));
        assert_eq!(7u8.to_node().field_name().as_deref(), Some("7"));
        assert_eq!(true.to_node().field_name(), None);
    }

    #[test]
    fn reserved_key_requires_string_prefix() {
        assert!(Node::string("_sa_instance_state").is_reserved_key());
        assert!(!Node::string("sa_field").is_reserved_key());
        assert!(!Node::enumeration(Scalar::String("_sa".into())).is_reserved_key());
    }

    #[test]
    fn optional_field_tracks_set_state() {
        let unset = ModelField::optional::<String>("email", &None);
        let set = ModelField::optional("email", &Some("a@b.c".to_string())).alias("mail");
        assert!(!unset.is_set);
        assert!(set.is_set);
        assert_eq!(set.key(true), "mail");
        assert_eq!(set.key(false), "email");
    }

    #[test]
    fn opaque_kind_name_is_concrete_type() {
        let node = uuid::Uuid::nil().to_node();
        assert_eq!(node.kind_name(), "uuid::Uuid");
    }

    #[test]
    fn tuple_lowers_to_sequence() {
        match (1, "two", 3.0).to_node() {
            Node::Sequence(items) => assert_eq!(items.len(), 3),
            other => panic!("expected sequence, got {other:?}"),
        }
    }
}
