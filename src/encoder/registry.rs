//! Ordered type-to-converter tables.
//!
//! A registry is a list of `(TypeMatcher, Converter)` pairs. Lookup first
//! looks for an entry keyed on the value's exact type, then scans all entries
//! in insertion order and takes the first matcher that accepts the value.
//! Insertion order is therefore part of the contract.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::{Arc, OnceLock};

use serde_json::Value;

use super::node::OpaqueValue;
use crate::error::EncodeError;

pub type Converter = Arc<dyn Fn(&dyn OpaqueValue) -> Result<Value, EncodeError> + Send + Sync>;

type Predicate = Arc<dyn Fn(&dyn OpaqueValue) -> bool + Send + Sync>;

/// Decides whether a registry entry applies to a value.
#[derive(Clone)]
pub enum TypeMatcher {
    /// Matches exactly one concrete type.
    Exact { id: TypeId, name: &'static str },
    /// Matches any value the predicate accepts, e.g. a family of related types.
    When { name: &'static str, predicate: Predicate },
}

impl TypeMatcher {
    pub fn exact<T: Any>() -> Self {
        TypeMatcher::Exact {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn when<F>(name: &'static str, predicate: F) -> Self
    where
        F: Fn(&dyn OpaqueValue) -> bool + Send + Sync + 'static,
    {
        TypeMatcher::When {
            name,
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TypeMatcher::Exact { name, .. } | TypeMatcher::When { name, .. } => name,
        }
    }

    pub fn matches(&self, value: &dyn OpaqueValue) -> bool {
        match self {
            TypeMatcher::Exact { id, .. } => value.as_any().type_id() == *id,
            TypeMatcher::When { predicate, .. } => predicate(value),
        }
    }

    fn is_exact_for(&self, id: TypeId) -> bool {
        matches!(self, TypeMatcher::Exact { id: own, .. } if *own == id)
    }

    fn same_key(&self, other: &TypeMatcher) -> bool {
        match (self, other) {
            (TypeMatcher::Exact { id: a, .. }, TypeMatcher::Exact { id: b, .. }) => a == b,
            (TypeMatcher::When { name: a, .. }, TypeMatcher::When { name: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for TypeMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeMatcher::Exact { name, .. } => write!(f, "Exact({name})"),
            TypeMatcher::When { name, .. } => write!(f, "When({name})"),
        }
    }
}

/// Ordered converter table.
#[derive(Clone, Default)]
pub struct EncoderRegistry {
    entries: Vec<(TypeMatcher, Converter)>,
}

impl EncoderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Registers a converter for exactly `T`.
    pub fn register<T, F>(&mut self, convert: F) -> &mut Self
    where
        T: Any,
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        let converter: Converter = Arc::new(move |value: &dyn OpaqueValue| {
            value
                .as_any()
                .downcast_ref::<T>()
                .map(&convert)
                .ok_or_else(|| EncodeError::Converter {
                    type_name: value.type_name(),
                    message: format!("expected a `{}`", type_name::<T>()),
                })
        });
        self.upsert(TypeMatcher::exact::<T>(), converter)
    }

    /// Registers a converter for every value `predicate` accepts.
    pub fn register_when<P, F>(&mut self, name: &'static str, predicate: P, convert: F) -> &mut Self
    where
        P: Fn(&dyn OpaqueValue) -> bool + Send + Sync + 'static,
        F: Fn(&dyn OpaqueValue) -> Result<Value, EncodeError> + Send + Sync + 'static,
    {
        self.upsert(TypeMatcher::when(name, predicate), Arc::new(convert))
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<T, F>(mut self, convert: F) -> Self
    where
        T: Any,
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.register::<T, F>(convert);
        self
    }

    /// Inserts an entry. An entry with the same key keeps its position and
    /// takes the new converter; a new key is appended.
    pub fn upsert(&mut self, matcher: TypeMatcher, converter: Converter) -> &mut Self {
        match self.entries.iter_mut().find(|(m, _)| m.same_key(&matcher)) {
            Some(slot) => slot.1 = converter,
            None => self.entries.push((matcher, converter)),
        }
        self
    }

    /// Folds `other` into `self`; on key collisions `other` wins.
    pub fn merge(&mut self, other: &EncoderRegistry) {
        for (matcher, converter) in &other.entries {
            self.upsert(matcher.clone(), Arc::clone(converter));
        }
    }

    pub fn lookup(&self, value: &dyn OpaqueValue) -> Option<&Converter> {
        let id = value.as_any().type_id();
        self.entries
            .iter()
            .find(|(m, _)| m.is_exact_for(id))
            .or_else(|| self.entries.iter().find(|(m, _)| m.matches(value)))
            .map(|(_, converter)| converter)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(m, _)| m.name())
    }

    /// The process-wide default table. Built on first use and never mutated.
    pub fn defaults() -> &'static EncoderRegistry {
        static DEFAULTS: OnceLock<EncoderRegistry> = OnceLock::new();
        DEFAULTS.get_or_init(build_defaults)
    }
}

impl fmt::Debug for EncoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(m, _)| m))
            .finish()
    }
}

fn build_defaults() -> EncoderRegistry {
    use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
    use std::time::Duration;

    EncoderRegistry::new()
        .with(|v: &DateTime<Utc>| Value::String(v.to_rfc3339()))
        .with(|v: &DateTime<FixedOffset>| Value::String(v.to_rfc3339()))
        .with(|v: &NaiveDateTime| Value::String(v.format("%Y-%m-%dT%H:%M:%S%.f").to_string()))
        .with(|v: &NaiveDate| Value::String(v.format("%Y-%m-%d").to_string()))
        .with(|v: &NaiveTime| Value::String(v.format("%H:%M:%S%.f").to_string()))
        .with(|v: &uuid::Uuid| Value::String(v.hyphenated().to_string()))
        .with(|v: &Duration| Value::from(v.as_secs_f64()))
        .with(|v: &IpAddr| Value::String(v.to_string()))
        .with(|v: &Ipv4Addr| Value::String(v.to_string()))
        .with(|v: &Ipv6Addr| Value::String(v.to_string()))
}
