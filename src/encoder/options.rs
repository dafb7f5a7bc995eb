use std::collections::BTreeSet;

use super::node::Node;
use super::registry::EncoderRegistry;

/// A set of field names or mapping keys used for include/exclude filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet(BTreeSet<String>);

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// String and integer keys are compared by their text; other keys never match.
    pub fn contains_key(&self, key: &Node) -> bool {
        key.field_name().is_some_and(|name| self.0.contains(&*name))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for FieldSet {
    fn from(names: [S; N]) -> Self {
        names.into_iter().collect()
    }
}

/// Knobs for [`jsonable_encoder`](super::jsonable_encoder).
///
/// The defaults match what request bodies are encoded with: aliases on,
/// explicit nulls kept, `_sa*` keys dropped, no filtering.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    pub include: Option<FieldSet>,
    pub exclude: Option<FieldSet>,
    pub by_alias: bool,
    /// Legacy spelling of `exclude_unset`; only ever OR-ed into it.
    pub skip_defaults: Option<bool>,
    pub exclude_unset: bool,
    pub include_none: bool,
    pub custom_encoder: EncoderRegistry,
    pub sqlalchemy_safe: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            include: None,
            exclude: None,
            by_alias: true,
            skip_defaults: None,
            exclude_unset: false,
            include_none: true,
            custom_encoder: EncoderRegistry::new(),
            sqlalchemy_safe: true,
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(fields.into_iter().collect());
        self
    }

    pub fn exclude<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Some(fields.into_iter().collect());
        self
    }

    pub fn by_alias(mut self, by_alias: bool) -> Self {
        self.by_alias = by_alias;
        self
    }

    #[deprecated(note = "use `exclude_unset`")]
    pub fn skip_defaults(mut self, skip_defaults: bool) -> Self {
        self.skip_defaults = Some(skip_defaults);
        self
    }

    pub fn exclude_unset(mut self, exclude_unset: bool) -> Self {
        self.exclude_unset = exclude_unset;
        self
    }

    pub fn include_none(mut self, include_none: bool) -> Self {
        self.include_none = include_none;
        self
    }

    pub fn custom_encoder(mut self, encoders: EncoderRegistry) -> Self {
        self.custom_encoder = encoders;
        self
    }

    pub fn sqlalchemy_safe(mut self, sqlalchemy_safe: bool) -> Self {
        self.sqlalchemy_safe = sqlalchemy_safe;
        self
    }

    pub fn effective_exclude_unset(&self) -> bool {
        self.exclude_unset || self.skip_defaults.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::node::Scalar;

    #[test]
    fn defaults_keep_nulls_and_use_aliases() {
        let options = EncodeOptions::default();
        assert!(options.by_alias);
        assert!(options.include_none);
        assert!(options.sqlalchemy_safe);
        assert!(!options.effective_exclude_unset());
        assert!(options.include.is_none() && options.exclude.is_none());
    }

    #[test]
    #[allow(deprecated)]
    fn skip_defaults_only_adds_to_exclude_unset() {
        assert!(EncodeOptions::new().skip_defaults(true).effective_exclude_unset());
        assert!(EncodeOptions::new()
            .skip_defaults(false)
            .exclude_unset(true)
            .effective_exclude_unset());
        assert!(!EncodeOptions::new().skip_defaults(false).effective_exclude_unset());
    }

    #[test]
    fn field_set_matches_integer_keys_by_text() {
        let set = FieldSet::from(["1", "name"]);
        assert!(set.contains_key(&Node::Scalar(Scalar::Int(1))));
        assert!(set.contains_key(&Node::string("name")));
        assert!(!set.contains_key(&Node::null()));
    }
}
