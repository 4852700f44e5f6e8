//! Codec tables consulted during derivation
//!
//! The builtin table is built once per process and never mutated. Callers
//! customise a single derivation by passing `CodecOverrides`, which take
//! precedence over the builtins for that call only.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

use crate::codec::{LeafCodec, SharedCodec};

use super::types::{Primitive, RecordSchema};

/// Identity of a type in a codec table
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeKey {
    /// A builtin primitive
    Primitive(Primitive),
    /// A type referenced by name
    Named(String),
}

impl From<Primitive> for TypeKey {
    fn from(p: Primitive) -> Self {
        TypeKey::Primitive(p)
    }
}

/// Process-wide default codec table
static BUILTIN: OnceLock<CodecRegistry> = OnceLock::new();

/// Mapping from type identity to codec
#[derive(Debug, Clone, Default)]
pub struct CodecRegistry {
    codecs: HashMap<TypeKey, SharedCodec>,
}

impl CodecRegistry {
    /// Returns the shared table of builtin leaf codecs
    pub fn builtin() -> &'static CodecRegistry {
        BUILTIN.get_or_init(Self::with_builtins)
    }

    /// Builds a fresh table holding every builtin leaf
    pub fn with_builtins() -> Self {
        let codecs = Primitive::ALL
            .into_iter()
            .map(|p| (TypeKey::Primitive(p), Arc::new(builtin_leaf(p)) as SharedCodec))
            .collect();
        Self { codecs }
    }

    /// Looks up a codec
    pub fn get(&self, key: &TypeKey) -> Option<&SharedCodec> {
        self.codecs.get(key)
    }

    /// Returns the number of registered codecs
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Returns true if no codec is registered
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

/// Returns the builtin leaf codec for a primitive
pub fn builtin_leaf(primitive: Primitive) -> LeafCodec {
    match primitive {
        Primitive::Text => LeafCodec::text(),
        Primitive::Char => LeafCodec::character(),
        Primitive::Byte => LeafCodec::byte(),
        Primitive::Short => LeafCodec::short(),
        Primitive::Int => LeafCodec::int(),
        Primitive::Long => LeafCodec::long(),
        Primitive::Float => LeafCodec::float(),
        Primitive::Double => LeafCodec::double(),
        Primitive::Bool => LeafCodec::boolean(),
        Primitive::Date => LeafCodec::date(),
    }
}

/// Call-scoped codec overrides and named record schemas.
///
/// Passed explicitly into a derivation call; nothing here outlives it.
#[derive(Debug, Clone, Default)]
pub struct CodecOverrides {
    codecs: HashMap<TypeKey, SharedCodec>,
    records: BTreeMap<String, RecordSchema>,
}

impl CodecOverrides {
    /// Create an empty override set
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a codec for a type, replacing any earlier override
    pub fn register_codec(&mut self, key: impl Into<TypeKey>, codec: SharedCodec) {
        self.codecs.insert(key.into(), codec);
    }

    /// Registers a record schema that `Named` field types may refer to
    pub fn register_record(&mut self, schema: RecordSchema) {
        self.records.insert(schema.name.clone(), schema);
    }

    /// Builder form of [`register_codec`](Self::register_codec)
    pub fn with_codec(mut self, key: impl Into<TypeKey>, codec: SharedCodec) -> Self {
        self.register_codec(key, codec);
        self
    }

    /// Replaces the leaf used for a primitive
    pub fn with_leaf(self, primitive: Primitive, leaf: LeafCodec) -> Self {
        self.with_codec(primitive, Arc::new(leaf))
    }

    /// Replaces the date leaf with one using `format`
    pub fn with_date_format(self, format: impl Into<String>) -> Self {
        self.with_leaf(Primitive::Date, LeafCodec::date_with_format(format))
    }

    /// Builder form of [`register_record`](Self::register_record)
    pub fn with_record(mut self, schema: RecordSchema) -> Self {
        self.register_record(schema);
        self
    }

    /// Looks up an overriding codec
    pub fn codec(&self, key: &TypeKey) -> Option<&SharedCodec> {
        self.codecs.get(key)
    }

    /// Looks up a named record schema
    pub fn record(&self, name: &str) -> Option<&RecordSchema> {
        self.records.get(name)
    }

    /// Resolves a codec: overrides first, then the builtin table
    pub fn resolve(&self, key: &TypeKey) -> Option<SharedCodec> {
        self.codec(key)
            .or_else(|| CodecRegistry::builtin().get(key))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Value;

    #[test]
    fn test_builtin_has_every_primitive() {
        let registry = CodecRegistry::builtin();
        assert_eq!(registry.len(), Primitive::ALL.len());
        for p in Primitive::ALL {
            let codec = registry.get(&TypeKey::Primitive(p)).unwrap();
            assert_eq!(codec.type_name(), p.type_name());
            assert_eq!(codec.width(), 1);
        }
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(std::ptr::eq(CodecRegistry::builtin(), CodecRegistry::builtin()));
    }

    #[test]
    fn test_override_takes_precedence() {
        let overrides = CodecOverrides::new().with_date_format("%d/%m/%Y");
        let codec = overrides.resolve(&Primitive::Date.into()).unwrap();
        assert!(codec.parse(&["31/01/2024"]).is_ok());

        // builtin table is untouched
        let builtin = CodecOverrides::new().resolve(&Primitive::Date.into()).unwrap();
        assert!(builtin.parse(&["31/01/2024"]).is_err());
        assert!(builtin.parse(&["2024-01-31"]).is_ok());
    }

    #[test]
    fn test_named_codec() {
        let cents = LeafCodec::new(
            "Cents",
            |cell| cell.parse::<i64>().ok().map(Value::Long),
            |value| match value {
                Value::Long(v) => Some(v.to_string()),
                _ => None,
            },
        );
        let overrides = CodecOverrides::new().with_codec(TypeKey::Named("cents".into()), Arc::new(cents));
        assert!(overrides.resolve(&TypeKey::Named("cents".into())).is_some());
        assert!(overrides.resolve(&TypeKey::Named("euros".into())).is_none());
    }

    #[test]
    fn test_named_record() {
        let overrides = CodecOverrides::new().with_record(RecordSchema::new("Empty", Vec::new()));
        assert!(overrides.record("Empty").is_some());
        assert!(overrides.record("Missing").is_none());
    }
}
