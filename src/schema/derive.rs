//! Builds record codecs from record schemas
//!
//! Each field type is resolved in this order:
//! 1. call-scoped overrides
//! 2. builtin leaves
//! 3. named record schemas registered on the overrides (derived recursively)
//! 4. inline nested records (derived recursively)
//!
//! Optional types wrap the codec resolved for their inner type. Any type
//! that cannot be resolved fails the whole derivation immediately.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::codec::{Codec, FieldDescriptor, OptionalCodec, RecordCodec, SharedCodec};

use super::errors::{SchemaError, SchemaResult};
use super::registry::{CodecOverrides, TypeKey};
use super::types::{FieldType, RecordSchema};

const LOG_TARGET: &str = "csvderive::derive";

/// Derives a record codec using only the builtin codecs.
pub fn derive_record(schema: &RecordSchema) -> SchemaResult<RecordCodec> {
    derive_with(schema, &CodecOverrides::default())
}

/// Derives a record codec, consulting `overrides` before the builtins.
///
/// # Errors
///
/// Returns `SchemaError` if:
/// - a field type has no codec (`UnresolvedType`)
/// - a record declares the same field twice (`DuplicateField`)
/// - a named record contains itself (`RecursiveType`)
pub fn derive_with(schema: &RecordSchema, overrides: &CodecOverrides) -> SchemaResult<RecordCodec> {
    let mut deriver = Deriver {
        overrides,
        in_progress: Vec::new(),
        named: HashMap::new(),
    };
    deriver.record(schema, "")
}

struct Deriver<'a> {
    overrides: &'a CodecOverrides,
    /// Named records currently being derived, outermost first
    in_progress: Vec<String>,
    /// Named records already derived during this call
    named: HashMap<String, SharedCodec>,
}

impl Deriver<'_> {
    fn record(&mut self, schema: &RecordSchema, path_prefix: &str) -> SchemaResult<RecordCodec> {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(schema.fields.len());

        for field in &schema.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    record: schema.name.clone(),
                    field: field.name.clone(),
                });
            }

            let field_path = make_path(path_prefix, &field.name);
            let codec = self.resolve(&field.field_type, &field_path)?;
            fields.push(FieldDescriptor::new(&field.name, codec));
        }

        let codec = RecordCodec::new(&schema.name, fields);
        log::debug!(
            target: LOG_TARGET,
            "Derived codec for record '{}' ({} fields, width {})",
            schema.name,
            schema.fields.len(),
            codec.width()
        );
        Ok(codec)
    }

    fn resolve(&mut self, field_type: &FieldType, field_path: &str) -> SchemaResult<SharedCodec> {
        match field_type {
            FieldType::Primitive(p) => self
                .overrides
                .resolve(&TypeKey::Primitive(*p))
                .ok_or_else(|| SchemaError::unresolved(field_path, p.type_name())),
            FieldType::Optional(inner) => {
                let inner = self.resolve(inner, field_path)?;
                Ok(Arc::new(OptionalCodec::new(inner)))
            }
            FieldType::Record(schema) => Ok(Arc::new(self.record(schema, field_path)?)),
            FieldType::Named(name) => self.named(name, field_path),
        }
    }

    fn named(&mut self, name: &str, field_path: &str) -> SchemaResult<SharedCodec> {
        if let Some(codec) = self.overrides.resolve(&TypeKey::Named(name.to_string())) {
            return Ok(codec);
        }
        if let Some(codec) = self.named.get(name) {
            return Ok(Arc::clone(codec));
        }

        let overrides = self.overrides;
        let schema = overrides
            .record(name)
            .ok_or_else(|| SchemaError::unresolved(field_path, name))?;

        if self.in_progress.iter().any(|n| n == name) {
            return Err(SchemaError::RecursiveType {
                name: name.to_string(),
            });
        }

        self.in_progress.push(name.to_string());
        let derived = self.record(schema, field_path);
        self.in_progress.pop();

        let codec: SharedCodec = Arc::new(derived?);
        self.named.insert(name.to_string(), Arc::clone(&codec));
        Ok(codec)
    }
}

/// Creates a field path from prefix and field name.
fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}
