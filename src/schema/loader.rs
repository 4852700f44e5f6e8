//! Schema loader for record schemas described in JSON files
//!
//! File layout:
//!
//! ```json
//! {
//!   "name": "Person",
//!   "fields": [
//!     {"name": "id", "type": "int", "optional": true},
//!     {"name": "name", "type": "string"},
//!     {"name": "home", "type": "Address"},
//!     {"name": "tags", "type": "record", "fields": [{"name": "tag", "type": "string"}]}
//!   ],
//!   "types": {
//!     "Address": {"fields": [{"name": "city", "type": "string"}]}
//!   }
//! }
//! ```
//!
//! `type` is a primitive name, `record` with inline `fields`, or any other
//! name, which is resolved at derivation time against `types`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::codec::RecordCodec;

use super::derive::derive_with;
use super::errors::{SchemaError, SchemaResult};
use super::registry::CodecOverrides;
use super::types::{FieldDef, FieldType, Primitive, RecordSchema};

/// Inline nested record marker in schema files
const RECORD_TYPE: &str = "record";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    name: String,
    fields: Vec<FieldFile>,
    #[serde(default)]
    types: BTreeMap<String, NamedFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NamedFile {
    fields: Vec<FieldFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldFile {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    fields: Option<Vec<FieldFile>>,
}

/// A root record schema plus the named record schemas it may refer to
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    /// Record described by the file
    pub root: RecordSchema,
    /// Named record schemas from the `types` section
    pub named: BTreeMap<String, RecordSchema>,
}

impl SchemaDocument {
    /// Derives the root record codec.
    ///
    /// Named records of the document are added to `base` for this call.
    pub fn derive(&self, base: &CodecOverrides) -> SchemaResult<RecordCodec> {
        let overrides = self
            .named
            .values()
            .cloned()
            .fold(base.clone(), CodecOverrides::with_record);
        derive_with(&self.root, &overrides)
    }

    /// Looks up a named record schema
    pub fn named(&self, name: &str) -> Option<&RecordSchema> {
        self.named.get(name)
    }
}

/// Reads schema documents from disk.
pub struct SchemaLoader;

impl SchemaLoader {
    /// Loads a schema file.
    ///
    /// Unreadable files and invalid JSON fail with `Malformed`; unknown type
    /// names are accepted here and reported by derivation.
    pub fn load_file(path: &Path) -> SchemaResult<SchemaDocument> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed(path.display().to_string(), format!("Failed to read file: {}", e))
        })?;

        Self::parse_str(&content, &path.display().to_string())
    }

    /// Parses a schema document; `origin` names the source in errors.
    pub fn parse_str(content: &str, origin: &str) -> SchemaResult<SchemaDocument> {
        let file: SchemaFile = serde_json::from_str(content)
            .map_err(|e| SchemaError::malformed(origin, format!("Invalid JSON: {}", e)))?;

        let root = record_schema(file.name, file.fields, origin)?;
        let mut named = BTreeMap::new();
        for (name, def) in file.types {
            if Primitive::from_schema_name(&name).is_some() || name == RECORD_TYPE {
                return Err(SchemaError::malformed(
                    origin,
                    format!("Type name '{}' is reserved", name),
                ));
            }
            let schema = record_schema(name.clone(), def.fields, origin)?;
            named.insert(name, schema);
        }

        Ok(SchemaDocument { root, named })
    }
}

fn record_schema(name: String, fields: Vec<FieldFile>, origin: &str) -> SchemaResult<RecordSchema> {
    let fields = fields
        .into_iter()
        .map(|f| field_def(f, origin))
        .collect::<SchemaResult<Vec<_>>>()?;
    Ok(RecordSchema::new(name, fields))
}

fn field_def(field: FieldFile, origin: &str) -> SchemaResult<FieldDef> {
    let field_type = match (field.field_type.as_str(), field.fields) {
        (RECORD_TYPE, Some(fields)) => {
            FieldType::Record(record_schema(field.name.clone(), fields, origin)?)
        }
        (RECORD_TYPE, None) => {
            return Err(SchemaError::malformed(
                origin,
                format!("Record field '{}' has no 'fields'", field.name),
            ));
        }
        (_, Some(_)) => {
            return Err(SchemaError::malformed(
                origin,
                format!("Only 'record' fields may declare 'fields' (field '{}')", field.name),
            ));
        }
        (name, None) => match Primitive::from_schema_name(name) {
            Some(p) => FieldType::Primitive(p),
            None => FieldType::Named(name.to_string()),
        },
    };

    let field_type = if field.optional {
        FieldType::optional(field_type)
    } else {
        field_type
    };

    Ok(FieldDef::new(field.name, field_type))
}
