//! Record schema definitions
//!
//! Supported field types:
//! - primitive: string, char, byte, short, int, long, float, double, bool, date
//! - optional: any field type, absent when all its cells are empty
//! - record: nested record with its own ordered field list
//! - named: reference to a record schema or custom codec registered by name

use std::fmt;

/// Builtin primitive types, each backed by a single-cell codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    /// UTF-8 text
    Text,
    /// Single character
    Char,
    /// 8-bit signed integer
    Byte,
    /// 16-bit signed integer
    Short,
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    Long,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// Boolean
    Bool,
    /// Calendar date
    Date,
}

impl Primitive {
    /// All builtin primitives
    pub const ALL: [Primitive; 10] = [
        Primitive::Text,
        Primitive::Char,
        Primitive::Byte,
        Primitive::Short,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
        Primitive::Bool,
        Primitive::Date,
    ];

    /// Returns the type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Primitive::Text => "String",
            Primitive::Char => "Char",
            Primitive::Byte => "Byte",
            Primitive::Short => "Short",
            Primitive::Int => "Int",
            Primitive::Long => "Long",
            Primitive::Float => "Float",
            Primitive::Double => "Double",
            Primitive::Bool => "Boolean",
            Primitive::Date => "Date",
        }
    }

    /// Returns the name used in schema files
    pub fn schema_name(&self) -> &'static str {
        match self {
            Primitive::Text => "string",
            Primitive::Char => "char",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Bool => "bool",
            Primitive::Date => "date",
        }
    }

    /// Looks up a primitive by its schema file name
    pub fn from_schema_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.schema_name() == name)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// The type of a record field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Builtin single-cell type
    Primitive(Primitive),
    /// Optional wrapper
    Optional(Box<FieldType>),
    /// Nested record defined inline
    Record(RecordSchema),
    /// Type resolved by name at derivation time
    Named(String),
}

impl FieldType {
    /// Wraps a type as optional
    pub fn optional(inner: FieldType) -> Self {
        FieldType::Optional(Box::new(inner))
    }

    /// Returns the type name for error messages
    pub fn type_name(&self) -> String {
        match self {
            FieldType::Primitive(p) => p.type_name().to_string(),
            FieldType::Optional(inner) => format!("Option<{}>", inner.type_name()),
            FieldType::Record(schema) => schema.name.clone(),
            FieldType::Named(name) => name.clone(),
        }
    }
}

impl From<Primitive> for FieldType {
    fn from(p: Primitive) -> Self {
        FieldType::Primitive(p)
    }
}

/// A named field of a record schema
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name, used as the header cell
    pub name: String,
    /// Field data type
    pub field_type: FieldType,
}

impl FieldDef {
    /// Create a field of any type
    pub fn new(name: impl Into<String>, field_type: impl Into<FieldType>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
        }
    }

    /// Create a text field
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, Primitive::Text)
    }

    /// Create an int field
    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, Primitive::Int)
    }

    /// Create a double field
    pub fn double(name: impl Into<String>) -> Self {
        Self::new(name, Primitive::Double)
    }

    /// Create a bool field
    pub fn bool(name: impl Into<String>) -> Self {
        Self::new(name, Primitive::Bool)
    }

    /// Create a date field
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, Primitive::Date)
    }

    /// Create an optional field
    pub fn optional(name: impl Into<String>, inner: impl Into<FieldType>) -> Self {
        Self::new(name, FieldType::optional(inner.into()))
    }

    /// Create a nested record field
    pub fn record(name: impl Into<String>, schema: RecordSchema) -> Self {
        Self::new(name, FieldType::Record(schema))
    }

    /// Create a field whose type is resolved by name
    pub fn named(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Named(type_name.into()))
    }
}

/// Ordered field list of one record type
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    /// Record type name
    pub name: String,
    /// Fields in declared order
    pub fields: Vec<FieldDef>,
}

impl RecordSchema {
    /// Create a new record schema
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Appends a field
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the field names in declared order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}
