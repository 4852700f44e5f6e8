//! Conversion between parsed records and JSON objects
//!
//! The schema tree supplies field names; codecs only see positions.
//! Dates are ISO `YYYY-MM-DD` strings and absent optionals are `null`.

use chrono::NaiveDate;
use serde_json::{Map, Value as Json};

use crate::codec::Value;
use crate::schema::{FieldType, Primitive, RecordSchema, SchemaDocument};

use super::errors::{CliError, CliResult};

const JSON_DATE_FORMAT: &str = "%Y-%m-%d";

/// Converts a parsed record into a JSON object keyed by field name
pub fn record_to_json(doc: &SchemaDocument, schema: &RecordSchema, value: &Value) -> CliResult<Json> {
    let values = value
        .as_record()
        .ok_or_else(|| shape_error(&schema.name, "Record", value.kind()))?;
    if values.len() != schema.fields.len() {
        return Err(CliError::input_error(format!(
            "Record '{}' has {} fields, value has {}",
            schema.name,
            schema.fields.len(),
            values.len()
        )));
    }

    let mut object = Map::new();
    for (field, value) in schema.fields.iter().zip(values) {
        object.insert(field.name.clone(), field_to_json(doc, &field.field_type, value)?);
    }
    Ok(Json::Object(object))
}

fn field_to_json(doc: &SchemaDocument, field_type: &FieldType, value: &Value) -> CliResult<Json> {
    match (field_type, value) {
        (FieldType::Optional(_), Value::Optional(None)) => Ok(Json::Null),
        (FieldType::Optional(inner), Value::Optional(Some(v))) => field_to_json(doc, inner, v),
        (FieldType::Record(schema), v) => record_to_json(doc, schema, v),
        (FieldType::Named(name), v) => record_to_json(doc, named(doc, name)?, v),
        (FieldType::Primitive(_), v) => leaf_to_json(v),
        (expected, v) => Err(shape_error("", &expected.type_name(), v.kind())),
    }
}

fn leaf_to_json(value: &Value) -> CliResult<Json> {
    let json = match value {
        Value::Text(s) => Json::from(s.as_str()),
        Value::Char(c) => Json::from(c.to_string()),
        Value::Byte(v) => Json::from(*v),
        Value::Short(v) => Json::from(*v),
        Value::Int(v) => Json::from(*v),
        Value::Long(v) => Json::from(*v),
        // Through the decimal text so 1.1f32 stays 1.1
        Value::Float(v) => v.to_string().parse::<f64>().map(Json::from).unwrap_or(Json::Null),
        Value::Double(v) => Json::from(*v),
        Value::Bool(v) => Json::from(*v),
        Value::Date(d) => Json::from(d.format(JSON_DATE_FORMAT).to_string()),
        other => return Err(shape_error("", "leaf", other.kind())),
    };
    Ok(json)
}

/// Converts a JSON object into a record value
///
/// Missing keys read as `null`, which only optional fields accept.
pub fn record_from_json(doc: &SchemaDocument, schema: &RecordSchema, json: &Json) -> CliResult<Value> {
    record_at(doc, schema, json, "")
}

fn record_at(doc: &SchemaDocument, schema: &RecordSchema, json: &Json, path: &str) -> CliResult<Value> {
    let object = json.as_object().ok_or_else(|| {
        let at = if path.is_empty() { schema.name.as_str() } else { path };
        shape_error(at, "object", json_kind(json))
    })?;

    let mut values = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        let field_path = child_path(path, &field.name);
        let field_json = object.get(&field.name).unwrap_or(&Json::Null);
        values.push(field_from_json(doc, &field.field_type, field_json, &field_path)?);
    }
    Ok(Value::Record(values))
}

fn field_from_json(doc: &SchemaDocument, field_type: &FieldType, json: &Json, path: &str) -> CliResult<Value> {
    match field_type {
        FieldType::Optional(_) if json.is_null() => Ok(Value::absent()),
        FieldType::Optional(inner) => Ok(Value::present(field_from_json(doc, inner, json, path)?)),
        FieldType::Record(schema) => record_at(doc, schema, json, path),
        FieldType::Named(name) => record_at(doc, named(doc, name)?, json, path),
        FieldType::Primitive(p) => {
            leaf_from_json(*p, json).ok_or_else(|| shape_error(path, p.type_name(), json_kind(json)))
        }
    }
}

fn leaf_from_json(primitive: Primitive, json: &Json) -> Option<Value> {
    match primitive {
        Primitive::Text => json.as_str().map(Value::from),
        Primitive::Char => {
            let mut chars = json.as_str()?.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Value::Char(c)),
                _ => None,
            }
        }
        Primitive::Byte => json.as_i64().and_then(|v| i8::try_from(v).ok()).map(Value::Byte),
        Primitive::Short => json.as_i64().and_then(|v| i16::try_from(v).ok()).map(Value::Short),
        Primitive::Int => json.as_i64().and_then(|v| i32::try_from(v).ok()).map(Value::Int),
        Primitive::Long => json.as_i64().map(Value::Long),
        Primitive::Float => json.as_f64().map(|v| Value::Float(v as f32)),
        Primitive::Double => json.as_f64().map(Value::Double),
        Primitive::Bool => json.as_bool().map(Value::Bool),
        Primitive::Date => json
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s, JSON_DATE_FORMAT).ok())
            .map(Value::Date),
    }
}

fn named<'d>(doc: &'d SchemaDocument, name: &str) -> CliResult<&'d RecordSchema> {
    doc.named(name)
        .ok_or_else(|| CliError::schema_error(format!("Type '{}' has no record schema", name)))
}

fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn shape_error(path: &str, expected: &str, actual: &str) -> CliError {
    CliError::input_error(format!("field '{}': expected {}, got {}", path, expected, actual))
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaLoader;
    use serde_json::json;

    fn doc() -> SchemaDocument {
        SchemaLoader::parse_str(
            r#"{
                "name": "Order",
                "fields": [
                    {"name": "id", "type": "long"},
                    {"name": "code", "type": "char"},
                    {"name": "price", "type": "float"},
                    {"name": "placed", "type": "date"},
                    {"name": "note", "type": "string", "optional": true},
                    {"name": "ship", "type": "Address", "optional": true}
                ],
                "types": {
                    "Address": {"fields": [
                        {"name": "city", "type": "string"},
                        {"name": "zip", "type": "int"}
                    ]}
                }
            }"#,
            "order.json",
        )
        .unwrap()
    }

    fn order_value() -> Value {
        Value::Record(vec![
            Value::Long(7),
            Value::Char('x'),
            Value::Float(1.1),
            Value::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()),
            Value::absent(),
            Value::present(Value::Record(vec![Value::from("Oslo"), Value::Int(150)])),
        ])
    }

    #[test]
    fn test_record_to_json() {
        let doc = doc();
        let json = record_to_json(&doc, &doc.root, &order_value()).unwrap();
        assert_eq!(
            json,
            json!({
                "id": 7,
                "code": "x",
                "price": 1.1,
                "placed": "2024-02-29",
                "note": null,
                "ship": {"city": "Oslo", "zip": 150}
            })
        );
    }

    #[test]
    fn test_record_from_json() {
        let doc = doc();
        let json = json!({
            "id": 7,
            "code": "x",
            "price": 1.1,
            "placed": "2024-02-29",
            "ship": {"city": "Oslo", "zip": 150}
        });
        assert_eq!(record_from_json(&doc, &doc.root, &json).unwrap(), order_value());
    }

    #[test]
    fn test_missing_required_field() {
        let doc = doc();
        let json = json!({"code": "x", "price": 1.0, "placed": "2024-01-01"});
        let err = record_from_json(&doc, &doc.root, &json).unwrap_err();
        assert_eq!(err.message(), "field 'id': expected Long, got null");
    }

    #[test]
    fn test_nested_error_path() {
        let doc = doc();
        let json = json!({
            "id": 1, "code": "x", "price": 1.0, "placed": "2024-01-01",
            "ship": {"city": "Oslo", "zip": "150"}
        });
        let err = record_from_json(&doc, &doc.root, &json).unwrap_err();
        assert_eq!(err.message(), "field 'ship.zip': expected Int, got string");
    }

    #[test]
    fn test_out_of_range_integer_rejected() {
        assert!(leaf_from_json(Primitive::Byte, &json!(300)).is_none());
        assert_eq!(leaf_from_json(Primitive::Byte, &json!(-5)), Some(Value::Byte(-5)));
    }

    #[test]
    fn test_char_needs_one_character() {
        assert!(leaf_from_json(Primitive::Char, &json!("ab")).is_none());
        assert!(leaf_from_json(Primitive::Char, &json!("")).is_none());
    }

    #[test]
    fn test_non_object_root() {
        let doc = doc();
        let err = record_from_json(&doc, &doc.root, &json!([1, 2])).unwrap_err();
        assert_eq!(err.message(), "field 'Order': expected object, got array");
    }
}
