//! Conversions between Rust types and codec values
//!
//! `CsvValue` is the per-type schema collaborator: it names a type's
//! `FieldType` and converts to and from `Value`. `CsvRecord` adds the
//! ordered field list plus the constructor and destructor of a record type.

use chrono::NaiveDate;

use crate::codec::{CodecError, CodecResult, Value};
use crate::schema::{FieldType, Primitive, RecordSchema};

/// A type that can occupy a record field.
pub trait CsvValue: Sized {
    /// Schema type of the field
    fn field_type() -> FieldType;

    /// Converts a parsed value
    fn from_value(value: Value) -> CodecResult<Self>;

    /// Converts into a value for serialization
    fn to_value(&self) -> Value;
}

/// A structured record type.
///
/// Usually implemented through [`csv_record!`](crate::csv_record).
pub trait CsvRecord: CsvValue {
    /// Ordered field list
    fn schema() -> RecordSchema;

    /// Builds a record from field values in declared order
    fn from_values(values: Vec<Value>) -> CodecResult<Self>;

    /// Field values in declared order
    fn to_values(&self) -> Vec<Value>;
}

macro_rules! impl_csv_primitive {
    ($($t:ty => $variant:ident, $primitive:ident);* $(;)?) => {
        $(
            impl CsvValue for $t {
                fn field_type() -> FieldType {
                    FieldType::Primitive(Primitive::$primitive)
                }

                fn from_value(value: Value) -> CodecResult<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(CodecError::value_mismatch(
                            Primitive::$primitive.type_name(),
                            other.kind(),
                        )),
                    }
                }

                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }
            }
        )*
    };
}

impl_csv_primitive! {
    String => Text, Text;
    char => Char, Char;
    i8 => Byte, Byte;
    i16 => Short, Short;
    i32 => Int, Int;
    i64 => Long, Long;
    f32 => Float, Float;
    f64 => Double, Double;
    bool => Bool, Bool;
    NaiveDate => Date, Date;
}

impl<T: CsvValue> CsvValue for Option<T> {
    fn field_type() -> FieldType {
        FieldType::optional(T::field_type())
    }

    fn from_value(value: Value) -> CodecResult<Self> {
        match value {
            Value::Optional(None) => Ok(None),
            Value::Optional(Some(inner)) => T::from_value(*inner).map(Some),
            other => Err(CodecError::value_mismatch(
                Self::field_type().type_name(),
                other.kind(),
            )),
        }
    }

    fn to_value(&self) -> Value {
        Value::Optional(self.as_ref().map(|v| Box::new(v.to_value())))
    }
}

/// Declares a record struct and implements [`CsvValue`] and [`CsvRecord`]
/// for it. Field types must themselves implement [`CsvValue`].
///
/// ```
/// use csvderive::csv_record;
///
/// csv_record! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Point {
///         pub x: i32,
///         pub y: i32,
///     }
/// }
/// ```
#[macro_export]
macro_rules! csv_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $ty, )*
        }

        impl $crate::record::CsvValue for $name {
            fn field_type() -> $crate::schema::FieldType {
                $crate::schema::FieldType::Record(
                    <Self as $crate::record::CsvRecord>::schema(),
                )
            }

            fn from_value(value: $crate::codec::Value) -> $crate::codec::CodecResult<Self> {
                match value {
                    $crate::codec::Value::Record(values) => {
                        <Self as $crate::record::CsvRecord>::from_values(values)
                    }
                    other => Err($crate::codec::CodecError::value_mismatch(
                        stringify!($name),
                        other.kind(),
                    )),
                }
            }

            fn to_value(&self) -> $crate::codec::Value {
                $crate::codec::Value::Record(<Self as $crate::record::CsvRecord>::to_values(self))
            }
        }

        impl $crate::record::CsvRecord for $name {
            fn schema() -> $crate::schema::RecordSchema {
                $crate::schema::RecordSchema::new(
                    stringify!($name),
                    vec![
                        $(
                            $crate::schema::FieldDef::new(
                                stringify!($field),
                                <$ty as $crate::record::CsvValue>::field_type(),
                            ),
                        )*
                    ],
                )
            }

            #[allow(unused_mut, unused_variables)]
            fn from_values(
                values: ::std::vec::Vec<$crate::codec::Value>,
            ) -> $crate::codec::CodecResult<Self> {
                let expected = <[&str]>::len(&[$(stringify!($field)),*]);
                if values.len() != expected {
                    return Err($crate::codec::CodecError::value_mismatch(
                        stringify!($name),
                        format!("Record of {} fields", values.len()),
                    ));
                }

                let mut values = values.into_iter();
                Ok(Self {
                    $(
                        $field: <$ty as $crate::record::CsvValue>::from_value(
                            values.next().unwrap_or($crate::codec::Value::Record(::std::vec::Vec::new())),
                        )?,
                    )*
                })
            }

            fn to_values(&self) -> ::std::vec::Vec<$crate::codec::Value> {
                vec![ $( $crate::record::CsvValue::to_value(&self.$field), )* ]
            }
        }
    };
}
