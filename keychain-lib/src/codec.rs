//! Payload codec.
//!
//! Values are stored as JSON. Decode failures are classified so callers can
//! tell a corrupted payload apart from one written for a different shape.
//!
//! Encoding refuses values that JSON would silently change: non-finite
//! floats (which `serde_json` writes as `null`) and a `Some` whose content
//! itself encodes as `null` (which reads back as `None`).

use std::fmt;

use serde::de::DeserializeOwned;
use serde::ser::{self, Serialize, Serializer};

/// Broad category of a codec failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecErrorKind {
    /// The payload is not well-formed (syntax error or truncated input).
    CorruptedData,
    /// A field required by the target type is missing.
    KeyNotFound,
    /// A value has a different type than the target expects.
    TypeMismatch,
    /// A `null` was found where a value is required.
    ValueNotFound,
    /// The value has the right type but is not acceptable.
    InvalidValue,
    /// The value cannot be encoded without changing it.
    Unrepresentable,
    /// Writing to or reading from the underlying buffer failed.
    Io,
}

impl CodecErrorKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::CorruptedData => "corrupted data",
            Self::KeyNotFound => "key not found",
            Self::TypeMismatch => "type mismatch",
            Self::ValueNotFound => "value not found",
            Self::InvalidValue => "invalid value",
            Self::Unrepresentable => "unrepresentable value",
            Self::Io => "i/o failure",
        }
    }
}

/// Encoding or decoding failure, with the underlying serde error preserved.
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {source}")]
pub struct CodecError {
    kind: CodecErrorKind,
    #[source]
    source: serde_json::Error,
}

impl CodecError {
    /// The category of this failure.
    pub fn kind(&self) -> CodecErrorKind {
        self.kind
    }

    /// The underlying serde error.
    pub fn inner(&self) -> &serde_json::Error {
        &self.source
    }
}

impl fmt::Display for CodecErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(source: serde_json::Error) -> Self {
        let kind = classify(&source);
        Self { kind, source }
    }
}

fn classify(err: &serde_json::Error) -> CodecErrorKind {
    use serde_json::error::Category;

    match err.classify() {
        Category::Io => CodecErrorKind::Io,
        Category::Syntax | Category::Eof => CodecErrorKind::CorruptedData,
        Category::Data => {
            // serde only exposes data errors through their message
            let message = err.to_string();
            if message.starts_with("missing field") {
                CodecErrorKind::KeyNotFound
            } else if message.starts_with("invalid type: null") {
                CodecErrorKind::ValueNotFound
            } else if message.starts_with("invalid type") {
                CodecErrorKind::TypeMismatch
            } else if message.starts_with(UNREPRESENTABLE) {
                CodecErrorKind::Unrepresentable
            } else {
                CodecErrorKind::InvalidValue
            }
        }
    }
}

const UNREPRESENTABLE: &str = "unrepresentable";

type Check = Result<(), serde_json::Error>;

/// Serializer that writes nothing and fails on values JSON cannot carry.
#[derive(Clone, Copy, Default)]
struct Representable {
    /// Set while serializing the content of a `Some`.
    inside_some: bool,
}

impl Representable {
    fn null(self) -> Check {
        if self.inside_some {
            Err(ser::Error::custom(format_args!(
                "{UNREPRESENTABLE} `null` inside `Some`"
            )))
        } else {
            Ok(())
        }
    }
}

macro_rules! accept {
    ($($method:ident: $ty:ty),* $(,)?) => {
        $(fn $method(self, _: $ty) -> Check {
            Ok(())
        })*
    };
}

impl Serializer for Representable {
    type Ok = ();
    type Error = serde_json::Error;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    accept! {
        serialize_bool: bool,
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_i64: i64,
        serialize_i128: i128,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_u128: u128,
        serialize_char: char,
        serialize_str: &str,
        serialize_bytes: &[u8],
    }

    fn serialize_f32(self, v: f32) -> Check {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Check {
        if v.is_finite() {
            Ok(())
        } else {
            Err(ser::Error::custom(format_args!(
                "{UNREPRESENTABLE} float `{v}`"
            )))
        }
    }

    fn serialize_none(self) -> Check {
        self.null()
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Check {
        value.serialize(Representable { inside_some: true })
    }

    fn serialize_unit(self) -> Check {
        self.null()
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Check {
        self.null()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Check {
        Ok(())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Check {
        // newtype structs are transparent in JSON
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Check {
        value.serialize(Self::default())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self, serde_json::Error> {
        Ok(Self::default())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self, serde_json::Error> {
        Ok(Self::default())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::default())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::default())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self, serde_json::Error> {
        Ok(Self::default())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::default())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::default())
    }
}

impl ser::SerializeSeq for Representable {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Check {
        value.serialize(*self)
    }

    fn end(self) -> Check {
        Ok(())
    }
}

impl ser::SerializeTuple for Representable {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Check {
        value.serialize(*self)
    }

    fn end(self) -> Check {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for Representable {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Check {
        value.serialize(*self)
    }

    fn end(self) -> Check {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for Representable {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Check {
        value.serialize(*self)
    }

    fn end(self) -> Check {
        Ok(())
    }
}

impl ser::SerializeMap for Representable {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Check {
        key.serialize(*self)
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Check {
        value.serialize(*self)
    }

    fn end(self) -> Check {
        Ok(())
    }
}

impl ser::SerializeStruct for Representable {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Check {
        value.serialize(*self)
    }

    fn end(self) -> Check {
        Ok(())
    }
}

impl ser::SerializeStructVariant for Representable {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Check {
        value.serialize(*self)
    }

    fn end(self) -> Check {
        Ok(())
    }
}

/// Encode a value into a byte buffer.
///
/// Fails with [`CodecErrorKind::Unrepresentable`] for values that would not
/// decode back to themselves: non-finite floats anywhere in the value, and
/// `Some(x)` where `x` encodes as `null` (`Some(None)`, `Some(())`).
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    value.serialize(Representable::default())?;
    serde_json::to_vec(value).map_err(CodecError::from)
}

/// Decode a byte buffer into a value of type `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    serde_json::from_slice(bytes).map_err(CodecError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Token {
        value: String,
        uses: u32,
    }

    #[test]
    fn test_encode_decode() {
        let token = Token {
            value: "abc".into(),
            uses: 3,
        };
        let bytes = encode(&token).unwrap();
        assert_eq!(decode::<Token>(&bytes).unwrap(), token);
    }

    #[test]
    fn test_corrupted_data() {
        let err = decode::<Token>(b"{\"value\": \"abc\"").unwrap_err();
        assert_eq!(err.kind(), CodecErrorKind::CorruptedData);

        let err = decode::<Token>(b"not json").unwrap_err();
        assert_eq!(err.kind(), CodecErrorKind::CorruptedData);
    }

    #[test]
    fn test_missing_field() {
        let err = decode::<Token>(br#"{"value": "abc"}"#).unwrap_err();
        assert_eq!(err.kind(), CodecErrorKind::KeyNotFound);
    }

    #[test]
    fn test_type_mismatch() {
        let err = decode::<Token>(br#"{"value": 7, "uses": 1}"#).unwrap_err();
        assert_eq!(err.kind(), CodecErrorKind::TypeMismatch);
    }

    #[test]
    fn test_value_not_found() {
        let err = decode::<Token>(br#"{"value": null, "uses": 1}"#).unwrap_err();
        assert_eq!(err.kind(), CodecErrorKind::ValueNotFound);
    }

    #[test]
    fn test_invalid_value() {
        let err = decode::<Token>(br#"{"value": "abc", "uses": -1}"#).unwrap_err();
        assert_eq!(err.kind(), CodecErrorKind::InvalidValue);
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Reading {
        label: String,
        samples: Vec<f64>,
        previous: Option<Option<u8>>,
    }

    #[test]
    fn test_non_finite_floats_are_unrepresentable() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = encode(&value).unwrap_err();
            assert_eq!(err.kind(), CodecErrorKind::Unrepresentable);
        }
        assert_eq!(
            encode(&f32::NAN).unwrap_err().kind(),
            CodecErrorKind::Unrepresentable
        );

        let nested = Reading {
            label: "thermometer".into(),
            samples: vec![1.5, f64::INFINITY],
            previous: None,
        };
        let err = encode(&nested).unwrap_err();
        assert_eq!(err.kind(), CodecErrorKind::Unrepresentable);
        assert!(err.to_string().contains("`inf`"));

        assert_eq!(decode::<f64>(&encode(&-0.25f64).unwrap()).unwrap(), -0.25);
    }

    #[test]
    fn test_null_inside_some_is_unrepresentable() {
        let err = encode(&Some(None::<u8>)).unwrap_err();
        assert_eq!(err.kind(), CodecErrorKind::Unrepresentable);
        assert_eq!(
            encode(&Some(())).unwrap_err().kind(),
            CodecErrorKind::Unrepresentable
        );
        assert_eq!(
            encode(&Some(serde_json::Value::Null)).unwrap_err().kind(),
            CodecErrorKind::Unrepresentable
        );

        let reading = Reading {
            label: "r".into(),
            samples: Vec::new(),
            previous: Some(None),
        };
        assert_eq!(
            encode(&reading).unwrap_err().kind(),
            CodecErrorKind::Unrepresentable
        );
    }

    #[test]
    fn test_options_that_survive_are_accepted() {
        let some_some = encode(&Some(Some(3u8))).unwrap();
        assert_eq!(decode::<Option<Option<u8>>>(&some_some).unwrap(), Some(Some(3)));

        let none = encode(&None::<Option<u8>>).unwrap();
        assert_eq!(decode::<Option<Option<u8>>>(&none).unwrap(), None);

        let list = encode(&Some(vec![None::<u8>, Some(1)])).unwrap();
        assert_eq!(
            decode::<Option<Vec<Option<u8>>>>(&list).unwrap(),
            Some(vec![None, Some(1)])
        );
    }

    #[test]
    fn test_non_string_map_keys_are_invalid() {
        let grid: HashMap<(u8, u8), u8> = HashMap::from([((0, 1), 2)]);
        let err = encode(&grid).unwrap_err();
        assert_eq!(err.kind(), CodecErrorKind::InvalidValue);
    }

    #[test]
    fn test_display_names_kind() {
        let err = decode::<Token>(br#"{"value": "abc"}"#).unwrap_err();
        assert!(err.to_string().starts_with("key not found: missing field `uses`"));
    }
}
