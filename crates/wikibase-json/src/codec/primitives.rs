//! Primitive JSON access for the wire codec.
//!
//! Wraps `serde_json` objects with typed field readers that turn shape
//! mismatches into [`DecodeError`]s, and a matching writer.

use serde_json::{Map, Number, Value as Json};

use crate::error::{DecodeError, EncodeError};

// =============================================================================
// DECODING
// =============================================================================

/// Typed reader over one JSON object.
///
/// `null` is treated like an absent field everywhere. Unknown fields are
/// never looked at.
#[derive(Debug, Clone, Copy)]
pub struct ObjectReader<'a> {
    map: &'a Map<String, Json>,
    context: &'static str,
}

impl<'a> ObjectReader<'a> {
    /// Wraps `value`, which must be a JSON object.
    pub fn new(value: &'a Json, context: &'static str) -> Result<Self, DecodeError> {
        match value {
            Json::Object(map) => Ok(Self { map, context }),
            _ => Err(DecodeError::NotAnObject { context }),
        }
    }

    pub fn context(&self) -> &'static str {
        self.context
    }

    /// Returns a field, treating `null` as absent.
    pub fn get(&self, field: &str) -> Option<&'a Json> {
        self.map.get(field).filter(|v| !v.is_null())
    }

    pub fn required(&self, field: &'static str) -> Result<&'a Json, DecodeError> {
        self.get(field).ok_or(DecodeError::MissingField { field, context: self.context })
    }

    fn invalid(&self, field: &'static str, expected: &'static str) -> DecodeError {
        DecodeError::InvalidType { field, context: self.context, expected }
    }

    pub fn required_str(&self, field: &'static str) -> Result<&'a str, DecodeError> {
        self.required(field)?.as_str().ok_or_else(|| self.invalid(field, "a string"))
    }

    pub fn optional_str(&self, field: &'static str) -> Result<Option<&'a str>, DecodeError> {
        match self.get(field) {
            Some(v) => v.as_str().map(Some).ok_or_else(|| self.invalid(field, "a string")),
            None => Ok(None),
        }
    }

    pub fn required_i64(&self, field: &'static str) -> Result<i64, DecodeError> {
        self.required(field)?.as_i64().ok_or_else(|| self.invalid(field, "an integer"))
    }

    /// Reads an integer field, `default` when absent.
    pub fn i64_or(&self, field: &'static str, default: i64) -> Result<i64, DecodeError> {
        match self.get(field) {
            Some(v) => v.as_i64().ok_or_else(|| self.invalid(field, "an integer")),
            None => Ok(default),
        }
    }

    /// Reads a non-negative integer field, `default` when absent.
    pub fn u64_or(&self, field: &'static str, default: u64) -> Result<u64, DecodeError> {
        match self.get(field) {
            Some(v) => v.as_u64().ok_or_else(|| self.invalid(field, "a non-negative integer")),
            None => Ok(default),
        }
    }

    pub fn required_f64(&self, field: &'static str) -> Result<f64, DecodeError> {
        self.required(field)?.as_f64().ok_or_else(|| self.invalid(field, "a number"))
    }

    /// Reads a number given either as JSON number or as a string, returning
    /// its text. Absent fields give `None`.
    pub fn optional_numeric_text(&self, field: &'static str) -> Result<Option<String>, DecodeError> {
        match self.get(field) {
            Some(Json::String(s)) => Ok(Some(s.clone())),
            Some(Json::Number(n)) => Ok(Some(n.to_string())),
            Some(_) => Err(self.invalid(field, "a number or numeric string")),
            None => Ok(None),
        }
    }

    /// Returns the members of an object field in document order.
    ///
    /// Absent fields and empty arrays (the wire form of an empty map) give no
    /// entries.
    pub fn entries(&self, field: &'static str) -> Result<Vec<(&'a str, &'a Json)>, DecodeError> {
        match self.get(field) {
            None => Ok(Vec::new()),
            Some(Json::Object(map)) => Ok(map.iter().map(|(k, v)| (k.as_str(), v)).collect()),
            Some(Json::Array(items)) if items.is_empty() => Ok(Vec::new()),
            Some(_) => Err(self.invalid(field, "an object")),
        }
    }

    /// Returns the items of an array field; absent fields give no items.
    pub fn array(&self, field: &'static str) -> Result<&'a [Json], DecodeError> {
        match self.get(field) {
            None => Ok(&[]),
            Some(Json::Array(items)) => Ok(items),
            Some(_) => Err(self.invalid(field, "an array")),
        }
    }

    /// Reads an array of strings; absent fields give no strings.
    pub fn string_array(&self, field: &'static str) -> Result<Vec<&'a str>, DecodeError> {
        self.array(field)?
            .iter()
            .map(|v| v.as_str().ok_or_else(|| self.invalid(field, "an array of strings")))
            .collect()
    }
}

/// Reads a JSON array value, naming `context` on failure.
pub fn as_array<'a>(value: &'a Json, field: &'static str, context: &'static str) -> Result<&'a [Json], DecodeError> {
    match value {
        Json::Array(items) => Ok(items),
        _ => Err(DecodeError::InvalidType { field, context, expected: "an array" }),
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Builder for one JSON object, keeping fields in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ObjectWriter {
    map: Map<String, Json>,
}

impl ObjectWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, field: &str, value: Json) -> &mut Self {
        self.map.insert(field.to_string(), value);
        self
    }

    pub fn put_str(&mut self, field: &str, value: &str) -> &mut Self {
        self.put(field, Json::String(value.to_string()))
    }

    pub fn put_i64(&mut self, field: &str, value: i64) -> &mut Self {
        self.put(field, Json::Number(value.into()))
    }

    pub fn put_u64(&mut self, field: &str, value: u64) -> &mut Self {
        self.put(field, Json::Number(value.into()))
    }

    /// Writes a float; JSON has no representation for NaN or infinities.
    pub fn put_f64(&mut self, field: &'static str, value: f64) -> Result<&mut Self, EncodeError> {
        let number = Number::from_f64(value).ok_or(EncodeError::NonFiniteNumber { field, value })?;
        Ok(self.put(field, Json::Number(number)))
    }

    pub fn finish(self) -> Json {
        Json::Object(self.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reader_requires_object() {
        let err = ObjectReader::new(&json!([1, 2]), "snak").unwrap_err();
        assert_eq!(err, DecodeError::NotAnObject { context: "snak" });
    }

    #[test]
    fn test_null_is_absent() {
        let value = json!({"a": null, "b": "x"});
        let reader = ObjectReader::new(&value, "test").unwrap();
        assert!(reader.get("a").is_none());
        assert_eq!(
            reader.required_str("a"),
            Err(DecodeError::MissingField { field: "a", context: "test" })
        );
        assert_eq!(reader.required_str("b"), Ok("x"));
        assert_eq!(reader.i64_or("a", 7), Ok(7));
    }

    #[test]
    fn test_type_mismatch() {
        let value = json!({"n": "12", "s": 3});
        let reader = ObjectReader::new(&value, "test").unwrap();
        assert!(matches!(reader.required_i64("n"), Err(DecodeError::InvalidType { field: "n", .. })));
        assert!(matches!(reader.optional_str("s"), Err(DecodeError::InvalidType { field: "s", .. })));
    }

    #[test]
    fn test_numeric_text_accepts_both_forms() {
        let value = json!({"a": "+1.50", "b": 12, "c": true});
        let reader = ObjectReader::new(&value, "quantity").unwrap();
        assert_eq!(reader.optional_numeric_text("a").unwrap().as_deref(), Some("+1.50"));
        assert_eq!(reader.optional_numeric_text("b").unwrap().as_deref(), Some("12"));
        assert!(reader.optional_numeric_text("c").is_err());
        assert_eq!(reader.optional_numeric_text("d").unwrap(), None);
    }

    #[test]
    fn test_entries_keep_order_and_accept_empty_array() {
        let value = json!({"m": {"z": 1, "a": 2}, "e": [], "bad": [1]});
        let reader = ObjectReader::new(&value, "doc").unwrap();
        let keys: Vec<&str> = reader.entries("m").unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert!(reader.entries("e").unwrap().is_empty());
        assert!(reader.entries("missing").unwrap().is_empty());
        assert!(reader.entries("bad").is_err());
    }

    #[test]
    fn test_writer_rejects_non_finite() {
        let mut writer = ObjectWriter::new();
        assert!(writer.put_f64("latitude", 1.5).is_ok());
        assert_eq!(
            writer.put_f64("longitude", f64::NAN).unwrap_err().to_string(),
            "longitude is not representable in JSON: NaN"
        );
        writer.put_str("globe", "g").put_i64("n", -1);
        assert_eq!(writer.finish(), json!({"latitude": 1.5, "globe": "g", "n": -1}));
    }
}
