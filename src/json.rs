//! Conversions between [`Value`] and [`serde_json::Value`].
//!
//! JSON numbers that are integers become the narrowest integer variant that holds them,
//! other numbers become [`Value::Double`]. Going the other way, bits become `0` or `1`,
//! non-finite floats become `null`, and strings and keys must be UTF-8.
//!
//! # Example
//!
//! ```
//! use emp::json::*;
//! use serde_json::json;
//!
//! let doc = json!({"name": "emp", "tags": [1, 2.5, null]});
//!
//! let enc = encode_json(&doc).unwrap();
//!
//! assert_eq!(decode_json(&enc).unwrap(), doc);
//! ```

use crate::{encoding::*, errors::EncodeError, vecmap::VecMap, Value};
use bytes::Bytes;
use failure::*;
use serde_json::{Map, Number, Value as Json};

/// Converts a JSON value to a [`Value`].
pub fn from_json(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Boolean(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => narrowest_int(i),
            None => Value::Double(n.as_f64().unwrap_or(std::f64::NAN)),
        },
        Json::String(s) => Value::from(s.as_str()),
        Json::Array(a) => Value::Array(a.iter().map(from_json).collect()),
        Json::Object(o) => Value::Dictionary(
            o.iter()
                .map(|(k, v)| (Bytes::copy_from_slice(k.as_bytes()), from_json(v)))
                .collect::<VecMap<_, _>>(),
        ),
    }
}

fn narrowest_int(i: i64) -> Value {
    use std::convert::TryFrom;

    if let Ok(i) = i8::try_from(i) {
        Value::Int8(i)
    } else if let Ok(i) = i16::try_from(i) {
        Value::Int16(i)
    } else if let Ok(i) = i32::try_from(i) {
        Value::Int32(i)
    } else {
        Value::Int64(i)
    }
}

fn text(bs: &Bytes) -> Result<String, Error> {
    match std::str::from_utf8(bs) {
        Ok(s) => Ok(s.to_owned()),
        Err(e) => bail!("Bytestring is not valid UTF-8, cannot convert to JSON: {}", e),
    }
}

fn float(f: f64) -> Json { Number::from_f64(f).map_or(Json::Null, Json::Number) }

/// Converts a [`Value`] to JSON.
/// This will return an [`Error`] if a string or key is not valid UTF-8.
pub fn to_json(v: &Value) -> Result<Json, Error> {
    Ok(match v {
        Value::Null => Json::Null,
        Value::Bit(b) => Json::from(*b as u8),
        Value::Boolean(b) => Json::Bool(*b),
        Value::Int8(i) => Json::from(*i),
        Value::Int16(i) => Json::from(*i),
        Value::Int32(i) => Json::from(*i),
        Value::Int64(i) => Json::from(*i),
        Value::Float(f) => float(f64::from(*f)),
        Value::Double(f) => float(*f),
        Value::String(bs) => Json::String(text(bs)?),
        Value::Array(a) => Json::Array(a.iter().map(to_json).collect::<Result<_, _>>()?),
        Value::Dictionary(m) => {
            let mut out = Map::new();
            for (k, v) in m.iter() {
                out.insert(text(k)?, to_json(v)?);
            }
            Json::Object(out)
        }
    })
}

/// Encodes a JSON value.
pub fn encode_json(json: &Json) -> Result<Vec<u8>, EncodeError> { encode_full(&from_json(json)) }

/// Decodes a buffer holding exactly one value into JSON.
pub fn decode_json(bs: &[u8]) -> Result<Json, Error> { to_json(&decode_full(bs)?) }

/// Decodes the value at the start of a buffer into JSON, giving `null` if decoding or the
/// conversion fails.
///
/// # Example
///
/// ```
/// use emp::json::decode_json_safe;
/// use serde_json::json;
///
/// assert_eq!(decode_json_safe(&[0x18, 0x05]), json!(true));
/// assert_eq!(decode_json_safe(&[0x06]), json!(null));
/// ```
pub fn decode_json_safe(bs: &[u8]) -> Json { to_json(&decode_safe(bs)).unwrap_or(Json::Null) }
