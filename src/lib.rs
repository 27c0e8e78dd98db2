//! # EMP
//!
//! EMP is a compact, self-describing binary format for dynamically typed values. Every
//! item starts with a single tag byte, and small payloads are folded into that byte.
//!
//! # Usage
//!
//! Build a [`Value`], encode it, and decode it again.
//!
//! ```
//! use emp::prelude::*;
//!
//! let mut fields = VecMap::new();
//! fields.insert(Bytes::from_static(b"name"), Value::from("emp"));
//! fields.insert(Bytes::from_static(b"version"), Value::from(3i8));
//! fields.insert(Bytes::from_static(b"ratio"), Value::from(0.5f64));
//!
//! let value = Value::from(fields);
//!
//! // encode
//! let encoded = encode_full(&value).unwrap();
//!
//! // and then immediately decode
//! let decoded = decode_full(&encoded).unwrap();
//!
//! assert_eq!(value, decoded);
//! ```
//!
//! # An overview of EMP types
//!
//! ## Integers
//!
//! Signed integers come in four widths, [`Value::Int8`] to [`Value::Int64`]. The width is
//! part of the value and survives a round trip; unsigned Rust integers widen to the next
//! signed variant.
//!
//! ```
//! use emp::prelude::*;
//!
//! assert_eq!(Value::from(200u8), Value::Int16(200));
//! assert_eq!(i64::try_from(Value::Int64(-7)), Ok(-7));
//! ```
//!
//! ## Floats
//!
//! Single and double precision floats are kept bit for bit, NaN payloads and signed zeros
//! included, and compare by bit pattern.
//!
//! ```
//! use emp::prelude::*;
//!
//! assert_eq!(Value::from(std::f32::NAN), Value::from(std::f32::NAN));
//! assert_ne!(Value::from(0.0f64), Value::from(-0.0f64));
//! ```
//!
//! ## Strings
//!
//! Strings are byte sequences. They are usually text but need not be.
//!
//! ```
//! use emp::prelude::*;
//!
//! let a_str = Value::from("hello world");
//!
//! let literal = Value::from_static(b"this is a bytestring literal");
//!
//! assert_eq!(a_str.as_str().unwrap(), "hello world");
//! ```
//!
//! ## Arrays and dictionaries
//!
//! Arrays are sequences of values. Dictionaries are sequences of `(key, value)` pairs with
//! unique string keys, kept in insertion order, see [`VecMap`].
//!
//! ```
//! use emp::prelude::*;
//!
//! let some_numbers = Value::from(vec![1i32, 2, 3]);
//!
//! assert_eq!(some_numbers.as_array().unwrap().len(), 3);
//! ```
//!
//! # Wire format
//!
//! ## Tags
//!
//! The low four bits of the tag byte are the *type*, the high four bits are *aux*.
//!
//! | Type | Semantics          | Aux                                  |
//! | ---  | ---                | ---                                  |
//! | 0    | dictionary start   | `0`                                  |
//! | 1    | dictionary end     | `0`                                  |
//! | 2    | array start        | element count 1 to 14, or `0`        |
//! | 3    | array end          | `0`                                  |
//! | 4    | string             | length 1 to 15, or `0`               |
//! | 5    | null               | `0`                                  |
//! | 6    | reserved           |                                      |
//! | 7    | bit                | the value                            |
//! | 8    | boolean            | the value                            |
//! | 9    | int32              | sign and leading zero count          |
//! | 10   | float              | biased exponent 1 to 15, or `0`      |
//! | 11   | double             | `0`                                  |
//! | 12   | int64              | sign and leading zero count          |
//! | 13   | int16              | sign and leading zero count          |
//! | 14   | int8               | the value 1 to 15, or `0`            |
//!
//! ## Integers
//!
//! | x        | xxx                  | xxxx |
//! | ---      | ---                  | ---  |
//! | Sign bit | Leading zero bytes   | Type |
//!
//! The magnitude follows in big-endian order with its leading zero bytes dropped. Zero
//! drops every byte, except for int64 where the count cannot reach 8: there zero is
//! written as a count of 7 followed by a single zero byte.
//!
//! Int8 values from 1 to 15 live in the aux bits. Every other int8 is the byte `0x0e`
//! followed by the two's complement byte.
//!
//! ## Strings
//!
//! Strings of 1 to 15 bytes carry their length in the aux bits and are followed by the
//! payload. Any other string is written between two `0x04` bytes, where the payload bytes
//! `0x04` and `0x06` are preceded by the escape byte `0x06`.
//!
//! ## Arrays
//!
//! Arrays of 1 to 14 elements carry their count in the aux bits. Any other array is
//! closed by an array end byte.
//!
//! ## Dictionaries
//!
//! A dictionary start byte, each key written as a string followed by its value, and a
//! dictionary end byte.
//!
//! ## Floats
//!
//! Singles with a biased exponent from 1 to 15 put the exponent in the aux bits, followed
//! by three bytes holding the sign and the mantissa. Other singles, and all doubles, are
//! followed by their IEEE 754 bits in big-endian order.

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    unreachable_pub,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

pub mod encoding;
pub mod errors;
pub mod prelude;
pub mod util;
pub mod vecmap;

#[cfg(feature = "json")] pub mod json;

use bytes::Bytes;
use encoding::Tag;
use failure::*;
use std::convert::TryFrom;
use vecmap::*;

#[derive(Clone, Debug)]
/// [`Value`] and its variants.
///
/// # Example
///
/// ```
/// use emp::prelude::*;
///
/// let b = Value::Boolean(true);
///
/// let val = match b {
///     Value::Boolean(b) => b,
///     _ => panic!(),
/// };
///
/// assert!(val);
/// ```
pub enum Value {
    /// Null.
    Null,
    /// A single bit, distinct from [`Value::Boolean`] on the wire.
    Bit(bool),
    /// Boolean.
    ///
    /// # Example
    ///
    /// ```
    /// use emp::prelude::{Value::Boolean, *};
    ///
    /// let v_bool = Boolean(true);
    /// ```
    Boolean(bool),
    /// 8-bit integer.
    Int8(i8),
    /// 16-bit integer.
    Int16(i16),
    /// 32-bit integer.
    Int32(i32),
    /// 64-bit integer.
    ///
    /// # Example
    ///
    /// ```
    /// use emp::prelude::{Value::Int64, *};
    ///
    /// let v_num = Int64(1 << 40);
    /// ```
    Int64(i64),
    /// Single precision float.
    Float(f32),
    /// Double precision float.
    Double(f64),
    /// Bytestring.
    ///
    /// # Example
    ///
    /// ```
    /// use emp::prelude::{Value::String, *};
    ///
    /// let bytes = Bytes::from_static(b"hello world");
    ///
    /// let v_bytes = String(bytes);
    /// ```
    String(Bytes),
    /// Array.
    ///
    /// # Example
    ///
    /// ```
    /// use emp::prelude::{Value::Array, *};
    ///
    /// let v_array = Array(vec![1i32, 2, 3, 4].into_iter().map(Value::from).collect());
    /// ```
    Array(Vec<Value>),
    /// Dictionary.
    ///
    /// ```
    /// use emp::prelude::{Value::Dictionary, *};
    ///
    /// let vmap = VecMap::from(vec![(Bytes::from_static(b"hello world"), Value::from(1i32))]);
    ///
    /// let dict = Dictionary(vmap);
    /// ```
    Dictionary(VecMap<Bytes, Value>),
}

use Value::*;

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Null, Null) => true,
            (Bit(a), Bit(b)) => a == b,
            (Boolean(a), Boolean(b)) => a == b,
            (Int8(a), Int8(b)) => a == b,
            (Int16(a), Int16(b)) => a == b,
            (Int32(a), Int32(b)) => a == b,
            (Int64(a), Int64(b)) => a == b,
            // floats compare by bits, so NaN equals itself and the zeros differ
            (Float(a), Float(b)) => a.to_bits() == b.to_bits(),
            (Double(a), Double(b)) => a.to_bits() == b.to_bits(),
            (String(a), String(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            (Dictionary(a), Dictionary(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Value {
    /// The tag a value is written with.
    ///
    /// # Example
    ///
    /// ```
    /// use emp::{encoding::Tag, prelude::*};
    ///
    /// assert_eq!(Value::from(1i32).tag(), Tag::Int32);
    /// assert_eq!(Value::from(vec![Value::Null]).tag(), Tag::ArrayStart);
    /// ```
    pub fn tag(&self) -> Tag {
        match self {
            Null => Tag::Null,
            Bit(_) => Tag::Bit,
            Boolean(_) => Tag::Boolean,
            Int8(_) => Tag::Int8,
            Int16(_) => Tag::Int16,
            Int32(_) => Tag::Int32,
            Int64(_) => Tag::Int64,
            Float(_) => Tag::Float,
            Double(_) => Tag::Double,
            String(_) => Tag::String,
            Array(_) => Tag::ArrayStart,
            Dictionary(_) => Tag::DictionaryStart,
        }
    }

    /// Converts a bytestring literal to a [`Value`].
    ///
    /// # Arguments
    ///
    /// * `bytes: &'static [u8]` - the bytestring literal to be converted.
    ///
    /// # Example
    ///
    /// ```
    /// use emp::prelude::*;
    ///
    /// // bytestring literal
    /// let foo = b"this is an example";
    ///
    /// // convert to `Value`
    /// let v_foo = Value::from_static(foo);
    /// ```
    pub fn from_static(bytes: &'static [u8]) -> Value { String(Bytes::from_static(bytes)) }

    /// Indicates whether a value is [`Null`].
    ///
    /// # Example
    ///
    /// ```
    /// use emp::Value::Null;
    ///
    /// let foo = Null;
    ///
    /// assert!(foo.is_null());
    /// ```
    pub fn is_null(&self) -> bool {
        match self {
            Null => true,
            _ => false,
        }
    }

    /// Tries to convert a value to a [`bool`].
    /// This will return an [`Error`] if the value is neither a [`Value::Boolean`] nor a
    /// [`Value::Bit`].
    ///
    /// # Example
    ///
    /// ```
    /// use emp::prelude::*;
    ///
    /// let b = Value::from(true);
    ///
    /// // should be `true`
    /// assert!(b.as_bool().unwrap());
    /// ```
    pub fn as_bool(&self) -> Result<bool, Error> {
        match self {
            Boolean(b) | Bit(b) => Ok(*b),
            _ => bail!("Value is not `Boolean` or `Bit`"),
        }
    }

    /// Tries to convert a value to [`Bytes`].
    /// This will return an [`Error`] if the value is not a [`Value::String`].
    ///
    /// # Example
    ///
    /// ```
    /// use emp::Value;
    ///
    /// let foo = Value::from_static(b"This is an example");
    ///
    /// let foo_bytes = foo.as_bytes().unwrap();
    /// ```
    pub fn as_bytes(&self) -> Result<&Bytes, Error> {
        match self {
            String(s) => Ok(s),
            _ => bail!("Value is not a bytestring"),
        }
    }

    /// Tries to view a value as text.
    /// This will return an [`Error`] if the value is not a [`Value::String`] or is not
    /// valid UTF-8.
    pub fn as_str(&self) -> Result<&str, Error> { Ok(std::str::from_utf8(self.as_bytes()?)?) }

    /// Tries to view a value as a slice of values.
    /// This will return an [`Error`] if the value is not a [`Value::Array`].
    ///
    /// # Example
    ///
    /// ```
    /// use emp::prelude::*;
    ///
    /// let v = Value::from(vec![1i32, 2, 3]);
    ///
    /// assert_eq!(v.as_array().unwrap()[1], Value::Int32(2));
    /// ```
    pub fn as_array(&self) -> Result<&[Value], Error> {
        match self {
            Array(a) => Ok(a.as_slice()),
            _ => bail!("Value is not `Array`"),
        }
    }

    /// Consumes the value, converting it to a vector of values.
    /// This will return an [`Error`] if the value is not a [`Value::Array`].
    pub fn into_array(self) -> Result<Vec<Value>, Error> {
        match self {
            Array(a) => Ok(a),
            _ => bail!("Value is not `Array`"),
        }
    }

    /// Tries to view a value as a [`VecMap`].
    /// This will return an [`Error`] if the value is not a [`Value::Dictionary`].
    pub fn as_dictionary(&self) -> Result<&VecMap<Bytes, Value>, Error> {
        match self {
            Dictionary(m) => Ok(m),
            _ => bail!("Value is not `Dictionary`"),
        }
    }

    /// Consumes the value, converting it to a [`VecMap`].
    /// This will return an [`Error`] if the value is not a [`Value::Dictionary`].
    ///
    /// # Example
    ///
    /// ```
    /// use emp::prelude::*;
    ///
    /// let v = Value::from(VecMap::from(vec![(Bytes::from_static(b"k"), Value::Null)]));
    ///
    /// let vmap = v.into_dictionary().unwrap();
    ///
    /// assert!(vmap.contains_key(&b"k"[..]));
    /// ```
    pub fn into_dictionary(self) -> Result<VecMap<Bytes, Value>, Error> {
        match self {
            Dictionary(m) => Ok(m),
            _ => bail!("Value is not `Dictionary`"),
        }
    }
}

fn fmt_bytes(bytes: &Bytes, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match std::str::from_utf8(bytes) {
        Ok(s) => write!(f, "{:?}", s),
        Err(_) => {
            write!(f, "b\"")?;
            for c in bytes.iter() {
                write!(f, "\\x{:02x}", c)?;
            }
            write!(f, "\"")
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Null => write!(f, "null"),
            Bit(b) => write!(f, "{}", *b as u8),
            Boolean(b) => write!(f, "{}", b),
            Int8(i) => write!(f, "{}", i),
            Int16(i) => write!(f, "{}", i),
            Int32(i) => write!(f, "{}", i),
            Int64(i) => write!(f, "{}", i),
            Float(x) => write!(f, "{:?}", x),
            Double(x) => write!(f, "{:?}", x),
            String(bs) => fmt_bytes(bs, f),
            Array(a) => {
                write!(f, "[")?;
                for (i, v) in a.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Dictionary(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    fmt_bytes(k, f)?;
                    write!(f, ": {}", v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value { String(Bytes::copy_from_slice(s.as_bytes())) }
}

impl From<std::string::String> for Value {
    fn from(s: std::string::String) -> Value { String(Bytes::from(s)) }
}

impl From<&'static [u8]> for Value {
    fn from(bs: &'static [u8]) -> Value { Value::from_static(bs) }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Value { Array(v.into_iter().map(T::into).collect()) }
}

impl<T: Into<Value>> From<VecMap<Bytes, T>> for Value {
    fn from(v: VecMap<Bytes, T>) -> Value {
        Dictionary(v.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl TryFrom<Value> for std::string::String {
    type Error = Value;

    fn try_from(v: Value) -> Result<Self, Value> {
        match v {
            String(bs) => match std::str::from_utf8(&bs) {
                Ok(s) => Ok(s.to_owned()),
                Err(_) => Err(String(bs)),
            },
            other => Err(other),
        }
    }
}

// () -> Value
from_fn!(Value, (), |_| Null);

// bool -> Value, From
from_fn!(Value, bool, Boolean);
// Value -> bool, TryFrom
try_from_ctor!(Value, bool, Boolean);

// Integers
from_fn!(Value, i8, Int8);
try_from_ctor!(Value, i8, Int8);
from_fn!(Value, i16, Int16);
try_from_ctor!(Value, i16, Int16);
from_fn!(Value, i32, Int32);
try_from_ctor!(Value, i32, Int32);
from_fn!(Value, i64, Int64);
try_from_ctor!(Value, i64, Int64);

// unsigned integers widen to the next signed width
from_fn!(Value, u8, |u: u8| Int16(i16::from(u)));
from_fn!(Value, u16, |u: u16| Int32(i32::from(u)));
from_fn!(Value, u32, |u: u32| Int64(i64::from(u)));

// Floats
from_fn!(Value, f32, Float);
try_from_ctor!(Value, f32, Float);
from_fn!(Value, f64, Double);
try_from_ctor!(Value, f64, Double);

// Bytes -> Value, From
from_fn!(Value, Bytes, String);
// Value -> Bytes, TryFrom
try_from_ctor!(Value, Bytes, String);

try_from_ctor!(Value, Vec<Value>, Array);
try_from_ctor!(Value, VecMap<Bytes, Value>, Dictionary);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_tests() {
        assert!(Null.is_null());

        assert!(Value::from(true).as_bool().unwrap());
        assert!(Bit(true).as_bool().unwrap());
        assert!(Int8(1).as_bool().is_err());

        assert_eq!(
            Value::from(Bytes::from("word")).as_bytes().unwrap(),
            &Bytes::from("word")
        );
        assert!(Value::from_static(&[0xff]).as_str().is_err());
        assert!(Null.into_array().is_err());
        assert!(Array(vec![]).as_dictionary().is_err());
    }

    #[test]
    fn conversions() {
        assert_eq!(Value::from(()), Null);
        assert_eq!(Value::from(255u8), Int16(255));
        assert_eq!(Value::from(65535u16), Int32(65535));
        assert_eq!(Value::from(u32::max_value()), Int64(u32::max_value() as i64));

        assert_eq!(i32::try_from(Int32(9)), Ok(9));
        // only the exact width converts
        assert_eq!(i32::try_from(Int16(9)), Err(Int16(9)));

        assert_eq!(
            std::string::String::try_from(Value::from("text")),
            Ok("text".to_owned())
        );
        assert_eq!(
            std::string::String::try_from(Value::from_static(&[0xc3])),
            Err(Value::from_static(&[0xc3]))
        );
    }

    #[test]
    fn from_vec() {
        let v: Vec<i64> = vec![0, 1, 2, 3, 4];
        let val: Vec<Value> = Vec::try_from(Value::from(v)).unwrap();
        assert_eq!(val, (0..5).map(Int64).collect::<Vec<_>>());
    }

    #[test]
    fn float_equality() {
        let nan = f64::from_bits(0x7ff8_0000_0000_0001);
        assert_eq!(Double(nan), Double(nan));
        assert_ne!(Double(nan), Double(f64::from_bits(0x7ff8_0000_0000_0002)));
        assert_ne!(Float(0.0), Float(-0.0));
        assert_ne!(Float(1.0), Double(1.0));
    }

    #[test]
    fn display() {
        let vmap = VecMap::from(vec![
            (Bytes::from_static(b"a"), Value::from(vec![Int8(1), Bit(false)])),
            (Bytes::from_static(&[0xff]), Null),
        ]);
        assert_eq!(
            format!("{}", Value::from(vmap)),
            r#"{"a": [1, 0], b"\xff": null}"#
        );
        assert_eq!(format!("{}", Double(1.0)), "1.0");
    }
}
