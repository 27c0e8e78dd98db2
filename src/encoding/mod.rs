//! # EMP binary encoder and decoder
//!
//! Encode and decode functions for EMP.
//!
//! # Example
//!
//! ```
//! use emp::prelude::*;
//!
//! // some data
//! let some_data = Value::from(vec![Value::from(1i32), Value::from("two")]);
//!
//! // and we've encoded it
//! let enc_full = encode_full(&some_data).unwrap();
//!
//! // let's encode it a different way too
//!
//! // create a buffer
//! let out = &mut Vec::new();
//!
//! // and we've encoded it a different way
//! encode(&some_data, out).unwrap();
//!
//! // but they are equivalent
//! assert_eq!(*out, enc_full);
//!
//! // Note: decoding returns a `Result`, along with the number of bytes consumed
//! let (dec, used) = decode(&enc_full, 0).unwrap();
//!
//! // success!
//! assert_eq!(dec, some_data);
//! assert_eq!(used, enc_full.len());
//! ```

use crate::{
    errors::{DecodeError, EncodeError},
    util::*,
    vecmap::VecMap,
    Value::{self, *},
};
use bytes::{Bytes, BytesMut};

pub mod ser;
pub use ser::*;
pub mod de;
pub use de::*;
mod options;
pub use options::*;
mod tag;
pub use tag::*;
mod constants;
use constants::*;

/// Encode a [`Value`] into its binary representation, storing output in `out`.
///
/// # Arguments
///
/// * `t` - A reference to the value to be encoded.
/// * `out` - The [`Serializer`] where the encoder output will be stored.
///
/// # Errors
///
/// Fails only if arrays and dictionaries are nested deeper than
/// [`DEFAULT_MAX_DEPTH`].
///
/// # Example
///
/// ```
/// use emp::prelude::*;
///
/// // output buffer
/// let out = &mut Vec::new();
/// // value to encode
/// let ks = Value::Null;
///
/// // encode value
/// encode(&ks, out).unwrap();
///
/// assert_eq!(*out, vec![0x05]);
/// ```
pub fn encode<T: Ser + ?Sized, S: Serializer>(t: &T, out: &mut S) -> Result<(), EncodeError> {
    t.ser(out, 0, &Options::default())
}

/// Like [`encode`], with explicit [`Options`].
pub fn encode_with<T: Ser + ?Sized, S: Serializer>(
    t: &T,
    out: &mut S,
    opts: &Options,
) -> Result<(), EncodeError> {
    t.ser(out, 0, opts)
}

/// Encodes a [`Value`] into a vector of bytes.
///
/// # Example
///
/// ```
/// use emp::prelude::*;
///
/// // value to encode
/// let ks = Value::Int64(2);
///
/// // encoded value
/// let enc: Vec<u8> = encode_full(&ks).unwrap();
///
/// assert_eq!(enc, vec![0x7c, 0x02]);
/// ```
pub fn encode_full<T: Ser + ?Sized>(t: &T) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    encode(t, &mut out)?;
    Ok(out.finalize())
}

/// Decodes one value starting at `offset`, returning it together with the number of
/// bytes it occupied.
///
/// # Example
///
/// ```
/// use emp::prelude::*;
///
/// // two values back to back
/// let bs = [0x17, 0x5e];
///
/// assert_eq!(decode(&bs, 0).unwrap(), (Value::Bit(true), 1));
/// assert_eq!(decode(&bs, 1).unwrap(), (Value::Int8(5), 1));
/// ```
pub fn decode(bs: &[u8], offset: usize) -> Result<(Value, usize), DecodeError> {
    decode_with(bs, offset, &Options::default())
}

/// Like [`decode`], with explicit [`Options`].
pub fn decode_with(
    bs: &[u8],
    offset: usize,
    opts: &Options,
) -> Result<(Value, usize), DecodeError> {
    let r = &mut Reader::new(bs, offset, *opts);
    let v = Value::de(r)?;
    Ok((v, r.position() - offset))
}

/// Decodes a buffer that holds exactly one value, returning an error if decoding fails or
/// bytes are left over.
///
/// # Example
///
/// ```
/// use emp::prelude::*;
///
/// // encoded value
/// let bs = encode_full(&Value::Null).unwrap();
///
/// // decode value
/// let dec: Result<Value, DecodeError> = decode_full(&bs);
/// assert_eq!(dec, Ok(Value::Null));
///
/// // one byte too many
/// assert!(decode_full(&[0x05, 0x05]).is_err());
/// ```
pub fn decode_full(bs: &[u8]) -> Result<Value, DecodeError> {
    let (v, used) = decode(bs, 0)?;
    if used == bs.len() {
        Ok(v)
    } else {
        Err(DecodeError::TrailingBytes {
            count: bs.len() - used,
            offset: used,
        })
    }
}

/// Decodes the value at the start of a buffer, giving [`Value::Null`] if decoding fails.
/// Bytes after the first value are ignored.
///
/// # Example
///
/// ```
/// use emp::prelude::*;
///
/// assert_eq!(decode_safe(&[0x18]), Value::Boolean(true));
/// assert_eq!(decode_safe(&[0x18, 0x05]), Value::Boolean(true));
/// assert_eq!(decode_safe(&[0x06]), Value::Null);
/// ```
pub fn decode_safe(bs: &[u8]) -> Value { decode(bs, 0).map_or(Null, |(v, _)| v) }

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(ks: Value) -> Vec<u8> { encode_full(&ks).unwrap() }

    fn round_trip(ks: Value) {
        let out = enc(ks.clone());
        assert_eq!(decode(&out, 0), Ok((ks, out.len())));
    }

    #[test]
    fn constants() {
        assert_eq!(enc(Null), vec![0x05]);
        assert_eq!(enc(Boolean(false)), vec![0x08]);
        assert_eq!(enc(Boolean(true)), vec![0x18]);
        assert_eq!(enc(Bit(false)), vec![0x07]);
        assert_eq!(enc(Bit(true)), vec![0x17]);
    }

    #[test]
    fn int8_forms() {
        assert_eq!(enc(Int8(5)), vec![0x5e]);
        assert_eq!(enc(Int8(15)), vec![0xfe]);
        assert_eq!(enc(Int8(16)), vec![0x0e, 0x10]);
        assert_eq!(enc(Int8(-1)), vec![0x0e, 0xff]);
        assert_eq!(enc(Int8(i8::min_value())), vec![0x0e, 0x80]);
        // zero has no inline form, its nibble would read as the two-byte marker
        assert_eq!(enc(Int8(0)), vec![0x0e, 0x00]);

        for i in i8::min_value()..=i8::max_value() {
            round_trip(Int8(i));
        }
    }

    #[test]
    fn int16_layout() {
        // tag
        assert_eq!(enc(Int16(0)), vec![0b0_010_1101]);
        // one leading zero byte, then the digit
        assert_eq!(enc(Int16(5)), vec![0b0_001_1101, 0x05]);
        // sign bit set
        assert_eq!(enc(Int16(-5)), vec![0b1_001_1101, 0x05]);
        assert_eq!(enc(Int16(0x1234)), vec![0x0d, 0x12, 0x34]);
        assert_eq!(enc(Int16(i16::min_value())), vec![0x8d, 0x80, 0x00]);

        for i in i16::min_value()..=i16::max_value() {
            round_trip(Int16(i));
        }
    }

    #[test]
    fn int32_layout() {
        assert_eq!(enc(Int32(0)), vec![0x49]);
        assert_eq!(enc(Int32(1)), vec![0x39, 0x01]);
        assert_eq!(enc(Int32(-257)), vec![0xa9, 0x01, 0x01]);
        assert_eq!(enc(Int32(i32::max_value())), vec![0x09, 0x7f, 0xff, 0xff, 0xff]);
        assert_eq!(enc(Int32(i32::min_value())), vec![0x89, 0x80, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn int64_sentinel() {
        // zero: count 7 plus an explicit zero byte
        assert_eq!(enc(Int64(0)), vec![0x7c, 0x00]);
        // two: count 7 and one significant byte
        assert_eq!(enc(Int64(2)), vec![0x7c, 0x02]);
        assert_ne!(enc(Int64(0)), enc(Int64(2)));
        assert_eq!(enc(Int64(-2)), vec![0xfc, 0x02]);
        assert_eq!(enc(Int64(256)), vec![0x6c, 0x01, 0x00]);
        assert_eq!(
            enc(Int64(i64::min_value())),
            vec![0x8c, 0x80, 0, 0, 0, 0, 0, 0, 0]
        );

        for i in &[0, 1, -1, 2, 255, 256, -256, i64::max_value(), i64::min_value()] {
            round_trip(Int64(*i));
        }
    }

    #[test]
    fn single_floats() {
        // biased exponent 8, compact
        let f = f32::from_bits((8 << 23) | 0x0012_3456);
        assert_eq!(enc(Float(f)), vec![0x8a, 0x12, 0x34, 0x56]);

        let f = f32::from_bits((1 << 31) | (8 << 23) | 0x0012_3456);
        assert_eq!(enc(Float(f)), vec![0x8a, 0x92, 0x34, 0x56]);

        // biased exponent 130, raw
        let f = 8f32;
        assert_eq!((f.to_bits() >> 23) & 0xff, 130);
        assert_eq!(enc(Float(f)), vec![0x0a, 0x41, 0x00, 0x00, 0x00]);

        // zero and subnormals are raw
        assert_eq!(enc(Float(0.0)), vec![0x0a, 0, 0, 0, 0]);
        assert_eq!(enc(Float(-0.0)), vec![0x0a, 0x80, 0, 0, 0]);
        assert_eq!(enc(Float(f32::from_bits(1))), vec![0x0a, 0, 0, 0, 1]);
        // exponent 15 is the last compact one
        assert_eq!(enc(Float(f32::from_bits(15 << 23))).len(), 4);
        assert_eq!(enc(Float(f32::from_bits(16 << 23))).len(), 5);
    }

    #[test]
    fn floats_keep_their_bits() {
        let fs = [
            f32::from_bits((8 << 23) | 0x0012_3456),
            f32::from_bits((1 << 31) | (1 << 23) | 0x007f_ffff),
            8f32,
            -0.0,
            f32::INFINITY,
            f32::from_bits(0x7fc0_1234),
            f32::from_bits(0xffa0_0001),
        ];
        for f in fs.iter() {
            let out = enc(Float(*f));
            match decode(&out, 0) {
                Ok((Float(g), used)) => {
                    assert_eq!(g.to_bits(), f.to_bits());
                    assert_eq!(used, out.len());
                }
                other => panic!("decoded {:?} from {:x?}", other, out),
            }
        }
    }

    #[test]
    fn double_floats() {
        assert_eq!(
            enc(Double(1.0)),
            vec![0x0b, 0x3f, 0xf0, 0, 0, 0, 0, 0, 0]
        );
        round_trip(Double(std::f64::consts::PI));
        round_trip(Double(f64::from_bits(0x7ff8_dead_beef_0001)));
    }

    #[test]
    fn strings() {
        let s15 = String(Bytes::from(vec![b'w'; 15]));
        let out = enc(s15.clone());
        assert_eq!(out.len(), 16);
        assert_eq!(out[0], 0xf4);
        round_trip(s15);

        let s16 = String(Bytes::from(vec![b'w'; 16]));
        let out = enc(s16.clone());
        assert_eq!(out.len(), 18);
        assert_eq!(out[0], 0x04);
        assert_eq!(out[17], 0x04);
        round_trip(s16);

        let long = "this is a really long test that is long";
        let out = enc(Value::from(long));
        assert_eq!(out.len(), long.len() + 2);
        assert_eq!(out[0], 0x04);
        assert_eq!(&out[1..out.len() - 1], long.as_bytes());
        assert_eq!(out[out.len() - 1], 0x04);

        // the empty string has no inline form
        assert_eq!(enc(Value::from("")), vec![0x04, 0x04]);
        round_trip(Value::from(""));
    }

    #[test]
    fn strings_with_reserved_bytes() {
        // short strings carry their length and need no escaping
        assert_eq!(enc(Value::from_static(&[0x04, 0x06])), vec![0x24, 0x04, 0x06]);

        let payload: Vec<u8> = (0..40).map(|i| if i % 3 == 0 { 0x04 } else { 0x06 }).collect();
        let out = enc(String(Bytes::from(payload.clone())));
        assert_eq!(out.len(), 1 + 2 * 40 + 1);
        round_trip(String(Bytes::from(payload)));

        let all: Vec<u8> = (0..=255).collect();
        round_trip(String(Bytes::from(all)));
    }

    #[test]
    fn arrays() {
        let a14 = Array(vec![Null; 14]);
        let out = enc(a14.clone());
        assert_eq!(out[0], 0xe2);
        assert_eq!(out.len(), 15);
        round_trip(a14);

        let a15 = Array(vec![Null; 15]);
        let out = enc(a15.clone());
        assert_eq!(out[0], 0x02);
        assert_eq!(out.len(), 17);
        assert_eq!(out[16], 0x03);
        round_trip(a15);

        assert_eq!(enc(Array(vec![])), vec![0x02, 0x03]);
        round_trip(Array(vec![]));
    }

    #[test]
    fn nested_arrays() {
        let inner = Array(vec![Null, Null]);
        let middle = Array(vec![inner.clone(); 16]);
        let outer = Array(vec![middle.clone(), Array(vec![]), middle]);
        round_trip(outer.clone());

        // three levels, every one terminated
        let deep = Array(vec![Array(vec![Array(vec![Null; 20]); 20]); 20]);
        let out = enc(deep.clone());
        assert_eq!(out[out.len() - 3..], [0x03, 0x03, 0x03]);
        round_trip(deep);
    }

    #[test]
    fn dictionaries() {
        let vmap = VecMap::from_unique(vec![
            (Bytes::from_static(b"b"), Int32(1)),
            (Bytes::from_static(b"a"), Null),
        ]);
        let out = enc(Dictionary(vmap.clone()));
        assert_eq!(
            out,
            vec![0x00, 0x14, b'b', 0x39, 0x01, 0x14, b'a', 0x05, 0x01]
        );
        round_trip(Dictionary(vmap));

        assert_eq!(enc(Dictionary(VecMap::new())), vec![0x00, 0x01]);
        round_trip(Dictionary(VecMap::new()));
    }

    #[test]
    fn depth_limit() {
        let opts = Options::new().with_max_depth(3);

        let mut ks = Null;
        for _ in 0..3 {
            ks = Array(vec![ks]);
        }
        assert!(encode_with(&ks, &mut Vec::new(), &opts).is_ok());

        let ks = Dictionary(VecMap::from_unique(vec![(Bytes::from_static(b"k"), ks)]));
        assert_eq!(
            encode_with(&ks, &mut Vec::new(), &opts),
            Err(EncodeError::DepthLimitExceeded { limit: 3 })
        );
    }

    #[test]
    fn bytes_mut_sink() {
        let ks = Array(vec![Int16(-3), Value::from("hi")]);
        let mut out = BytesMut::new();
        encode(&ks, &mut out).unwrap();
        assert_eq!(out.finalize().as_ref(), enc(ks).as_slice());
    }

    #[test]
    fn safe_decoding() {
        assert_eq!(decode_safe(&[0x18, 0x05]), Boolean(true));
        assert_eq!(decode_safe(&[0x22, 0x05, 0x17, 0xff]), Array(vec![Null, Bit(true)]));
        assert_eq!(decode_safe(&[]), Null);
        assert_eq!(decode_safe(&[0x7c]), Null);
        assert_eq!(decode_safe(&[0x02, 0x05]), Null);
    }

    #[test]
    fn consumed_counts() {
        let mut out = enc(Int32(70000));
        let first = out.len();
        out.extend(enc(Value::from("second")));

        let (v, used) = decode(&out, 0).unwrap();
        assert_eq!((v, used), (Int32(70000), first));

        let (v, _) = decode(&out, used).unwrap();
        assert_eq!(v, Value::from("second"));

        // only the strict entry point cares about what follows
        assert_eq!(decode_safe(&out), Int32(70000));
        assert_eq!(
            decode_full(&out),
            Err(DecodeError::TrailingBytes {
                count: out.len() - first,
                offset: first
            })
        );
    }
}
