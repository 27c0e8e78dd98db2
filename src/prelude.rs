pub use crate::{
    encoding::{
        decode, decode_full, decode_safe, decode_with, encode, encode_full, encode_with,
        Options, Ser, Serializer, SerializerExt, TextPolicy,
    },
    errors::{DecodeError, EncodeError},
    vecmap::VecMap,
    Value,
};
pub use bytes::Bytes;
pub use std::convert::TryFrom;
