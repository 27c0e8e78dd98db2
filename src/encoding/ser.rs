use super::*;
use bytes::BytesMut;

/// A sink for encoded bytes.
pub trait Serializer {
    /// The type of the output value.
    type Out;
    /// Add a byte to the output value.
    fn put_u8(&mut self, u: u8);
    /// Add a slice to the output value.
    fn put_slice(&mut self, slice: &[u8]);
    /// Return the output value.
    fn finalize(self) -> Self::Out;
}

impl Serializer for Vec<u8> {
    type Out = Self;

    fn put_u8(&mut self, u: u8) { self.push(u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Self::Out { self }
}

impl Serializer for BytesMut {
    type Out = Bytes;

    fn put_u8(&mut self, u: u8) { bytes::BufMut::put_u8(self, u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Self::Out { self.freeze() }
}

/// Convenience methods for [`Serializer`], one per scalar kind.
///
/// Composites are written through [`Ser`] so that nesting can be bounded; the methods
/// here only write the pieces of them that do not recurse.
pub trait SerializerExt: Serializer {
    /// Add [`Value::Null`] to the output value.
    fn put_null(&mut self);

    /// Add a [`Value::Bit`] to the output value.
    ///
    /// # Arguments
    ///
    /// * `b: bool` - The value to be added.
    fn put_bit(&mut self, b: bool);

    /// Add a [`Value::Boolean`] to the output value.
    ///
    /// # Arguments
    ///
    /// * `b: bool` - The value to be added.
    fn put_bool(&mut self, b: bool);

    /// Add an [`i8`] to the output value.
    ///
    /// # Arguments
    ///
    /// * `i: i8`  - The value to be added.
    fn put_i8(&mut self, i: i8);
    /// Add an [`i16`] to the output value.
    ///
    /// # Arguments
    ///
    /// * `i: i16`  - The value to be added.
    fn put_i16(&mut self, i: i16);
    /// Add an [`i32`] to the output value.
    ///
    /// # Arguments
    ///
    /// * `i: i32`  - The value to be added.
    fn put_i32(&mut self, i: i32);
    /// Add an [`i64`] to the output value.
    ///
    /// # Arguments
    ///
    /// * `i: i64`  - The value to be added.
    fn put_i64(&mut self, i: i64);

    /// Add an [`f32`] to the output value.
    ///
    /// # Arguments
    ///
    /// * `f: f32` - The value to be added.
    fn put_f32(&mut self, f: f32);
    /// Add an [`f64`] to the output value.
    ///
    /// # Arguments
    ///
    /// * `f: f64` - The value to be added.
    fn put_f64(&mut self, f: f64);

    /// Add a string to the output value.
    ///
    /// # Arguments
    ///
    /// * `b: &[u8]` - The payload to be added.
    fn put_str(&mut self, b: &[u8]);

    /// Add the tag byte that opens an array of `len` elements. Returns whether the array
    /// must be closed with [`SerializerExt::put_arr_end`].
    fn put_arr_start(&mut self, len: usize) -> bool;
    /// Add the terminator of an array opened without an inline count.
    fn put_arr_end(&mut self);

    /// Add the tag byte that opens a dictionary.
    fn put_dict_start(&mut self);
    /// Add the terminator of a dictionary.
    fn put_dict_end(&mut self);
}

#[inline]
fn compute_int_tag(tag: u8, neg: bool, zeros: u8) -> u8 {
    debug_assert!(zeros <= AUX_COUNT);
    join_tag(tag, ((neg as u8) << 3) | zeros)
}

#[inline]
fn put_signed<S: Serializer + ?Sized>(out: &mut S, tag: u8, i: i64, width: usize) {
    let neg = i.is_negative();
    let (zeros, digs) = be_digits(i.unsigned_abs(), width);
    if zeros as usize == 8 {
        // the count field cannot hold 8, so zero is written as count 7 plus a zero byte
        out.put_u8(compute_int_tag(tag, false, INT_64_ZERO_COUNT));
        out.put_u8(0);
    } else {
        out.put_u8(compute_int_tag(tag, neg, zeros));
        out.put_slice(&digs);
    }
}

impl<S: Serializer> SerializerExt for S {
    fn put_null(&mut self) { self.put_u8(NULL) }

    fn put_bit(&mut self, b: bool) { self.put_u8(join_tag(BIT, b as u8)) }

    fn put_bool(&mut self, b: bool) { self.put_u8(join_tag(BOOLEAN, b as u8)) }

    #[inline]
    fn put_i8(&mut self, i: i8) {
        if 0 < i && i <= INT_8_INLINE_MAX {
            self.put_u8(join_tag(INT_8, i as u8));
        } else {
            self.put_u8(INT_8);
            self.put_u8(i as u8);
        }
    }

    fn put_i16(&mut self, i: i16) { put_signed(self, INT_16, i as i64, 2) }

    fn put_i32(&mut self, i: i32) { put_signed(self, INT_32, i as i64, 4) }

    fn put_i64(&mut self, i: i64) { put_signed(self, INT_64, i, 8) }

    fn put_f32(&mut self, f: f32) {
        let bits = f.to_bits();
        let exp = (bits >> F32_EXP_SHIFT) & F32_EXP_MASK;
        if 0 < exp && exp < FLOAT_COMPACT_EXP_END {
            let packed = ((bits >> F32_SIGN_SHIFT) << F32_EXP_SHIFT) | (bits & F32_MANTISSA_MASK);
            self.put_u8(join_tag(FLOAT, exp as u8));
            self.put_slice(&u32::to_be_bytes(packed)[1..]);
        } else {
            self.put_u8(FLOAT);
            self.put_slice(&u32::to_be_bytes(bits));
        }
    }

    fn put_f64(&mut self, f: f64) {
        self.put_u8(DOUBLE);
        self.put_slice(&u64::to_be_bytes(f.to_bits()));
    }

    fn put_str(&mut self, b: &[u8]) {
        if 0 < b.len() && b.len() <= STRING_INLINE_MAX {
            self.put_u8(join_tag(STRING, b.len() as u8));
            self.put_slice(b);
        } else {
            self.put_u8(STRING);
            for chunk in b.split_inclusive(|c| *c == STRING || *c == STRING_ESCAPE) {
                match chunk.split_last() {
                    Some((last, rest)) if *last == STRING || *last == STRING_ESCAPE => {
                        self.put_slice(rest);
                        self.put_u8(STRING_ESCAPE);
                        self.put_u8(*last);
                    }
                    _ => self.put_slice(chunk),
                }
            }
            self.put_u8(STRING);
        }
    }

    fn put_arr_start(&mut self, len: usize) -> bool {
        if 0 < len && len <= ARRAY_INLINE_MAX {
            self.put_u8(join_tag(ARRAY_START, len as u8));
            false
        } else {
            self.put_u8(ARRAY_START);
            true
        }
    }

    fn put_arr_end(&mut self) { self.put_u8(ARRAY_END) }

    fn put_dict_start(&mut self) { self.put_u8(DICTIONARY_START) }

    fn put_dict_end(&mut self) { self.put_u8(DICTIONARY_END) }
}

/// A value that can be serialized.
pub trait Ser {
    /// Writes `self` to `s`, where `depth` is the number of composites already open
    /// around it.
    fn ser<S: Serializer>(
        &self,
        s: &mut S,
        depth: usize,
        opts: &Options,
    ) -> Result<(), EncodeError>;
}

#[inline]
fn enter(depth: usize, opts: &Options) -> Result<usize, EncodeError> {
    let depth = depth + 1;
    if depth > opts.max_depth {
        Err(EncodeError::DepthLimitExceeded {
            limit: opts.max_depth,
        })
    } else {
        Ok(depth)
    }
}

impl Ser for Value {
    fn ser<S: Serializer>(
        &self,
        s: &mut S,
        depth: usize,
        opts: &Options,
    ) -> Result<(), EncodeError> {
        match self {
            Null => s.put_null(),
            Bit(b) => s.put_bit(*b),
            Boolean(b) => s.put_bool(*b),
            Int8(i) => s.put_i8(*i),
            Int16(i) => s.put_i16(*i),
            Int32(i) => s.put_i32(*i),
            Int64(i) => s.put_i64(*i),
            Float(f) => s.put_f32(*f),
            Double(f) => s.put_f64(*f),
            String(bs) => s.put_str(bs),
            Array(a) => a.as_slice().ser(s, depth, opts)?,
            Dictionary(m) => m.ser(s, depth, opts)?,
        }
        Ok(())
    }
}

impl<T: Ser> Ser for [T] {
    fn ser<S: Serializer>(
        &self,
        s: &mut S,
        depth: usize,
        opts: &Options,
    ) -> Result<(), EncodeError> {
        let depth = enter(depth, opts)?;
        let terminated = s.put_arr_start(self.len());
        for t in self {
            t.ser(s, depth, opts)?;
        }
        if terminated {
            s.put_arr_end();
        }
        Ok(())
    }
}

impl<T: Ser> Ser for VecMap<Bytes, T> {
    fn ser<S: Serializer>(
        &self,
        s: &mut S,
        depth: usize,
        opts: &Options,
    ) -> Result<(), EncodeError> {
        let depth = enter(depth, opts)?;
        s.put_dict_start();
        for (k, v) in self.iter() {
            s.put_str(k);
            v.ser(s, depth, opts)?;
        }
        s.put_dict_end();
        Ok(())
    }
}
