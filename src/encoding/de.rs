use super::*;
use num_traits::FromPrimitive;
use std::str;

/// A decoded tag byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KTag {
    /// The kind named by the low nibble.
    pub tag: Tag,
    /// The high nibble.
    pub aux: u8,
    /// The raw byte.
    pub byte: u8,
    /// Where the byte was read.
    pub offset: usize,
}

/// A cursor over an encoded buffer.
///
/// Offsets reported by the reader, and by every error it returns, are positions in the
/// whole buffer rather than relative to where reading started.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    opts: Options,
}

impl<'a> Reader<'a> {
    /// Creates a reader positioned at `offset`.
    pub fn new(buf: &'a [u8], offset: usize, opts: Options) -> Self {
        Reader {
            buf,
            pos: offset,
            opts,
        }
    }

    /// The current position.
    pub fn position(&self) -> usize { self.pos }

    /// Bytes left after the current position.
    pub fn remaining(&self) -> usize { self.buf.len().saturating_sub(self.pos) }

    #[inline]
    fn take_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = self.peek_byte()?;
        self.pos += 1;
        Ok(byte)
    }

    #[inline]
    fn peek_byte(&self) -> Result<u8, DecodeError> {
        match self.buf.get(self.pos) {
            Some(byte) => Ok(*byte),
            None => Err(DecodeError::truncated(self.pos, 1, 0)),
        }
    }

    #[inline]
    fn read_many(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() >= len {
            let bs = &self.buf[self.pos..self.pos + len];
            self.pos += len;
            Ok(bs)
        } else {
            Err(DecodeError::truncated(self.pos, len, self.remaining()))
        }
    }

    /// Reads a tag byte, rejecting the reserved tag values.
    #[inline]
    pub fn read_tag(&mut self) -> Result<KTag, DecodeError> {
        let offset = self.pos;
        let byte = self.take_byte()?;
        let (nibble, aux) = split_tag(byte);
        match Tag::from_nibble(nibble) {
            Some(tag) => Ok(KTag {
                tag,
                aux,
                byte,
                offset,
            }),
            None => Err(DecodeError::UnknownTag { byte, offset }),
        }
    }

    /// Reads one complete value, where `depth` is the number of composites already open
    /// around it.
    pub fn read_value(&mut self, depth: usize) -> Result<Value, DecodeError> {
        let kt = self.read_tag()?;
        match kt.tag {
            Tag::Null => self.no_aux(kt).map(|_| Null),
            Tag::Bit => self.read_flag(kt).map(Bit),
            Tag::Boolean => self.read_flag(kt).map(Boolean),
            Tag::Int8 => self.read_i8(kt).map(Int8),
            Tag::Int16 => self.read_int(kt, 2).map(Int16),
            Tag::Int32 => self.read_int(kt, 4).map(Int32),
            Tag::Int64 => self.read_int(kt, 8).map(Int64),
            Tag::Float => self.read_f32(kt).map(Float),
            Tag::Double => self.read_f64(kt).map(Double),
            Tag::String => self.read_str(kt).map(String),
            Tag::ArrayStart => self.read_arr(kt, depth).map(Array),
            Tag::DictionaryStart => self.read_dict(kt, depth).map(Dictionary),
            Tag::ArrayEnd | Tag::DictionaryEnd => Err(unexpected(kt)),
        }
    }

    fn no_aux(&self, kt: KTag) -> Result<(), DecodeError> {
        if kt.aux == 0 {
            Ok(())
        } else {
            Err(unexpected(kt))
        }
    }

    fn read_flag(&self, kt: KTag) -> Result<bool, DecodeError> {
        match kt.aux {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(unexpected(kt)),
        }
    }

    fn read_i8(&mut self, kt: KTag) -> Result<i8, DecodeError> {
        if kt.aux != 0 {
            return Ok(kt.aux as i8);
        }
        let i = self.take_byte()? as i8;
        // values that fit the tag byte are never written in the two-byte form
        if 0 < i && i <= INT_8_INLINE_MAX {
            Err(malformed(kt))
        } else {
            Ok(i)
        }
    }

    fn read_int<T: FromPrimitive>(&mut self, kt: KTag, width: usize) -> Result<T, DecodeError> {
        let neg = kt.aux & AUX_SIGN == AUX_SIGN;
        let zeros = (kt.aux & AUX_COUNT) as usize;
        if zeros > width {
            return Err(malformed(kt));
        }

        // a bare int64 tag with count 7 is a zero sentinel missing its trailing byte
        if width == 8 && zeros == INT_64_ZERO_COUNT as usize && self.remaining() == 0 {
            return Err(malformed(kt));
        }

        let digs = self.read_many(width - zeros)?;
        let magnitude = match digs.first() {
            Some(0) if width == 8 && zeros == INT_64_ZERO_COUNT as usize && !neg => 0,
            // leading zero bytes are always stripped
            Some(0) => return Err(malformed(kt)),
            _ => from_be_digits(digs),
        };

        if neg && magnitude == 0 {
            return Err(malformed(kt));
        }

        let i = if neg {
            -(magnitude as i128)
        } else {
            magnitude as i128
        };
        T::from_i128(i).ok_or_else(|| malformed(kt))
    }

    fn read_f32(&mut self, kt: KTag) -> Result<f32, DecodeError> {
        let bits = if kt.aux != 0 {
            let packed = from_be_digits(self.read_many(3)?) as u32;
            let sign = packed >> F32_EXP_SHIFT;
            (sign << F32_SIGN_SHIFT)
                | ((kt.aux as u32) << F32_EXP_SHIFT)
                | (packed & F32_MANTISSA_MASK)
        } else {
            let bits = from_be_digits(self.read_many(4)?) as u32;
            let exp = (bits >> F32_EXP_SHIFT) & F32_EXP_MASK;
            // exponents in the compact range are always packed
            if 0 < exp && exp < FLOAT_COMPACT_EXP_END {
                return Err(malformed(kt));
            }
            bits
        };
        Ok(f32::from_bits(bits))
    }

    fn read_f64(&mut self, kt: KTag) -> Result<f64, DecodeError> {
        self.no_aux(kt)?;
        let bits = from_be_digits(self.read_many(8)?);
        Ok(f64::from_bits(bits))
    }

    fn read_str(&mut self, kt: KTag) -> Result<Bytes, DecodeError> {
        let payload = if kt.aux != 0 {
            Bytes::copy_from_slice(self.read_many(kt.aux as usize)?)
        } else {
            self.read_terminated_str(kt)?
        };

        if self.opts.text == TextPolicy::Utf8 {
            if let Err(cause) = str::from_utf8(&payload) {
                return Err(DecodeError::InvalidText {
                    offset: kt.offset,
                    cause,
                });
            }
        }
        Ok(payload)
    }

    fn read_terminated_str(&mut self, kt: KTag) -> Result<Bytes, DecodeError> {
        let unterminated = || DecodeError::UnterminatedComposite {
            kind: Composite::String,
            offset: kt.offset,
        };

        let mut out = BytesMut::new();
        loop {
            let rest = &self.buf[self.pos.min(self.buf.len())..];
            let end = match rest.iter().position(|b| *b == STRING || *b == STRING_ESCAPE) {
                Some(end) => end,
                None => return Err(unterminated()),
            };
            out.extend_from_slice(&rest[..end]);
            self.pos += end;

            if self.take_byte()? == STRING {
                return Ok(out.freeze());
            }

            let at = self.pos;
            match self.take_byte() {
                Ok(b) if b == STRING || b == STRING_ESCAPE => out.extend_from_slice(&[b]),
                Ok(byte) => return Err(DecodeError::InvalidEscape { byte, offset: at }),
                Err(_) => return Err(unterminated()),
            }
        }
    }

    fn enter(&self, kt: KTag, depth: usize) -> Result<usize, DecodeError> {
        let depth = depth + 1;
        if depth > self.opts.max_depth {
            Err(DecodeError::DepthLimitExceeded {
                limit: self.opts.max_depth,
                offset: kt.offset,
            })
        } else {
            Ok(depth)
        }
    }

    fn read_arr(&mut self, kt: KTag, depth: usize) -> Result<Vec<Value>, DecodeError> {
        let depth = self.enter(kt, depth)?;

        if kt.aux != 0 {
            let len = kt.aux as usize;
            let mut out = Vec::with_capacity(len);
            for _ in 0..len {
                out.push(self.read_value(depth)?);
            }
            return Ok(out);
        }

        let mut out = Vec::new();
        loop {
            match self.peek_byte() {
                Ok(ARRAY_END) => {
                    self.pos += 1;
                    return Ok(out);
                }
                Ok(_) => out.push(self.read_value(depth)?),
                Err(_) => {
                    return Err(DecodeError::UnterminatedComposite {
                        kind: Composite::Array,
                        offset: kt.offset,
                    })
                }
            }
        }
    }

    fn read_dict(&mut self, kt: KTag, depth: usize) -> Result<VecMap<Bytes, Value>, DecodeError> {
        self.no_aux(kt)?;
        let depth = self.enter(kt, depth)?;

        let mut out = VecMap::new();
        loop {
            match self.peek_byte() {
                Ok(DICTIONARY_END) => {
                    self.pos += 1;
                    return Ok(out);
                }
                Ok(_) => {
                    let key_tag = self.read_tag()?;
                    if key_tag.tag != Tag::String {
                        return Err(DecodeError::InvalidKey {
                            offset: key_tag.offset,
                        });
                    }
                    let key = self.read_str(key_tag)?;
                    let val = self.read_value(depth)?;
                    if let Err((key, _)) = out.try_push(key, val) {
                        return Err(DecodeError::DuplicateKey {
                            key,
                            offset: key_tag.offset,
                        });
                    }
                }
                Err(_) => {
                    return Err(DecodeError::UnterminatedComposite {
                        kind: Composite::Dictionary,
                        offset: kt.offset,
                    })
                }
            }
        }
    }
}

#[cold]
fn unexpected(kt: KTag) -> DecodeError {
    DecodeError::UnexpectedTag {
        byte: kt.byte,
        offset: kt.offset,
    }
}

#[cold]
fn malformed(kt: KTag) -> DecodeError {
    DecodeError::MalformedNumeric {
        tag: kt.tag,
        offset: kt.offset,
    }
}

/// Values that can be deserialized.
pub trait De: Sized {
    /// Read a value of type `Self` from a [`Reader`].
    ///
    /// # Arguments
    ///
    /// * `r` - The [`Reader`] to be read from.
    fn de(r: &mut Reader) -> Result<Self, DecodeError>;
}

impl De for Value {
    fn de(r: &mut Reader) -> Result<Self, DecodeError> { r.read_value(0) }
}
