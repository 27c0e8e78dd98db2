/// Low nibble, 0x0f
pub(crate) const MASK_TAG: u8 = 0b0000_1111;
/// High nibble, 0xf0
pub(crate) const MASK_AUX: u8 = 0b1111_0000;
/// Bits of the aux field once shifted down.
pub(crate) const AUX_SHIFT: u8 = 4;

/// Dictionary start tag, 0x00
pub(crate) const DICTIONARY_START: u8 = 0b0000_0000;
/// Dictionary end tag, 0x01
pub(crate) const DICTIONARY_END: u8 = 0b0000_0001;
/// Array start tag, 0x02
pub(crate) const ARRAY_START: u8 = 0b0000_0010;
/// Array end tag, 0x03
pub(crate) const ARRAY_END: u8 = 0b0000_0011;
/// String tag, also the terminator of long strings, 0x04
pub(crate) const STRING: u8 = 0b0000_0100;
/// Null tag, 0x05
pub(crate) const NULL: u8 = 0b0000_0101;
/// Reserved tag value, reused as the escape byte inside long strings, 0x06
pub(crate) const STRING_ESCAPE: u8 = 0b0000_0110;
/// Bit tag, 0x07
pub(crate) const BIT: u8 = 0b0000_0111;
/// Boolean tag, 0x08
pub(crate) const BOOLEAN: u8 = 0b0000_1000;
/// 32-bit integer tag, 0x09
pub(crate) const INT_32: u8 = 0b0000_1001;
/// Single-precision tag, 0x0a
pub(crate) const FLOAT: u8 = 0b0000_1010;
/// Double-precision tag, 0x0b
pub(crate) const DOUBLE: u8 = 0b0000_1011;
/// 64-bit integer tag, 0x0c
pub(crate) const INT_64: u8 = 0b0000_1100;
/// 16-bit integer tag, 0x0d
pub(crate) const INT_16: u8 = 0b0000_1101;
/// 8-bit integer tag, 0x0e
pub(crate) const INT_8: u8 = 0b0000_1110;

/// Integer sign bit within the aux field.
pub(crate) const AUX_SIGN: u8 = 0b1000;
/// Leading-zero-byte count within the aux field.
pub(crate) const AUX_COUNT: u8 = 0b0111;
/// Count field value used by the `Int64` zero sentinel.
pub(crate) const INT_64_ZERO_COUNT: u8 = AUX_COUNT;

/// Largest value stored inline in an `Int8` tag byte.
pub(crate) const INT_8_INLINE_MAX: i8 = 0b1111;
/// Longest string whose length is stored inline.
pub(crate) const STRING_INLINE_MAX: usize = 0b1111;
/// Longest array whose element count is stored inline.
pub(crate) const ARRAY_INLINE_MAX: usize = 0b1110;

/// Exclusive upper bound of the biased exponents packed into a float tag byte.
pub(crate) const FLOAT_COMPACT_EXP_END: u32 = 0b1_0000;
pub(crate) const F32_EXP_SHIFT: u32 = 23;
pub(crate) const F32_EXP_MASK: u32 = 0xff;
pub(crate) const F32_MANTISSA_MASK: u32 = 0x007f_ffff;
pub(crate) const F32_SIGN_SHIFT: u32 = 31;

/// Splits a tag byte into its tag nibble and aux nibble.
#[inline]
pub(crate) fn split_tag(byte: u8) -> (u8, u8) { (byte & MASK_TAG, (byte & MASK_AUX) >> AUX_SHIFT) }

/// Joins a tag nibble and an aux nibble into a tag byte.
#[inline]
pub(crate) fn join_tag(tag: u8, aux: u8) -> u8 {
    debug_assert!(aux <= MASK_TAG);
    tag | (aux << AUX_SHIFT)
}
