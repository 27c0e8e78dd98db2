use smallvec::SmallVec;

/// Splits an unsigned magnitude into its big-endian digits within a field of `width`
/// bytes, dropping the leading zero bytes.
///
/// Returns the number of bytes dropped together with the remaining digits. A zero
/// magnitude drops every byte.
///
/// # Arguments
///
/// * `num: u64` - The magnitude to be split.
/// * `width: usize` - The width of the integer type in bytes, at most 8.
///
/// # Example
///
/// ```
/// use emp::util::be_digits;
///
/// let (zeros, digs) = be_digits(0x0102, 4);
///
/// // two bytes were dropped
/// assert_eq!(zeros, 2);
/// // and the remaining digits are big-endian
/// assert_eq!(digs.as_slice(), &[1, 2]);
/// ```
pub fn be_digits(num: u64, width: usize) -> (u8, SmallVec<[u8; 8]>) {
    debug_assert!(width <= 8);
    debug_assert!(width == 8 || num >> (width * 8) == 0);
    let len = (8 - u64::leading_zeros(num) as usize / 8).min(width);
    let bytes = u64::to_be_bytes(num);
    ((width - len) as u8, SmallVec::from_slice(&bytes[8 - len..]))
}

/// Reads big-endian digits back into a magnitude.
pub fn from_be_digits(digs: &[u8]) -> u64 {
    debug_assert!(digs.len() <= 8);
    digs.iter().fold(0, |acc, d| (acc << 8) | *d as u64)
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}

#[macro_export]
/// Helper macro to implement `TryFrom` for the payload of a single variant, handing the
/// original value back on mismatch.
macro_rules! try_from_ctor {
    ($from:tt, $to:ty, $ctor:ident) => {
        impl TryFrom<$from> for $to {
            type Error = $from;

            fn try_from(f: $from) -> Result<$to, $from> {
                match f {
                    $from::$ctor(v) => Ok(v),
                    other => Err(other),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_drops_everything() {
        let (zeros, digs) = be_digits(0, 2);
        assert_eq!(zeros, 2);
        assert!(digs.is_empty());

        let (zeros, digs) = be_digits(0, 8);
        assert_eq!(zeros, 8);
        assert!(digs.is_empty());
    }

    #[test]
    fn full_width() {
        let (zeros, digs) = be_digits(u64::max_value(), 8);
        assert_eq!(zeros, 0);
        assert_eq!(digs.as_slice(), &[0xff; 8]);
        assert_eq!(from_be_digits(&digs), u64::max_value());

        let (zeros, digs) = be_digits(0x8000, 2);
        assert_eq!(zeros, 0);
        assert_eq!(digs.as_slice(), &[0x80, 0x00]);
    }
}
