use emp::{encoding::*, Value};
use proptest::prelude::*;

fn round_trip(v: Value) -> Vec<u8> {
    let enc = encode_full(&v).unwrap();

    let dec = decode_full(&enc).ok();

    if dec != Some(v.clone()) {
        panic!("Tried encoding\n {:?}\n as \n{:x?}\n got \n{:?}\n", v, enc, dec)
    }
    enc
}

// tag byte plus the significant bytes of the magnitude
fn expected_len(magnitude: u64) -> usize { 1 + (64 - magnitude.leading_zeros() as usize + 7) / 8 }

proptest! {
    #![proptest_config(ProptestConfig { cases: 1_000, ..ProptestConfig::default() })]

    #[test]
    fn encode_decode_i16(i in proptest::num::i16::ANY) {
        let enc = round_trip(Value::Int16(i));
        prop_assert_eq!(enc.len(), expected_len(i.unsigned_abs() as u64));
    }

    #[test]
    fn encode_decode_i32(i in proptest::num::i32::ANY) {
        let enc = round_trip(Value::Int32(i));
        prop_assert_eq!(enc.len(), expected_len(i.unsigned_abs() as u64));
        prop_assert_eq!(enc[0] >> 7 == 1, i < 0);
    }

    #[test]
    fn encode_decode_i64(i in proptest::num::i64::ANY) {
        let enc = round_trip(Value::Int64(i));
        // zero keeps its sentinel byte
        prop_assert_eq!(enc.len(), expected_len(i.unsigned_abs()).max(2));
    }

    #[test]
    fn encode_decode_f32(bits in proptest::num::u32::ANY) {
        let enc = round_trip(Value::Float(f32::from_bits(bits)));
        let exp = (bits >> 23) & 0xff;
        prop_assert_eq!(enc.len(), if 0 < exp && exp < 16 { 4 } else { 5 });
    }

    #[test]
    fn encode_decode_f64(bits in proptest::num::u64::ANY) {
        let enc = round_trip(Value::Double(f64::from_bits(bits)));
        prop_assert_eq!(enc.len(), 9);
    }
}
