use emp::encoding::*;
use emp_strategy::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig { cases: 1_000, ..ProptestConfig::default() })]

    #[test]
    fn encode_decode(v in arb_value()) {
        let enc = encode_full(&v).unwrap();

        let dec = decode(&enc, 0).ok();

        if dec != Some((v.clone(), enc.len())) {
            panic!("Tried encoding\n {:?}\n as \n{:x?}\n got \n{:?}\n", v, enc, dec)
        }
    }

    #[test]
    fn decode_at_offset(prefix in prop::collection::vec(any::<u8>(), 0..16), v in arb_value()) {
        let mut buf = prefix.clone();
        buf.extend(encode_full(&v).unwrap());

        let (dec, used) = decode(&buf, prefix.len()).unwrap();
        prop_assert_eq!(dec, v);
        prop_assert_eq!(prefix.len() + used, buf.len());
    }

    #[test]
    fn encoders_agree(v in arb_value()) {
        let mut out = bytes::BytesMut::new();
        encode(&v, &mut out).unwrap();
        prop_assert_eq!(&out[..], &encode_full(&v).unwrap()[..]);
    }

    #[test]
    fn truncation_is_an_error(v in arb_value()) {
        let enc = encode_full(&v).unwrap();
        for end in 0..enc.len() {
            prop_assert!(decode(&enc[..end], 0).is_err());
        }
    }

    #[test]
    fn garbage_never_panics(bs in prop::collection::vec(any::<u8>(), 0..64)) {
        // whatever decodes must survive a round trip
        if let Ok((v, used)) = decode(&bs, 0) {
            prop_assert!(used <= bs.len());
            prop_assert_eq!(decode_full(&encode_full(&v).unwrap()), Ok(v));
        }
    }
}
