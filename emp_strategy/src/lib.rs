use bytes::Bytes;
use emp::{vecmap::VecMap, Value};
use proptest::prelude::*;

/// arbitrary Bytes for use with proptest, biased towards the bytes that strings escape
pub fn arb_bs() -> impl Strategy<Value = Bytes> {
    prop_oneof![
        ".*".prop_map(Bytes::from),
        prop::collection::vec(any::<u8>(), 0..40).prop_map(Bytes::from),
        prop::collection::vec(prop::sample::select(vec![0x04u8, 0x06, b'a']), 0..40)
            .prop_map(Bytes::from),
    ]
}

/// arbitrary single precision float, NaN payloads included
pub fn arb_f32() -> impl Strategy<Value = f32> { any::<u32>().prop_map(f32::from_bits) }

/// arbitrary double precision float, NaN payloads included
pub fn arb_f64() -> impl Strategy<Value = f64> { any::<u64>().prop_map(f64::from_bits) }

/// arbitrary scalar [`Value`] for use with proptest
pub fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bit),
        any::<bool>().prop_map(Value::Boolean),
        // integers
        any::<i8>().prop_map(Value::Int8),
        (0i8..=16).prop_map(Value::Int8),
        any::<i16>().prop_map(Value::Int16),
        any::<i32>().prop_map(Value::Int32),
        any::<i64>().prop_map(Value::Int64),
        (-300i64..300).prop_map(Value::Int64),
        // floats
        arb_f32().prop_map(Value::Float),
        // compact exponents
        (1u32..16, any::<bool>(), 0u32..(1 << 23)).prop_map(|(exp, neg, mant)| {
            Value::Float(f32::from_bits(((neg as u32) << 31) | (exp << 23) | mant))
        }),
        arb_f64().prop_map(Value::Double),
        // bytestrings
        arb_bs().prop_map(Value::String),
    ]
}

/// arbitrary [`Value`] for use with proptest
pub fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(
        8,   // max depth
        64,  // max nodes
        20,  // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..20).prop_map(Value::Array),
                prop::collection::btree_map(arb_bs(), inner, 0..10)
                    .prop_map(|m| Value::Dictionary(m.into_iter().collect::<VecMap<_, _>>()))
            ]
        },
    )
}
