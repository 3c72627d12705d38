//! Property tests for arithmetic and the Operation wire format.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use proptest::prelude::*;

use opsgate_core::ops::{Op, OperandSource, Operation};
use opsgate_core::FormValues;

fn form(a: i64, b: i64) -> FormValues {
    [("operand1", a.to_string()), ("operand2", b.to_string())]
        .into_iter()
        .collect()
}

proptest! {
    #[test]
    fn add_is_sum(a in any::<i64>(), b in any::<i64>()) {
        let op = Operation::build(Op::Add, OperandSource::Form(&form(a, b))).unwrap().computed();
        prop_assert_eq!(op.result, a.wrapping_add(b));
    }

    #[test]
    fn subtract_is_difference(a in any::<i64>(), b in any::<i64>()) {
        let op = Operation::build(Op::Subtract, OperandSource::Form(&form(a, b))).unwrap().computed();
        prop_assert_eq!(op.result, a.wrapping_sub(b));
    }

    #[test]
    fn echo_is_zero(a in any::<i64>(), b in any::<i64>()) {
        let op = Operation::build(Op::Echo, OperandSource::Form(&form(a, b))).unwrap().computed();
        prop_assert_eq!(op.result, 0);
        prop_assert_eq!((op.operand1, op.operand2), (a, b));
    }

    #[test]
    fn json_body_matches_form(a in any::<i64>(), b in any::<i64>()) {
        let body = serde_json::json!({"operand1": a, "operand2": b}).to_string();
        let from_json = Operation::build(Op::Add, OperandSource::Json(body.as_bytes())).unwrap();
        let from_form = Operation::build(Op::Add, OperandSource::Form(&form(a, b))).unwrap();
        prop_assert_eq!(from_json, from_form);
    }

    #[test]
    fn round_trip_keeps_operands_and_name(
        a in any::<i64>(),
        b in any::<i64>(),
        op in prop_oneof![Just(Op::Add), Just(Op::Subtract), Just(Op::Echo)],
    ) {
        let original = Operation::build(op, OperandSource::Form(&form(a, b))).unwrap().computed();
        let bytes = original.to_json().unwrap();
        let back: Operation = serde_json::from_slice(&bytes).unwrap();
        prop_assert_eq!(back.operand1, a);
        prop_assert_eq!(back.operand2, b);
        prop_assert_eq!(back.operation, op);
    }
}

#[test]
fn round_trip_without_result_field() {
    let back: Operation =
        serde_json::from_str(r#"{"operand1":1,"operand2":2,"operation":"echo"}"#).unwrap();
    assert_eq!(back.operation, Op::Echo);
    assert_eq!(back.result, 0);
}
