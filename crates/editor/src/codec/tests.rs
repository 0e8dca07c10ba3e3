//! Tests for the wire codec.

use serde_json::{json, Value};
use tempo_core::{Expression, LeafRule, Operator, OperatorNode, Recurrence, TempoError, TimeUnit};

use super::*;

const NESTED: &str = r#"["OR",["AND",[1,2,"hour","day"]],[5,6,"day","year"]]"#;

#[test]
fn classify_by_first_element() {
    let op = json!(["and", [1, 2, "hour", "day"]]);
    assert_eq!(classify(op.as_array().unwrap()), NodeClass::Operator(Operator::And));

    let leaf = json!([1, 2, "hour", "day"]);
    assert_eq!(classify(leaf.as_array().unwrap()), NodeClass::Leaf);

    let not_an_op = json!(["XOR", 1]);
    assert_eq!(classify(not_an_op.as_array().unwrap()), NodeClass::Leaf);

    assert_eq!(classify(&[]), NodeClass::Leaf);
}

#[test]
fn ambiguous_four_element_operator_is_an_operator() {
    let value = json!(["AND", 1, 2, 3]);
    assert_eq!(classify(value.as_array().unwrap()), NodeClass::Operator(Operator::And));

    // Its scalar operands are then rejected rather than reinterpreted as a leaf.
    let err = decode(&json!(["OR", ["AND", 1, 2, 3]])).unwrap_err();
    match err {
        TempoError::UnexpectedOperand { path, found } => {
            assert_eq!(path, "/0/0");
            assert_eq!(found, "1");
        }
        other => panic!("expected UnexpectedOperand, got {other:?}"),
    }
}

#[test]
fn nested_expression_reproduces_exact_input() {
    let node = parse(NESTED).unwrap();
    assert_eq!(node.operator, Operator::Or);
    assert!(matches!(node.operands[0], Expression::Operator(_)));
    assert!(matches!(node.operands[1], Expression::Leaf(_)));
    assert_eq!(to_json(&node), NESTED);
}

#[test]
fn operator_tokens_are_canonicalized() {
    let node = parse(r#"["or",["not",[1,2,"minute","hour"]]]"#).unwrap();
    assert_eq!(to_json(&node), r#"["OR",["NOT",[1,2,"minute","hour"]]]"#);
}

#[test]
fn round_trip_preserves_structure() {
    let expected = OperatorNode::new(
        Operator::Or,
        vec![
            LeafRule::new(10.0, 12.0, TimeUnit::Hour, TimeUnit::Day).into(),
            OperatorNode::new(
                Operator::And,
                vec![
                    LeafRule::new(1.5, 2.25, TimeUnit::Minute, Recurrence::None).into(),
                    OperatorNode::new(Operator::Not, vec![]).into(),
                ],
            )
            .into(),
        ],
    );
    let decoded = decode(&encode(&expected)).unwrap();
    assert_eq!(decoded, expected);
}

#[test]
fn decode_inverts_encode_across_shapes() {
    let mut deep = OperatorNode::new(
        Operator::Not,
        vec![LeafRule::new(0.5, 1.0, TimeUnit::Second, TimeUnit::Minute).into()],
    );
    for (i, operator) in [Operator::And, Operator::Or, Operator::Not, Operator::And, Operator::Or]
        .into_iter()
        .enumerate()
    {
        let leaf = LeafRule::new(i as f64, f64::NAN, TimeUnit::Day, TimeUnit::Month);
        deep = OperatorNode::new(operator, vec![deep.into(), leaf.into()]);
    }
    assert_eq!(deep.depth(), 6);

    let cases = vec![
        OperatorNode::new(
            Operator::Or,
            vec![LeafRule::new(f64::NAN, 2.0, TimeUnit::Hour, TimeUnit::Day).into()],
        ),
        OperatorNode::new(
            Operator::And,
            vec![LeafRule::new(f64::NAN, f64::NAN, TimeUnit::Week, Recurrence::None).into()],
        ),
        OperatorNode::new(Operator::And, vec![]),
        OperatorNode::new(
            Operator::Or,
            vec![
                OperatorNode::new(Operator::Not, vec![]).into(),
                OperatorNode::new(Operator::Or, vec![]).into(),
            ],
        ),
        deep,
    ];
    for expected in cases {
        let wire = encode(&expected);
        let decoded = decode(&wire).unwrap();
        assert_eq!(decoded, expected, "{wire} did not round-trip");
        assert_eq!(encode(&decoded), wire);
    }
}

#[test]
fn empty_default_set_expands_to_default_leaf() {
    let node = parse(DEFAULT_SET).unwrap();
    assert_eq!(node, OperatorNode::default());
    assert_eq!(to_json(&node), r#"["OR",[10,12,"hour","day"]]"#);

    let custom = Decoder::new(LeafRule::new(0.0, 1.0, TimeUnit::Day, TimeUnit::Week));
    let node = custom.parse(DEFAULT_SET).unwrap();
    assert_eq!(to_json(&node), r#"["OR",[0,1,"day","week"]]"#);
}

#[test]
fn rejects_unknown_top_level_operator() {
    let err = parse(r#"["XOR",[1,2,"hour","day"]]"#).unwrap_err();
    assert!(matches!(err, TempoError::Format(_)), "got {err:?}");
    assert!(err.to_string().contains("XOR"));
}

#[test]
fn rejects_leaf_at_top_level_and_non_arrays() {
    assert!(matches!(parse(r#"[1,2,"hour","day"]"#), Err(TempoError::Format(_))));
    assert!(matches!(parse(r#"{"op":"OR"}"#), Err(TempoError::Format(_))));
    assert!(matches!(parse("[]"), Err(TempoError::Format(_))));
}

#[test]
fn rejects_invalid_json() {
    assert!(matches!(parse("[\"OR\","), Err(TempoError::Json(_))));
}

#[test]
fn leaf_arity_is_checked() {
    let err = parse(r#"["AND",[1,2,"hour"]]"#).unwrap_err();
    assert!(matches!(err, TempoError::LeafArity { len: 3, .. }), "got {err:?}");

    // Only `[]` falls back to the default leaf; other short or long leaves are errors.
    for (raw, expected) in [
        (r#"["OR",[1]]"#, 1),
        (r#"["OR",[1,2]]"#, 2),
        (r#"["OR",[1,2,"hour","day",5]]"#, 5),
    ] {
        match parse(raw) {
            Err(TempoError::LeafArity { path, len }) => {
                assert_eq!(path, "/0");
                assert_eq!(len, expected);
            }
            other => panic!("expected LeafArity for {raw}, got {other:?}"),
        }
    }
}

#[test]
fn unknown_units_carry_suggestions() {
    let err = parse(r#"["AND",[1,2,"hours","day"]]"#).unwrap_err();
    match err {
        TempoError::UnknownUnit { value, suggestion } => {
            assert_eq!(value, "hours");
            assert_eq!(suggestion.as_deref(), Some("hour"));
        }
        other => panic!("expected UnknownUnit, got {other:?}"),
    }
}

#[test]
fn bounds_are_coerced_without_errors() {
    let node = parse(r#"["AND",["3","x",  "hour","none"],[null, 4.5, "day", null]]"#).unwrap();
    let first = node.operands[0].as_leaf().unwrap();
    assert_eq!(first.from, 3.0);
    assert!(first.to.is_nan());
    assert_eq!(first.recurrence, Recurrence::None);

    let second = node.operands[1].as_leaf().unwrap();
    assert!(second.from.is_nan());
    assert_eq!(second.to, 4.5);

    // NaN has no JSON form and is written as null.
    assert_eq!(
        to_json(&node),
        r#"["AND",[3,null,"hour","null"],[null,4.5,"day","null"]]"#
    );
}

#[test]
fn number_encoding() {
    assert_eq!(encode_number(10.0), json!(10));
    assert_eq!(encode_number(-3.0), json!(-3));
    assert_eq!(encode_number(2.5), json!(2.5));
    assert_eq!(encode_number(f64::NAN), Value::Null);
    assert_eq!(encode_number(f64::INFINITY), Value::Null);
    assert_eq!(parse_number(" 12 "), 12.0);
    assert!(parse_number("twelve").is_nan());
    assert!(parse_number("").is_nan());
    assert!(parse_number("   ").is_nan());
}

#[test]
fn decode_expression_accepts_leaf_roots() {
    let leaf = decode_expression(&json!([1, 2, "hour", "day"])).unwrap();
    assert_eq!(leaf, Expression::Leaf(LeafRule::new(1.0, 2.0, TimeUnit::Hour, TimeUnit::Day)));
    assert_eq!(encode_expression(&leaf), json!([1, 2, "hour", "day"]));
}
