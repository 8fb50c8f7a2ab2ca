use rstest::rstest;
use serde_json::{json, Value};

#[rstest]
#[case("/* header */ [a: 1.5]", json!({"a": 1.5}))]
#[case("[a: /* inline */ 1.5]", json!({"a": 1.5}))]
#[case("[a: 1.5 /* trailing */]", json!({"a": 1.5}))]
#[case("{ 1.5. /* between items */ 2.5 }", json!([1.5, 2.5]))]
#[case("var /* here too */ X 1.5 [x: $X$]", json!({"x": 1.5}))]
#[case("[a: 1.5] /* spans\nseveral\nlines */ [b: 2.5]", json!({"a": 1.5, "b": 2.5}))]
fn comments_are_ignored_wherever_whitespace_is_allowed(
    #[case] input: &str,
    #[case] expected: Value,
) {
    assert_eq!(qcl::parse_str(input).unwrap(), expected);
}

#[test]
fn comment_markers_are_not_nested() {
    // The first */ closes the comment; the rest must parse on its own.
    assert!(qcl::parse_str("/* outer /* inner */ [a: 1.5]").is_ok());
    assert!(qcl::parse_str("/* outer /* inner */ */ [a: 1.5]").is_err());
}

#[test]
fn comment_text_never_reaches_the_output() {
    let input = "/* [hidden: 0.0] */ [a: 1.5]";
    assert_eq!(qcl::parse_str(input).unwrap(), json!({"a": 1.5}));
}
