use calc_rs::{calculate, calculate_with, Bindings, CalcError};
use proptest::prelude::*;

const PRECISION: f64 = 0.001;

fn assert_close(expression: &str, expected: f64) {
    let result = calculate(expression).unwrap();
    assert!(
        (result - expected).abs() < PRECISION,
        "'{}' evaluated to {}, expected {}",
        expression,
        result,
        expected
    );
}

#[test]
fn basic_operations() {
    assert_close("5 + 5", 10.0);
    assert_close("8 - 3", 5.0);
    assert_close("6 * 5", 30.0);
    assert_close("16 / 2", 8.0);
    assert_close("5 ^ 3", 125.0);
}

#[test]
fn unary_minus() {
    assert_close("-7", -7.0);
    assert_close("-(-7)", 7.0);
    assert_close("(-3) * 2", -6.0);
    assert_close("4 * (-2.5)", -10.0);
}

#[test]
fn prefix_minus_only_at_the_start_or_after_a_paren() {
    assert_close(" -5", -5.0);
    assert_close("( -5)", -5.0);
    assert_close("2 * (-3)", -6.0);
    assert!(matches!(calculate("2*-3"), Err(CalcError::stack_underflow(name)) if name == "*"));
}

#[test]
fn math_functions() {
    let cases = [
        ("sin(0)", 0.0),
        ("cos(0)", 1.0),
        ("tan(0)", 0.0),
        ("cot(1)", 1.0 / 1.0f64.tan()),
        ("log(100)", 2.0),
        ("ln(1)", 0.0),
        ("sqrt(16)", 4.0),
    ];
    for (expression, expected) in cases {
        assert_close(expression, expected);
    }
}

#[test]
fn complex_expressions() {
    assert_close("5 + 3 * (7 - 2)", 20.0);
    assert_close("(10 + 5) * 3 / 2", 22.5);
    assert_close("sqrt(25) * 3", 15.0);
    assert_close("2 + sqrt(9) * ln(1)", 2.0);
}

#[test]
fn powers_chain_left_to_right() {
    assert_close("2 ^ 3 ^ 2", 64.0);
}

#[test]
fn floating_point_edge_cases() {
    assert_eq!(calculate("1 / 0").unwrap(), f64::INFINITY);
    assert!(calculate("sqrt(-4)").unwrap().is_nan());
}

#[test]
fn variables_come_from_the_source() {
    let mut variables: Bindings = [('x', 3.0), ('y', -2.0)].into_iter().collect();
    let result = calculate_with("x * x + y", &mut variables).unwrap();
    assert_eq!(result, 7.0);

    let mut answers = vec!["4\n", "0.5"].into_iter();
    let mut source = |_: char| -> calc_rs::Result<String> { Ok(answers.next().unwrap_or("0").into()) };
    assert_eq!(calculate_with("a / b", &mut source).unwrap(), 8.0);
}

#[test]
fn malformed_input_is_rejected() {
    assert!(matches!(calculate("(5 + 3"), Err(CalcError::unmatched_parenthesis('('))));
    assert!(matches!(calculate("5 + 3)"), Err(CalcError::unmatched_parenthesis(')'))));
    assert!(matches!(calculate("5 $ 3"), Err(CalcError::invalid_character('$', 2))));
    assert!(matches!(calculate("tanh(1)"), Err(CalcError::unknown_identifier(name)) if name == "tanh"));
    assert!(matches!(calculate("x + 1"), Err(CalcError::undefined('x'))));
    assert!(matches!(calculate("5 *"), Err(CalcError::stack_underflow(name)) if name == "*"));
    assert!(matches!(calculate(""), Err(CalcError::empty_result(0))));
}

#[test]
fn bad_variable_input_is_rejected() {
    let mut source = |_: char| -> calc_rs::Result<String> { Ok("seven".into()) };
    assert!(matches!(
        calculate_with("2 * n", &mut source),
        Err(CalcError::invalid_variable_input('n', text)) if text == "seven"
    ));
}

fn operand() -> impl Strategy<Value = f64> {
    0.0..1000.0f64
}

proptest! {
    #[test]
    fn prop_binary_operators_match_f64(a in operand(), b in 1.0..1000.0f64) {
        prop_assert_eq!(calculate(&format!("{} + {}", a, b)).unwrap(), a + b);
        prop_assert_eq!(calculate(&format!("{} - {}", a, b)).unwrap(), a - b);
        prop_assert_eq!(calculate(&format!("{} * {}", a, b)).unwrap(), a * b);
        prop_assert_eq!(calculate(&format!("{} / {}", a, b)).unwrap(), a / b);
        prop_assert_eq!(calculate(&format!("{}^{}", a, b)).unwrap(), a.powf(b));
    }

    #[test]
    fn prop_negation_is_idempotent_in_pairs(a in operand()) {
        prop_assert_eq!(calculate(&format!("-(-{})", a)).unwrap(), a);
    }

    #[test]
    fn prop_evaluation_is_deterministic(
        a in operand(),
        b in operand(),
        op in prop::sample::select(vec!['+', '-', '*', '/', '^']),
        function in prop::sample::select(vec!["sin", "cos", "sqrt", "ln"]),
    ) {
        let expression = format!("{}({}) {} ({} + 1)", function, a, op, b);
        let first = calculate(&expression).unwrap();
        let second = calculate(&expression).unwrap();
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }
}
