//! Expression evaluation using fasteval.
//!
//! This module is an error-translation boundary around fasteval: it does
//! not parse or compute anything itself. Numeric semantics (operator
//! precedence, trigonometry, logarithms) are whatever the engine produces.

use thiserror::Error;

/// A failed evaluation, carrying the offending input and the engine's
/// diagnostic.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("failed to evaluate \"{input}\": {message}")]
pub struct EvalError {
    /// The exact text that was submitted.
    pub input: String,
    /// Diagnostic from the expression engine.
    pub message: String,
}

/// Evaluates expression strings to `f64` values.
///
/// Non-finite results are successes: fasteval yields `inf` for `1/0`
/// rather than an error, and no extra validation is imposed here.
#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a mathematical expression.
    ///
    /// Leading and trailing whitespace is ignored. The returned error
    /// preserves the untrimmed input so callers can surface it verbatim.
    pub fn evaluate(&self, input: &str) -> Result<f64, EvalError> {
        let mut namespace =
            |name: &str, args: Vec<f64>| -> Option<f64> { extra_math(name, &args) };

        fasteval::ez_eval(input.trim(), &mut namespace).map_err(|err| EvalError {
            input: input.to_string(),
            message: format!("{:?}", err),
        })
    }
}

/// Functions and constants the engineering keypad needs but fasteval
/// does not build in. Unknown names fall through to an engine error.
fn extra_math(name: &str, args: &[f64]) -> Option<f64> {
    match (name, args) {
        ("sqrt", [x]) => Some(x.sqrt()),
        ("ln", [x]) => Some(x.ln()),
        ("exp", [x]) => Some(x.exp()),
        ("log10", [x]) => Some(x.log10()),
        ("pi" | "PI", []) => Some(std::f64::consts::PI),
        ("e", []) => Some(std::f64::consts::E),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_arithmetic() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate("2 + 3").unwrap(), 5.0);
        assert_eq!(eval.evaluate("(3 + 5) * 2 - 4 / 2").unwrap(), 14.0);
    }

    #[test]
    fn test_decimal_result() {
        let value = Evaluator::new().evaluate("10 / 3").unwrap();
        assert!((value - 3.333333).abs() < 1e-5);
    }

    #[test]
    fn test_whitespace_ignored() {
        assert_eq!(Evaluator::new().evaluate("  2*21  ").unwrap(), 42.0);
    }

    #[test]
    fn test_invalid_expression() {
        let err = Evaluator::new().evaluate("2 +").unwrap_err();
        assert_eq!(err.input, "2 +");
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_unknown_symbol() {
        assert!(Evaluator::new().evaluate("2 + bogus").is_err());
    }

    #[test]
    fn test_division_by_zero_is_infinite() {
        let value = Evaluator::new().evaluate("1 / 0").unwrap();
        assert!(value.is_infinite() && value.is_sign_positive());
    }

    #[test]
    fn test_builtin_functions() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate("sin(0)").unwrap(), 0.0);
        assert_eq!(eval.evaluate("abs(0 - 5)").unwrap(), 5.0);
        assert_eq!(eval.evaluate("2^10").unwrap(), 1024.0);
        assert_eq!(eval.evaluate("10 % 3").unwrap(), 1.0);
    }

    #[test]
    fn test_namespace_functions() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate("sqrt(16)").unwrap(), 4.0);
        assert!((eval.evaluate("log10(1000)").unwrap() - 3.0).abs() < 1e-12);
        assert!((eval.evaluate("ln(e)").unwrap() - 1.0).abs() < 1e-12);
        assert!((eval.evaluate("exp(1)").unwrap() - std::f64::consts::E).abs() < 1e-12);
    }

    #[test]
    fn test_constants() {
        let eval = Evaluator::new();
        assert!((eval.evaluate("PI").unwrap() - std::f64::consts::PI).abs() < 1e-12);
        assert!((eval.evaluate("cos(pi)").unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_error_display_names_input() {
        let err = Evaluator::new().evaluate("2 +* 2").unwrap_err();
        assert!(err.to_string().contains("2 +* 2"));
    }
}
