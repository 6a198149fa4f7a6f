//! Expression detection for interactive input.
//!
//! A fast pre-check that decides whether a line of input is worth
//! handing to the evaluator, so typos and stray text get a friendly
//! message instead of an engine diagnostic.

use lazy_static::lazy_static;
use regex::Regex;

/// Function names the evaluator understands (engine built-ins plus the
/// namespace extensions in `evaluation`).
const MATH_FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh", "tanh", "asinh", "acosh",
    "atanh", "sqrt", "abs", "ceil", "floor", "round", "log", "log10", "ln", "exp", "min", "max",
];

lazy_static! {
    /// Characters that can appear in an expression: digits, whitespace,
    /// operators, parentheses, letters (function and constant names),
    /// dots and commas.
    static ref MATH_SAFE: Regex = Regex::new(r"^[\d\s.,+\-*/%^()a-zA-Z_]+$").unwrap();

    /// Non-empty parenthesized group.
    static ref NON_EMPTY_PARENS: Regex = Regex::new(r"\([^)]+\)").unwrap();
}

/// Check whether input looks like a calculator expression: math-safe
/// characters plus at least one operator, function call, or non-empty
/// parenthesized group.
///
/// Plain numbers deliberately do not qualify; callers that want to
/// accept them combine this with [`is_plain_number`].
pub fn looks_like_expression(input: &str) -> bool {
    let trimmed = input.trim();

    if trimmed.len() < 2 || !MATH_SAFE.is_match(trimmed) {
        return false;
    }

    if is_plain_number(trimmed) {
        return false;
    }

    has_binary_operator(trimmed) || has_function(trimmed) || NON_EMPTY_PARENS.is_match(trimmed)
}

/// Check whether input is a bare number: optional leading minus, then
/// digits with optional dots and grouping commas.
pub fn is_plain_number(input: &str) -> bool {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact.strip_prefix('-').unwrap_or(&compact);

    !digits.is_empty()
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
}

fn has_binary_operator(input: &str) -> bool {
    if input.contains(['+', '*', '/', '^', '%']) {
        return true;
    }

    // A minus counts only when it follows an operand, otherwise it is a
    // sign prefix.
    let chars: Vec<char> = input.chars().collect();
    chars.iter().enumerate().any(|(i, &c)| {
        c == '-'
            && chars[..i]
                .iter()
                .rev()
                .find(|ch| !ch.is_whitespace())
                .is_some_and(|&prev| prev.is_ascii_digit() || prev == ')' || prev.is_ascii_alphabetic())
    })
}

fn has_function(input: &str) -> bool {
    let lower = input.to_lowercase();
    MATH_FUNCTIONS
        .iter()
        .any(|func| lower.contains(&format!("{}(", func)) || lower.contains(&format!("{} (", func)))
}
