//! Calculator session state and input token handling.
//!
//! A session owns the current input buffer, the displayed result, the
//! presentation flags and the calculation history, and advances through
//! a flat set of input tokens: any token may follow any other. Tokens
//! are processed synchronously; `apply` taking `&mut self` rules out two
//! tokens ever racing against the same session.

mod history;

pub use history::{CalculationRecord, HistoryStore};

use crate::calculator::{Evaluator, format_display};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Display value at session start and after a clear.
pub const DEFAULT_DISPLAY: &str = "0";

/// Display marker for a failed evaluation.
pub const ERROR_DISPLAY: &str = "Error";

/// Source of record timestamps. Swappable so tests can drive time.
pub trait Clock {
    fn now(&self) -> SystemTime;
}

/// Wall clock used outside of tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A discrete input unit emitted by the input surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Reset the input buffer and the displayed result.
    Clear,
    /// Remove the last character of the input buffer.
    Backspace,
    /// Toggle a leading minus on the input buffer.
    ToggleSign,
    /// Evaluate the current input buffer.
    Evaluate,
    /// A function entry: appends the name plus an opening parenthesis.
    Function(String),
    /// A literal entry: digit, operator, constant or decimal point.
    Literal(String),
    /// Replace the input buffer with a previously evaluated expression.
    Recall(String),
    /// Flip between basic and engineering keypad mode.
    ToggleMode,
    /// Flip between light and dark theme.
    ToggleTheme,
}

/// The live calculator state for one run of the application.
pub struct CalculatorSession {
    input: String,
    display: String,
    engineering: bool,
    dark: bool,
    evaluator: Evaluator,
    history: HistoryStore,
    clock: Box<dyn Clock>,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            display: DEFAULT_DISPLAY.to_string(),
            engineering: false,
            dark: false,
            evaluator: Evaluator::new(),
            history: HistoryStore::new(),
            clock: Box::new(SystemClock),
        }
    }

    /// Retain at most `limit` history records.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = HistoryStore::with_limit(limit);
        self
    }

    /// Start in engineering mode.
    pub fn with_engineering(mut self, engineering: bool) -> Self {
        self.engineering = engineering;
        self
    }

    /// Start with the dark theme.
    pub fn with_dark(mut self, dark: bool) -> Self {
        self.dark = dark;
        self
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Process one input token. Never fails: evaluation errors surface
    /// only through the display string.
    pub fn apply(&mut self, token: Token) {
        match token {
            Token::Clear => {
                self.input.clear();
                self.display = DEFAULT_DISPLAY.to_string();
            }
            Token::Backspace => {
                let _ = self.input.pop();
            }
            Token::ToggleSign => {
                if let Some(rest) = self.input.strip_prefix('-') {
                    self.input = rest.to_string();
                } else {
                    self.input.insert(0, '-');
                }
            }
            Token::Evaluate => self.evaluate(),
            Token::Function(name) => {
                self.input.push_str(&name);
                self.input.push('(');
            }
            Token::Literal(text) => self.input.push_str(&text),
            Token::Recall(expression) => self.input = expression,
            Token::ToggleMode => self.engineering = !self.engineering,
            Token::ToggleTheme => self.dark = !self.dark,
        }
    }

    fn evaluate(&mut self) {
        if self.input.is_empty() {
            return;
        }

        match self.evaluator.evaluate(&self.input) {
            Ok(value) => {
                debug!(input = %self.input, value, "evaluated expression");
                self.display = format_display(value);
                let record = CalculationRecord {
                    input: std::mem::take(&mut self.input),
                    value,
                    recorded_at: self.next_timestamp(),
                };
                self.history.append(record);
            }
            Err(err) => {
                warn!(%err, "evaluation failed");
                self.display = ERROR_DISPLAY.to_string();
            }
        }
    }

    /// Current time, clamped so record timestamps never decrease even if
    /// the wall clock steps backwards.
    fn next_timestamp(&self) -> SystemTime {
        let now = self.clock.now();
        match self.history.last() {
            Some(last) => now.max(last.recorded_at),
            None => now,
        }
    }

    /// Drop all history records. The input buffer and display are
    /// unaffected.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn engineering_mode(&self) -> bool {
        self.engineering
    }

    pub fn dark_mode(&self) -> bool {
        self.dark
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }
}
