//! Expression evaluation and its surrounding plumbing.
//!
//! This module provides functionality to:
//! - Detect whether input looks like a calculator expression
//! - Evaluate expressions through the fasteval engine
//! - Format results for display and clipboard
//! - Copy results to the clipboard

mod clipboard;
mod detection;
mod evaluation;
mod format;

pub use clipboard::copy_to_clipboard;
pub use detection::{is_plain_number, looks_like_expression};
pub use evaluation::{EvalError, Evaluator};
pub use format::{format_clipboard, format_display};
