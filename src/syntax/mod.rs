//! Reading expressions: tokenizer, parser, and the `compile` convenience
//! that composes them and labels failures in the source text.

pub mod parser;
pub mod tokenizer;

pub use parser::{is_atom, parse, parse_spanned};
pub use tokenizer::{tokenize, tokenize_spanned};

use std::collections::VecDeque;

use crate::ast::Expr;
use crate::errors::{to_error_source, MantraError, Span};

/// Tokenizes and parses one expression from `text`.
///
/// Syntax errors come back carrying the source text and a span: the
/// offending token's position, or the end of input for truncated forms.
///
/// # Examples
///
/// ```rust
/// use mantra::compile;
/// let expr = compile("(and true (not false))").unwrap();
/// assert_eq!(expr.to_string(), "(and true (not false))");
/// assert!(compile("(list ()").is_err());
/// ```
pub fn compile(text: &str) -> Result<Expr, MantraError> {
    let mut tokens: VecDeque<(String, Span)> = tokenize_spanned(text).into_iter().collect();
    match parse_spanned(&mut tokens) {
        Ok(expr) => Ok(expr),
        Err(mut err) => {
            if err.span().is_none() && !text.is_empty() {
                // Truncation errors have no token to point at.
                err = err.with_span(Span::new(text.len() - 1, text.len()));
            }
            Err(err.with_source(to_error_source("input", text)))
        }
    }
}
