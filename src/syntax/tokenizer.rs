//! Text to tokens.
//!
//! `(` and `)` are individual tokens; every other maximal non-whitespace run
//! is one token; whitespace separates and is discarded. There is no escaping,
//! no comments, no string literals with embedded spaces. Tokenization is
//! total: any text tokenizes, and malformed structure is the parser's
//! problem.

use crate::errors::Span;

/// Splits source text into tokens.
///
/// # Examples
///
/// ```rust
/// use mantra::syntax::tokenize;
/// assert_eq!(
///     tokenize(" (  + apples oranges )  "),
///     vec!["(", "+", "apples", "oranges", ")"]
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    tokenize_spanned(text)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Splits source text into tokens with their byte spans, for diagnostics.
pub fn tokenize_spanned(text: &str) -> Vec<(String, Span)> {
    let mut tokens = Vec::new();
    let mut run_start: Option<usize> = None;
    for (pos, ch) in text.char_indices() {
        if ch.is_whitespace() || ch == '(' || ch == ')' {
            if let Some(start) = run_start.take() {
                tokens.push((text[start..pos].to_string(), Span::new(start, pos)));
            }
            if ch == '(' || ch == ')' {
                tokens.push((ch.to_string(), Span::new(pos, pos + ch.len_utf8())));
            }
        } else if run_start.is_none() {
            run_start = Some(pos);
        }
    }
    if let Some(start) = run_start {
        tokens.push((text[start..].to_string(), Span::new(start, text.len())));
    }
    tokens
}
