//! Tokens to expression tree.
//!
//! Recursive descent over a token queue, consuming destructively: the queue
//! shrinks as parsing proceeds, and after a successful top-level parse of
//! one expression the queue holds whatever followed it. The grammar is
//! `Expr := '(' Head Expr* ')' | Atom` with `Head := Atom`; a head that is
//! itself a parenthesized form is rejected, so heads are always plain
//! tokens. Head tokens are stored as spelled and never atom-decoded.

use std::collections::VecDeque;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Atom, Expr, Form};
use crate::errors::{MantraError, Span};

static ATOM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9.+*]+$").expect("atom grammar regex is valid"));

/// Returns true if the token satisfies the atom grammar `[A-Za-z0-9.+*]+`.
pub fn is_atom(token: &str) -> bool {
    ATOM_RE.is_match(token)
}

/// One unit of parser input. Plain strings parse without positions; the
/// spanned form lets `compile` label errors in the source text.
trait Token {
    fn text(&self) -> &str;
    fn span(&self) -> Option<Span>;
}

impl Token for String {
    fn text(&self) -> &str {
        self
    }

    fn span(&self) -> Option<Span> {
        None
    }
}

impl Token for (String, Span) {
    fn text(&self) -> &str {
        &self.0
    }

    fn span(&self) -> Option<Span> {
        Some(self.1)
    }
}

/// Parses one expression from the front of the token queue.
///
/// # Examples
///
/// ```rust
/// use std::collections::VecDeque;
/// use mantra::syntax::{parse, tokenize};
/// let mut tokens: VecDeque<String> = tokenize("(and a b)").into_iter().collect();
/// let expr = parse(&mut tokens).unwrap();
/// assert_eq!(expr.to_string(), "(and a b)");
/// assert!(tokens.is_empty());
/// ```
pub fn parse(tokens: &mut VecDeque<String>) -> Result<Expr, MantraError> {
    parse_tokens(tokens)
}

/// Parses one expression from span-carrying tokens, labeling errors with
/// the offending token's position.
pub fn parse_spanned(tokens: &mut VecDeque<(String, Span)>) -> Result<Expr, MantraError> {
    parse_tokens(tokens)
}

fn attach_span(err: MantraError, span: Option<Span>) -> MantraError {
    match span {
        Some(span) => err.with_span(span),
        None => err,
    }
}

fn parse_tokens<T: Token>(tokens: &mut VecDeque<T>) -> Result<Expr, MantraError> {
    let Some(first) = tokens.pop_front() else {
        return Err(MantraError::empty_tokens());
    };
    if first.text() != "(" {
        if !is_atom(first.text()) {
            return Err(attach_span(
                MantraError::invalid_atom(first.text()),
                first.span(),
            ));
        }
        return Ok(Expr::Atom(Atom::decode(first.text())));
    }

    let Some(head) = tokens.pop_front() else {
        return Err(MantraError::empty_tokens());
    };
    if !is_atom(head.text()) {
        return Err(attach_span(
            MantraError::invalid_atom(head.text()),
            head.span(),
        ));
    }

    let mut args = Vec::new();
    loop {
        match tokens.front() {
            None => return Err(MantraError::missing_closer()),
            Some(token) if token.text() == ")" => {
                tokens.pop_front();
                break;
            }
            Some(_) => args.push(parse_tokens(tokens)?),
        }
    }
    Ok(Expr::Form(Form::new(head.text(), args)))
}
