//! Expression tree for the mantra language.
//!
//! An expression is either an [`Atom`] (a leaf value) or a [`Form`] (a head
//! plus ordered children). The tree is a closed union decided at parse time;
//! nothing downstream ever infers node shape from a container.
//!
//! `Display` produces the wire form read back by the parser: parenthesized
//! prefix notation with single-space separators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A leaf value: boolean, integer, float, or bare symbol.
///
/// # Examples
///
/// ```rust
/// use mantra::ast::Atom;
/// assert_eq!(Atom::decode("true"), Atom::Bool(true));
/// assert_eq!(Atom::decode("15"), Atom::Int(15));
/// assert_eq!(Atom::decode("15.5"), Atom::Float(15.5));
/// assert_eq!(Atom::decode("oranges"), Atom::Symbol("oranges".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Atom {
    Bool(bool),
    Int(i64),
    Float(f64),
    Symbol(String),
}

impl Atom {
    /// Decodes a raw token into its atom value.
    ///
    /// The attempt order is fixed: reserved `true`/`false`, then integer,
    /// then float, then symbol. A token that parses as both integer and
    /// float always becomes an integer.
    pub fn decode(token: &str) -> Atom {
        if token == "true" {
            return Atom::Bool(true);
        }
        if token == "false" {
            return Atom::Bool(false);
        }
        if let Ok(i) = token.parse::<i64>() {
            return Atom::Int(i);
        }
        if let Ok(x) = token.parse::<f64>() {
            return Atom::Float(x);
        }
        Atom::Symbol(token.to_string())
    }

    /// Returns the type name of the atom as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Atom::Bool(_) => "Bool",
            Atom::Int(_) => "Int",
            Atom::Float(_) => "Float",
            Atom::Symbol(_) => "Symbol",
        }
    }

    /// Returns the contained bool if this is a Bool atom.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Atom::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Bool(b) => write!(f, "{}", b),
            Atom::Int(i) => write!(f, "{}", i),
            Atom::Float(x) => {
                // Keep integral floats distinguishable from integers.
                if x.fract() == 0.0 && x.is_finite() {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
            Atom::Symbol(s) => write!(f, "{}", s),
        }
    }
}

/// An interior node: a head token plus ordered child expressions.
///
/// The head is stored exactly as spelled in the source and is never
/// atom-decoded, so `(false again)` keeps the head text `false`. Zero
/// children are allowed: `(list)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub head: String,
    pub args: Vec<Expr>,
}

impl Form {
    pub fn new(head: impl Into<String>, args: Vec<Expr>) -> Form {
        Form {
            head: head.into(),
            args,
        }
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.head)?;
        if !self.args.is_empty() {
            write!(f, " ")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", arg)?;
            }
        }
        write!(f, ")")
    }
}

/// An expression: atom or form.
///
/// # Examples
///
/// ```rust
/// use mantra::ast::{Expr, Form};
/// let e = Expr::Form(Form::new("and", vec![Expr::from(true), Expr::from("x")]));
/// assert_eq!(e.to_string(), "(and true x)");
/// assert!(e.as_form().is_some());
/// assert!(Expr::from(1).as_atom().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Atom(Atom),
    Form(Form),
}

impl Expr {
    /// Builds a form expression from a head and children.
    pub fn form(head: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Form(Form::new(head, args))
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Expr::Atom(_))
    }

    pub fn is_form(&self) -> bool {
        matches!(self, Expr::Form(_))
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Expr::Atom(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_form(&self) -> Option<&Form> {
        match self {
            Expr::Form(form) => Some(form),
            _ => None,
        }
    }

    /// Returns the type name of the expression as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Expr::Atom(a) => a.type_name(),
            Expr::Form(_) => "Form",
        }
    }

    /// Renders the expression in wire form. Equivalent to `to_string`.
    pub fn dumps(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Atom(a) => write!(f, "{}", a),
            Expr::Form(form) => write!(f, "{}", form),
        }
    }
}

impl From<bool> for Atom {
    fn from(b: bool) -> Atom {
        Atom::Bool(b)
    }
}

impl From<i64> for Atom {
    fn from(i: i64) -> Atom {
        Atom::Int(i)
    }
}

impl From<f64> for Atom {
    fn from(x: f64) -> Atom {
        Atom::Float(x)
    }
}

/// Keeps the string as a symbol verbatim; use [`Atom::decode`] for the
/// parser's reserved-word and numeric handling.
impl From<&str> for Atom {
    fn from(s: &str) -> Atom {
        Atom::Symbol(s.to_string())
    }
}

impl From<Atom> for Expr {
    fn from(a: Atom) -> Expr {
        Expr::Atom(a)
    }
}

impl From<Form> for Expr {
    fn from(form: Form) -> Expr {
        Expr::Form(form)
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Expr {
        Expr::Atom(Atom::Bool(b))
    }
}

impl From<i64> for Expr {
    fn from(i: i64) -> Expr {
        Expr::Atom(Atom::Int(i))
    }
}

impl From<f64> for Expr {
    fn from(x: f64) -> Expr {
        Expr::Atom(Atom::Float(x))
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Expr {
        Expr::Atom(Atom::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_order_prefers_int_over_float() {
        assert_eq!(Atom::decode("10"), Atom::Int(10));
        assert_eq!(Atom::decode("+5"), Atom::Int(5));
        assert_eq!(Atom::decode("10.0"), Atom::Float(10.0));
    }

    #[test]
    fn decode_reserved_words_before_symbols() {
        assert_eq!(Atom::decode("true"), Atom::Bool(true));
        assert_eq!(Atom::decode("false"), Atom::Bool(false));
        assert_eq!(Atom::decode("truely"), Atom::Symbol("truely".to_string()));
    }

    #[test]
    fn display_round_trips_atom_spellings() {
        assert_eq!(Atom::Bool(true).to_string(), "true");
        assert_eq!(Atom::Bool(false).to_string(), "false");
        assert_eq!(Atom::Int(42).to_string(), "42");
        assert_eq!(Atom::Float(15.5).to_string(), "15.5");
        assert_eq!(Atom::Float(1.0).to_string(), "1.0");
        assert_eq!(Atom::Symbol("zoo".to_string()).to_string(), "zoo");
    }

    #[test]
    fn display_form_spacing() {
        let e = Expr::form(
            "test",
            vec![Expr::from("a"), Expr::form("bar", vec![]), Expr::from(3)],
        );
        assert_eq!(e.to_string(), "(test a (bar) 3)");
        assert_eq!(Expr::form("list", vec![]).to_string(), "(list)");
    }

    #[test]
    fn serde_round_trip() {
        let e = Expr::form(
            "and",
            vec![
                Expr::from(true),
                Expr::form("eq", vec![Expr::from("A"), Expr::from(1)]),
                Expr::from(2.5),
            ],
        );
        let json = serde_json::to_string(&e).unwrap();
        let back: Expr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}
