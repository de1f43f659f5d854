//! Function registry.
//!
//! A [`Registry`] maps function names to their [`FunctionDef`]: an arity
//! contract, the algebraic flags the rewrite passes consult, and the
//! evaluation rule. Registries are plain values over a persistent map;
//! callers build them up front and pass them explicitly to evaluation and
//! rewriting. There is no process-wide default.

use std::fmt;

use im::HashMap;

use crate::ast::Expr;
use crate::errors::MantraError;
use crate::runtime::eval::EvalContext;

/// Child-count contract for a registered function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many children.
    Exact(usize),
    /// Any number of children, zero included.
    Variadic,
}

impl Arity {
    /// Returns true if a call with `count` children satisfies the contract.
    pub fn admits(&self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => *n == count,
            Arity::Variadic => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::Variadic => write!(f, "any"),
        }
    }
}

/// Evaluation rule for one function.
///
/// The rule receives the evaluation context and the raw, unevaluated child
/// expressions, and alone decides which children to evaluate and in what
/// order. Short-circuiting lives here, not in the dispatcher.
pub type EvalFn = fn(&EvalContext, &[Expr]) -> Result<Expr, MantraError>;

/// A registered function.
///
/// `commutative` lets the canonicalizer reorder the function's operands;
/// `associative` lets it flatten nested applications and is only
/// meaningful together with [`Arity::Variadic`].
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub arity: Arity,
    pub commutative: bool,
    pub associative: bool,
    pub rule: EvalFn,
}

/// Registry of available functions, inspectable at runtime.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    funcs: HashMap<String, FunctionDef>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.funcs.get(name)
    }

    pub fn register(&mut self, name: &str, def: FunctionDef) {
        self.funcs.insert(name.to_string(), def);
    }

    pub fn has(&self, name: &str) -> bool {
        self.funcs.contains_key(name)
    }

    pub fn list(&self) -> Vec<String> {
        self.funcs.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }

    /// True if the named function is registered commutative.
    pub fn is_commutative(&self, name: &str) -> bool {
        self.get(name).is_some_and(|def| def.commutative)
    }

    /// True if the named function may have nested applications flattened:
    /// registered, variadic, and associative.
    pub fn is_flattenable(&self, name: &str) -> bool {
        self.get(name)
            .is_some_and(|def| def.arity == Arity::Variadic && def.associative)
    }
}
