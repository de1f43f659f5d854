//! Evaluation environment.
//!
//! A flat key-value store consulted only by the `env` pseudo-function.
//! Keys are the wire text of the evaluated key expression, so dynamic keys
//! like `(env (env key1))` resolve through ordinary string lookups.

use im::HashMap;

use crate::ast::Expr;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    vars: HashMap<String, Expr>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Expr> {
        self.vars.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Expr>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Builder-style insert, for chaining during construction.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.set(key, value);
        self
    }

    pub fn has(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
