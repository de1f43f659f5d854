//! Tree-walking evaluation.
//!
//! Atoms self-evaluate. Forms dispatch through the registry after one
//! special case: the `env` pseudo-function, which resolves its single
//! (recursively evaluated) key against the environment and is checked
//! before the registry so it works even with an empty one.
//!
//! Rules receive their children unevaluated together with an
//! [`EvalContext`]; evaluation order and short-circuiting are entirely the
//! rule's decision. The context tracks nesting depth so runaway recursion
//! surfaces as a `RecursionLimit` error rather than a stack overflow.

use crate::ast::{Expr, Form};
use crate::errors::MantraError;
use crate::runtime::env::Environment;
use crate::runtime::registry::Registry;

/// Nesting depth the evaluator accepts before reporting a recursion-limit
/// error.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// The context for a single evaluation, passed to every rule.
pub struct EvalContext<'a> {
    pub funcs: &'a Registry,
    pub env: &'a Environment,
    max_depth: usize,
    depth: usize,
}

impl<'a> EvalContext<'a> {
    pub fn new(funcs: &'a Registry, env: &'a Environment) -> Self {
        Self {
            funcs,
            env,
            max_depth: DEFAULT_MAX_DEPTH,
            depth: 0,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Context for one nesting level deeper.
    fn next(&self) -> EvalContext<'a> {
        EvalContext {
            funcs: self.funcs,
            env: self.env,
            max_depth: self.max_depth,
            depth: self.depth + 1,
        }
    }

    /// Evaluates an expression in this context.
    pub fn eval(&self, expr: &Expr) -> Result<Expr, MantraError> {
        if self.depth > self.max_depth {
            return Err(MantraError::recursion_limit());
        }
        let Expr::Form(form) = expr else {
            return Ok(expr.clone());
        };
        if form.head == "env" {
            return self.lookup_env(form);
        }
        let Some(def) = self.funcs.get(&form.head) else {
            return Err(MantraError::unknown_function(&form.head));
        };
        if !def.arity.admits(form.args.len()) {
            return Err(MantraError::parameter_count(
                &form.head,
                def.arity.to_string(),
                form.args.len(),
            ));
        }
        (def.rule)(&self.next(), &form.args)
    }

    fn lookup_env(&self, form: &Form) -> Result<Expr, MantraError> {
        let [key_expr] = form.args.as_slice() else {
            return Err(MantraError::parameter_count(
                "env",
                "1",
                form.args.len(),
            ));
        };
        let key = self.next().eval(key_expr)?;
        match self.env.get(&key.to_string()) {
            Some(value) => Ok(value.clone()),
            // Reports the key as written, not its evaluated value.
            None => Err(MantraError::unknown_key(key_expr.to_string())),
        }
    }
}

/// Evaluates `expr` against a registry and environment.
///
/// # Examples
///
/// ```rust
/// use mantra::{compile, evaluate, Environment, Expr, STANDARD_LOGIC};
/// let expr = compile("(and true (not false))").unwrap();
/// let result = evaluate(&STANDARD_LOGIC, &Environment::new(), &expr).unwrap();
/// assert_eq!(result, Expr::from(true));
/// ```
pub fn evaluate(funcs: &Registry, env: &Environment, expr: &Expr) -> Result<Expr, MantraError> {
    EvalContext::new(funcs, env).eval(expr)
}
