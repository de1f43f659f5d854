//! Standard logic connectives: `not`, `and`, `or`, `if`.
//!
//! `and` and `or` are variadic, commutative, and associative, which is what
//! entitles the canonicalizer to reorder and flatten them. Both
//! short-circuit left to right, and both have a defined zero-operand
//! answer: `(and)` is true and `(or)` is false, the neutral elements.

use once_cell::sync::Lazy;

use crate::ast::Expr;
use crate::builtins::eval_bool;
use crate::errors::MantraError;
use crate::runtime::{Arity, EvalFn, FunctionDef, Registry};

/// Logical negation.
///
/// Usage: (not <a>) ; => Bool
pub const RULE_NOT: EvalFn = |ctx, args| {
    let [operand] = args else {
        return Err(MantraError::parameter_count("not", "1", args.len()));
    };
    Ok(Expr::from(!eval_bool(ctx, operand)?))
};

/// Short-circuiting conjunction.
///
/// Usage: (and <a> ...) ; => Bool
///
/// Operands evaluate left to right; the first false one ends the call
/// with false and nothing after it is evaluated.
pub const RULE_AND: EvalFn = |ctx, args| {
    for arg in args {
        if !eval_bool(ctx, arg)? {
            return Ok(Expr::from(false));
        }
    }
    Ok(Expr::from(true))
};

/// Short-circuiting disjunction.
///
/// Usage: (or <a> ...) ; => Bool
pub const RULE_OR: EvalFn = |ctx, args| {
    for arg in args {
        if eval_bool(ctx, arg)? {
            return Ok(Expr::from(true));
        }
    }
    Ok(Expr::from(false))
};

/// Conditional: evaluates the condition, then exactly one branch.
///
/// Usage: (if <cond> <then> <else>)
pub const RULE_IF: EvalFn = |ctx, args| {
    let [condition, then_branch, else_branch] = args else {
        return Err(MantraError::parameter_count("if", "3", args.len()));
    };
    if eval_bool(ctx, condition)? {
        ctx.eval(then_branch)
    } else {
        ctx.eval(else_branch)
    }
};

/// Registers the standard connectives with the given registry.
pub fn register_standard_logic(registry: &mut Registry) {
    registry.register(
        "not",
        FunctionDef {
            arity: Arity::Exact(1),
            commutative: false,
            associative: false,
            rule: RULE_NOT,
        },
    );
    registry.register(
        "and",
        FunctionDef {
            arity: Arity::Variadic,
            commutative: true,
            associative: true,
            rule: RULE_AND,
        },
    );
    registry.register(
        "or",
        FunctionDef {
            arity: Arity::Variadic,
            commutative: true,
            associative: true,
            rule: RULE_OR,
        },
    );
    registry.register(
        "if",
        FunctionDef {
            arity: Arity::Exact(3),
            commutative: false,
            associative: false,
            rule: RULE_IF,
        },
    );
}

/// The standard logic registry. Passed explicitly by callers; nothing in
/// the crate reaches for it implicitly.
pub static STANDARD_LOGIC: Lazy<Registry> = Lazy::new(|| {
    let mut registry = Registry::new();
    register_standard_logic(&mut registry);
    registry
});
