//! The predicate vocabulary: the standard connectives plus `eq`.
//!
//! `(eq a b1 b2 ...)` means `(a == b1) or (a == b2) or ...`. Each operand
//! is evaluated only if it is a form; atoms compare literally, so
//! `(eq A b)` compares the symbols themselves rather than looking anything
//! up. This is the function the `or`-level merge rule in
//! [`crate::rewrite::shrink`] understands.

use once_cell::sync::Lazy;

use crate::ast::Expr;
use crate::builtins::register_standard_logic;
use crate::errors::MantraError;
use crate::runtime::{Arity, EvalContext, EvalFn, FunctionDef, Registry};

/// Evaluates forms, passes atoms through literally.
fn resolve_operand(ctx: &EvalContext, expr: &Expr) -> Result<Expr, MantraError> {
    if expr.is_form() {
        ctx.eval(expr)
    } else {
        Ok(expr.clone())
    }
}

/// Multi-way equality.
///
/// Usage: (eq <a> <b> ...) ; => Bool
///
/// True iff `a` equals any `b`. With no `b` operands the answer is false;
/// with no operands at all the call is a parameter-count error. Comparison
/// stops at the first match, so later operands are never evaluated.
pub const RULE_EQ: EvalFn = |ctx, args| {
    let Some((first, rest)) = args.split_first() else {
        return Err(MantraError::parameter_count("eq", "1 or more", 0));
    };
    let probe = resolve_operand(ctx, first)?;
    for operand in rest {
        if probe == resolve_operand(ctx, operand)? {
            return Ok(Expr::from(true));
        }
    }
    Ok(Expr::from(false))
};

/// Registers `eq` with the given registry.
pub fn register_predicates(registry: &mut Registry) {
    registry.register(
        "eq",
        FunctionDef {
            arity: Arity::Variadic,
            commutative: false,
            associative: false,
            rule: RULE_EQ,
        },
    );
}

/// The predicate registry: the standard connectives plus `eq`.
pub static SPECIAL_LOGIC: Lazy<Registry> = Lazy::new(|| {
    let mut registry = Registry::new();
    register_standard_logic(&mut registry);
    register_predicates(&mut registry);
    registry
});
