//! Built-in function rules.
//!
//! Two vocabularies over the same rule implementations:
//!
//! - **`logic`**: the standard connectives `not`, `and`, `or`, `if`.
//! - **`predicates`**: adds `eq`, the multi-way equality test the rewrite
//!   rules in [`crate::rewrite`] know how to merge.
//!
//! Every rule is a stateless `EvalFn`; registries are assembled by the
//! `register_*` functions or taken ready-made from the exported statics.
//! All rules receive unevaluated children and decide evaluation order
//! themselves, which is where the connectives' short-circuiting lives.

pub mod logic;
pub mod predicates;

pub use logic::{register_standard_logic, STANDARD_LOGIC};
pub use predicates::{register_predicates, SPECIAL_LOGIC};

use crate::ast::{Atom, Expr};
use crate::errors::MantraError;
use crate::runtime::EvalContext;

/// Evaluates one child and requires a boolean result.
pub(crate) fn eval_bool(ctx: &EvalContext, expr: &Expr) -> Result<bool, MantraError> {
    let value = ctx.eval(expr)?;
    match value.as_atom().and_then(Atom::as_bool) {
        Some(b) => Ok(b),
        None => Err(MantraError::type_mismatch("Bool", value.type_name())),
    }
}
