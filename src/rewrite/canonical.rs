//! Generic canonicalization: commutative operand ordering and associative
//! flattening, driven entirely by registry flags.
//!
//! Both passes are identity on atoms and produce new trees; an input tree
//! never shares child storage with its canonicalized output. Neither pass
//! can fail.

use crate::ast::{Expr, Form};
use crate::runtime::Registry;

/// Structural ordering key.
///
/// A form's key is `"0-"` + head + the concatenation of its children's
/// keys, computed recursively and *not* sorted before concatenation; an
/// atom's key is `"1-"` + its wire text. Keys compare lexicographically.
/// The ordering is deterministic and stable but carries no numeric
/// meaning.
pub fn sort_key(expr: &Expr) -> String {
    match expr {
        Expr::Form(form) => {
            let mut key = String::from("0-");
            key.push_str(&form.head);
            for arg in &form.args {
                key.push_str(&sort_key(arg));
            }
            key
        }
        Expr::Atom(atom) => format!("1-{}", atom),
    }
}

/// Recursively orders the operands of registered commutative functions.
///
/// Post-order: children are canonicalized first, then this node's operand
/// list is stably sorted by [`sort_key`] if its head is registered
/// commutative. Unregistered and non-commutative heads keep their operand
/// order (their children are still recursed into). Idempotent.
pub fn sort(funcs: &Registry, expr: &Expr) -> Expr {
    let Expr::Form(form) = expr else {
        return expr.clone();
    };
    let mut args: Vec<Expr> = form.args.iter().map(|arg| sort(funcs, arg)).collect();
    if funcs.is_commutative(&form.head) {
        args.sort_by_cached_key(sort_key);
    }
    Expr::Form(Form::new(form.head.clone(), args))
}

/// Flattens nested applications of associative variadic functions.
///
/// Post-order: children are flattened first, then, while any direct child
/// form shares this node's head, that child's operands are spliced onto
/// the end of the operand list and the child removed. Children being
/// already flat means spliced material never reintroduces the head, but
/// the scan restarts anyway until no candidate remains. No sorting, no
/// deduplication.
pub fn optimize(funcs: &Registry, expr: &Expr) -> Expr {
    let Expr::Form(form) = expr else {
        return expr.clone();
    };
    let mut args: Vec<Expr> = form.args.iter().map(|arg| optimize(funcs, arg)).collect();
    if funcs.is_flattenable(&form.head) {
        loop {
            let nested = args
                .iter()
                .position(|arg| arg.as_form().is_some_and(|child| child.head == form.head));
            let Some(i) = nested else {
                break;
            };
            if let Expr::Form(child) = args.remove(i) {
                args.extend(child.args);
            }
        }
    }
    Expr::Form(Form::new(form.head.clone(), args))
}

/// Full canonical form: flatten, sort, then drop each top-level operand
/// equal to its immediate predecessor.
///
/// The deduplication is adjacent-only; it catches exactly the duplicates
/// sorting brought together, not duplicates in general.
pub fn canonicalize(funcs: &Registry, expr: &Expr) -> Expr {
    let sorted = sort(funcs, &optimize(funcs, expr));
    let Expr::Form(mut form) = sorted else {
        return sorted;
    };
    form.args.dedup();
    Expr::Form(form)
}
