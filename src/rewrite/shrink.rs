//! Predicate shrinking rules and the fixed-point optimizer that drives
//! them.
//!
//! The rules here know the predicate vocabulary by name (`and`, `or`,
//! `eq`); the registry only contributes the generic flattening performed
//! by [`optimize`] between rounds. All rewrites preserve predicate
//! semantics under the extension's evaluation rules.

use crate::ast::{Expr, Form};
use crate::rewrite::canonical::{optimize, sort_key};
use crate::runtime::Registry;

/// Unwraps a one-operand `and` or `or` to its operand.
///
/// A single-operand conjunction or disjunction evaluates to its operand's
/// truth value, so the wrapper carries no meaning. Applies only at the
/// root of the given tree; [`shrink_all`] handles recursion.
pub fn shrink_andor(expr: Expr) -> Expr {
    let Expr::Form(form) = expr else {
        return expr;
    };
    if form.head == "and" || form.head == "or" {
        if let [operand] = form.args.as_slice() {
            return operand.clone();
        }
    }
    Expr::Form(form)
}

/// Merges one pair of sibling `eq` forms under an `or`.
///
/// Two operands of the disjunction qualify when both are `eq` forms with
/// at least one operand and their first operands are equal. The merged
/// form keeps the shared first operand and unions the trailing operands
/// in first-seen order, dropping anything already present in the merged
/// form, the first operand included. The merge replaces the earlier
/// sibling and the later one is removed.
///
/// At most one merge per call; [`shrink_all`] loops to exhaustion. Trees
/// that are not `or` forms pass through unchanged.
pub fn shrink_eq(expr: Expr) -> Expr {
    let Expr::Form(form) = expr else {
        return expr;
    };
    if form.head != "or" {
        return Expr::Form(form);
    }
    for i in 0..form.args.len() {
        for j in (i + 1)..form.args.len() {
            let Some(merged) = merge_eq_pair(&form.args[i], &form.args[j]) else {
                continue;
            };
            let mut args = form.args.clone();
            args[i] = merged;
            args.remove(j);
            return Expr::Form(Form::new(form.head, args));
        }
    }
    Expr::Form(form)
}

/// The merge of two `eq` forms sharing a first operand, or `None` if the
/// pair does not qualify. Forms with no operands never qualify.
fn merge_eq_pair(left: &Expr, right: &Expr) -> Option<Expr> {
    let (Some(left), Some(right)) = (left.as_form(), right.as_form()) else {
        return None;
    };
    if left.head != "eq" || right.head != "eq" {
        return None;
    }
    let (Some(shared), Some(right_first)) = (left.args.first(), right.args.first()) else {
        return None;
    };
    if shared != right_first {
        return None;
    }
    let mut args: Vec<Expr> = vec![shared.clone()];
    for operand in left.args[1..].iter().chain(&right.args[1..]) {
        if !args.contains(operand) {
            args.push(operand.clone());
        }
    }
    Some(Expr::form("eq", args))
}

/// Applies both shrink rules everywhere in the tree.
///
/// Post-order: children are shrunk first, then this node is rewritten to
/// a fixed point of [`shrink_eq`] followed by [`shrink_andor`]. Each
/// `eq` merge can leave a one-operand `or` behind, which is exactly what
/// the unwrap rule then removes.
pub fn shrink_all(expr: Expr) -> Expr {
    let Expr::Form(form) = expr else {
        return expr;
    };
    let args: Vec<Expr> = form.args.into_iter().map(shrink_all).collect();
    let mut current = Expr::Form(Form::new(form.head, args));
    loop {
        let next = shrink_andor(shrink_eq(current.clone()));
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Orders operands of the predicate vocabulary only.
///
/// `and` and `or` have each operand ordered recursively, then the operand
/// list sorted by the structural key. `eq` keeps its first operand in
/// place and orders only the trailing operands. Every other head is left
/// entirely untouched, children included.
fn sort_connectives(expr: &Expr) -> Expr {
    let Expr::Form(form) = expr else {
        return expr.clone();
    };
    match form.head.as_str() {
        "and" | "or" => {
            let mut args: Vec<Expr> = form.args.iter().map(sort_connectives).collect();
            args.sort_by_cached_key(sort_key);
            Expr::Form(Form::new(form.head.clone(), args))
        }
        "eq" => {
            let Some((first, rest)) = form.args.split_first() else {
                return expr.clone();
            };
            let mut tail: Vec<Expr> = rest.iter().map(sort_connectives).collect();
            tail.sort_by_cached_key(sort_key);
            let mut args = Vec::with_capacity(form.args.len());
            args.push(first.clone());
            args.extend(tail);
            Expr::Form(Form::new(form.head.clone(), args))
        }
        _ => expr.clone(),
    }
}

/// Rewrites a predicate tree to its canonical shrunken form.
///
/// Each round flattens nested connectives, orders the predicate
/// vocabulary, runs [`shrink_all`], then rewrites every operand with this
/// same procedure while dropping operands equal to their immediate
/// predecessor. Rounds repeat until the tree stops changing. Atoms are
/// returned as-is and the whole procedure never fails.
///
/// This is the single normalization applied to every tree the variant
/// generator emits.
pub fn special_optimize(funcs: &Registry, expr: &Expr) -> Expr {
    if expr.is_atom() {
        return expr.clone();
    }
    let mut current = expr.clone();
    loop {
        let flattened = optimize(funcs, &current);
        let ordered = sort_connectives(&flattened);
        let shrunk = shrink_all(ordered);
        let Expr::Form(form) = shrunk else {
            return shrunk;
        };
        let mut args: Vec<Expr> = Vec::with_capacity(form.args.len());
        for arg in &form.args {
            let rewritten = special_optimize(funcs, arg);
            if args.last() != Some(&rewritten) {
                args.push(rewritten);
            }
        }
        let next = Expr::Form(Form::new(form.head, args));
        if next == current {
            return next;
        }
        current = next;
    }
}
