//! Lazy enumeration of single-step tree mutations.
//!
//! [`generate`] yields every way of splicing one occurrence of a new
//! element into an expression tree with an `and` or `or` connective, at
//! the root or at any allowed subtree, each result normalized by
//! [`special_optimize`]. Enumeration is depth-first and fully lazy: the
//! caller's policies are consulted only as variants are pulled, so taking
//! a prefix of an enormous variant space does bounded work.

use crate::ast::{Expr, Form};
use crate::rewrite::shrink::special_optimize;
use crate::runtime::Registry;

/// Lazily enumerates the variants of `expr` extended with `elem`.
///
/// At each visited node the `allow` policy is consulted once, returning
/// whether to emit the `and`-wrapped and the `or`-wrapped combination of
/// that node with `elem`, in that order. The `stop` policy is consulted
/// after the wraps; returning `true` prunes recursion below that node.
/// Recursion substitutes each child's variants back into a fresh copy of
/// the parent, left to right. Every yielded tree is freshly built and
/// normalized; none alias the input or each other.
///
/// An atom equal to `elem` yields nothing at all, policies unconsulted.
///
/// # Examples
///
/// ```
/// use mantra::{compile, generate, SPECIAL_LOGIC};
///
/// let expr = compile("(and a b)")?;
/// let elem = compile("c")?;
/// let allow = |_: &mantra::Expr, _: &mantra::Expr| (true, true);
/// let stop = |_: &mantra::Expr, _: &mantra::Expr| false;
///
/// let variants: Vec<String> = generate(&SPECIAL_LOGIC, &expr, &elem, &allow, &stop)
///     .map(|v| v.to_string())
///     .collect();
/// assert!(variants.contains(&"(and a b c)".to_string()));
/// assert!(variants.contains(&"(or (and a b) c)".to_string()));
/// # Ok::<(), mantra::MantraError>(())
/// ```
pub fn generate<'a, A, S>(
    funcs: &'a Registry,
    expr: &'a Expr,
    elem: &'a Expr,
    allow: &'a A,
    stop: &'a S,
) -> Variants<'a, A, S>
where
    A: Fn(&Expr, &Expr) -> (bool, bool),
    S: Fn(&Expr, &Expr) -> bool,
{
    Variants::new(funcs, expr, elem, allow, stop)
}

/// Iterator over the mutation variants of one expression.
///
/// Created by [`generate`]. Holds one pending recursion frame at a time;
/// memory use is proportional to tree depth, not to the number of
/// variants.
pub struct Variants<'a, A, S> {
    funcs: &'a Registry,
    expr: &'a Expr,
    elem: &'a Expr,
    allow: &'a A,
    stop: &'a S,
    state: State<'a, A, S>,
}

enum State<'a, A, S> {
    /// Policies not yet consulted.
    Start,
    /// The `and` wrap was emitted; an `or` wrap may still be owed.
    WrapOr { allow_or: bool },
    /// Wraps done; the stop policy has not been consulted yet.
    Descend,
    /// Substituting the inner iterator's variants into the child at
    /// `index`. Only reachable when the expression is a form.
    Child {
        index: usize,
        inner: Box<Variants<'a, A, S>>,
    },
    Done,
}

impl<'a, A, S> Variants<'a, A, S>
where
    A: Fn(&Expr, &Expr) -> (bool, bool),
    S: Fn(&Expr, &Expr) -> bool,
{
    fn new(funcs: &'a Registry, expr: &'a Expr, elem: &'a Expr, allow: &'a A, stop: &'a S) -> Self {
        Variants {
            funcs,
            expr,
            elem,
            allow,
            stop,
            state: State::Start,
        }
    }
}

impl<'a, A, S> Iterator for Variants<'a, A, S>
where
    A: Fn(&Expr, &Expr) -> (bool, bool),
    S: Fn(&Expr, &Expr) -> bool,
{
    type Item = Expr;

    fn next(&mut self) -> Option<Expr> {
        let funcs = self.funcs;
        let expr = self.expr;
        let elem = self.elem;
        let allow = self.allow;
        let stop = self.stop;
        loop {
            match &mut self.state {
                State::Start => {
                    if expr.is_atom() && expr == elem {
                        self.state = State::Done;
                        continue;
                    }
                    let (allow_and, allow_or) = allow(expr, elem);
                    if allow_and {
                        self.state = State::WrapOr { allow_or };
                        return Some(wrapped(funcs, "and", expr, elem));
                    }
                    self.state = State::Descend;
                    if allow_or {
                        return Some(wrapped(funcs, "or", expr, elem));
                    }
                }
                State::WrapOr { allow_or } => {
                    let owed = *allow_or;
                    self.state = State::Descend;
                    if owed {
                        return Some(wrapped(funcs, "or", expr, elem));
                    }
                }
                State::Descend => {
                    if stop(expr, elem) {
                        self.state = State::Done;
                        continue;
                    }
                    self.state = match expr.as_form() {
                        Some(form) if !form.args.is_empty() => State::Child {
                            index: 0,
                            inner: Box::new(Variants::new(funcs, &form.args[0], elem, allow, stop)),
                        },
                        _ => State::Done,
                    };
                }
                State::Child { index, inner } => {
                    let at = *index;
                    if let Some(variant) = inner.next() {
                        return Some(substituted(funcs, expr, at, variant));
                    }
                    self.state = match expr.as_form() {
                        Some(form) if at + 1 < form.args.len() => State::Child {
                            index: at + 1,
                            inner: Box::new(Variants::new(
                                funcs,
                                &form.args[at + 1],
                                elem,
                                allow,
                                stop,
                            )),
                        },
                        _ => State::Done,
                    };
                }
                State::Done => return None,
            }
        }
    }
}

/// Normalized `(head expr elem)`.
fn wrapped(funcs: &Registry, head: &str, expr: &Expr, elem: &Expr) -> Expr {
    let raw = Expr::form(head, vec![expr.clone(), elem.clone()]);
    special_optimize(funcs, &raw)
}

/// Normalized copy of `parent` with the child at `index` replaced.
fn substituted(funcs: &Registry, parent: &Expr, index: usize, replacement: Expr) -> Expr {
    let Some(form) = parent.as_form() else {
        return replacement;
    };
    let mut args = form.args.clone();
    args[index] = replacement;
    special_optimize(funcs, &Expr::Form(Form::new(form.head.clone(), args)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::SPECIAL_LOGIC;
    use crate::syntax::compile;

    fn tree(text: &str) -> Expr {
        compile(text).unwrap()
    }

    fn all(expr: &str, elem: &str) -> Vec<Expr> {
        let expr = tree(expr);
        let elem = tree(elem);
        let allow = |_: &Expr, _: &Expr| (true, true);
        let stop = |_: &Expr, _: &Expr| false;
        generate(&SPECIAL_LOGIC, &expr, &elem, &allow, &stop).collect()
    }

    #[test]
    fn wraps_precede_child_substitutions() {
        let variants = all("(f1 a)", "b");
        assert_eq!(variants[0], tree("(and (f1 a) b)"));
        assert_eq!(variants[1], tree("(or (f1 a) b)"));
        assert_eq!(variants[2], tree("(f1 (and a b))"));
        assert_eq!(variants[3], tree("(f1 (or a b))"));
        assert_eq!(variants.len(), 4);
    }

    #[test]
    fn atom_identical_to_element_is_suppressed() {
        assert!(all("a", "a").is_empty());
    }

    #[test]
    fn childless_form_yields_wraps_only() {
        let variants = all("(f1)", "x");
        assert_eq!(
            variants,
            vec![tree("(and (f1) x)"), tree("(or (f1) x)")],
        );
    }

    #[test]
    fn deny_both_wraps_still_descends() {
        let expr = tree("(f1 a)");
        let elem = tree("b");
        let allow =
            |e: &Expr, _: &Expr| if e.is_form() { (false, false) } else { (true, true) };
        let stop = |_: &Expr, _: &Expr| false;
        let variants: Vec<Expr> =
            generate(&SPECIAL_LOGIC, &expr, &elem, &allow, &stop).collect();
        assert_eq!(variants, vec![tree("(f1 (and a b))"), tree("(f1 (or a b))")]);
    }

    #[test]
    fn stop_prunes_below_but_not_at_the_node() {
        let expr = tree("(f1 a b)");
        let elem = tree("c");
        let allow = |_: &Expr, _: &Expr| (true, true);
        let stop = |_: &Expr, _: &Expr| true;
        let variants: Vec<Expr> =
            generate(&SPECIAL_LOGIC, &expr, &elem, &allow, &stop).collect();
        assert_eq!(
            variants,
            vec![tree("(and (f1 a b) c)"), tree("(or (f1 a b) c)")],
        );
    }
}
