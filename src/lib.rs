//! A minimal s-expression language: tokenizer, parser, pluggable
//! evaluator, and a term-rewriting toolkit for predicate trees.
//!
//! The pipeline is small and explicit. [`compile`] turns source text into
//! an [`Expr`] tree; [`evaluate`] reduces a tree against a function
//! [`Registry`] and a key-value [`Environment`]; the [`rewrite`] passes
//! put trees into canonical form and enumerate their one-step mutations.
//!
//! ```
//! use mantra::{compile, evaluate, Environment, STANDARD_LOGIC};
//!
//! let expr = compile("(and true (not false))")?;
//! let result = evaluate(&STANDARD_LOGIC, &Environment::new(), &expr)?;
//! assert_eq!(result.to_string(), "true");
//! # Ok::<(), mantra::MantraError>(())
//! ```
//!
//! Nothing about the evaluator is specific to logic: a [`Registry`] maps
//! head symbols to rules, and the crate's own vocabularies
//! ([`STANDARD_LOGIC`], [`SPECIAL_LOGIC`]) are built through the same
//! registration calls available to callers.

pub mod ast;
pub mod builtins;
pub mod errors;
pub mod rewrite;
pub mod runtime;
pub mod syntax;

pub use ast::{Atom, Expr, Form};
pub use builtins::{
    register_predicates, register_standard_logic, SPECIAL_LOGIC, STANDARD_LOGIC,
};
pub use errors::{to_error_source, ErrorCategory, MantraError, Span};
pub use rewrite::{
    canonicalize, generate, optimize, shrink_all, shrink_andor, shrink_eq, sort, sort_key,
    special_optimize, Variants,
};
pub use runtime::{
    evaluate, Arity, Environment, EvalContext, EvalFn, FunctionDef, Registry, DEFAULT_MAX_DEPTH,
};
pub use syntax::{compile, parse, parse_spanned, tokenize, tokenize_spanned};
