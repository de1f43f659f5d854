//! Evaluation runtime: the function registry, the environment, and the
//! tree-walking evaluator.

pub mod env;
pub mod eval;
pub mod registry;

pub use env::Environment;
pub use eval::{evaluate, EvalContext, DEFAULT_MAX_DEPTH};
pub use registry::{Arity, EvalFn, FunctionDef, Registry};
