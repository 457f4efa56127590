//! Rewrites query predicates so that equality comparisons keep the semantics
//! of the language the query was written in once they run inside a
//! database.
//!
//! In the source language `null == null` is `true`; in SQL `NULL = NULL` is
//! `NULL`. [`Pipeline`] rewrites `=` and `<>` comparisons with explicit
//! `IS NULL` / `IS NOT NULL` guards on every operand that may be null, after
//! pruning redundant boolean constants and normalizing negations.
//!
//! ```
//! use nullsem::stmt::{Expr, ExprColumn, Params, Type};
//!
//! let expr = Expr::eq(
//!     ExprColumn::nullable("e", "A", Type::Bool),
//!     ExprColumn::new("e", "B", Type::Bool),
//! );
//!
//! let rewritten = nullsem::rewrite(expr, &Params::new()).unwrap();
//! assert_eq!(rewritten.to_string(), "(e.A = e.B) AND e.A IS NOT NULL");
//! ```

mod config;
pub use config::{Config, UnboundParameters};

mod engine;
pub use engine::{
    contains_params, expand_equality, expand_null_semantics, optimize_negation, prune_constants,
    NullSemantics, Nullables, Pipeline, Rewritten,
};

pub use nullsem_core::{stmt, Error, Result};

/// Rewrites `expr` with the default [`Pipeline`] and returns the rewritten
/// predicate.
pub fn rewrite(expr: stmt::Expr, params: &stmt::Params) -> Result<stmt::Expr> {
    Ok(Pipeline::default().rewrite(expr, params)?.expr)
}
