//! Expression vocabulary for predicate null-semantics rewriting.
//!
//! The [`stmt`] module defines the expression tree handed over by the query
//! translation front end, the parameter-value table, traversal traits and a
//! three-valued evaluator. The rewrite passes themselves live in the
//! `nullsem` crate.

mod error;
pub use error::{Error, IntoError};

pub mod stmt;

/// A Result type alias that uses this crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
