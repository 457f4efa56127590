mod expand_equality;
pub use expand_equality::expand_equality;

mod expand_null_semantics;
pub use expand_null_semantics::expand_null_semantics;

mod nullable;
pub use nullable::Nullables;

mod optimize_negation;
pub use optimize_negation::optimize_negation;

mod prune_constants;
pub use prune_constants::prune_constants;


use crate::{Config, UnboundParameters};
use nullsem_core::{
    err,
    stmt::{self, Expr, Params},
    Error, Result,
};
use tracing::debug;

/// Runs the rewrite passes over a predicate, in order:
///
/// 1. boolean-constant pruning
/// 2. boolean equality expansion
/// 3. negation optimization
/// 4. null-semantics expansion
/// 5. negation optimization, again
///
/// A pipeline holds no state besides its [`Config`] and can be shared
/// between threads.
#[derive(Debug, Default, Clone)]
pub struct Pipeline {
    config: Config,
}

/// The output of [`Pipeline::rewrite`].
#[derive(Debug, Clone, PartialEq)]
pub struct Rewritten {
    /// The rewritten predicate.
    pub expr: Expr,

    /// Whether null semantics were applied to `expr`.
    pub null_semantics: NullSemantics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullSemantics {
    Expanded,

    /// The predicate references parameters whose values were not supplied,
    /// and the pipeline is configured with [`UnboundParameters::Defer`].
    /// Comparisons still have database null semantics.
    Deferred,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rewrite(&self, expr: Expr, params: &Params) -> Result<Rewritten> {
        let span = tracing::debug_span!("null_semantics").entered();
        debug!(parent: &span, expr = %expr, params = params.len(), "rewriting predicate");

        let mut expr = expr;

        if self.config.prune_constants {
            expr = prune_constants(expr);
            debug!(parent: &span, pass = "prune_constants", expr = %expr);
        }

        if self.config.expand_equality {
            expr = expand_equality(expr, params).map_err(failed("equality expansion"))?;
            debug!(parent: &span, pass = "expand_equality", expr = %expr);
        }

        expr = optimize_negation(expr, params).map_err(failed("negation optimization"))?;
        debug!(parent: &span, pass = "optimize_negation", expr = %expr);

        let null_semantics = if self.defer(&expr, params) {
            debug!(
                parent: &span,
                "parameter values unknown; deferring null semantics"
            );
            NullSemantics::Deferred
        } else {
            expr = expand_null_semantics(expr, params)
                .map_err(failed("null-semantics expansion"))?;
            debug!(parent: &span, pass = "expand_null_semantics", expr = %expr);
            NullSemantics::Expanded
        };

        expr = optimize_negation(expr, params).map_err(failed("negation optimization"))?;
        debug!(parent: &span, pass = "optimize_negation", expr = %expr);

        strip_not_nullable(&mut expr);

        Ok(Rewritten {
            expr,
            null_semantics,
        })
    }

    fn defer(&self, expr: &Expr, params: &Params) -> bool {
        self.config.unbound_parameters == UnboundParameters::Defer
            && params.is_empty()
            && contains_params(expr)
    }
}

fn failed(pass: &'static str) -> impl FnOnce(Error) -> Error {
    move |err| err.context(err!("{pass} failed"))
}

/// Returns `true` if `expr` references at least one parameter.
pub fn contains_params(expr: &Expr) -> bool {
    let mut found = false;

    stmt::visit::for_each_expr(expr, |expr| {
        if expr.is_param() {
            found = true;
        }
    });

    found
}

/// Removes the markers left by the null-semantics expansion and flattens the
/// conjunctions and disjunctions they were separating.
fn strip_not_nullable(expr: &mut Expr) {
    stmt::visit_mut::for_each_expr_mut(expr, |expr| match expr {
        Expr::NotNullable(expr_not_nullable) => {
            *expr = expr_not_nullable.expr.take();
        }
        Expr::And(expr_and) if expr_and.operands.iter().any(Expr::is_and) => {
            *expr = Expr::and_from_vec(std::mem::take(&mut expr_and.operands));
        }
        Expr::Or(expr_or) if expr_or.operands.iter().any(Expr::is_or) => {
            *expr = Expr::or_from_vec(std::mem::take(&mut expr_or.operands));
        }
        _ => {}
    });
}
