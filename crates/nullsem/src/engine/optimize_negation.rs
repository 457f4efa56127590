use super::Nullables;
use nullsem_core::{
    stmt::{self, Expr, Params, VisitMut},
    Error, Result,
};

/// Pushes negations into the expressions they wrap.
///
/// * `NOT NOT x` → `x`
/// * `NOT (a = b)` → `a <> b`, and the reverse
/// * `NOT (x IS NULL)` → `x IS NOT NULL`, and the reverse
/// * `NOT a = b` → `a <> b` and `a = NOT b` → `a <> b`, and the same for
///   `<>`, but only when neither operand can be null.
///
/// The last rule does not hold once null is involved: with `a` null and `b`
/// false, `NOT a = b` compares null with false while `a <> b` does not.
pub fn optimize_negation(mut expr: Expr, params: &Params) -> Result<Expr> {
    let mut optimize = OptimizeNegation {
        params,
        error: None,
    };

    optimize.visit_expr_mut(&mut expr);

    match optimize.error {
        Some(err) => Err(err),
        None => Ok(expr),
    }
}

struct OptimizeNegation<'a> {
    params: &'a Params,
    error: Option<Error>,
}

impl VisitMut for OptimizeNegation<'_> {
    fn visit_expr_mut(&mut self, i: &mut Expr) {
        if self.error.is_some() {
            return;
        }

        stmt::visit_mut::visit_expr_mut(self, i);

        if let Err(err) = self.simplify(i) {
            self.error = Some(err);
        }
    }
}

impl OptimizeNegation<'_> {
    /// Applies rewrites to `expr` until none matches. Operands are expected to
    /// be simplified already.
    fn simplify(&self, expr: &mut Expr) -> Result<()> {
        while let Some(simplified) = self.simplify_once(expr)? {
            *expr = simplified;
        }

        Ok(())
    }

    fn simplify_once(&self, expr: &mut Expr) -> Result<Option<Expr>> {
        match expr {
            Expr::Not(expr_not) => self.simplify_expr_not(&mut expr_not.expr),
            Expr::BinaryOp(expr_binary_op) => {
                let (lhs, rhs) = match (&*expr_binary_op.lhs, &*expr_binary_op.rhs) {
                    (Expr::Not(lhs), rhs) => (&*lhs.expr, rhs),
                    (lhs, Expr::Not(rhs)) => (lhs, &*rhs.expr),
                    _ => return Ok(None),
                };

                if self.is_nullable(lhs)? || self.is_nullable(rhs)? {
                    return Ok(None);
                }

                // The operands keep their position
                let (lhs, rhs) = match (&mut *expr_binary_op.lhs, &mut *expr_binary_op.rhs) {
                    (Expr::Not(lhs), rhs) => (lhs.expr.take(), rhs.take()),
                    (lhs, Expr::Not(rhs)) => (lhs.take(), rhs.expr.take()),
                    _ => return Ok(None),
                };

                Ok(Some(Expr::binary_op(lhs, expr_binary_op.op.negate(), rhs)))
            }
            _ => Ok(None),
        }
    }

    fn simplify_expr_not(&self, operand: &mut Expr) -> Result<Option<Expr>> {
        match operand {
            // `NOT NOT x` → `x`
            Expr::Not(inner) => Ok(Some(inner.expr.take())),
            // `NOT (a = b)` → `a <> b`
            Expr::BinaryOp(expr_binary_op) => {
                expr_binary_op.op = expr_binary_op.op.negate();
                Ok(Some(operand.take()))
            }
            // `NOT (x IS NULL)` → `x IS NOT NULL`
            Expr::IsNull(expr_is_null) => {
                expr_is_null.negate = !expr_is_null.negate;
                Ok(Some(operand.take()))
            }
            Expr::NotNullable(expr_not_nullable) => {
                let mut negated = Expr::not(expr_not_nullable.expr.take());
                self.simplify(&mut negated)?;
                Ok(Some(Expr::not_nullable(negated)))
            }
            _ => Ok(None),
        }
    }

    fn is_nullable(&self, expr: &Expr) -> Result<bool> {
        Ok(!Nullables::extract(expr, self.params)?.is_empty())
    }
}
