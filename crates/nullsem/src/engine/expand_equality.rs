use super::Nullables;
use nullsem_core::{
    stmt::{self, BinaryOp, Expr, Params, VisitMut},
    Error, Result,
};

/// Rewrites comparisons between boolean expressions that are not plain
/// columns, parameters or constants, or negations of them.
///
/// When neither side can be null the comparison is replaced by its boolean
/// algebra equivalent:
///
/// ```text
/// a = b   →  (a AND b) OR (NOT a AND NOT b)
/// a <> b  →  (a AND NOT b) OR (NOT a AND b)
/// ```
///
/// Otherwise both sides are projected onto `true`/`false` with a `CASE`
/// expression and the projections are compared. A side that is the null
/// literal is projected too. The null-semantics expansion later guards each
/// projected side that may be null.
pub fn expand_equality(mut expr: Expr, params: &Params) -> Result<Expr> {
    let mut expand = ExpandEquality {
        params,
        error: None,
    };

    expand.visit_expr_mut(&mut expr);

    match expand.error {
        Some(err) => Err(err),
        None => Ok(expr),
    }
}

struct ExpandEquality<'a> {
    params: &'a Params,
    error: Option<Error>,
}

impl VisitMut for ExpandEquality<'_> {
    fn visit_expr_mut(&mut self, i: &mut Expr) {
        if self.error.is_some() {
            return;
        }

        stmt::visit_mut::visit_expr_mut(self, i);

        let maybe_expr = match i {
            Expr::BinaryOp(expr_binary_op) => self.expand(
                expr_binary_op.op,
                &mut expr_binary_op.lhs,
                &mut expr_binary_op.rhs,
            ),
            _ => Ok(None),
        };

        match maybe_expr {
            Ok(Some(expr)) => *i = expr,
            Ok(None) => {}
            Err(err) => self.error = Some(err),
        }
    }
}

impl ExpandEquality<'_> {
    fn expand(&self, op: BinaryOp, lhs: &mut Expr, rhs: &mut Expr) -> Result<Option<Expr>> {
        let (lhs_ty, rhs_ty) = (lhs.ty(), rhs.ty());

        if !lhs_ty.is_bool() && !rhs_ty.is_bool() {
            return Ok(None);
        }

        if !lhs_ty.is_bool_like() || !rhs_ty.is_bool_like() {
            return Err(Error::type_mismatch(lhs_ty, rhs_ty));
        }

        if is_simple(lhs) && is_simple(rhs) {
            return Ok(None);
        }

        let nullable = !Nullables::extract(lhs, self.params)?.is_empty()
            || !Nullables::extract(rhs, self.params)?.is_empty();

        let lhs = lhs.take();
        let rhs = rhs.take();

        if nullable {
            return Ok(Some(Expr::binary_op(
                Expr::case(lhs),
                op,
                Expr::case(rhs),
            )));
        }

        Ok(Some(match op {
            BinaryOp::Eq => Expr::or(
                Expr::and(lhs.clone(), rhs.clone()),
                Expr::and(Expr::not(lhs), Expr::not(rhs)),
            ),
            BinaryOp::Ne => Expr::or(
                Expr::and(lhs.clone(), Expr::not(rhs.clone())),
                Expr::and(Expr::not(lhs), rhs),
            ),
        }))
    }
}

/// Columns, parameters and constants, possibly negated. Comparing these
/// directly is already safe for the null-semantics expansion.
fn is_simple(expr: &Expr) -> bool {
    match expr {
        Expr::Not(expr_not) => is_simple(&expr_not.expr),
        _ => expr.is_atom(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nullsem_core::stmt::{ExprColumn, Type};
    use pretty_assertions::assert_eq;

    fn col(name: &str) -> Expr {
        ExprColumn::new("e", name, Type::Bool).into()
    }

    fn nullable(name: &str) -> Expr {
        ExprColumn::nullable("e", name, Type::Bool).into()
    }

    fn expand(expr: Expr) -> Result<Expr> {
        expand_equality(expr, &Params::new())
    }

    #[test]
    fn atoms_left_alone() {
        let expr = Expr::eq(col("A"), nullable("B"));
        assert_eq!(expand(expr.clone()).unwrap(), expr);

        let expr = Expr::ne(Expr::param("p", Type::Bool), true);
        assert_eq!(expand(expr.clone()).unwrap(), expr);
    }

    #[test]
    fn non_bool_comparison_left_alone() {
        let expr = Expr::eq(ExprColumn::new("e", "Count", Type::I64), 5i64);
        assert_eq!(expand(expr.clone()).unwrap(), expr);
    }

    #[test]
    fn eq_of_non_nullable_compound_expands_algebraically() {
        let lhs = Expr::and(col("A"), col("B"));
        let expr = Expr::eq(lhs.clone(), col("C"));

        assert_eq!(
            expand(expr).unwrap(),
            Expr::or(
                Expr::and(lhs.clone(), col("C")),
                Expr::and(Expr::not(lhs), Expr::not(col("C"))),
            )
        );
    }

    #[test]
    fn ne_of_non_nullable_compound_expands_algebraically() {
        let rhs = Expr::or(col("B"), col("C"));
        let expr = Expr::ne(col("A"), rhs.clone());

        assert_eq!(
            expand(expr).unwrap(),
            Expr::or(
                Expr::and(col("A"), Expr::not(rhs.clone())),
                Expr::and(Expr::not(col("A")), rhs),
            )
        );
    }

    #[test]
    fn nullable_compound_is_case_wrapped() {
        let lhs = Expr::and(nullable("A"), col("B"));
        let expr = Expr::eq(lhs.clone(), col("C"));

        assert_eq!(
            expand(expr).unwrap(),
            Expr::eq(Expr::case(lhs), Expr::case(col("C")))
        );
    }

    #[test]
    fn nullable_atom_against_compound_is_case_wrapped() {
        let rhs = Expr::or(col("B"), col("C"));
        let expr = Expr::ne(nullable("A"), rhs.clone());

        assert_eq!(
            expand(expr).unwrap(),
            Expr::ne(Expr::case(nullable("A")), Expr::case(rhs))
        );
    }

    #[test]
    fn negated_atoms_left_alone() {
        let expr = Expr::eq(Expr::not(nullable("A")), col("B"));
        assert_eq!(expand(expr.clone()).unwrap(), expr);

        let expr = Expr::ne(col("A"), Expr::not(Expr::not(col("B"))));
        assert_eq!(expand(expr.clone()).unwrap(), expr);
    }

    #[test]
    fn compound_against_null_literal_is_case_wrapped() {
        let lhs = Expr::and(col("A"), col("B"));
        let expr = Expr::eq(lhs.clone(), Expr::null());

        assert_eq!(
            expand(expr).unwrap(),
            Expr::eq(Expr::case(lhs), Expr::case(Expr::null()))
        );
    }

    #[test]
    fn bound_params_are_not_nullable() {
        let params = Params::new().bind("p", false);
        let lhs = Expr::and(Expr::param("p", Type::Bool), col("B"));
        let expr = Expr::eq(lhs.clone(), col("C"));

        assert_eq!(
            expand_equality(expr, &params).unwrap(),
            Expr::or(
                Expr::and(lhs.clone(), col("C")),
                Expr::and(Expr::not(lhs), Expr::not(col("C"))),
            )
        );
    }

    #[test]
    fn bool_against_non_bool_is_type_mismatch() {
        let expr = Expr::eq(
            Expr::and(col("A"), col("B")),
            ExprColumn::new("e", "Count", Type::I64),
        );

        let err = expand(expr).unwrap_err();
        assert!(err.is_type_mismatch());
        assert_eq!(
            err.to_string(),
            "type mismatch: cannot compare Bool with I64"
        );
    }

    #[test]
    fn nested_comparisons_expanded() {
        let lhs = Expr::or(col("A"), col("D"));
        let expr = Expr::and(col("C"), Expr::ne(lhs.clone(), col("B")));

        assert_eq!(
            expand(expr).unwrap(),
            Expr::and(
                col("C"),
                Expr::or(
                    Expr::and(lhs.clone(), Expr::not(col("B"))),
                    Expr::and(Expr::not(lhs), col("B")),
                ),
            )
        );
    }
}
