use super::Nullables;
use nullsem_core::{
    stmt::{self, BinaryOp, Expr, Params, VisitMut},
    Error, Result,
};

/// Rewrites `=` and `<>` comparisons so that, evaluated by the database with
/// three-valued logic, they give the result the query's source language
/// expects: two nulls are equal and null differs from every value.
///
/// With `L` and `R` the nullable atoms of each operand, `ISNULL(S)` true if
/// any atom of `S` is null and `ISNOTNULL(S)` true if none is:
///
/// ```text
/// l = r   (l nullable)   →  (l = r) AND ISNOTNULL(L)
/// l = r   (both)         →  ((l = r) OR (ISNULL(L) AND ISNULL(R)))
///                           AND ((ISNOTNULL(L) AND ISNOTNULL(R)) OR (ISNULL(L) AND ISNULL(R)))
/// l <> r  (l nullable)   →  (l <> r) OR ISNULL(L)
/// l <> r  (both)         →  ((l <> r) AND (ISNOTNULL(L) OR ISNOTNULL(R)))
///                           OR (ISNULL(L) AND ISNOTNULL(R)) OR (ISNOTNULL(L) AND ISNULL(R))
/// ```
///
/// The right-nullable cases mirror the left ones and comparisons without a
/// nullable operand are left alone. An operand projected with `CASE` is
/// guarded by the projected expression itself rather than by its atoms. `NOT l = r` with a nullable side is
/// rewritten against `l <> r`.
///
/// Every produced formula is wrapped in [`Expr::not_nullable`] so it is not
/// expanded again.
pub fn expand_null_semantics(mut expr: Expr, params: &Params) -> Result<Expr> {
    let mut expand = ExpandNullSemantics {
        params,
        error: None,
    };

    expand.visit_expr_mut(&mut expr);

    match expand.error {
        Some(err) => Err(err),
        None => Ok(expr),
    }
}

struct ExpandNullSemantics<'a> {
    params: &'a Params,
    error: Option<Error>,
}

impl VisitMut for ExpandNullSemantics<'_> {
    fn visit_expr_mut(&mut self, i: &mut Expr) {
        if self.error.is_some() {
            return;
        }

        // Null checks and expanded formulas are never null
        if matches!(i, Expr::IsNull(_) | Expr::NotNullable(_)) {
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
            Ok(Some(expr)) => *i = Expr::not_nullable(expr),
            Ok(None) => {}
            Err(err) => self.error = Some(err),
        }
    }
}

impl ExpandNullSemantics<'_> {
    fn expand(&self, op: BinaryOp, lhs: &mut Expr, rhs: &mut Expr) -> Result<Option<Expr>> {
        let l = self.operand_nullables(lhs)?;
        let r = self.operand_nullables(rhs)?;

        if l.is_empty() && r.is_empty() {
            return Ok(None);
        }

        let lhs = lhs.take();
        let rhs = rhs.take();

        Ok(Some(match (op, lhs) {
            (BinaryOp::Eq, Expr::Not(expr_not)) => expand_negated_eq(*expr_not.expr, rhs, &l, &r),
            (BinaryOp::Eq, lhs) => expand_eq(lhs, rhs, &l, &r),
            (BinaryOp::Ne, lhs) => expand_ne(lhs, rhs, &l, &r),
        }))
    }

    /// A `CASE` projection turns null into false, so when the projected
    /// expression may be null it is guarded as a whole. Comparisons inside it
    /// have already been expanded at this point.
    fn operand_nullables(&self, operand: &Expr) -> Result<Nullables> {
        let Expr::Case(expr_case) = operand else {
            return Nullables::extract(operand, self.params);
        };

        let nullables = Nullables::extract(&expr_case.expr, self.params)?;

        if nullables.is_empty() {
            Ok(nullables)
        } else {
            Ok(Nullables::from((*expr_case.expr).clone()))
        }
    }
}

fn expand_eq(lhs: Expr, rhs: Expr, l: &Nullables, r: &Nullables) -> Expr {
    let eq = Expr::eq(lhs, rhs);

    match (l.is_empty(), r.is_empty()) {
        (false, true) => Expr::and(eq, l.is_not_null()),
        (true, false) => Expr::and(eq, r.is_not_null()),
        _ => {
            let both_null = Expr::and(l.is_null(), r.is_null());

            Expr::and(
                Expr::or(eq, both_null.clone()),
                Expr::or(Expr::and(l.is_not_null(), r.is_not_null()), both_null),
            )
        }
    }
}

fn expand_ne(lhs: Expr, rhs: Expr, l: &Nullables, r: &Nullables) -> Expr {
    let ne = Expr::ne(lhs, rhs);

    match (l.is_empty(), r.is_empty()) {
        (false, true) => Expr::or(ne, l.is_null()),
        (true, false) => Expr::or(ne, r.is_null()),
        _ => Expr::or(
            Expr::and(ne, Expr::or(l.is_not_null(), r.is_not_null())),
            Expr::or(
                Expr::and(l.is_null(), r.is_not_null()),
                Expr::and(l.is_not_null(), r.is_null()),
            ),
        ),
    }
}

/// `NOT l = r`, compared as `l <> r`.
fn expand_negated_eq(lhs: Expr, rhs: Expr, l: &Nullables, r: &Nullables) -> Expr {
    Expr::and(
        Expr::or(Expr::ne(lhs, rhs), Expr::and(l.is_null(), r.is_null())),
        Expr::and(
            Expr::or(l.is_null(), r.is_not_null()),
            Expr::or(l.is_not_null(), r.is_null()),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nullsem_core::stmt::{ExprColumn, Type, Value};
    use pretty_assertions::assert_eq;

    fn col(name: &str) -> Expr {
        ExprColumn::new("e", name, Type::Bool).into()
    }

    fn nullable(name: &str) -> Expr {
        ExprColumn::nullable("e", name, Type::Bool).into()
    }

    fn expand(expr: Expr) -> String {
        expand_null_semantics(expr, &Params::new())
            .unwrap()
            .to_string()
    }

    #[test]
    fn non_nullable_left_alone() {
        let expr = Expr::eq(col("A"), col("B"));
        assert_eq!(
            expand_null_semantics(expr.clone(), &Params::new()).unwrap(),
            expr
        );

        let expr = Expr::ne(col("A"), col("B"));
        assert_eq!(
            expand_null_semantics(expr.clone(), &Params::new()).unwrap(),
            expr
        );
    }

    #[test]
    fn eq_left_nullable() {
        assert_eq!(
            expand(Expr::eq(nullable("A"), col("B"))),
            "(e.A = e.B) AND e.A IS NOT NULL"
        );
    }

    #[test]
    fn eq_right_nullable() {
        assert_eq!(
            expand(Expr::eq(col("A"), nullable("B"))),
            "(e.A = e.B) AND e.B IS NOT NULL"
        );
    }

    #[test]
    fn eq_both_nullable() {
        assert_eq!(
            expand(Expr::eq(nullable("A"), nullable("B"))),
            "((e.A = e.B) OR (e.A IS NULL AND e.B IS NULL)) AND \
             ((e.A IS NOT NULL AND e.B IS NOT NULL) OR (e.A IS NULL AND e.B IS NULL))"
        );
    }

    #[test]
    fn ne_left_nullable() {
        assert_eq!(
            expand(Expr::ne(nullable("A"), col("B"))),
            "(e.A <> e.B) OR e.A IS NULL"
        );
    }

    #[test]
    fn ne_right_nullable() {
        assert_eq!(
            expand(Expr::ne(col("A"), nullable("B"))),
            "(e.A <> e.B) OR e.B IS NULL"
        );
    }

    #[test]
    fn ne_both_nullable() {
        assert_eq!(
            expand(Expr::ne(nullable("A"), nullable("B"))),
            "((e.A <> e.B) AND (e.A IS NOT NULL OR e.B IS NOT NULL)) OR \
             (e.A IS NULL AND e.B IS NOT NULL) OR (e.A IS NOT NULL AND e.B IS NULL)"
        );
    }

    #[test]
    fn negated_eq_both_nullable() {
        assert_eq!(
            expand(Expr::eq(Expr::not(nullable("A")), nullable("B"))),
            "((e.A <> e.B) OR (e.A IS NULL AND e.B IS NULL)) AND \
             (e.A IS NULL OR e.B IS NOT NULL) AND (e.A IS NOT NULL OR e.B IS NULL)"
        );
    }

    #[test]
    fn negated_eq_left_nullable() {
        assert_eq!(
            expand(Expr::eq(Expr::not(nullable("A")), col("B"))),
            "(e.A <> e.B) AND e.A IS NOT NULL"
        );
    }

    #[test]
    fn null_constant_operand() {
        assert_eq!(
            expand(Expr::eq(col("A"), Expr::null())),
            "(e.A = NULL) AND NULL IS NOT NULL"
        );
    }

    #[test]
    fn result_is_marked_not_nullable() {
        let expr = expand_null_semantics(Expr::eq(nullable("A"), col("B")), &Params::new()).unwrap();
        assert!(expr.is_not_nullable());
    }

    #[test]
    fn expanded_formula_not_expanded_again() {
        let once = expand_null_semantics(Expr::eq(nullable("A"), nullable("B")), &Params::new())
            .unwrap();
        let twice = expand_null_semantics(once.clone(), &Params::new()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn comparisons_inside_junctions() {
        let expr = Expr::or(Expr::eq(nullable("A"), col("B")), Expr::eq(col("C"), col("D")));
        assert_eq!(expand(expr), "((e.A = e.B) AND e.A IS NOT NULL) OR (e.C = e.D)");
    }

    #[test]
    fn params_follow_bindings() {
        let expr = Expr::eq(Expr::param("p", Type::Bool), col("B"));

        let params = Params::new().bind("p", true);
        assert_eq!(
            expand_null_semantics(expr.clone(), &params).unwrap(),
            expr
        );

        let params = Params::new().bind("p", Value::Null);
        assert_eq!(
            expand_null_semantics(expr, &params).unwrap().to_string(),
            "(@p = e.B) AND @p IS NOT NULL"
        );
    }

    #[test]
    fn multi_atom_operands_guard_every_atom() {
        let lhs = Expr::func("COALESCE", vec![nullable("A"), nullable("B")], Type::Bool);
        assert_eq!(
            expand(Expr::ne(lhs, col("C"))),
            "(COALESCE(e.A, e.B) <> e.C) OR e.A IS NULL OR e.B IS NULL"
        );
    }

    #[test]
    fn projected_operand_guarded_as_a_whole() {
        let lhs = Expr::case(Expr::and(nullable("A"), col("B")));
        assert_eq!(
            expand(Expr::eq(lhs, Expr::case(col("C")))),
            "(CASE WHEN e.A AND e.B THEN 1 ELSE 0 END = CASE WHEN e.C THEN 1 ELSE 0 END) \
             AND (e.A AND e.B) IS NOT NULL"
        );
    }

    #[test]
    fn projection_of_non_nullable_operand_not_guarded() {
        let expr = Expr::ne(
            Expr::case(Expr::or(col("A"), col("B"))),
            Expr::case(col("C")),
        );
        assert_eq!(
            expand_null_semantics(expr.clone(), &Params::new()).unwrap(),
            expr
        );
    }

    #[test]
    fn projected_null_literal() {
        let expr = Expr::ne(Expr::case(Expr::and(col("A"), col("B"))), Expr::case(Expr::null()));
        assert_eq!(
            expand(expr),
            "(CASE WHEN e.A AND e.B THEN 1 ELSE 0 END <> CASE WHEN NULL THEN 1 ELSE 0 END) \
             OR NULL IS NULL"
        );
    }

    #[test]
    fn extension_operand_is_unsupported() {
        let expr = Expr::eq(
            Expr::extension("json_path", vec![nullable("A")], Type::Bool),
            col("B"),
        );

        let err = expand_null_semantics(expr, &Params::new()).unwrap_err();
        assert!(err.is_unsupported_expression());
    }
}
