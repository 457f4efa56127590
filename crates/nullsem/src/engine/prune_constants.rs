use super::Nullables;
use nullsem_core::stmt::{self, BinaryOp, Expr, Params, VisitMut};

/// Removes comparisons of a boolean expression against a boolean constant.
///
/// * `x = true` → `x`
/// * `x = false` → `NOT x`
/// * `x <> true` → `NOT x`
/// * `x <> false` → `x`
///
/// The constant may be on either side. The rewrite only applies when `x`
/// cannot be null: with `x` null, `x <> true` holds while `NOT x` is null.
/// Parameter values are not known at this point, so a comparison with a
/// parameter operand is left for the null-semantics expansion, as is any
/// comparison against the null literal.
pub fn prune_constants(mut expr: Expr) -> Expr {
    PruneConstants.visit_expr_mut(&mut expr);
    expr
}

struct PruneConstants;

impl VisitMut for PruneConstants {
    fn visit_expr_mut(&mut self, i: &mut Expr) {
        stmt::visit_mut::visit_expr_mut(self, i);

        let maybe_expr = match i {
            Expr::BinaryOp(expr_binary_op) => {
                prune(expr_binary_op.op, &mut expr_binary_op.lhs, &mut expr_binary_op.rhs)
            }
            _ => None,
        };

        if let Some(expr) = maybe_expr {
            *i = expr;
        }
    }
}

fn prune(op: BinaryOp, lhs: &mut Expr, rhs: &mut Expr) -> Option<Expr> {
    let (constant, expr) = if let Some(b) = as_bool(rhs).filter(|_| is_prunable(lhs)) {
        (b, lhs)
    } else if let Some(b) = as_bool(lhs).filter(|_| is_prunable(rhs)) {
        (b, rhs)
    } else {
        return None;
    };

    let expr = expr.take();

    // `x = true` and `x <> false` keep `x`, the other two negate it
    Some(if constant == op.is_eq() {
        expr
    } else {
        Expr::not(expr)
    })
}

fn is_prunable(expr: &Expr) -> bool {
    // Nodes whose nullability is unknown are kept
    expr.ty().is_bool()
        && Nullables::extract(expr, &Params::new()).is_ok_and(|nullables| nullables.is_empty())
}

fn as_bool(expr: &Expr) -> Option<bool> {
    match expr {
        Expr::Value(value) => value.as_bool(),
        _ => None,
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

    #[test]
    fn eq_true_is_operand() {
        assert_eq!(prune_constants(Expr::eq(col("A"), true)), col("A"));
        assert_eq!(prune_constants(Expr::eq(true, col("A"))), col("A"));
    }

    #[test]
    fn eq_false_is_negation() {
        assert_eq!(
            prune_constants(Expr::eq(col("A"), false)),
            Expr::not(col("A"))
        );
        assert_eq!(
            prune_constants(Expr::eq(false, col("A"))),
            Expr::not(col("A"))
        );
    }

    #[test]
    fn ne_true_is_negation() {
        assert_eq!(
            prune_constants(Expr::ne(col("A"), true)),
            Expr::not(col("A"))
        );
        assert_eq!(
            prune_constants(Expr::ne(true, col("A"))),
            Expr::not(col("A"))
        );
    }

    #[test]
    fn ne_false_is_operand() {
        assert_eq!(prune_constants(Expr::ne(col("A"), false)), col("A"));
        assert_eq!(prune_constants(Expr::ne(false, col("A"))), col("A"));
    }

    #[test]
    fn nested_comparisons_pruned_bottom_up() {
        // `(A = true) = false` → `NOT A`
        let expr = Expr::eq(Expr::eq(col("A"), true), false);
        assert_eq!(prune_constants(expr), Expr::not(col("A")));

        // `(A AND (B <> false))` → `A AND B`
        let expr = Expr::and(col("A"), Expr::ne(col("B"), false));
        assert_eq!(prune_constants(expr), Expr::and(col("A"), col("B")));
    }

    #[test]
    fn compound_operand_is_kept_whole() {
        let expr = Expr::eq(Expr::or(col("A"), col("B")), false);
        assert_eq!(
            prune_constants(expr),
            Expr::not(Expr::or(col("A"), col("B")))
        );
    }

    #[test]
    fn null_constant_left_alone() {
        let expr = Expr::eq(col("A"), Expr::null());
        assert_eq!(prune_constants(expr.clone()), expr);
    }

    #[test]
    fn nullable_operand_left_alone() {
        let nullable = Expr::from(ExprColumn::nullable("e", "A", Type::Bool));

        let expr = Expr::ne(nullable.clone(), true);
        assert_eq!(prune_constants(expr.clone()), expr);

        let expr = Expr::eq(false, Expr::and(col("B"), nullable));
        assert_eq!(prune_constants(expr.clone()), expr);
    }

    #[test]
    fn param_operand_left_alone() {
        let expr = Expr::eq(Expr::param("p", Type::Bool), true);
        assert_eq!(prune_constants(expr.clone()), expr);
    }

    #[test]
    fn null_checks_are_never_null() {
        let expr = Expr::eq(Expr::is_null(ExprColumn::nullable("e", "A", Type::Bool)), false);
        assert_eq!(
            prune_constants(expr),
            Expr::not(Expr::is_null(ExprColumn::nullable("e", "A", Type::Bool)))
        );
    }

    #[test]
    fn extension_operand_left_alone() {
        let expr = Expr::eq(Expr::extension("json_path", vec![], Type::Bool), true);
        assert_eq!(prune_constants(expr.clone()), expr);
    }

    #[test]
    fn non_bool_operand_left_alone() {
        let expr = Expr::eq(ExprColumn::new("e", "Count", Type::I64), true);
        assert_eq!(prune_constants(expr.clone()), expr);
    }

    #[test]
    fn comparison_between_columns_left_alone() {
        let expr = Expr::eq(col("A"), col("B"));
        assert_eq!(prune_constants(expr.clone()), expr);
    }
}
