use super::Expr;

/// Projects a boolean expression onto a two-valued result.
///
/// Evaluates to `true` when the inner expression is `true` and to `false`
/// when it is `false` or null. Rendered downstream as
/// `CASE WHEN <expr> THEN 1 ELSE 0 END`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExprCase {
    pub expr: Box<Expr>,
}

impl Expr {
    pub fn case(expr: impl Into<Self>) -> Self {
        ExprCase {
            expr: Box::new(expr.into()),
        }
        .into()
    }

    pub fn is_case(&self) -> bool {
        matches!(self, Self::Case(_))
    }
}

impl From<ExprCase> for Expr {
    fn from(value: ExprCase) -> Self {
        Self::Case(value)
    }
}
