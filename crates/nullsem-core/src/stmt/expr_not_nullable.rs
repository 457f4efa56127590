use super::Expr;

/// Wraps a formula that has already been made null-safe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExprNotNullable {
    pub expr: Box<Expr>,
}

impl Expr {
    pub fn not_nullable(expr: impl Into<Self>) -> Self {
        match expr.into() {
            expr @ Self::NotNullable(_) => expr,
            expr => ExprNotNullable {
                expr: Box::new(expr),
            }
            .into(),
        }
    }

    pub fn is_not_nullable(&self) -> bool {
        matches!(self, Self::NotNullable(_))
    }
}

impl From<ExprNotNullable> for Expr {
    fn from(value: ExprNotNullable) -> Self {
        Self::NotNullable(value)
    }
}
