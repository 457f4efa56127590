use super::{Expr, Type};

/// A query parameter. Its runtime value, when known, is supplied through
/// [`Params`](super::Params).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExprParam {
    pub name: String,
    pub ty: Type,
}

impl Expr {
    pub fn param(name: impl Into<String>, ty: Type) -> Self {
        ExprParam {
            name: name.into(),
            ty,
        }
        .into()
    }
}

impl From<ExprParam> for Expr {
    fn from(value: ExprParam) -> Self {
        Self::Param(value)
    }
}
