use super::{Expr, Type};

/// A SQL function call, e.g. `LEN(x)` or `UPPER(x)`.
///
/// The function is produced by a provider specific method translator. The
/// result may be null whenever one of the arguments may be null.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExprFunc {
    pub name: String,
    pub args: Vec<Expr>,
    pub ty: Type,
}

impl Expr {
    pub fn func(name: impl Into<String>, args: Vec<Expr>, ty: Type) -> Self {
        ExprFunc {
            name: name.into(),
            args,
            ty,
        }
        .into()
    }
}

impl From<ExprFunc> for Expr {
    fn from(value: ExprFunc) -> Self {
        Self::Func(value)
    }
}
