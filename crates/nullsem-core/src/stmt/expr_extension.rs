use super::{Expr, Type};

/// An expression node defined outside this crate.
///
/// Rewrite passes walk the operands and otherwise leave the node untouched.
/// Nullability analysis cannot see through it and fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExprExtension {
    /// Name of the node kind, used in error messages.
    pub kind: String,
    pub operands: Vec<Expr>,
    pub ty: Type,
}

impl Expr {
    pub fn extension(kind: impl Into<String>, operands: Vec<Expr>, ty: Type) -> Self {
        ExprExtension {
            kind: kind.into(),
            operands,
            ty,
        }
        .into()
    }
}

impl From<ExprExtension> for Expr {
    fn from(value: ExprExtension) -> Self {
        Self::Extension(value)
    }
}
