use super::{Expr, Type};

/// References a column of a table in the query.
///
/// Whether the column may hold null comes from the schema and never changes
/// while a predicate is rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExprColumn {
    /// Alias of the table the column belongs to
    pub table: String,

    /// Column name
    pub name: String,

    /// Column type
    pub ty: Type,

    /// `true` if the column is declared nullable
    pub nullable: bool,
}

impl ExprColumn {
    /// A column declared `NOT NULL`.
    pub fn new(table: impl Into<String>, name: impl Into<String>, ty: Type) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
            ty,
            nullable: false,
        }
    }

    /// A column that may hold null.
    pub fn nullable(table: impl Into<String>, name: impl Into<String>, ty: Type) -> Self {
        Self {
            nullable: true,
            ..Self::new(table, name, ty)
        }
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Self::Column(value)
    }
}

impl From<&ExprColumn> for Expr {
    fn from(value: &ExprColumn) -> Self {
        Self::Column(value.clone())
    }
}
