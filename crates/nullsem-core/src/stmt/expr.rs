use super::*;
use std::fmt;

#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// AND a set of boolean expressions
    And(ExprAnd),

    /// Equality or inequality comparison
    BinaryOp(ExprBinaryOp),

    /// Projects a three-valued boolean expression onto `true`/`false`
    Case(ExprCase),

    /// References a column of a table in the query
    Column(ExprColumn),

    /// A node kind owned by the SQL generation layer. The rewrite passes
    /// only walk its operands.
    Extension(ExprExtension),

    /// SQL function call
    Func(ExprFunc),

    /// Whether an expression is (or is not) null. This is different from a
    /// binary expression because of how databases treat null comparisons.
    IsNull(ExprIsNull),

    /// Negates a boolean expression
    Not(ExprNot),

    /// Marks a formula produced by the null-semantics expansion. It never
    /// evaluates to null and is not expanded again.
    NotNullable(ExprNotNullable),

    /// OR a set of boolean expressions
    Or(ExprOr),

    /// A query parameter, bound through the parameter-value table
    Param(ExprParam),

    /// Evaluates to a constant value
    Value(Value),
}

impl Expr {
    pub fn null() -> Self {
        Self::Value(Value::Null)
    }

    /// Is a value that evaluates to null
    pub fn is_value_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    /// Returns true if the expression is the `true` boolean expression
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Value(Value::Bool(true)))
    }

    /// Returns `true` if the expression is the `false` boolean expression
    pub fn is_false(&self) -> bool {
        matches!(self, Self::Value(Value::Bool(false)))
    }

    /// Returns true if the expression is a constant value.
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(..))
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(..))
    }

    pub fn is_param(&self) -> bool {
        matches!(self, Self::Param(..))
    }

    /// Returns `true` for the leaves a comparison can use directly: columns,
    /// parameters and constants.
    pub fn is_atom(&self) -> bool {
        matches!(self, Self::Column(..) | Self::Param(..) | Self::Value(..))
    }

    /// The static type of the expression.
    pub fn ty(&self) -> Type {
        match self {
            Self::And(_)
            | Self::BinaryOp(_)
            | Self::Case(_)
            | Self::IsNull(_)
            | Self::Not(_)
            | Self::NotNullable(_)
            | Self::Or(_) => Type::Bool,
            Self::Column(e) => e.ty,
            Self::Extension(e) => e.ty,
            Self::Func(e) => e.ty,
            Self::Param(e) => e.ty,
            Self::Value(value) => value.infer_ty(),
        }
    }

    pub fn take(&mut self) -> Self {
        std::mem::replace(self, Self::Value(Value::Null))
    }
}

impl Default for Expr {
    fn default() -> Self {
        Self::Value(Value::default())
    }
}

impl Node for Expr {
    fn visit<V: Visit>(&self, mut visit: V) {
        visit.visit_expr(self);
    }

    fn visit_mut<V: VisitMut>(&mut self, mut visit: V) {
        visit.visit_expr_mut(self);
    }
}

// === Conversions ===

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Value(value.into())
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And(e) => fmt::Debug::fmt(e, f),
            Self::BinaryOp(e) => fmt::Debug::fmt(e, f),
            Self::Case(e) => fmt::Debug::fmt(e, f),
            Self::Column(e) => fmt::Debug::fmt(e, f),
            Self::Extension(e) => fmt::Debug::fmt(e, f),
            Self::Func(e) => fmt::Debug::fmt(e, f),
            Self::IsNull(e) => fmt::Debug::fmt(e, f),
            Self::Not(e) => fmt::Debug::fmt(e, f),
            Self::NotNullable(e) => fmt::Debug::fmt(e, f),
            Self::Or(e) => fmt::Debug::fmt(e, f),
            Self::Param(e) => fmt::Debug::fmt(e, f),
            Self::Value(e) => fmt::Debug::fmt(e, f),
        }
    }
}

/// Renders the predicate with SQL-like infix syntax. This is a diagnostic
/// rendering for logs and tests; dialect specific SQL generation happens
/// downstream.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And(e) => fmt_junction(f, &e.operands, " AND "),
            Self::BinaryOp(e) => write!(f, "{} {} {}", Operand(&e.lhs), e.op, Operand(&e.rhs)),
            Self::Case(e) => write!(f, "CASE WHEN {} THEN 1 ELSE 0 END", e.expr),
            Self::Column(e) => write!(f, "{}.{}", e.table, e.name),
            Self::Extension(e) => fmt_call(f, &e.kind, &e.operands),
            Self::Func(e) => fmt_call(f, &e.name, &e.args),
            Self::IsNull(e) if e.negate => write!(f, "{} IS NOT NULL", Operand(&e.expr)),
            Self::IsNull(e) => write!(f, "{} IS NULL", Operand(&e.expr)),
            Self::Not(e) => write!(f, "NOT ({})", e.expr),
            Self::NotNullable(e) => fmt::Display::fmt(&e.expr, f),
            Self::Or(e) => fmt_junction(f, &e.operands, " OR "),
            Self::Param(e) => write!(f, "@{}", e.name),
            Self::Value(value) => fmt::Display::fmt(value, f),
        }
    }
}

/// Wraps comparisons and junctions in parentheses when they appear as an
/// operand of another operator.
struct Operand<'a>(&'a Expr);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut expr = self.0;

        while let Expr::NotNullable(inner) = expr {
            expr = &inner.expr;
        }

        match expr {
            Expr::And(_) | Expr::BinaryOp(_) | Expr::Or(_) => write!(f, "({expr})"),
            _ => fmt::Display::fmt(expr, f),
        }
    }
}

fn fmt_junction(f: &mut fmt::Formatter<'_>, operands: &[Expr], sep: &str) -> fmt::Result {
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }

        write!(f, "{}", Operand(operand))?;
    }

    Ok(())
}

fn fmt_call(f: &mut fmt::Formatter<'_>, name: &str, args: &[Expr]) -> fmt::Result {
    write!(f, "{name}(")?;

    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }

        fmt::Display::fmt(arg, f)?;
    }

    f.write_str(")")
}
