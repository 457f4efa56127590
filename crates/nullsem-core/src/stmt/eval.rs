use crate::{
    stmt::{BinaryOp, ConstInput, Expr, Input, Value},
    Error, Result,
};

/// How comparisons treat null operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Semantics {
    /// SQL: comparing anything with null yields null.
    ThreeValued,

    /// Source language: `null == null` is `true` and `null == x` is `false`.
    TwoValued,
}

impl Expr {
    /// Evaluates the expression the way the database would, using three-valued
    /// logic.
    pub fn eval(&self, mut input: impl Input) -> Result<Value> {
        self.eval_ref(Semantics::ThreeValued, &mut input)
    }

    pub fn eval_const(&self) -> Result<Value> {
        self.eval(ConstInput::new())
    }

    /// Evaluates the expression with the comparison semantics of the query's
    /// source language, where two nulls compare equal.
    ///
    /// Negation, conjunction and disjunction of nullable booleans still
    /// propagate null, matching lifted boolean operators.
    pub fn eval_two_valued(&self, mut input: impl Input) -> Result<Value> {
        self.eval_ref(Semantics::TwoValued, &mut input)
    }

    fn eval_ref(&self, semantics: Semantics, input: &mut impl Input) -> Result<Value> {
        match self {
            Expr::And(expr_and) => {
                debug_assert!(!expr_and.operands.is_empty());
                let mut unknown = false;

                for operand in &expr_and.operands {
                    match operand.eval_ref_bool(semantics, input)? {
                        Some(false) => return Ok(false.into()),
                        Some(true) => {}
                        None => unknown = true,
                    }
                }

                Ok(if unknown { Value::Null } else { true.into() })
            }
            Expr::Or(expr_or) => {
                debug_assert!(!expr_or.operands.is_empty());
                let mut unknown = false;

                for operand in &expr_or.operands {
                    match operand.eval_ref_bool(semantics, input)? {
                        Some(true) => return Ok(true.into()),
                        Some(false) => {}
                        None => unknown = true,
                    }
                }

                Ok(if unknown { Value::Null } else { false.into() })
            }
            Expr::BinaryOp(expr_binary_op) => {
                let lhs = expr_binary_op.lhs.eval_ref(semantics, input)?;
                let rhs = expr_binary_op.rhs.eval_ref(semantics, input)?;

                if semantics == Semantics::ThreeValued && (lhs.is_null() || rhs.is_null()) {
                    return Ok(Value::Null);
                }

                match expr_binary_op.op {
                    BinaryOp::Eq => Ok((lhs == rhs).into()),
                    BinaryOp::Ne => Ok((lhs != rhs).into()),
                }
            }
            Expr::Case(expr_case) => {
                let value = expr_case.expr.eval_ref_bool(semantics, input)?;
                Ok(value.unwrap_or(false).into())
            }
            Expr::Column(expr_column) => input.resolve_column(expr_column).ok_or_else(|| {
                Error::expression_evaluation_failed(format!(
                    "no value for column `{}.{}`",
                    expr_column.table, expr_column.name
                ))
            }),
            Expr::Extension(expr_extension) => Err(Error::expression_evaluation_failed(format!(
                "cannot evaluate `{}` expression",
                expr_extension.kind
            ))),
            Expr::Func(expr_func) => Err(Error::expression_evaluation_failed(format!(
                "cannot evaluate SQL function `{}`",
                expr_func.name
            ))),
            Expr::IsNull(expr_is_null) => {
                let value = expr_is_null.expr.eval_ref(semantics, input)?;
                Ok((value.is_null() != expr_is_null.negate).into())
            }
            Expr::Not(expr_not) => {
                let value = expr_not.expr.eval_ref_bool(semantics, input)?;
                Ok(value.map(|value| !value).into())
            }
            Expr::NotNullable(expr_not_nullable) => {
                expr_not_nullable.expr.eval_ref(semantics, input)
            }
            Expr::Param(expr_param) => input.resolve_param(expr_param).ok_or_else(|| {
                Error::expression_evaluation_failed(format!(
                    "no value for parameter `@{}`",
                    expr_param.name
                ))
            }),
            Expr::Value(value) => Ok(value.clone()),
        }
    }

    /// Evaluates a boolean operand; `None` stands for null.
    fn eval_ref_bool(&self, semantics: Semantics, input: &mut impl Input) -> Result<Option<bool>> {
        match self.eval_ref(semantics, input)? {
            Value::Bool(value) => Ok(Some(value)),
            Value::Null => Ok(None),
            value => Err(Error::expression_evaluation_failed(format!(
                "expected boolean operand; actual={value:?}"
            ))),
        }
    }
}
