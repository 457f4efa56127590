use super::{ExprColumn, ExprParam, Value};

/// Supplies values for the leaves of an expression during evaluation.
pub trait Input {
    fn resolve_column(&mut self, expr_column: &ExprColumn) -> Option<Value> {
        let _ = expr_column;
        None
    }

    fn resolve_param(&mut self, expr_param: &ExprParam) -> Option<Value> {
        let _ = expr_param;
        None
    }
}

/// Input for expressions without columns or parameters.
#[derive(Debug, Default)]
pub struct ConstInput {}

impl ConstInput {
    pub fn new() -> ConstInput {
        ConstInput {}
    }
}

impl Input for ConstInput {}

impl<T: Input> Input for &mut T {
    fn resolve_column(&mut self, expr_column: &ExprColumn) -> Option<Value> {
        Input::resolve_column(&mut **self, expr_column)
    }

    fn resolve_param(&mut self, expr_param: &ExprParam) -> Option<Value> {
        Input::resolve_param(&mut **self, expr_param)
    }
}
