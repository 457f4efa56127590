use super::Error;

/// Error when expression evaluation fails.
///
/// This occurs when:
/// - A column or parameter referenced by the expression has no value in the input
/// - A comparison or boolean operator receives an operand of the wrong type
/// - The expression contains a node that can only be evaluated by the database
///   (SQL functions, extension nodes)
#[derive(Debug)]
pub(super) struct ExpressionEvaluationFailed {
    message: Box<str>,
}

impl std::error::Error for ExpressionEvaluationFailed {}

impl core::fmt::Display for ExpressionEvaluationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "expression evaluation failed: {}", self.message)
    }
}

impl Error {
    /// Creates an expression evaluation failed error.
    pub fn expression_evaluation_failed(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ExpressionEvaluationFailed(
            ExpressionEvaluationFailed {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an expression evaluation failure.
    pub fn is_expression_evaluation_failed(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::ExpressionEvaluationFailed(_))
    }
}
