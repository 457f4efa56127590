use super::Error;

/// Error when a pass reaches an expression node it cannot reason about.
///
/// Raised for extension nodes added by the SQL generation layer, whose
/// nullability is unknown.
#[derive(Debug)]
pub(super) struct UnsupportedExpression {
    kind: Box<str>,
}

impl std::error::Error for UnsupportedExpression {}

impl core::fmt::Display for UnsupportedExpression {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported expression: {}", self.kind)
    }
}

impl Error {
    /// Creates an unsupported expression error naming the node kind.
    pub fn unsupported_expression(kind: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedExpression(
            UnsupportedExpression {
                kind: kind.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unsupported expression error.
    pub fn is_unsupported_expression(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::UnsupportedExpression(_))
    }
}
