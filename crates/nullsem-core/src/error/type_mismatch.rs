use super::Error;
use crate::stmt::Type;

/// Error when a boolean comparison is rewritten but one operand is not
/// boolean.
///
/// Predicates reach the rewrite passes after type checking, so this always
/// indicates a bug in the code that built the expression tree.
#[derive(Debug)]
pub(super) struct TypeMismatch {
    lhs: Type,
    rhs: Type,
}

impl std::error::Error for TypeMismatch {}

impl core::fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "type mismatch: cannot compare {:?} with {:?}",
            self.lhs, self.rhs
        )
    }
}

impl Error {
    /// Creates a type mismatch error for a comparison between `lhs` and `rhs`.
    pub fn type_mismatch(lhs: Type, rhs: Type) -> Error {
        Error::from(super::ErrorKind::TypeMismatch(TypeMismatch { lhs, rhs }))
    }

    /// Returns `true` if this error is a type mismatch error.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::TypeMismatch(_))
    }
}
