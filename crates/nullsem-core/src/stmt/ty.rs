/// An expression type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Signed 64-bit integer
    I64,

    /// String type
    String,

    /// The type of the null literal. It can be compared with any type.
    Null,
}

impl Type {
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if a value of this type can take part in a boolean
    /// comparison, i.e. it is either `Bool` or the untyped null literal.
    pub fn is_bool_like(&self) -> bool {
        matches!(self, Self::Bool | Self::Null)
    }
}
