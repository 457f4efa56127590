mod eval;

mod expr;
pub use expr::Expr;

mod expr_and;
pub use expr_and::ExprAnd;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_case;
pub use expr_case::ExprCase;

mod expr_column;
pub use expr_column::ExprColumn;

mod expr_extension;
pub use expr_extension::ExprExtension;

mod expr_func;
pub use expr_func::ExprFunc;

mod expr_is_null;
pub use expr_is_null::ExprIsNull;

mod expr_not;
pub use expr_not::ExprNot;

mod expr_not_nullable;
pub use expr_not_nullable::ExprNotNullable;

mod expr_or;
pub use expr_or::ExprOr;

mod expr_param;
pub use expr_param::ExprParam;

mod input;
pub use input::{ConstInput, Input};

mod node;
pub use node::Node;

mod op_binary;
pub use op_binary::BinaryOp;

mod params;
pub use params::Params;

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;

pub mod visit;
pub use visit::Visit;

pub mod visit_mut;
pub use visit_mut::VisitMut;
