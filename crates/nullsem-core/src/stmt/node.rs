use super::{Visit, VisitMut};
use std::fmt;

/// A tree that a [`Visit`] or [`VisitMut`] implementation can walk.
///
/// Predicates are the only trees in this crate, so `Expr` is the only
/// implementor; the traversal helpers take `impl Node` so that a pass can be
/// started from the root without naming the variant.
pub trait Node: fmt::Debug {
    fn visit<V: Visit>(&self, visit: V)
    where
        Self: Sized;

    fn visit_mut<V: VisitMut>(&mut self, visit: V);
}
