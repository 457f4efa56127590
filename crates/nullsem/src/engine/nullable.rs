use indexmap::IndexSet;
use nullsem_core::{
    stmt::{self, Expr, Params, Value, Visit},
    Error, Result,
};
use tracing::debug;

/// The sub-expressions of an operand that may evaluate to null at runtime.
///
/// Entries are unique and kept in the order they were first encountered,
/// which keeps the generated guards deterministic.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Nullables {
    exprs: IndexSet<Expr>,
}

impl Nullables {
    /// Collects the nullable atoms of `expr`.
    ///
    /// Constants are nullable when they are the null literal and columns when
    /// the schema declares them nullable. A parameter is nullable when it is
    /// bound to null, when it has no binding, or when no parameter values are
    /// known at all. Null checks, `CASE` projections and already expanded
    /// formulas never evaluate to null and are not descended into.
    ///
    /// Fails on extension nodes, whose nullability cannot be determined.
    pub fn extract(expr: &Expr, params: &Params) -> Result<Nullables> {
        let mut extract = Extract {
            params,
            nullables: Nullables::default(),
            error: None,
        };

        extract.visit_expr(expr);

        match extract.error {
            Some(err) => Err(err),
            None => Ok(extract.nullables),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn contains(&self, expr: &Expr) -> bool {
        self.exprs.contains(expr)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expr> {
        self.exprs.iter()
    }

    /// `true` if any of the atoms is null: `a IS NULL OR b IS NULL ...`.
    ///
    /// Evaluates to the constant `false` when the set is empty.
    pub fn is_null(&self) -> Expr {
        Expr::or_from_vec(self.exprs.iter().cloned().map(Expr::is_null).collect())
    }

    /// `true` if none of the atoms is null: `a IS NOT NULL AND b IS NOT NULL ...`.
    ///
    /// Evaluates to the constant `true` when the set is empty.
    pub fn is_not_null(&self) -> Expr {
        Expr::and_from_vec(self.exprs.iter().cloned().map(Expr::is_not_null).collect())
    }

    fn insert(&mut self, expr: impl Into<Expr>) {
        self.exprs.insert(expr.into());
    }
}

impl From<Expr> for Nullables {
    /// A set guarding `expr` as a single unit.
    fn from(expr: Expr) -> Self {
        Nullables {
            exprs: IndexSet::from([expr]),
        }
    }
}

struct Extract<'a> {
    params: &'a Params,
    nullables: Nullables,
    error: Option<Error>,
}

impl Visit for Extract<'_> {
    fn visit_expr(&mut self, i: &Expr) {
        if self.error.is_some() {
            return;
        }

        match i {
            // Null checks and CASE projections always yield true or false.
            Expr::IsNull(_) | Expr::Case(_) | Expr::NotNullable(_) => {}
            Expr::Extension(expr_extension) => {
                self.error = Some(Error::unsupported_expression(&expr_extension.kind));
            }
            _ => stmt::visit::visit_expr(self, i),
        }
    }

    fn visit_expr_column(&mut self, i: &stmt::ExprColumn) {
        if i.nullable {
            self.nullables.insert(i.clone());
        }
    }

    fn visit_expr_param(&mut self, i: &stmt::ExprParam) {
        if self.params.is_empty() {
            // No parameter values are known, assume every parameter is nullable
            self.nullables.insert(i.clone());
            return;
        }

        match self.params.get(&i.name) {
            Some(Value::Null) => self.nullables.insert(i.clone()),
            Some(_) => {}
            None => {
                debug!(param = %i.name, "no value bound for parameter; treating as nullable");
                self.nullables.insert(i.clone());
            }
        }
    }

    fn visit_value(&mut self, i: &Value) {
        if i.is_null() {
            self.nullables.insert(Value::Null);
        }
    }
}
