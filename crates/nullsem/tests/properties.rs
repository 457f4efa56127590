use nullsem::{
    expand_null_semantics, optimize_negation, prune_constants,
    stmt::{Expr, ExprColumn, ExprParam, Input, Params, Type, Value},
};
use proptest::prelude::*;

/// Columns `A` and `B` are nullable, `C` and `D` are not.
fn column(name: &'static str) -> Expr {
    match name {
        "A" | "B" => ExprColumn::nullable("e", name, Type::Bool).into(),
        _ => ExprColumn::new("e", name, Type::Bool).into(),
    }
}

fn arb_column() -> impl Strategy<Value = Expr> {
    prop::sample::select(vec!["A", "B", "C", "D"]).prop_map(column)
}

fn arb_non_nullable_column() -> impl Strategy<Value = Expr> {
    prop::sample::select(vec!["C", "D"]).prop_map(column)
}

/// Columns, the parameter `p` and boolean or null constants.
fn arb_atom() -> impl Strategy<Value = Expr> {
    prop_oneof![
        4 => arb_column(),
        1 => Just(Expr::param("p", Type::Bool)),
        1 => Just(Expr::from(true)),
        1 => Just(Expr::from(false)),
        1 => Just(Expr::null()),
    ]
}

fn arb_value(nullable: bool) -> impl Strategy<Value = Value> {
    if nullable {
        prop_oneof![Just(Value::Bool(false)), Just(Value::Bool(true)), Just(Value::Null)].boxed()
    } else {
        any::<bool>().prop_map(Value::Bool).boxed()
    }
}

/// Boolean predicates combining `leaf` with every node kind the rewrite
/// passes handle.
fn arb_predicate(leaf: impl Strategy<Value = Expr> + 'static) -> impl Strategy<Value = Expr> {
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Expr::not),
            inner.clone().prop_map(Expr::is_null),
            (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| Expr::and(lhs, rhs)),
            (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| Expr::or(lhs, rhs)),
            (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| Expr::eq(lhs, rhs)),
            (inner.clone(), inner).prop_map(|(lhs, rhs)| Expr::ne(lhs, rhs)),
        ]
    })
}

/// An atom, possibly negated.
fn arb_operand_atom() -> BoxedStrategy<Expr> {
    (arb_atom(), any::<bool>())
        .prop_map(|(atom, negate)| if negate { Expr::not(atom) } else { atom })
        .boxed()
}

/// An atom or a conjunction or disjunction of two atoms, each possibly
/// negated.
fn arb_operand() -> BoxedStrategy<Expr> {
    prop_oneof![
        2 => arb_operand_atom(),
        1 => (arb_operand_atom(), arb_operand_atom()).prop_map(|(lhs, rhs)| Expr::and(lhs, rhs)),
        1 => (arb_operand_atom(), arb_operand_atom()).prop_map(|(lhs, rhs)| Expr::or(lhs, rhs)),
    ]
    .boxed()
}

/// A comparison between two operands.
fn arb_comparison() -> impl Strategy<Value = Expr> {
    (arb_operand(), any::<bool>(), arb_operand()).prop_map(|(lhs, eq, rhs)| {
        if eq {
            Expr::eq(lhs, rhs)
        } else {
            Expr::ne(lhs, rhs)
        }
    })
}

#[derive(Debug)]
struct Row {
    columns: Vec<(&'static str, Value)>,
    params: Params,
}

impl Input for &Row {
    fn resolve_column(&mut self, expr_column: &ExprColumn) -> Option<Value> {
        self.columns
            .iter()
            .find(|(name, _)| *name == expr_column.name)
            .map(|(_, value)| value.clone())
    }

    fn resolve_param(&mut self, expr_param: &ExprParam) -> Option<Value> {
        self.params.get(&expr_param.name).cloned()
    }
}

fn arb_row() -> impl Strategy<Value = Row> {
    (
        arb_value(true),
        arb_value(true),
        arb_value(false),
        arb_value(false),
        arb_value(true),
    )
        .prop_map(|(a, b, c, d, p)| Row {
            columns: vec![("A", a), ("B", b), ("C", c), ("D", d)],
            params: Params::new().bind("p", p),
        })
}

proptest! {
    #[test]
    fn pruning_is_idempotent(expr in arb_predicate(arb_atom())) {
        let once = prune_constants(expr);
        let twice = prune_constants(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn double_negation_round_trips(expr in arb_predicate(arb_atom())) {
        let params = Params::new();

        let optimized = optimize_negation(expr.clone(), &params).unwrap();
        let double_negated = optimize_negation(Expr::not(Expr::not(expr)), &params).unwrap();
        prop_assert_eq!(double_negated, optimized);
    }

    #[test]
    fn non_nullable_predicates_unchanged(
        expr in arb_predicate(prop_oneof![
            arb_non_nullable_column(),
            Just(Expr::param("p", Type::Bool)),
            Just(Expr::from(true)),
            Just(Expr::from(false)),
        ]),
        p in any::<bool>(),
    ) {
        let params = Params::new().bind("p", p);
        let expanded = expand_null_semantics(expr.clone(), &params).unwrap();
        prop_assert_eq!(expanded, expr);
    }

    #[test]
    fn rewrite_preserves_two_valued_equality(
        expr in arb_comparison(),
        row in arb_row(),
        params_known in any::<bool>(),
    ) {
        let known = if params_known { row.params.clone() } else { Params::new() };
        let rewritten = nullsem::rewrite(expr.clone(), &known).unwrap();

        let expected = expr.eval_two_valued(&row).unwrap();
        let actual = rewritten.eval(&row).unwrap();
        prop_assert_eq!(actual, expected, "{} => {}", expr, rewritten);
    }

    #[test]
    fn rewritten_comparisons_are_never_null(
        expr in arb_comparison(),
        row in arb_row(),
    ) {
        let rewritten = nullsem::rewrite(expr, &Params::new()).unwrap();
        prop_assert!(!rewritten.eval(&row).unwrap().is_null(), "{}", rewritten);
    }
}
