use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use rcore::ast::{Argument, BinaryOperator, Formal, Node, Symbol, UnaryOperator};
use rcore::runtime::values::{List, Value};
use rcore::substitute::{duplicate, substitute, BindingSource};

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("x".to_string()),
        Just("y".to_string()),
        Just("f".to_string()),
        Just("...".to_string()),
        "[a-z][a-z0-9_.]{0,5}",
    ]
}

fn arb_constant() -> impl Strategy<Value = Node> {
    prop_oneof![
        (-1000i32..1000).prop_map(|i| Node::constant(Value::int(i))),
        (-1.0e6f64..1.0e6).prop_map(|d| Node::constant(Value::double(d))),
        Just(Node::constant(Value::Null)),
    ]
}

fn arb_binary_operator() -> impl Strategy<Value = BinaryOperator> {
    prop_oneof![
        Just(BinaryOperator::Add),
        Just(BinaryOperator::Mul),
        Just(BinaryOperator::Range),
        Just(BinaryOperator::Lt),
        Just(BinaryOperator::And),
    ]
}

fn arb_argument(inner: impl Strategy<Value = Node>) -> impl Strategy<Value = Argument> {
    (proptest::option::of(arb_name()), proptest::option::of(inner)).prop_map(|(name, value)| Argument {
        name: name.map(|n| Symbol::new(&n)),
        value,
    })
}

fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        arb_constant(),
        arb_name().prop_map(|n| Node::symbol(&n)),
        Just(Node::Next),
        Just(Node::Break),
    ];

    leaf.prop_recursive(
        5,  // depth
        64, // max size
        4,  // items per collection
        |inner| {
            prop_oneof![
                (arb_name(), prop::collection::vec(arb_argument(inner.clone()), 0..=4))
                    .prop_map(|(f, args)| Node::call(&f, args)),
                (arb_binary_operator(), inner.clone(), inner.clone())
                    .prop_map(|(op, l, r)| Node::binary(op, l, r)),
                inner.clone().prop_map(|n| Node::unary(UnaryOperator::Neg, n)),
                prop::collection::vec(inner.clone(), 0..=3).prop_map(Node::Block),
                (inner.clone(), inner.clone(), proptest::option::of(inner.clone())).prop_map(
                    |(c, t, e)| Node::If {
                        condition: Box::new(c),
                        then_branch: Box::new(t),
                        else_branch: e.map(Box::new),
                    }
                ),
                (arb_name(), inner.clone(), inner.clone()).prop_map(|(v, s, b)| Node::For {
                    variable: Symbol::new(&v),
                    sequence: Box::new(s),
                    body: Box::new(b),
                }),
                (arb_name(), proptest::option::of(inner.clone()), inner.clone()).prop_map(
                    |(p, d, b)| Node::Function {
                        formals: vec![Formal {
                            name: Symbol::new(&p),
                            default: d,
                        }],
                        body: Box::new(b),
                    }
                ),
                (inner.clone(), prop::collection::vec(arb_argument(inner.clone()), 0..=2), any::<bool>())
                    .prop_map(|(b, args, exact)| Node::Index {
                        base: Box::new(b),
                        arguments: args,
                        exact,
                    }),
                (arb_name(), inner.clone()).prop_map(|(t, v)| Node::assign(&t, v)),
                inner.clone().prop_map(|n| Node::constant(Value::language(n))),
            ]
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn substitute_against_never_is_duplicate(node in arb_node()) {
        let result = substitute(&node, BindingSource::Never).expect("Never cannot fail on shallow trees");
        prop_assert_eq!(&result, &duplicate(&node));
        prop_assert_eq!(result, node);
    }

    #[test]
    fn substitute_against_empty_list_is_duplicate(node in arb_node()) {
        let empty = List::new(vec![]);
        let result = substitute(&node, BindingSource::List(&empty)).expect("empty list cannot fail");
        prop_assert_eq!(result, duplicate(&node));
    }

    #[test]
    fn deparse_is_stable_under_duplication(node in arb_node()) {
        prop_assert_eq!(duplicate(&node).to_string(), node.to_string());
    }
}
