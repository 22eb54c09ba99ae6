use pretty_assertions::assert_eq;
use rcore::ast::{Argument, BinaryOperator, Node, Symbol};
use rcore::config::SubstituteConfig;
use rcore::runtime::values::{List, Value};
use rcore::runtime::{ArgumentEvaluator, Environment, Frame, RuntimeError, RuntimeResult};
use rcore::substitute::SubstituteCall;
use std::rc::Rc;

/// Resolves bare names against a fixed table; anything else is an error.
struct TableEvaluator {
    table: Vec<(&'static str, Value)>,
    calls: usize,
}

impl TableEvaluator {
    fn new(table: Vec<(&'static str, Value)>) -> Self {
        TableEvaluator { table, calls: 0 }
    }
}

impl ArgumentEvaluator for TableEvaluator {
    fn evaluate(&mut self, expression: &Node, _frame: Option<&Frame>) -> RuntimeResult<Value> {
        self.calls += 1;
        let name = expression
            .as_symbol()
            .ok_or_else(|| RuntimeError::unsupported(format!("cannot evaluate {}", expression)))?;
        self.table
            .iter()
            .find(|(n, _)| *n == name.as_str())
            .map(|(_, v)| v.clone())
            .ok_or_else(|| RuntimeError::InternalError(format!("object '{}' not found", name)))
    }
}

fn x_plus_one() -> Node {
    Node::binary(BinaryOperator::Add, Node::symbol("x"), Node::constant(Value::double(1.0)))
}

fn create(arguments: Vec<Argument>) -> SubstituteCall {
    SubstituteCall::create(&arguments, &SubstituteConfig::default()).expect("Should match arguments")
}

#[test]
fn test_no_env_uses_caller_frame() {
    let mut frame = Frame::new(Some(Symbol::new("f")));
    frame.bind(&Symbol::new("x"), Value::promise(Node::symbol("a"), None));
    let call = create(vec![Argument::positional(x_plus_one())]);
    let mut evaluator = TableEvaluator::new(vec![]);

    let result = call.execute(Some(&frame), &mut evaluator).expect("Should execute");

    assert_eq!(result.to_string(), "a + 1");
    assert_eq!(evaluator.calls, 0);
}

#[test]
fn test_no_env_at_top_level_substitutes_nothing() {
    let call = create(vec![Argument::positional(x_plus_one())]);
    let mut evaluator = TableEvaluator::new(vec![]);

    let result = call.execute(None, &mut evaluator).expect("Should execute");

    assert_eq!(result, Value::language(x_plus_one()));
}

#[test]
fn test_global_env_substitutes_nothing() {
    let global = Rc::new(Environment::global());
    global.define(&Symbol::new("x"), Value::double(99.0));
    let call = create(vec![
        Argument::positional(x_plus_one()),
        Argument::positional(Node::symbol("g")),
    ]);
    let mut evaluator = TableEvaluator::new(vec![("g", Value::Environment(global))]);

    let result = call.execute(None, &mut evaluator).expect("Should execute");

    assert_eq!(result, Value::language(x_plus_one()));
}

#[test]
fn test_global_env_can_be_searched_when_configured() {
    let global = Rc::new(Environment::global());
    global.define(&Symbol::new("x"), Value::double(99.0));
    let config = SubstituteConfig {
        global_env_as_never: false,
        ..SubstituteConfig::default()
    };
    let arguments = vec![
        Argument::positional(x_plus_one()),
        Argument::named("env", Node::symbol("g")),
    ];
    let call = SubstituteCall::create(&arguments, &config).expect("Should match arguments");
    let mut evaluator = TableEvaluator::new(vec![("g", Value::Environment(global))]);

    let result = call.execute(None, &mut evaluator).expect("Should execute");

    assert_eq!(result.to_string(), "99 + 1");
}

#[test]
fn test_environment_bindings_are_used() {
    let env = Rc::new(Environment::new());
    env.define(&Symbol::new("x"), Value::language(Node::symbol("b")));
    let call = create(vec![
        Argument::named("env", Node::symbol("e")),
        Argument::named("expr", x_plus_one()),
    ]);
    let mut evaluator = TableEvaluator::new(vec![("e", Value::Environment(env))]);

    let result = call.execute(None, &mut evaluator).expect("Should execute");

    assert_eq!(result.to_string(), "b + 1");
    assert_eq!(evaluator.calls, 1);
}

#[test]
fn test_list_bindings_are_used() {
    let list = List::from_pairs(vec![(Some(Symbol::new("x")), Value::double(5.0))]);
    let call = create(vec![
        Argument::positional(x_plus_one()),
        Argument::positional(Node::symbol("l")),
    ]);
    let mut evaluator = TableEvaluator::new(vec![("l", Value::List(Rc::new(list)))]);

    let result = call.execute(None, &mut evaluator).expect("Should execute");

    assert_eq!(result.to_string(), "5 + 1");
}

#[test]
fn test_bare_symbol_result_unwraps_constant() {
    let list = List::from_pairs(vec![(Some(Symbol::new("x")), Value::double(5.0))]);
    let call = create(vec![
        Argument::positional(Node::symbol("x")),
        Argument::positional(Node::symbol("l")),
    ]);
    let mut evaluator = TableEvaluator::new(vec![("l", Value::List(Rc::new(list)))]);

    let result = call.execute(None, &mut evaluator).expect("Should execute");

    assert_eq!(result, Value::double(5.0));
}

#[test]
fn test_non_environment_env_is_rejected() {
    let call = create(vec![
        Argument::positional(x_plus_one()),
        Argument::positional(Node::symbol("n")),
    ]);
    let mut evaluator = TableEvaluator::new(vec![("n", Value::double(1.0))]);

    let result = call.execute(None, &mut evaluator);

    assert_eq!(
        result,
        Err(RuntimeError::InvalidEnvironment {
            argument: "env".to_string()
        })
    );
}

#[test]
fn test_env_evaluation_errors_propagate() {
    let call = create(vec![
        Argument::positional(x_plus_one()),
        Argument::positional(Node::symbol("missing")),
    ]);
    let mut evaluator = TableEvaluator::new(vec![]);

    let result = call.execute(None, &mut evaluator);

    assert!(matches!(result, Err(RuntimeError::InternalError(_))));
}

#[test]
fn test_hole_for_expr_is_missing() {
    let result = SubstituteCall::create(&[Argument::hole()], &SubstituteConfig::default());

    assert_eq!(result.err(), Some(RuntimeError::MissingArgument("expr".to_string())));
}

#[test]
fn test_hole_skips_expr_position() {
    let arguments = vec![
        Argument::named("expr", Node::symbol("x")),
        Argument::hole(),
    ];
    let call = SubstituteCall::create(&arguments, &SubstituteConfig::default()).expect("Should match arguments");
    let mut evaluator = TableEvaluator::new(vec![]);

    let result = call.execute(None, &mut evaluator).expect("Should execute");

    assert_eq!(call.expr(), &Node::symbol("x"));
    assert_eq!(result, Value::language(Node::symbol("x")));
    assert_eq!(evaluator.calls, 0);
}

#[test]
fn test_extra_arguments_are_unused() {
    let result = SubstituteCall::create(
        &[
            Argument::positional(Node::symbol("x")),
            Argument::named("envir", Node::symbol("e")),
        ],
        &SubstituteConfig::default(),
    );

    assert!(matches!(result, Err(RuntimeError::UnusedArgument(_))));
}
