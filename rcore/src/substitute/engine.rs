// Substitution engine: rewrites unevaluated syntax according to the bindings
// visible through a BindingSource. Nothing is ever evaluated or forced.

use super::duplicate::{duplicate, Rewriter, STACK_GROW_SIZE, STACK_RED_ZONE};
use super::resolver::BindingSource;
use crate::ast::{Argument, Node, Symbol};
use crate::config::SubstituteConfig;
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::values::{Dots, Value};

/// Fresh syntax for a bound value: promises and quoted expressions give an
/// independent copy of their tree, anything else becomes a constant.
pub fn substitute_binding(binding: &Value) -> Node {
    match binding {
        Value::Promise(promise) => duplicate(promise.expression()),
        Value::Language(node) => duplicate(node),
        other => Node::Constant(other.clone()),
    }
}

// Name a call can be retargeted to, if the binding denotes one.
fn call_target(binding: &Value) -> Option<Symbol> {
    match binding {
        Value::Promise(promise) => promise.expression().as_symbol().cloned(),
        Value::Language(node) => node.as_symbol().cloned(),
        Value::Symbol(symbol) => Some(symbol.clone()),
        _ => None,
    }
}

fn describe(binding: &Value) -> String {
    match binding {
        Value::Promise(promise) => format!("{} `{}`", promise.expression().kind_name(), promise.expression()),
        Value::Language(node) => format!("{} `{}`", node.kind_name(), node),
        other => format!("{} value", other.type_name()),
    }
}

pub struct Substituter<'a> {
    source: BindingSource<'a>,
    max_depth: usize,
    depth: usize,
}

impl<'a> Substituter<'a> {
    pub fn new(source: BindingSource<'a>) -> Self {
        Self::with_config(source, &SubstituteConfig::default())
    }

    pub fn with_config(source: BindingSource<'a>, config: &SubstituteConfig) -> Self {
        Substituter {
            source,
            max_depth: config.max_depth,
            depth: 0,
        }
    }

    pub fn substitute(&mut self, node: &Node) -> RuntimeResult<Node> {
        self.rewrite(node)
    }

    fn substitute_call(&mut self, function: &Symbol, arguments: &[Argument]) -> RuntimeResult<Node> {
        let target = match self.source.find(function) {
            None => function.clone(),
            Some(binding) => call_target(&binding).ok_or_else(|| {
                RuntimeError::unsupported(format!(
                    "cannot use {} as the target of call `{}`; only names can be substituted there",
                    describe(&binding),
                    function
                ))
            })?,
        };
        Ok(Node::Call {
            function: target,
            arguments: self.rewrite_arguments(arguments)?,
        })
    }

    fn splice_dots(dots: &Dots, out: &mut Vec<Argument>) {
        for entry in dots.entries() {
            let argument = match (&entry.name, &entry.value) {
                (name, Some(value)) => Argument {
                    name: name.clone(),
                    value: Some(substitute_binding(value)),
                },
                (Some(name), None) => Argument::positional(Node::SymbolRef(name.clone())),
                (None, None) => Argument::hole(),
            };
            out.push(argument);
        }
    }
}

impl Rewriter for Substituter<'_> {
    type Error = RuntimeError;

    fn rewrite(&mut self, node: &Node) -> RuntimeResult<Node> {
        if self.depth >= self.max_depth {
            return Err(RuntimeError::StackOverflow(format!(
                "expression nested deeper than {} levels",
                self.max_depth
            )));
        }
        self.depth += 1;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || match node {
            Node::SymbolRef(name) => Ok(match self.source.find(name) {
                Some(binding) => substitute_binding(&binding),
                None => duplicate(node),
            }),
            Node::Call {
                function,
                arguments,
            } => self.substitute_call(function, arguments),
            _ => self.rewrite_children(node),
        });
        self.depth -= 1;
        result
    }

    fn rewrite_arguments(&mut self, arguments: &[Argument]) -> RuntimeResult<Vec<Argument>> {
        let mut out = Vec::with_capacity(arguments.len());
        for argument in arguments {
            if argument.is_dots() {
                if let Some(Value::Dots(dots)) = self.source.find(&Symbol::dots()) {
                    Self::splice_dots(&dots, &mut out);
                    continue;
                }
            }
            out.push(self.rewrite_argument(argument)?);
        }
        Ok(out)
    }
}
