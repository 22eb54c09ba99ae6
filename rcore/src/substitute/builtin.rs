// The `substitute(expr, env)` builtin: argument matching, binding source
// selection and unwrapping of the result.

use super::engine::Substituter;
use super::resolver::BindingSource;
use super::into_value;
use crate::ast::{Argument, Node};
use crate::config::SubstituteConfig;
use crate::runtime::environment::Frame;
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::values::Value;
use crate::runtime::ArgumentEvaluator;

/// Formal parameters of a builtin and the subset that must be supplied.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinSignature {
    pub name: &'static str,
    pub params: &'static [&'static str],
    pub required: &'static [&'static str],
}

/// Supplied argument expressions, one slot per formal parameter.
#[derive(Debug, Clone)]
pub struct MatchedArguments {
    params: &'static [&'static str],
    slots: Vec<Option<Node>>,
}

impl MatchedArguments {
    pub fn position(&self, param: &str) -> Option<usize> {
        self.params.iter().position(|p| *p == param)
    }

    pub fn get(&self, param: &str) -> Option<&Node> {
        self.slots.get(self.position(param)?)?.as_ref()
    }

    pub fn take(&mut self, param: &str) -> Option<Node> {
        let i = self.position(param)?;
        self.slots[i].take()
    }
}

impl BuiltinSignature {
    pub const fn new(
        name: &'static str,
        params: &'static [&'static str],
        required: &'static [&'static str],
    ) -> Self {
        BuiltinSignature {
            name,
            params,
            required,
        }
    }

    /// Matches supplied arguments to formals: exact names first, then the
    /// unnamed arguments fill the remaining formals left to right. A hole
    /// consumes its position but leaves the formal unsupplied.
    pub fn match_arguments(&self, arguments: &[Argument]) -> RuntimeResult<MatchedArguments> {
        let mut slots: Vec<Option<Node>> = vec![None; self.params.len()];
        let mut taken = vec![false; self.params.len()];
        let mut positional = Vec::new();

        for argument in arguments {
            let Some(name) = &argument.name else {
                positional.push(argument);
                continue;
            };
            let i = self
                .params
                .iter()
                .position(|p| *p == name.as_str())
                .ok_or_else(|| RuntimeError::UnusedArgument(argument.to_string()))?;
            if taken[i] {
                return Err(RuntimeError::DuplicateArgument(name.to_string()));
            }
            taken[i] = true;
            slots[i] = argument.value.clone();
        }

        let mut free = (0..self.params.len()).filter(|i| !taken[*i]);
        for argument in positional {
            let i = free
                .next()
                .ok_or_else(|| RuntimeError::UnusedArgument(argument.to_string()))?;
            slots[i] = argument.value.clone();
        }

        for required in self.required {
            let i = self
                .params
                .iter()
                .position(|p| p == required)
                .ok_or_else(|| {
                    RuntimeError::InternalError(format!(
                        "{}: required parameter '{}' is not a formal",
                        self.name, required
                    ))
                })?;
            if slots[i].is_none() {
                return Err(RuntimeError::MissingArgument(required.to_string()));
            }
        }

        Ok(MatchedArguments {
            params: self.params,
            slots,
        })
    }
}

pub const SUBSTITUTE: BuiltinSignature =
    BuiltinSignature::new("substitute", &["expr", "env"], &["expr"]);

/// A matched `substitute` call, ready to run in a frame.
#[derive(Debug, Clone)]
pub struct SubstituteCall {
    expr: Node,
    env: Option<Node>,
    config: SubstituteConfig,
}

impl SubstituteCall {
    pub fn create(arguments: &[Argument], config: &SubstituteConfig) -> RuntimeResult<Self> {
        let mut matched = SUBSTITUTE.match_arguments(arguments)?;
        let expr = matched
            .take("expr")
            .ok_or_else(|| RuntimeError::MissingArgument("expr".to_string()))?;
        Ok(SubstituteCall {
            expr,
            env: matched.take("env"),
            config: config.clone(),
        })
    }

    pub fn expr(&self) -> &Node {
        &self.expr
    }

    /// Runs the substitution. Without `env` the caller's frame supplies the
    /// bindings (nothing at top level). A supplied `env` is evaluated and
    /// must be an environment or a list.
    pub fn execute(
        &self,
        frame: Option<&Frame>,
        evaluator: &mut dyn ArgumentEvaluator,
    ) -> RuntimeResult<Value> {
        let Some(env_expr) = &self.env else {
            let source = match frame {
                Some(frame) => BindingSource::Frame(frame),
                None => BindingSource::Never,
            };
            return self.run(source);
        };

        let env = evaluator.evaluate(env_expr, frame)?;
        let source = match &env {
            Value::Environment(e) if e.is_global() && self.config.global_env_as_never => {
                BindingSource::Never
            }
            Value::Environment(e) => BindingSource::Environment(e),
            Value::List(list) => BindingSource::List(list),
            other => {
                log::debug!("substitute: rejecting {} as env", other.type_name());
                return Err(RuntimeError::InvalidEnvironment {
                    argument: "env".to_string(),
                });
            }
        };
        self.run(source)
    }

    fn run(&self, source: BindingSource<'_>) -> RuntimeResult<Value> {
        log::debug!("substitute `{}` against {} scope", self.expr, source.kind_name());
        let node = Substituter::with_config(source, &self.config).substitute(&self.expr)?;
        Ok(into_value(node))
    }
}
