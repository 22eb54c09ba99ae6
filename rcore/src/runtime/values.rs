// Runtime value system
// Represents values during execution (different from the AST, which represents
// unevaluated code). Values are cheap to clone: compound payloads sit behind Rc.

use crate::ast::{Formal, Node, Symbol};
use crate::runtime::environment::Environment;
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::vector::{DoubleVector, IntVector, LogicalVector};
use itertools::Itertools;
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Logical(LogicalVector),
    Int(IntVector),
    Double(DoubleVector),
    /// A bare name used as data, e.g. the result of `as.name("sum")`
    Symbol(Symbol),
    /// Quoted expression
    Language(Rc<Node>),
    Promise(Rc<Promise>),
    Dots(Rc<Dots>),
    List(Rc<List>),
    Environment(Rc<Environment>),
    Closure(Rc<Closure>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Logical(_) => "logical",
            Value::Int(_) => "integer",
            Value::Double(_) => "double",
            Value::Symbol(_) => "symbol",
            Value::Language(_) => "language",
            Value::Promise(_) => "promise",
            Value::Dots(_) => "...",
            Value::List(_) => "list",
            Value::Environment(_) => "environment",
            Value::Closure(_) => "closure",
        }
    }

    pub fn language(node: Node) -> Value {
        Value::Language(Rc::new(node))
    }

    pub fn promise(expression: Node, scope: Option<Rc<Environment>>) -> Value {
        Value::Promise(Rc::new(Promise::new(expression, scope)))
    }

    pub fn symbol(name: &str) -> Value {
        Value::Symbol(Symbol::new(name))
    }

    pub fn int(value: i32) -> Value {
        Value::Int(IntVector::scalar(value))
    }

    pub fn double(value: f64) -> Value {
        Value::Double(DoubleVector::scalar(value))
    }

    /// Records one more owner of the value's vector storage.
    pub fn add_ref(&self) {
        match self {
            Value::Logical(v) => v.add_ref(),
            Value::Int(v) => v.add_ref(),
            Value::Double(v) => v.add_ref(),
            _ => {}
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Logical(a), Value::Logical(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Language(a), Value::Language(b)) => a == b,
            (Value::Dots(a), Value::Dots(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Promise(a), Value::Promise(b)) => Rc::ptr_eq(a, b),
            (Value::Environment(a), Value::Environment(b)) => Rc::ptr_eq(a, b),
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Logical(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::Language(node) => write!(f, "{}", node),
            Value::Promise(_) => write!(f, "<promise>"),
            Value::Dots(_) => write!(f, "<...>"),
            Value::List(list) => write!(f, "{}", list),
            Value::Environment(env) if env.is_global() => write!(f, "<environment: R_GlobalEnv>"),
            Value::Environment(_) => write!(f, "<environment>"),
            Value::Closure(closure) => write!(
                f,
                "function({}) {}",
                closure.formals.iter().join(", "),
                closure.body
            ),
        }
    }
}

/// Deferred value: an unevaluated expression and the scope it would be
/// evaluated in. Forcing belongs to the evaluator; this core only reads the
/// expression.
pub struct Promise {
    expression: Node,
    scope: Option<Rc<Environment>>,
    value: OnceCell<Value>,
}

impl Promise {
    pub fn new(expression: Node, scope: Option<Rc<Environment>>) -> Self {
        Promise {
            expression,
            scope,
            value: OnceCell::new(),
        }
    }

    pub fn expression(&self) -> &Node {
        &self.expression
    }

    pub fn scope(&self) -> Option<&Rc<Environment>> {
        self.scope.as_ref()
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.get()
    }

    pub fn is_forced(&self) -> bool {
        self.value.get().is_some()
    }

    /// Stores the value computed by the evaluator.
    pub fn fulfil(&self, value: Value) -> RuntimeResult<()> {
        self.value.set(value).map_err(|_| {
            RuntimeError::InternalError(format!("promise for `{}` forced twice", self.expression))
        })
    }
}

impl fmt::Debug for Promise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("expression", &self.expression.to_string())
            .field("forced", &self.is_forced())
            .finish()
    }
}

/// One entry of a variadic bundle. The value is absent for an empty
/// argument such as the second one in `f(a, , b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DotsEntry {
    pub name: Option<Symbol>,
    pub value: Option<Value>,
}

/// Variadic bundle bound to `...`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dots {
    entries: Vec<DotsEntry>,
}

impl Dots {
    pub fn new(entries: Vec<DotsEntry>) -> Self {
        Dots { entries }
    }

    pub fn entries(&self) -> &[DotsEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = Option<&Symbol>> + '_ {
        self.entries.iter().map(|e| e.name.as_ref())
    }

    pub fn values(&self) -> impl Iterator<Item = Option<&Value>> + '_ {
        self.entries.iter().map(|e| e.value.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Option<Symbol>, Option<Value>)> for Dots {
    fn from_iter<I: IntoIterator<Item = (Option<Symbol>, Option<Value>)>>(iter: I) -> Self {
        Dots::new(
            iter.into_iter()
                .map(|(name, value)| DotsEntry { name, value })
                .collect(),
        )
    }
}

/// Generic vector (`list(...)`), optionally named.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct List {
    values: Vec<Value>,
    names: Option<Vec<Option<Symbol>>>,
}

impl List {
    pub fn new(values: Vec<Value>) -> Self {
        List {
            values,
            names: None,
        }
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Option<Symbol>, Value)>,
    {
        let (names, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        List {
            values,
            names: Some(names),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn names(&self) -> Option<&[Option<Symbol>]> {
        self.names.as_deref()
    }

    pub fn get(&self, i: usize) -> Option<&Value> {
        self.values.get(i)
    }

    /// Position of the first element named `name`.
    pub fn position(&self, name: &Symbol) -> Option<usize> {
        self.names
            .as_ref()?
            .iter()
            .position(|n| n.as_ref() == Some(name))
    }

    pub fn lookup(&self, name: &Symbol) -> Option<&Value> {
        self.position(name).and_then(|i| self.values.get(i))
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut items = self.values.iter().enumerate().map(|(i, value)| {
            match self.names.as_ref().and_then(|names| names[i].as_ref()) {
                Some(name) => format!("{} = {}", name, value),
                None => value.to_string(),
            }
        });
        write!(f, "list({})", items.join(", "))
    }
}

/// User function value.
#[derive(Debug)]
pub struct Closure {
    pub formals: Vec<Formal>,
    pub body: Node,
    pub env: Rc<Environment>,
}
