// Syntax tree for the R dialect
// Nodes are produced by the (external) parser and by substitution, and are
// never mutated afterwards.

use crate::runtime::values::Value;
use itertools::Itertools;
use std::fmt;

/// Name of the variadic "rest" parameter.
pub const DOTS: &str = "...";

// --- Symbol ---

#[derive(Debug, PartialEq, Clone, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(s: &str) -> Self {
        Symbol(s.to_string())
    }

    pub fn dots() -> Self {
        Symbol(DOTS.to_string())
    }

    pub fn is_dots(&self) -> bool {
        self.0 == DOTS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::new(s)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Operators ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Mod,
    IntDiv,
    Range,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    ElementAnd,
    ElementOr,
}

impl BinaryOperator {
    pub fn token(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Pow => "^",
            BinaryOperator::Mod => "%%",
            BinaryOperator::IntDiv => "%/%",
            BinaryOperator::Range => ":",
            BinaryOperator::Eq => "==",
            BinaryOperator::Ne => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Le => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Ge => ">=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::ElementAnd => "&",
            BinaryOperator::ElementOr => "|",
        }
    }

    // `1:3` and `x^2` deparse without surrounding spaces
    fn is_tight(&self) -> bool {
        matches!(self, BinaryOperator::Range | BinaryOperator::Pow)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Neg,
    Not,
}

impl UnaryOperator {
    pub fn token(&self) -> &'static str {
        match self {
            UnaryOperator::Neg => "-",
            UnaryOperator::Not => "!",
        }
    }
}

// --- Arguments and formals ---

/// One entry of a call's argument list. A missing value is a structural hole,
/// as in `f(, 1)` or `x[, 2]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Option<Symbol>,
    pub value: Option<Node>,
}

impl Argument {
    pub fn positional(value: Node) -> Self {
        Argument {
            name: None,
            value: Some(value),
        }
    }

    pub fn named(name: &str, value: Node) -> Self {
        Argument {
            name: Some(Symbol::new(name)),
            value: Some(value),
        }
    }

    pub fn hole() -> Self {
        Argument {
            name: None,
            value: None,
        }
    }

    /// True when the argument is exactly the `...` placeholder.
    pub fn is_dots(&self) -> bool {
        matches!(&self.value, Some(Node::SymbolRef(symbol)) if symbol.is_dots())
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, &self.value) {
            (Some(name), Some(value)) => write!(f, "{} = {}", name, value),
            (Some(name), None) => write!(f, "{} = ", name),
            (None, Some(value)) => write!(f, "{}", value),
            (None, None) => Ok(()),
        }
    }
}

/// A formal parameter of a function literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Formal {
    pub name: Symbol,
    pub default: Option<Node>,
}

impl fmt::Display for Formal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.default {
            Some(default) => write!(f, "{} = {}", self.name, default),
            None => write!(f, "{}", self.name),
        }
    }
}

// --- Nodes ---

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Constant(Value),
    SymbolRef(Symbol),
    Call {
        function: Symbol,
        arguments: Vec<Argument>,
    },
    Block(Vec<Node>),
    If {
        condition: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Option<Box<Node>>,
    },
    While {
        condition: Box<Node>,
        body: Box<Node>,
    },
    Repeat(Box<Node>),
    For {
        variable: Symbol,
        sequence: Box<Node>,
        body: Box<Node>,
    },
    Function {
        formals: Vec<Formal>,
        body: Box<Node>,
    },
    Assign {
        target: Symbol,
        value: Box<Node>,
        superassign: bool,
    },
    Binary {
        operator: BinaryOperator,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Node>,
    },
    Index {
        base: Box<Node>,
        arguments: Vec<Argument>,
        exact: bool, // `[[` rather than `[`
    },
    Field {
        base: Box<Node>,
        field: Symbol,
    },
    Next,
    Break,
}

impl Node {
    pub fn constant(value: Value) -> Node {
        Node::Constant(value)
    }

    pub fn symbol(name: &str) -> Node {
        Node::SymbolRef(Symbol::new(name))
    }

    pub fn dots() -> Node {
        Node::SymbolRef(Symbol::dots())
    }

    pub fn call(function: &str, arguments: Vec<Argument>) -> Node {
        Node::Call {
            function: Symbol::new(function),
            arguments,
        }
    }

    pub fn binary(operator: BinaryOperator, lhs: Node, rhs: Node) -> Node {
        Node::Binary {
            operator,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(operator: UnaryOperator, operand: Node) -> Node {
        Node::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn assign(target: &str, value: Node) -> Node {
        Node::Assign {
            target: Symbol::new(target),
            value: Box::new(value),
            superassign: false,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Node::SymbolRef(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Constant(_) => "constant",
            Node::SymbolRef(_) => "symbol",
            Node::Call { .. } => "call",
            Node::Block(_) => "block",
            Node::If { .. } => "if",
            Node::While { .. } => "while",
            Node::Repeat(_) => "repeat",
            Node::For { .. } => "for",
            Node::Function { .. } => "function",
            Node::Assign { .. } => "assignment",
            Node::Binary { .. } => "binary operation",
            Node::Unary { .. } => "unary operation",
            Node::Index { .. } => "index",
            Node::Field { .. } => "field access",
            Node::Next => "next",
            Node::Break => "break",
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Constant(value) => write!(f, "{}", value),
            Node::SymbolRef(symbol) => write!(f, "{}", symbol),
            Node::Call {
                function,
                arguments,
            } => write!(f, "{}({})", function, arguments.iter().join(", ")),
            Node::Block(statements) => write!(f, "{{{}}}", statements.iter().join("; ")),
            Node::If {
                condition,
                then_branch,
                else_branch,
            } => {
                write!(f, "if ({}) {}", condition, then_branch)?;
                if let Some(else_branch) = else_branch {
                    write!(f, " else {}", else_branch)?;
                }
                Ok(())
            }
            Node::While { condition, body } => write!(f, "while ({}) {}", condition, body),
            Node::Repeat(body) => write!(f, "repeat {}", body),
            Node::For {
                variable,
                sequence,
                body,
            } => write!(f, "for ({} in {}) {}", variable, sequence, body),
            Node::Function { formals, body } => {
                write!(f, "function({}) {}", formals.iter().join(", "), body)
            }
            Node::Assign {
                target,
                value,
                superassign,
            } => {
                let arrow = if *superassign { "<<-" } else { "<-" };
                write!(f, "{} {} {}", target, arrow, value)
            }
            Node::Binary { operator, lhs, rhs } => {
                if operator.is_tight() {
                    write!(f, "{}{}{}", lhs, operator.token(), rhs)
                } else {
                    write!(f, "{} {} {}", lhs, operator.token(), rhs)
                }
            }
            Node::Unary { operator, operand } => write!(f, "{}{}", operator.token(), operand),
            Node::Index {
                base,
                arguments,
                exact,
            } => {
                let (open, close) = if *exact { ("[[", "]]") } else { ("[", "]") };
                write!(f, "{}{}{}{}", base, open, arguments.iter().join(", "), close)
            }
            Node::Field { base, field } => write!(f, "{}${}", base, field),
            Node::Next => f.write_str("next"),
            Node::Break => f.write_str("break"),
        }
    }
}
