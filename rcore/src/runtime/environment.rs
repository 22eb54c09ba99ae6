// Environments and activation frames
// Only the non-forcing lookup contract matters to substitution; promise
// values are handed out exactly as stored.

use crate::ast::Symbol;
use crate::runtime::values::Value;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Mutable name -> value store with an optional enclosing environment.
pub struct Environment {
    bindings: RefCell<IndexMap<Symbol, Value>>,
    parent: Option<Rc<Environment>>,
    global: bool,
}

impl Environment {
    /// Creates a new, empty environment with no parent.
    pub fn new() -> Self {
        Environment {
            bindings: RefCell::new(IndexMap::new()),
            parent: None,
            global: false,
        }
    }

    /// The distinguished global environment.
    pub fn global() -> Self {
        Environment {
            global: true,
            ..Environment::new()
        }
    }

    /// Creates a new child environment that inherits from a parent.
    pub fn with_parent(parent: Rc<Environment>) -> Self {
        Environment {
            parent: Some(parent),
            ..Environment::new()
        }
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    /// Defines a new variable or updates an existing one in this environment.
    pub fn define(&self, name: &Symbol, value: Value) {
        self.bindings.borrow_mut().insert(name.clone(), value);
    }

    /// Binding stored directly in this environment. Promises are returned
    /// unforced.
    pub fn local_get_not_forcing(&self, name: &Symbol) -> Option<Value> {
        self.bindings.borrow().get(name).cloned()
    }

    /// Names bound in this environment, in definition order.
    pub fn symbol_names(&self) -> Vec<Symbol> {
        self.bindings.borrow().keys().cloned().collect()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

// Bindings may hold closures capturing this very environment, so Debug
// lists names only.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("global", &self.global)
            .field("names", &self.symbol_names())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

/// Activation record of one function call: the formals and locals bound so
/// far.
#[derive(Debug, Default)]
pub struct Frame {
    function: Option<Symbol>,
    slots: IndexMap<Symbol, Value>,
}

impl Frame {
    pub fn new(function: Option<Symbol>) -> Self {
        Frame {
            function,
            slots: IndexMap::new(),
        }
    }

    pub fn bind(&mut self, name: &Symbol, value: Value) {
        self.slots.insert(name.clone(), value);
    }

    /// Promises are returned unforced.
    pub fn local_read_not_forcing(&self, name: &Symbol) -> Option<Value> {
        self.slots.get(name).cloned()
    }

    pub fn function(&self) -> Option<&Symbol> {
        self.function.as_ref()
    }
}
