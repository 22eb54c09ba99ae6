// Binding sources consulted during substitution

use crate::ast::Symbol;
use crate::runtime::environment::{Environment, Frame};
use crate::runtime::values::{List, Value};

/// Where names are looked up during one substitution. Every variant is a
/// local, non-forcing lookup: enclosing scopes are never consulted and
/// promises come back as promises.
#[derive(Debug, Clone, Copy)]
pub enum BindingSource<'a> {
    /// Nothing is bound (top level, global environment).
    Never,
    /// Local slots of an activation frame.
    Frame(&'a Frame),
    /// Named elements of a list; the first element with the name wins.
    List(&'a List),
    /// Bindings stored directly in an environment.
    Environment(&'a Environment),
}

impl<'a> BindingSource<'a> {
    pub fn find(&self, name: &Symbol) -> Option<Value> {
        let found = match self {
            BindingSource::Never => None,
            BindingSource::Frame(frame) => frame.local_read_not_forcing(name),
            BindingSource::List(list) => list.lookup(name).cloned(),
            BindingSource::Environment(env) => env.local_get_not_forcing(name),
        };
        log::trace!(
            "lookup `{}` in {} scope{}: {}",
            name,
            self.kind_name(),
            self.owner()
                .map(|function| format!(" of {}", function))
                .unwrap_or_default(),
            if found.is_some() { "bound" } else { "unbound" }
        );
        found
    }

    // Function whose frame is searched, for diagnostics.
    fn owner(&self) -> Option<&Symbol> {
        match self {
            BindingSource::Frame(frame) => frame.function(),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            BindingSource::Never => "empty",
            BindingSource::Frame(_) => "frame",
            BindingSource::List(_) => "list",
            BindingSource::Environment(_) => "environment",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn never_finds_nothing() {
        assert_eq!(BindingSource::Never.find(&Symbol::new("x")), None);
    }

    #[test]
    fn list_source_matches_names() {
        let list = List::from_pairs(vec![(Some(Symbol::new("x")), Value::int(5))]);
        let source = BindingSource::List(&list);
        assert_eq!(source.find(&Symbol::new("x")), Some(Value::int(5)));
        assert_eq!(source.find(&Symbol::new("y")), None);
    }

    #[test]
    fn environment_source_is_local_only() {
        let parent = Rc::new(Environment::new());
        parent.define(&Symbol::new("outer"), Value::int(1));
        let env = Environment::with_parent(parent);
        env.define(&Symbol::new("inner"), Value::int(2));
        let source = BindingSource::Environment(&env);
        assert_eq!(source.find(&Symbol::new("inner")), Some(Value::int(2)));
        assert_eq!(source.find(&Symbol::new("outer")), None);
    }
}
