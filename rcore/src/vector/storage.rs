// Dense encodings: Scalar (length 1, unboxed) and Block (materialized buffer)

use super::attributes::Attributes;
use super::element::Element;
use super::{Encoding, Repr};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Conceptual owner count behind `is_shared` / `add_ref`.
/// A fresh vector belongs to its constructor alone; every `add_ref` records
/// one more owner.
#[derive(Debug, Default)]
pub(crate) struct RefCount(Cell<u32>);

impl RefCount {
    pub(crate) fn increment(&self) {
        self.0.set(self.0.get().saturating_add(1));
    }

    pub(crate) fn is_shared(&self) -> bool {
        self.0.get() > 0
    }
}

#[derive(Debug)]
pub(crate) struct Scalar<T: Element> {
    value: T,
    refs: RefCount,
    attributes: Option<Rc<Attributes>>,
}

impl<T: Element> Scalar<T> {
    pub(crate) fn new(value: T, attributes: Option<Rc<Attributes>>) -> Self {
        Scalar {
            value,
            refs: RefCount::default(),
            attributes,
        }
    }
}

impl<T: Element> Repr<T> for Scalar<T> {
    fn size(&self) -> usize {
        1
    }

    fn get(&self, i: usize) -> T {
        assert!(i == 0, "index {} out of bounds for scalar", i);
        self.value
    }

    fn encoding(&self) -> Encoding {
        Encoding::Scalar
    }

    fn is_shared(&self) -> bool {
        self.refs.is_shared()
    }

    fn add_ref(&self) {
        self.refs.increment();
    }

    fn attributes(&self) -> Option<Rc<Attributes>> {
        self.attributes.clone()
    }
}

#[derive(Debug)]
pub(crate) struct Block<T: Element> {
    values: RefCell<Vec<T>>,
    refs: RefCount,
    attributes: Option<Rc<Attributes>>,
}

impl<T: Element> Block<T> {
    pub(crate) fn new(values: Vec<T>, attributes: Option<Rc<Attributes>>) -> Self {
        Block {
            values: RefCell::new(values),
            refs: RefCount::default(),
            attributes,
        }
    }

    /// In-place update; callers must have checked the block is unshared.
    pub(crate) fn store(&self, i: usize, value: T) {
        self.values.borrow_mut()[i] = value;
    }
}

impl<T: Element> Repr<T> for Block<T> {
    fn size(&self) -> usize {
        self.values.borrow().len()
    }

    fn get(&self, i: usize) -> T {
        self.values.borrow()[i]
    }

    fn encoding(&self) -> Encoding {
        Encoding::Block
    }

    fn is_shared(&self) -> bool {
        self.refs.is_shared()
    }

    fn add_ref(&self) {
        self.refs.increment();
    }

    fn attributes(&self) -> Option<Rc<Attributes>> {
        self.attributes.clone()
    }

    fn block(&self) -> Option<&Block<T>> {
        Some(self)
    }
}
