// Lazy views: elements are computed on demand from backing vectors.
// A view never writes to what it reads; sharing queries and add_ref are
// forwarded to every backing vector.

use super::attributes::Attributes;
use super::element::{Arith, CoerceFrom, Element};
use super::{Encoding, IntVector, Repr, Vector};
use std::marker::PhantomData;
use std::rc::Rc;

/// Arithmetic progression `from + i * step`, no storage.
#[derive(Debug)]
pub(crate) struct Sequence<T: Arith> {
    from: T,
    step: T,
    size: usize,
}

impl<T: Arith> Sequence<T> {
    pub(crate) fn new(from: T, step: T, size: usize) -> Self {
        Sequence { from, step, size }
    }
}

impl<T: Arith> Repr<T> for Sequence<T> {
    fn size(&self) -> usize {
        self.size
    }

    fn get(&self, i: usize) -> T {
        assert!(i < self.size, "index {} out of bounds for sequence", i);
        T::offset(self.from, self.step, i)
    }

    fn encoding(&self) -> Encoding {
        Encoding::View
    }

    fn is_shared(&self) -> bool {
        false
    }

    fn add_ref(&self) {}
}

/// Backing vector with one element left out.
#[derive(Debug)]
pub(crate) struct Exclusion<T: Element> {
    orig: Vector<T>,
    exclude_index: usize,
    size: usize,
}

impl<T: Element> Exclusion<T> {
    pub(crate) fn new(orig: Vector<T>, exclude_index: usize) -> Self {
        let size = orig.size() - 1;
        Exclusion {
            orig,
            exclude_index,
            size,
        }
    }
}

impl<T: Element> Repr<T> for Exclusion<T> {
    fn size(&self) -> usize {
        self.size
    }

    fn get(&self, i: usize) -> T {
        assert!(i < self.size, "index {} out of bounds for exclusion", i);
        if i < self.exclude_index {
            self.orig.get(i)
        } else {
            self.orig.get(i + 1)
        }
    }

    fn encoding(&self) -> Encoding {
        Encoding::View
    }

    fn is_shared(&self) -> bool {
        self.orig.is_shared()
    }

    fn add_ref(&self) {
        self.orig.add_ref();
    }
}

/// Backing vector gathered through a 1-based index vector.
/// Indexes past the end, non-positive indexes and NA all read as NA.
#[derive(Debug)]
pub(crate) struct Subset<T: Element> {
    value: Vector<T>,
    value_size: usize,
    index: IntVector,
}

impl<T: Element> Subset<T> {
    pub(crate) fn new(value: Vector<T>, index: IntVector) -> Self {
        let value_size = value.size();
        Subset {
            value,
            value_size,
            index,
        }
    }
}

impl<T: Element> Repr<T> for Subset<T> {
    fn size(&self) -> usize {
        self.index.size()
    }

    fn get(&self, i: usize) -> T {
        let j = self.index.get(i);
        // INT_NA is negative, so it is covered by the first arm
        if j <= 0 || j as usize > self.value_size {
            T::na()
        } else {
            self.value.get(j as usize - 1)
        }
    }

    fn encoding(&self) -> Encoding {
        Encoding::View
    }

    fn is_shared(&self) -> bool {
        self.value.is_shared() || self.index.is_shared()
    }

    fn add_ref(&self) {
        self.value.add_ref();
        self.index.add_ref();
    }
}

/// Backing vector read as another element kind.
#[derive(Debug)]
pub(crate) struct Coercion<S: Element, T: CoerceFrom<S>> {
    source: Vector<S>,
    _target: PhantomData<T>,
}

impl<S: Element, T: CoerceFrom<S>> Coercion<S, T> {
    pub(crate) fn new(source: Vector<S>) -> Self {
        Coercion {
            source,
            _target: PhantomData,
        }
    }
}

impl<S: Element, T: CoerceFrom<S>> Repr<T> for Coercion<S, T> {
    fn size(&self) -> usize {
        self.source.size()
    }

    fn get(&self, i: usize) -> T {
        T::coerce_from(self.source.get(i))
    }

    fn encoding(&self) -> Encoding {
        Encoding::View
    }

    fn is_shared(&self) -> bool {
        self.source.is_shared()
    }

    fn add_ref(&self) {
        self.source.add_ref();
    }

    fn attributes(&self) -> Option<Rc<Attributes>> {
        self.source.attributes()
    }
}
