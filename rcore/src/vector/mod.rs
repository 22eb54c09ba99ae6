//! Vector representation layer
//!
//! A [`Vector`] is a cheap handle over one of several encodings: a Scalar,
//! a materialized Block, or a lazy view (sequence, exclusion, subset,
//! coercion) computing its elements from other vectors. Consumers only rely
//! on the read contract (`size`, `get`, coercions, attributes and the sharing
//! queries), never on the encoding.
//!
//! Sharing protocol: `add_ref` records one more owner of the storage, and
//! views forward it to everything they read. Before mutating in place, the
//! runtime asks `is_shared`; `set` does this check itself, together with a
//! check that no other handle or view aliases the storage, and copies when
//! needed.

pub mod attributes;
pub mod element;
mod storage;
mod views;

pub use attributes::Attributes;
pub use element::{Arith, CoerceFrom, Element, Logical, DOUBLE_NA_BITS, INT_NA};

use crate::runtime::error::{RuntimeError, RuntimeResult};
use std::fmt;
use std::rc::Rc;
use storage::{Block, Scalar};
use views::{Coercion, Exclusion, Sequence, Subset};

pub type IntVector = Vector<i32>;
pub type DoubleVector = Vector<f64>;
pub type LogicalVector = Vector<Logical>;

/// Physical encoding of a vector, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Scalar,
    Block,
    View,
}

/// Read contract shared by every encoding.
pub(crate) trait Repr<T: Element>: fmt::Debug {
    fn size(&self) -> usize;
    fn get(&self, i: usize) -> T;
    fn encoding(&self) -> Encoding;
    fn is_shared(&self) -> bool;
    fn add_ref(&self);

    fn attributes(&self) -> Option<Rc<Attributes>> {
        None
    }

    fn block(&self) -> Option<&Block<T>> {
        None
    }
}

#[derive(Clone)]
pub struct Vector<T: Element> {
    repr: Rc<dyn Repr<T>>,
}

impl<T: Element> Vector<T> {
    fn wrap(repr: impl Repr<T> + 'static) -> Self {
        Vector {
            repr: Rc::new(repr),
        }
    }

    // Length-1 results always get the scalar encoding.
    fn dense(values: Vec<T>, attributes: Option<Rc<Attributes>>) -> Self {
        if values.len() == 1 {
            Self::wrap(Scalar::new(values[0], attributes))
        } else {
            Self::wrap(Block::new(values, attributes))
        }
    }

    // --- Factories ---

    pub fn scalar(value: T) -> Self {
        Self::wrap(Scalar::new(value, None))
    }

    /// Vector holding a copy of `values`.
    pub fn from_values(values: &[T]) -> Self {
        Self::dense(values.to_vec(), None)
    }

    /// Zero-filled vector of `size` elements.
    pub fn uninitialized(size: usize) -> Self {
        Self::dense(vec![T::zero(); size], None)
    }

    /// Vector of `size` NA elements.
    pub fn na(size: usize) -> Self {
        Self::dense(vec![T::na(); size], None)
    }

    /// Takes ownership of `values` without copying.
    pub fn adopt(values: Vec<T>) -> Self {
        Self::dense(values, None)
    }

    /// Defensive copy of `other`, attributes included.
    pub fn copy_of(other: &Vector<T>) -> Self {
        Self::dense(other.to_vec(), other.attributes())
    }

    // --- Read contract ---

    pub fn size(&self) -> usize {
        self.repr.size()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Element `i`; panics when `i >= size()`, like slice indexing.
    pub fn get(&self, i: usize) -> T {
        self.repr.get(i)
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.size()).map(move |i| self.get(i))
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    pub fn encoding(&self) -> Encoding {
        self.repr.encoding()
    }

    pub fn attributes(&self) -> Option<Rc<Attributes>> {
        self.repr.attributes()
    }

    /// Copy of this vector carrying `attributes`.
    pub fn with_attributes(&self, attributes: Attributes) -> Self {
        let attributes = if attributes.is_empty() {
            None
        } else {
            Some(Rc::new(attributes))
        };
        Self::dense(self.to_vec(), attributes)
    }

    // --- Sharing protocol ---

    pub fn is_shared(&self) -> bool {
        self.repr.is_shared()
    }

    pub fn add_ref(&self) {
        self.repr.add_ref();
    }

    // --- Materialization and mutation ---

    /// Block with the same contents. A vector that already is a Block is
    /// returned as is; everything else is copied into fresh storage.
    pub fn materialize(&self) -> Self {
        if self.repr.block().is_some() {
            return self.clone();
        }
        log::trace!(
            "materializing {:?} {} vector of {} elements",
            self.encoding(),
            T::TYPE_NAME,
            self.size()
        );
        Self::wrap(Block::new(self.to_vec(), self.attributes()))
    }

    /// Copy-on-write update of element `i`. The handle is consumed: a Block
    /// reachable only through it, and not marked shared, is updated in place
    /// and handed back. Anything else (views, scalars, blocks aliased by
    /// another handle or a view) is copied into a fresh Block first.
    pub fn set(self, i: usize, value: T) -> RuntimeResult<Self> {
        let size = self.size();
        if i >= size {
            return Err(RuntimeError::IndexOutOfBounds { index: i, length: size });
        }
        if self.is_exclusive() {
            if let Some(block) = self.repr.block() {
                block.store(i, value);
                return Ok(self);
            }
        }
        let fresh = Block::new(self.to_vec(), self.attributes());
        fresh.store(i, value);
        Ok(Self::wrap(fresh))
    }

    // Sole handle on storage nobody else has claimed.
    fn is_exclusive(&self) -> bool {
        Rc::strong_count(&self.repr) == 1 && !self.is_shared()
    }

    // --- View combinators ---

    /// View without element `exclude_index` (0-based).
    pub fn exclude(&self, exclude_index: usize) -> RuntimeResult<Self> {
        let size = self.size();
        if exclude_index >= size {
            return Err(RuntimeError::IndexOutOfBounds {
                index: exclude_index,
                length: size,
            });
        }
        Ok(Self::wrap(Exclusion::new(self.clone(), exclude_index)))
    }

    /// View gathering elements through the 1-based `index`.
    pub fn subset(&self, index: &IntVector) -> Self {
        Self::wrap(Subset::new(self.clone(), index.clone()))
    }

    /// This vector read as another element kind, NA-preserving.
    pub fn coerce<U: CoerceFrom<T>>(&self) -> Vector<U> {
        if self.encoding() == Encoding::Scalar {
            return Vector::wrap(Scalar::new(U::coerce_from(self.get(0)), self.attributes()));
        }
        Vector::wrap(Coercion::<T, U>::new(self.clone()))
    }
}

impl<T: Arith> Vector<T> {
    /// Lazy progression `from, from + step, ...` up to `to`.
    pub fn sequence(from: T, to: T, step: T) -> RuntimeResult<Self> {
        let size = T::progression_len(from, to, step).map_err(RuntimeError::InvalidArgument)?;
        if size == 1 {
            return Ok(Self::scalar(from));
        }
        Ok(Self::wrap(Sequence::new(from, step, size)))
    }
}

impl IntVector {
    pub fn as_int(&self) -> IntVector {
        self.clone()
    }

    pub fn as_double(&self) -> DoubleVector {
        self.coerce()
    }

    pub fn as_logical(&self) -> LogicalVector {
        self.coerce()
    }
}

impl DoubleVector {
    pub fn as_int(&self) -> IntVector {
        self.coerce()
    }

    pub fn as_double(&self) -> DoubleVector {
        self.clone()
    }

    pub fn as_logical(&self) -> LogicalVector {
        self.coerce()
    }
}

impl LogicalVector {
    pub fn as_int(&self) -> IntVector {
        self.coerce()
    }

    pub fn as_double(&self) -> DoubleVector {
        self.coerce()
    }

    pub fn as_logical(&self) -> LogicalVector {
        self.clone()
    }
}

impl<T: Element> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iter().zip(other.iter()).all(|(a, b)| a.identical(b))
    }
}

impl<T: Element> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("type", &T::TYPE_NAME)
            .field("encoding", &self.encoding())
            .field("elements", &self.to_vec())
            .finish()
    }
}

struct Deparsed<T: Element>(T);

impl<T: Element> fmt::Display for Deparsed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.deparse(f)
    }
}

impl<T: Element> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.size() {
            0 => write!(f, "{}(0)", T::TYPE_NAME),
            1 => self.get(0).deparse(f),
            _ => {
                f.write_str("c(")?;
                for (i, element) in self.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", Deparsed(element))?;
                }
                f.write_str(")")
            }
        }
    }
}
