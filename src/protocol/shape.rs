//! Container shapes a decoded request batch can be materialized into

use std::{fmt, ops::Deref, rc::Rc, sync::Arc};

/// Concrete container form requested for a decoded batch
///
/// Every shape decodes from the same wire grammar; the shape only decides
/// which container the decoded requests end up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetShape {
    /// Fixed-length array
    FixedArray,
    /// Growable ordered list
    MutableList,
    /// Read-only iterable collection
    ReadOnlyCollection,
    /// Read-only collection with a known length
    ReadOnlySizedCollection,
    /// Read-only indexable sequence
    ReadOnlyIndexable,
}

impl TargetShape {
    /// Wrap a lone request decoded from a single-object payload
    pub fn materialize_single<R>(self, request: R) -> RequestBatch<R> {
        match self {
            TargetShape::MutableList => {
                let mut list = Vec::with_capacity(1);
                list.push(request);
                RequestBatch::List(list)
            }
            _ => RequestBatch::Array(Box::new([request])),
        }
    }

    /// Turn the accumulation buffer of a batch array into the final container
    pub fn materialize_buffer<R>(self, buffer: Vec<R>) -> RequestBatch<R> {
        match self {
            TargetShape::FixedArray => RequestBatch::Array(buffer.into_boxed_slice()),
            _ => RequestBatch::List(buffer),
        }
    }
}

/// Type descriptor a host framework hands to the capability check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    FixedArray,
    MutableList,
    ReadOnlyCollection,
    ReadOnlySizedCollection,
    ReadOnlyIndexable,
    /// Key/value mapping
    Mapping,
    /// Unordered set
    Set,
    /// String, number, boolean or null
    Scalar,
    /// A lone request, not a container
    Single,
}

impl TypeDescriptor {
    /// The batch shape this descriptor stands for, if it is one
    pub fn target_shape(self) -> Option<TargetShape> {
        match self {
            TypeDescriptor::FixedArray => Some(TargetShape::FixedArray),
            TypeDescriptor::MutableList => Some(TargetShape::MutableList),
            TypeDescriptor::ReadOnlyCollection => Some(TargetShape::ReadOnlyCollection),
            TypeDescriptor::ReadOnlySizedCollection => Some(TargetShape::ReadOnlySizedCollection),
            TypeDescriptor::ReadOnlyIndexable => Some(TargetShape::ReadOnlyIndexable),
            TypeDescriptor::Mapping
            | TypeDescriptor::Set
            | TypeDescriptor::Scalar
            | TypeDescriptor::Single => None,
        }
    }
}

impl From<TargetShape> for TypeDescriptor {
    fn from(shape: TargetShape) -> Self {
        match shape {
            TargetShape::FixedArray => TypeDescriptor::FixedArray,
            TargetShape::MutableList => TypeDescriptor::MutableList,
            TargetShape::ReadOnlyCollection => TypeDescriptor::ReadOnlyCollection,
            TargetShape::ReadOnlySizedCollection => TypeDescriptor::ReadOnlySizedCollection,
            TargetShape::ReadOnlyIndexable => TypeDescriptor::ReadOnlyIndexable,
        }
    }
}

/// An ordered sequence of decoded requests
///
/// Order always matches wire order. Both variants read as a slice, so every
/// read-only shape is satisfied by either of them.
#[derive(Clone, PartialEq, Eq)]
pub enum RequestBatch<R> {
    /// Fixed-length storage
    Array(Box<[R]>),
    /// Growable storage
    List(Vec<R>),
}

impl<R> RequestBatch<R> {
    /// Number of requests in the batch
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Check if the batch holds no requests
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// View the requests as a slice
    pub fn as_slice(&self) -> &[R] {
        match self {
            RequestBatch::Array(array) => array,
            RequestBatch::List(list) => list,
        }
    }

    /// Convert into a `Vec`, reusing the list allocation when there is one
    pub fn into_vec(self) -> Vec<R> {
        match self {
            RequestBatch::Array(array) => array.into_vec(),
            RequestBatch::List(list) => list,
        }
    }

    /// Convert into a boxed slice
    pub fn into_boxed_slice(self) -> Box<[R]> {
        match self {
            RequestBatch::Array(array) => array,
            RequestBatch::List(list) => list.into_boxed_slice(),
        }
    }
}

impl<R> Deref for RequestBatch<R> {
    type Target = [R];

    fn deref(&self) -> &[R] {
        self.as_slice()
    }
}

impl<R> IntoIterator for RequestBatch<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a, R> IntoIterator for &'a RequestBatch<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<R: fmt::Debug> fmt::Debug for RequestBatch<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// A Rust container type that a request batch can be decoded into
pub trait BatchTarget: Sized {
    /// The request type held by the container
    type Item;

    /// The shape this container asks for
    const SHAPE: TargetShape;

    /// Build the container from a batch materialized for [`Self::SHAPE`]
    fn from_batch(batch: RequestBatch<Self::Item>) -> Self;
}

impl<R> BatchTarget for Box<[R]> {
    type Item = R;

    const SHAPE: TargetShape = TargetShape::FixedArray;

    fn from_batch(batch: RequestBatch<R>) -> Self {
        batch.into_boxed_slice()
    }
}

impl<R> BatchTarget for Vec<R> {
    type Item = R;

    const SHAPE: TargetShape = TargetShape::MutableList;

    fn from_batch(batch: RequestBatch<R>) -> Self {
        batch.into_vec()
    }
}

impl<R> BatchTarget for RequestBatch<R> {
    type Item = R;

    const SHAPE: TargetShape = TargetShape::ReadOnlyCollection;

    fn from_batch(batch: RequestBatch<R>) -> Self {
        batch
    }
}

impl<R> BatchTarget for Rc<[R]> {
    type Item = R;

    const SHAPE: TargetShape = TargetShape::ReadOnlySizedCollection;

    fn from_batch(batch: RequestBatch<R>) -> Self {
        Rc::from(batch.into_boxed_slice())
    }
}

impl<R> BatchTarget for Arc<[R]> {
    type Item = R;

    const SHAPE: TargetShape = TargetShape::ReadOnlyIndexable;

    fn from_batch(batch: RequestBatch<R>) -> Self {
        Arc::from(batch.into_boxed_slice())
    }
}
