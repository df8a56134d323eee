use std::fmt;
use std::iter::FusedIterator;
use std::ops::Index;
use std::slice;

use crate::error::TaggedBufferError;
use crate::storage::Storage;

/// Read-only, random-access list of the tagged elements of a `TaggedBuffer`
///
/// The list is a fixed table of positions into the buffer's storage, built
/// once by `TaggedBuffer::as_tagged_list`. Lookups never call the predicate,
/// and later insertions into the buffer do not change the list.
pub struct TaggedList<'a, T> {
    storage: &'a Storage<T>,
    indexes: Box<[usize]>,
}

impl<'a, T> TaggedList<'a, T> {
    pub(crate) fn new(storage: &'a Storage<T>, indexes: Box<[usize]>) -> Self {
        Self { storage, indexes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Gets the tagged element at the specified position.
    ///
    /// Returns `None` if the position is out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'a T> {
        let position = *self.indexes.get(index)?;
        Some(self.storage.committed(position))
    }

    #[must_use]
    pub fn first(&self) -> Option<&'a T> {
        self.get(0)
    }

    #[must_use]
    pub fn last(&self) -> Option<&'a T> {
        self.get(self.len().checked_sub(1)?)
    }

    /// Returns an iterator over the tagged elements.
    #[must_use]
    pub fn iter(&self) -> TaggedListIter<'_, T> {
        TaggedListIter {
            storage: self.storage,
            indexes: self.indexes.iter(),
        }
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// The list is read-only.
    ///
    /// # Errors
    ///
    /// Always returns `TaggedBufferError::UnsupportedMutation`.
    pub fn insert(&mut self, _value: T) -> Result<(), TaggedBufferError> {
        Err(TaggedBufferError::UnsupportedMutation { operation: "insert" })
    }

    /// The list is read-only.
    ///
    /// # Errors
    ///
    /// Always returns `TaggedBufferError::UnsupportedMutation`.
    pub fn remove(&mut self, _index: usize) -> Result<T, TaggedBufferError> {
        Err(TaggedBufferError::UnsupportedMutation { operation: "remove" })
    }

    /// The list is read-only.
    ///
    /// # Errors
    ///
    /// Always returns `TaggedBufferError::UnsupportedMutation`.
    pub fn clear(&mut self) -> Result<(), TaggedBufferError> {
        Err(TaggedBufferError::UnsupportedMutation { operation: "clear" })
    }
}

impl<T> Index<usize> for TaggedList<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Some(value) => value,
            None => panic!(
                "Index {index} out of bounds for tagged list of length {}",
                self.len()
            ),
        }
    }
}

impl<'l, T> IntoIterator for &'l TaggedList<'_, T> {
    type Item = &'l T;
    type IntoIter = TaggedListIter<'l, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for TaggedList<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq<[T]> for TaggedList<'_, T> {
    fn eq(&self, other: &[T]) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for TaggedList<'_, T> {
    fn eq(&self, other: &[T; N]) -> bool {
        *self == other[..]
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for TaggedList<'_, T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        *self == other[..]
    }
}

/// Iterator over the elements of a `TaggedList`
pub struct TaggedListIter<'l, T> {
    storage: &'l Storage<T>,
    indexes: slice::Iter<'l, usize>,
}

impl<T> TaggedListIter<'_, T> {
    /// The list is read-only.
    ///
    /// # Errors
    ///
    /// Always returns `TaggedBufferError::UnsupportedMutation`.
    pub fn remove(&mut self) -> Result<(), TaggedBufferError> {
        Err(TaggedBufferError::UnsupportedMutation { operation: "remove" })
    }
}

impl<T> Clone for TaggedListIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage,
            indexes: self.indexes.clone(),
        }
    }
}

impl<'l, T> Iterator for TaggedListIter<'l, T> {
    type Item = &'l T;

    fn next(&mut self) -> Option<Self::Item> {
        let &position = self.indexes.next()?;
        Some(self.storage.committed(position))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indexes.size_hint()
    }
}

impl<T> DoubleEndedIterator for TaggedListIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let &position = self.indexes.next_back()?;
        Some(self.storage.committed(position))
    }
}

impl<T> ExactSizeIterator for TaggedListIter<'_, T> {}

impl<T> FusedIterator for TaggedListIter<'_, T> {}
