use std::cell::Cell;
use std::fmt;

use crate::error::TaggedBufferError;
use crate::iter::Cursor;
use crate::list::TaggedList;
use crate::predicate::Predicate;
use crate::storage::{Storage, DEFAULT_INITIAL_CAPACITY};
use crate::traversal::Traversal;

/// Element counts captured when a view is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub len: usize,
    pub tagged_len: usize,
}

/// An append-only buffer that keeps a tagged subsequence alongside the full
/// sequence of inserted elements.
///
/// `insert` takes `&self` so that views created earlier stay usable while
/// more elements are appended. The counters live in `Cell`s, which makes the
/// buffer `!Sync`: only the thread that owns it can insert.
pub struct TaggedBuffer<T> {
    storage: Storage<T>,
    predicate: Predicate<T>,
    len: Cell<usize>,
    tagged_len: Cell<usize>,
}

impl<T> TaggedBuffer<T> {
    /// Creates an empty buffer tagging the elements accepted by `predicate`.
    #[allow(clippy::expect_used)]
    pub fn new<P>(predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::with_capacity(predicate, DEFAULT_INITIAL_CAPACITY)
            .expect("default initial capacity is valid")
    }

    /// Creates an empty buffer, failing if the predicate is absent.
    ///
    /// # Errors
    ///
    /// Returns `TaggedBufferError::NullInput` if `predicate` is `None`.
    pub fn try_new<P>(predicate: Option<P>) -> Result<Self, TaggedBufferError>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let predicate = predicate.ok_or(TaggedBufferError::NullInput { what: "predicate" })?;
        Ok(Self::new(predicate))
    }

    /// Creates an empty buffer with room for at least `capacity` elements
    /// before the first growth.
    ///
    /// # Errors
    ///
    /// Returns `TaggedBufferError::InvalidInitialization` if `capacity` is 0
    /// or too large to round up to a power of two.
    pub fn with_capacity<P>(predicate: P, capacity: usize) -> Result<Self, TaggedBufferError>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::from_predicate_with_capacity(Predicate::new(predicate), capacity)
    }

    /// Creates an empty buffer from an existing, possibly shared, predicate.
    ///
    /// ```
    /// # use tagbuf::{Predicate, TaggedBuffer};
    /// let even = Predicate::new(|i: &i32| i % 2 == 0);
    /// let first = TaggedBuffer::from_predicate(even.clone());
    /// let second = TaggedBuffer::from_predicate(even);
    ///
    /// first.insert(2).unwrap();
    /// second.insert(3).unwrap();
    /// assert_eq!(first.size(true), 1);
    /// assert_eq!(second.size(true), 0);
    /// ```
    #[allow(clippy::expect_used)]
    pub fn from_predicate(predicate: Predicate<T>) -> Self {
        Self::from_predicate_with_capacity(predicate, DEFAULT_INITIAL_CAPACITY)
            .expect("default initial capacity is valid")
    }

    /// Like `with_capacity`, from an existing predicate.
    ///
    /// # Errors
    ///
    /// Returns `TaggedBufferError::InvalidInitialization` if `capacity` is 0
    /// or too large to round up to a power of two.
    pub fn from_predicate_with_capacity(
        predicate: Predicate<T>,
        capacity: usize,
    ) -> Result<Self, TaggedBufferError> {
        Ok(Self {
            storage: Storage::with_capacity(capacity)?,
            predicate,
            len: Cell::new(0),
            tagged_len: Cell::new(0),
        })
    }

    /// Appends a value, testing the predicate on it exactly once.
    ///
    /// Accepts either a `T` or an `Option<T>`; `None` stands for an absent
    /// value. The buffer is left untouched on error, and also if the
    /// predicate panics.
    ///
    /// # Errors
    ///
    /// Returns `TaggedBufferError::NullInput` if `value` is `None`.
    #[allow(clippy::expect_used)]
    pub fn insert(&self, value: impl Into<Option<T>>) -> Result<(), TaggedBufferError> {
        let value = value
            .into()
            .ok_or(TaggedBufferError::NullInput { what: "value" })?;
        let tagged = self.predicate.test(&value);

        let index = self.len.get();
        self.storage
            .store(index, value)
            .map_err(drop)
            .expect("storage slot is written exactly once");

        self.len.set(index + 1);
        if tagged {
            self.tagged_len.set(self.tagged_len.get() + 1);
        }
        Ok(())
    }

    /// Number of tagged elements if `tagged`, otherwise of all elements.
    ///
    /// Never calls the predicate.
    #[must_use]
    pub fn size(&self, tagged: bool) -> usize {
        if tagged {
            self.tagged_len.get()
        } else {
            self.len.get()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len.get() == 0
    }

    /// Number of elements the buffer can hold before its next growth.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Gets the element at position `index` of the full sequence.
    ///
    /// Returns `None` if the index is out of bounds. Never calls the predicate.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len.get() {
            return None;
        }
        self.storage.get(index)
    }

    /// Returns the first element, or the first tagged one if `tagged`.
    ///
    /// The untagged lookup never calls the predicate. The tagged lookup stops
    /// at the first match, and does not call the predicate at all when no
    /// element is tagged.
    #[must_use]
    pub fn find_first(&self, tagged: bool) -> Option<&T> {
        self.iter(tagged).next()
    }

    /// Applies `consumer` to every element present now, or only to the tagged
    /// ones if `tagged`, in insertion order.
    ///
    /// Elements inserted by `consumer` itself are not visited.
    pub fn for_each<F>(&self, tagged: bool, consumer: F)
    where
        F: FnMut(&T),
    {
        self.iter(tagged).for_each(consumer);
    }

    /// Builds a read-only, random-access list of the elements tagged so far.
    ///
    /// This scans the whole buffer once, calling the predicate on every
    /// element. The list keeps its contents when more elements are inserted.
    #[must_use]
    pub fn as_tagged_list(&self) -> TaggedList<'_, T> {
        let snapshot = self.snapshot();
        let mut indexes = Vec::with_capacity(snapshot.tagged_len);
        indexes.extend(
            (0..snapshot.len).filter(|&i| self.predicate.test(self.storage.committed(i))),
        );
        tracing::trace!(
            scanned = snapshot.len,
            tagged = indexes.len(),
            "built tagged list index"
        );
        TaggedList::new(&self.storage, indexes.into_boxed_slice())
    }

    /// Returns a cursor over the elements present now, or only the tagged
    /// ones if `tagged`.
    #[must_use]
    pub fn iter(&self, tagged: bool) -> Cursor<'_, T> {
        Cursor::new(&self.storage, &self.predicate, tagged, self.snapshot())
    }

    /// Returns a splittable traversal over the elements present now.
    ///
    /// Creating it never calls the predicate; the tagged mode filters lazily
    /// as the traversal advances.
    #[must_use]
    pub fn traversal(&self, tagged: bool) -> Traversal<'_, T> {
        Traversal::new(&self.storage, &self.predicate, tagged, 0, self.len.get())
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            len: self.len.get(),
            tagged_len: self.tagged_len.get(),
        }
    }
}

impl<'a, T> IntoIterator for &'a TaggedBuffer<T> {
    type Item = &'a T;
    type IntoIter = Cursor<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter(false)
    }
}

impl<T> fmt::Debug for TaggedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedBuffer")
            .field("len", &self.len.get())
            .field("tagged_len", &self.tagged_len.get())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}
