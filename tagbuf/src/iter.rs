use std::iter::FusedIterator;

use crate::core::Snapshot;
use crate::error::TaggedBufferError;
use crate::predicate::Predicate;
use crate::storage::Storage;

/// Single-pass cursor over a `TaggedBuffer`
///
/// The cursor only yields elements that were present when it was created.
/// In tagged mode the predicate is called lazily, once per element scanned,
/// and never past the last tagged element of the snapshot. In untagged mode
/// it is never called.
pub struct Cursor<'a, T> {
    storage: &'a Storage<T>,
    predicate: &'a Predicate<T>,
    tagged: bool,
    snapshot: Snapshot,
    /// First index not yet classified
    next_lookup: usize,
    returned: usize,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(
        storage: &'a Storage<T>,
        predicate: &'a Predicate<T>,
        tagged: bool,
        snapshot: Snapshot,
    ) -> Self {
        Self {
            storage,
            predicate,
            tagged,
            snapshot,
            next_lookup: 0,
            returned: 0,
        }
    }

    fn bound(&self) -> usize {
        if self.tagged {
            self.snapshot.tagged_len
        } else {
            self.snapshot.len
        }
    }

    /// Returns `true` if `try_next` would yield an element.
    ///
    /// Only compares counters: repeated calls neither advance the cursor nor
    /// call the predicate.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.returned < self.bound()
    }

    fn find_next(&self) -> Option<usize> {
        if !self.tagged {
            return Some(self.next_lookup);
        }
        (self.next_lookup..self.snapshot.len)
            .find(|&i| self.predicate.test(self.storage.committed(i)))
    }

    /// Advances the cursor and returns the next element.
    ///
    /// # Errors
    ///
    /// Returns `TaggedBufferError::ExhaustedCursor` if every element of the
    /// snapshot was already returned.
    pub fn try_next(&mut self) -> Result<&'a T, TaggedBufferError> {
        let bound = self.bound();
        if !self.has_next() {
            return Err(TaggedBufferError::ExhaustedCursor { bound });
        }

        let Some(index) = self.find_next() else {
            // The predicate accepted fewer elements than it did on insertion.
            self.next_lookup = self.snapshot.len;
            self.returned = bound;
            return Err(TaggedBufferError::ExhaustedCursor { bound });
        };

        self.next_lookup = index + 1;
        self.returned += 1;
        Ok(self.storage.committed(index))
    }

    /// Cursors are read-only.
    ///
    /// # Errors
    ///
    /// Always returns `TaggedBufferError::UnsupportedMutation`.
    pub fn remove(&mut self) -> Result<(), TaggedBufferError> {
        Err(TaggedBufferError::UnsupportedMutation { operation: "remove" })
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bound() - self.returned;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Cursor<'_, T> {}

impl<T> FusedIterator for Cursor<'_, T> {}
