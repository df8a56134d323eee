use std::fmt;

use crate::predicate::Predicate;
use crate::storage::Storage;

/// Splittable traversal over a snapshot of a `TaggedBuffer`
///
/// A traversal covers the half-open index range `[start, end)`, where `end`
/// is the buffer length when the traversal was created. `try_split` halves
/// the remaining range by index, so disjoint halves can be consumed on
/// different threads. In tagged mode the predicate is tested as elements are
/// visited, never ahead of time: halves may hold very different numbers of
/// tagged elements.
pub struct Traversal<'a, T> {
    storage: &'a Storage<T>,
    predicate: &'a Predicate<T>,
    tagged: bool,
    start: usize,
    end: usize,
}

impl<'a, T> Traversal<'a, T> {
    pub(crate) fn new(
        storage: &'a Storage<T>,
        predicate: &'a Predicate<T>,
        tagged: bool,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            storage,
            predicate,
            tagged,
            start,
            end,
        }
    }

    #[must_use]
    pub fn is_tagged(&self) -> bool {
        self.tagged
    }

    /// Applies `consumer` to the next element and returns `true`, or returns
    /// `false` if the range is exhausted.
    ///
    /// In tagged mode this skips elements rejected by the predicate; the
    /// consumer only ever sees tagged elements.
    pub fn try_advance<F>(&mut self, consumer: F) -> bool
    where
        F: FnOnce(&'a T),
    {
        while self.start < self.end {
            let value = self.storage.committed(self.start);
            self.start += 1;
            if !self.tagged || self.predicate.test(value) {
                consumer(value);
                return true;
            }
        }
        false
    }

    /// Splits off the first half of the remaining range.
    ///
    /// Returns a traversal over `[start, mid)` and keeps `[mid, end)`, or
    /// `None` if fewer than two elements remain.
    #[must_use]
    pub fn try_split(&mut self) -> Option<Self> {
        let mid = self.start + (self.end - self.start) / 2;
        if mid == self.start {
            return None;
        }
        let prefix = Self::new(self.storage, self.predicate, self.tagged, self.start, mid);
        self.start = mid;
        Some(prefix)
    }

    /// Number of positions left in the range.
    ///
    /// Exact in untagged mode. In tagged mode it is an upper bound on the
    /// number of elements still to be yielded.
    #[must_use]
    pub fn estimate_size(&self) -> usize {
        self.end - self.start
    }

    /// The exact number of remaining elements, known only in untagged mode.
    #[must_use]
    pub fn exact_size(&self) -> Option<usize> {
        (!self.tagged).then(|| self.estimate_size())
    }
}

impl<'a, T> Iterator for Traversal<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut next = None;
        self.try_advance(|value| next = Some(value));
        next
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.estimate_size();
        if self.tagged {
            (0, Some(remaining))
        } else {
            (remaining, Some(remaining))
        }
    }
}

impl<T> fmt::Debug for Traversal<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traversal")
            .field("tagged", &self.tagged)
            .field("start", &self.start)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}
