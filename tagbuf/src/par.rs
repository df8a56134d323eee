use rayon::iter::plumbing::{bridge_unindexed, Folder, UnindexedConsumer, UnindexedProducer};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::core::TaggedBuffer;
use crate::traversal::Traversal;

/// Parallel iterator over a snapshot of a `TaggedBuffer`
///
/// Work is divided with `Traversal::try_split`, always keeping the lower
/// half on the left, so order-aware adapters such as `collect` see the
/// elements in insertion order. The producer is unindexed in both modes, so
/// `opt_len` keeps rayon's default of `None`.
pub struct ParIter<'a, T> {
    traversal: Traversal<'a, T>,
}

impl<'a, T: Send + Sync> ParallelIterator for ParIter<'a, T> {
    type Item = &'a T;

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        bridge_unindexed(self.traversal, consumer)
    }
}

impl<'a, T: Send + Sync> UnindexedProducer for Traversal<'a, T> {
    type Item = &'a T;

    fn split(mut self) -> (Self, Option<Self>) {
        match self.try_split() {
            Some(prefix) => (prefix, Some(self)),
            None => (self, None),
        }
    }

    fn fold_with<F>(self, folder: F) -> F
    where
        F: Folder<Self::Item>,
    {
        folder.consume_iter(self)
    }
}

impl<'a, T: Send + Sync> IntoParallelIterator for Traversal<'a, T> {
    type Iter = ParIter<'a, T>;
    type Item = &'a T;

    fn into_par_iter(self) -> Self::Iter {
        ParIter { traversal: self }
    }
}

impl<T: Send + Sync> TaggedBuffer<T> {
    /// Returns a parallel iterator over the elements present now, or only the
    /// tagged ones if `tagged`.
    #[must_use]
    pub fn par_iter(&self, tagged: bool) -> ParIter<'_, T> {
        self.traversal(tagged).into_par_iter()
    }
}
