use std::fmt;
use std::sync::Arc;

/// The tag of a `TaggedBuffer`: a pure function deciding whether an element
/// belongs to the tagged view.
///
/// Cloning is cheap; every clone calls the same function.
pub struct Predicate<T> {
    test: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Predicate<T> {
    /// Wraps `test` so it can be shared between buffers.
    pub fn new<P>(test: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            test: Arc::new(test),
        }
    }

    /// Returns `true` if `value` is tagged.
    #[inline]
    #[must_use]
    pub fn test(&self, value: &T) -> bool {
        (self.test)(value)
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            test: Arc::clone(&self.test),
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}
