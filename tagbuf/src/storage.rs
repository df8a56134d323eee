use std::sync::OnceLock;

use crate::error::TaggedBufferError;

pub(crate) const DEFAULT_INITIAL_CAPACITY: usize = 4;

type Segment<T> = Box<[OnceLock<T>]>;

/// Append-only slot storage made of segments that double the capacity.
///
/// Segment 0 holds `first` slots and segment `k > 0` holds `first << (k - 1)`
/// slots, so after allocating segment `k` the total capacity is `first << k`.
/// Segments are never moved once allocated and every slot is written at most
/// once: an index keeps addressing the same value for the lifetime of the
/// storage, across any number of later growths.
pub(crate) struct Storage<T> {
    first: usize,
    segments: Box<[OnceLock<Segment<T>>]>,
}

impl<T> Storage<T> {
    /// Creates storage whose first segment holds at least `capacity` slots.
    ///
    /// The first segment is allocated eagerly and sized to the next power of
    /// two, which keeps index lookup to a shift and a `ilog2`.
    ///
    /// # Errors
    ///
    /// Returns `TaggedBufferError::InvalidInitialization` if `capacity` is 0
    /// or has no representable power of two above it.
    pub fn with_capacity(capacity: usize) -> Result<Self, TaggedBufferError> {
        if capacity == 0 {
            return Err(TaggedBufferError::InvalidInitialization {
                reason: "capacity must be greater than zero",
            });
        }
        let first = capacity.checked_next_power_of_two().ok_or(
            TaggedBufferError::InvalidInitialization {
                reason: "capacity exceeds the largest power of two representable by usize",
            },
        )?;

        // One directory entry per segment that an index of type usize can reach.
        let directory_len = (usize::BITS - first.trailing_zeros()) as usize + 1;
        let segments = (0..directory_len).map(|_| OnceLock::new()).collect();

        let storage = Self { first, segments };
        if let Some(head) = storage.segments.first() {
            head.get_or_init(|| storage.allocate(0));
        }
        Ok(storage)
    }

    /// Maps a logical index to `(segment, offset within segment)`.
    fn locate(&self, index: usize) -> (usize, usize) {
        if index < self.first {
            return (0, index);
        }
        let segment = (index / self.first).ilog2() as usize + 1;
        (segment, index - self.segment_len(segment))
    }

    /// Number of slots in `segment`. For `segment > 0` this is also the
    /// logical index of its first slot.
    fn segment_len(&self, segment: usize) -> usize {
        if segment == 0 {
            self.first
        } else {
            self.first << (segment - 1)
        }
    }

    fn allocate(&self, segment: usize) -> Segment<T> {
        let slots = self.segment_len(segment);
        tracing::trace!(
            segment,
            slots,
            capacity = self.first << segment,
            "allocating storage segment"
        );
        (0..slots).map(|_| OnceLock::new()).collect()
    }

    /// Total number of slots in allocated segments.
    #[must_use]
    pub fn capacity(&self) -> usize {
        let allocated = self
            .segments
            .iter()
            .take_while(|segment| segment.get().is_some())
            .count();
        match allocated {
            0 => 0,
            n => self.first << (n - 1),
        }
    }

    /// Returns the value at `index`, or `None` if that slot was never written.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        let (segment, offset) = self.locate(index);
        self.segments.get(segment)?.get()?.get(offset)?.get()
    }

    /// Returns the value at an index below a committed length.
    ///
    /// # Panics
    ///
    /// Panics if the slot was never written, which means the caller read past
    /// the length it captured.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn committed(&self, index: usize) -> &T {
        self.get(index)
            .expect("slots below a committed length are initialized")
    }

    /// Writes `value` into the slot at `index`, allocating its segment first
    /// if needed.
    ///
    /// # Errors
    ///
    /// Gives `value` back if the slot was already written.
    pub fn store(&self, index: usize, value: T) -> Result<(), T> {
        let (segment, offset) = self.locate(index);
        let Some(entry) = self.segments.get(segment) else {
            return Err(value);
        };
        let slots = entry.get_or_init(|| self.allocate(segment));
        match slots.get(offset) {
            Some(slot) => slot.set(value),
            None => Err(value),
        }
    }
}
