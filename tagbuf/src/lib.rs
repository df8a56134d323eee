//! `TaggedBuffer`: an append-only buffer with a predicate-tagged view.
//!
//! A `TaggedBuffer` stores every inserted element and, through a predicate
//! fixed at construction, a second view made of the "tagged" elements the
//! predicate accepts. Both views can be read through:
//!
//! - `size()` and `find_first()`
//! - `for_each()`, an eager callback traversal
//! - `as_tagged_list()`, a read-only random-access list
//! - `iter()`, a single-pass cursor
//! - `traversal()`, a splittable range for divide-and-conquer consumption,
//!   and `par_iter()` on top of it (feature `parallel`, on by default)
//!
//! Every view is a snapshot: it only sees the elements present when it was
//! created, even though it shares storage with the buffer.
//!
//! # Performance Characteristics
//!
//! ## Time Complexity
//! - `insert()`: amortized O(1), one predicate call
//! - `size()`: O(1), no predicate call
//! - `get()`: O(1)
//! - `as_tagged_list()`: O(n) once, then O(1) `get()`
//! - `iter()`, `traversal()`: O(1) to create, O(n) to drain
//!
//! ## Predicate Calls
//! The predicate is treated as pure but possibly expensive, and it is never
//! cached. Untagged reads never call it. Tagged cursors and traversals call it
//! lazily, at most once per element they visit.
//!
//! ## Storage
//! Elements live in segments whose sizes double; a segment is never moved or
//! reallocated, and a slot is never written twice. This is what lets views
//! hold plain indexes across later insertions.
//!
//! # Example
//!
//! ```
//! # use tagbuf::TaggedBuffer;
//! let buffer = TaggedBuffer::new(|i: &i32| i % 2 == 0);
//!
//! buffer.insert(1).unwrap();
//! buffer.insert(2).unwrap();
//! buffer.insert(3).unwrap();
//! buffer.insert(5).unwrap();
//!
//! assert_eq!(buffer.size(true), 1);
//! assert_eq!(buffer.size(false), 4);
//!
//! // `None` is the absent value and leaves the buffer unchanged
//! assert!(buffer.insert(None::<i32>).is_err());
//! assert_eq!(buffer.size(false), 4);
//!
//! assert_eq!(buffer.find_first(true), Some(&2));
//! assert_eq!(buffer.find_first(false), Some(&1));
//! ```
//!
//! # Snapshot Isolation
//!
//! ```
//! # use tagbuf::TaggedBuffer;
//! let buffer = TaggedBuffer::new(|i: &i32| i % 10 == 0);
//! buffer.insert(2).unwrap();
//! buffer.insert(100).unwrap();
//!
//! let cursor = buffer.iter(true);
//! let list = buffer.as_tagged_list();
//! buffer.insert(200).unwrap();
//!
//! assert_eq!(cursor.copied().collect::<Vec<_>>(), vec![100]);
//! assert_eq!(list, [100]);
//! assert_eq!(buffer.size(true), 2);
//! ```
//!
//! # Cursor Interface
//!
//! ```
//! # use tagbuf::{TaggedBuffer, TaggedBufferError};
//! let buffer = TaggedBuffer::new(|i: &i32| *i >= 10);
//! buffer.insert(3).unwrap();
//! buffer.insert(42).unwrap();
//! buffer.insert(7).unwrap();
//!
//! let mut cursor = buffer.iter(true);
//! assert!(cursor.has_next());
//! assert_eq!(cursor.try_next(), Ok(&42));
//! assert!(!cursor.has_next());
//! assert_eq!(
//!     cursor.try_next(),
//!     Err(TaggedBufferError::ExhaustedCursor { bound: 1 })
//! );
//! ```
//!
//! # Splittable Traversal
//!
//! ```
//! # use tagbuf::TaggedBuffer;
//! let buffer = TaggedBuffer::new(|i: &u32| i % 3 == 0);
//! for i in 0..10u32 {
//!     buffer.insert(i).unwrap();
//! }
//!
//! let mut right = buffer.traversal(true);
//! let left = right.try_split().unwrap();
//! assert_eq!(left.estimate_size(), 5);
//! assert_eq!(right.estimate_size(), 5);
//!
//! let merged: Vec<u32> = left.chain(right).copied().collect();
//! assert_eq!(merged, vec![0, 3, 6, 9]);
//! ```

mod core;
mod error;
mod iter;
mod list;
#[cfg(feature = "parallel")]
mod par;
mod predicate;
mod storage;
mod traversal;

// Re-export public types and traits
pub use crate::core::TaggedBuffer;
pub use error::TaggedBufferError;
pub use iter::Cursor;
pub use list::{TaggedList, TaggedListIter};
#[cfg(feature = "parallel")]
pub use par::ParIter;
pub use predicate::Predicate;
pub use traversal::Traversal;
