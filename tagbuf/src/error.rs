use thiserror::Error;

/// Error types for `TaggedBuffer` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum TaggedBufferError {
    /// A required input was absent
    #[error("Null input: {what} must be present")]
    NullInput {
        /// Which input was missing
        what: &'static str,
    },
    /// A cursor was advanced past its snapshot bound
    #[error("Cursor exhausted: all {bound} elements of the snapshot were consumed")]
    ExhaustedCursor {
        /// Number of elements the cursor could yield when it was created
        bound: usize,
    },
    /// A write was attempted through a read-only view
    #[error("Unsupported mutation: {operation} on a read-only view")]
    UnsupportedMutation {
        /// Name of the rejected operation
        operation: &'static str,
    },
    /// Invalid parameters provided to `TaggedBuffer::with_capacity`
    #[error("Invalid TaggedBuffer initialization: {reason}")]
    InvalidInitialization {
        /// Description of why initialization failed
        reason: &'static str,
    },
}
