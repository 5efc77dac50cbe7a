//! Error types for the rmux experiment driver.
//!
//! This module provides a unified error type for every fallible operation in
//! the crate, using the `thiserror` crate for ergonomic error handling. All
//! errors are fatal to a run: they propagate with `?` and terminate it.

use thiserror::Error;

/// The main error type for rmux operations.
#[derive(Error, Debug)]
pub enum RmuxError {
    /// The requested number of bits cannot hold a multiplexer layout
    #[error("Invalid layout: {total_bits} bits cannot hold an address and its data bits (need at least 3)")]
    InvalidLayout {
        /// Requested total number of bits
        total_bits: usize,
    },

    /// Environment state has the wrong number of positions
    #[error("Invalid state length: expected {expected}, got {actual}")]
    StateLength {
        /// Expected length (the layout's total bits)
        expected: usize,
        /// Actual length received
        actual: usize,
    },

    /// Invalid parameter name, kind or value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Index out of bounds
    #[error("Index out of bounds: index {index}, length {length}")]
    IndexOutOfBounds {
        /// The index that was accessed
        index: usize,
        /// The valid length
        length: usize,
    },

    /// Learner was called outside the begin/decide/update/end sequence
    #[error("Learner protocol violation: {call} called while {phase}")]
    Protocol {
        /// The call that was attempted
        call: &'static str,
        /// The phase the learner was in
        phase: &'static str,
    },

    /// Failure reported by the learner itself
    #[error("Learner error: {0}")]
    Learner(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error occurred
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// Generic error with custom message
    #[error("{0}")]
    Other(String),
}

/// A specialized `Result` type for rmux operations.
pub type Result<T> = std::result::Result<T, RmuxError>;
