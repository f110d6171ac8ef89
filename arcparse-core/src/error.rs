//! Error types for parsing operations

use crate::state::StateSnapshot;
use crate::transition::Transition;
use thiserror::Error;

/// Errors raised while turning a tagged sentence into a dependency tree
///
/// None of these are retried inside the parser. A sentence either yields a
/// fully validated tree or fails with one of these variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Empty, oversized or otherwise unusable input sentence
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Why the input was rejected
        reason: String,
    },

    /// The oracle proposed a transition that is not currently legal
    #[error("illegal transition {transition} at step {step} ({state})")]
    IllegalTransition {
        /// The rejected transition
        transition: Transition,
        /// Number of transitions applied before the rejected one
        step: usize,
        /// Parser state at the time of the rejection
        state: StateSnapshot,
    },

    /// The decoder hit its step limit without reaching a terminal state
    #[error("decoding diverged after {steps} steps (limit {limit}) ({state})")]
    DecodingDiverged {
        /// Steps taken before giving up
        steps: usize,
        /// Configured step limit
        limit: usize,
        /// Parser state when the limit was reached
        state: StateSnapshot,
    },

    /// The assembled head assignment is not a single-rooted tree
    #[error("malformed tree: {reason}")]
    MalformedTree {
        /// Which tree invariant failed
        reason: String,
    },

    /// Invalid parser configuration or rule table
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Failure of one sentence inside a batch
    #[error("sentence {index}: {source}")]
    Sentence {
        /// Zero-based position of the sentence in the batch
        index: usize,
        /// The underlying failure
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        ParseError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ParseError::MalformedTree {
            reason: reason.into(),
        }
    }

    /// Attach a batch position to this error
    pub fn in_sentence(self, index: usize) -> Self {
        ParseError::Sentence {
            index,
            source: Box::new(self),
        }
    }

    /// The error with any batch wrapping removed
    pub fn root_cause(&self) -> &ParseError {
        match self {
            ParseError::Sentence { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type for parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;
