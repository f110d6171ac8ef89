//! Decision oracles
//!
//! An oracle looks at the current [`ParserState`] and names the next
//! transition. The decoder treats it as an opaque capability: a scripted
//! sequence, a rule table, a linear classifier or a neural scorer all plug in
//! through the same trait.

mod rules;
mod scripted;

pub use rules::{Direction, Rule, RuleTable, RuleTableOracle};
pub use scripted::ScriptedOracle;

use crate::state::ParserState;
use crate::transition::Transition;

/// Chooses the next transition for a parser state
///
/// Implementations must be deterministic: the same state must always produce
/// the same transition. The returned transition should be one of
/// [`ParserState::legal_actions`]; anything else aborts the parse with
/// [`crate::ParseError::IllegalTransition`].
///
/// Oracles are shared between threads when sentences are parsed
/// concurrently, so any internal caches are the implementation's own
/// synchronization concern.
pub trait DecisionOracle: Send + Sync {
    /// Pick the next transition
    fn choose(&self, state: &ParserState) -> Transition;

    /// Human-readable name used in logs
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> DecisionOracle for F
where
    F: Fn(&ParserState) -> Transition + Send + Sync,
{
    fn choose(&self, state: &ParserState) -> Transition {
        self(state)
    }

    fn name(&self) -> &str {
        "closure"
    }
}
