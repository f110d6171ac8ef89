//! Decoder loop
//!
//! Repeatedly asks the oracle for a transition and applies it until the
//! state is terminal. An arc-standard derivation for `N` tokens takes exactly
//! `N` shifts and `N` arcs, so the loop is capped at `2N` steps; anything
//! beyond that is an oracle defect and aborts the parse.

use crate::error::{ParseError, Result};
use crate::oracle::DecisionOracle;
use crate::state::ParserState;

/// Counters collected while decoding one sentence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Transitions applied
    pub steps: usize,
    /// SHIFT transitions applied
    pub shifts: usize,
    /// LEFT-ARC and RIGHT-ARC transitions applied
    pub arcs: usize,
}

/// Drives a [`ParserState`] to a terminal state with a decision oracle
pub struct Decoder<'o, O: DecisionOracle + ?Sized> {
    oracle: &'o O,
    max_steps: Option<usize>,
}

impl<'o, O: DecisionOracle + ?Sized> Decoder<'o, O> {
    pub fn new(oracle: &'o O) -> Self {
        Self {
            oracle,
            max_steps: None,
        }
    }

    /// Lower the step cap below `2N`
    ///
    /// The cap never goes above `2N`; larger values have no effect.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Step limit for a sentence of `sentence_len` tokens
    pub fn step_limit(sentence_len: usize) -> usize {
        sentence_len.saturating_mul(2)
    }

    fn effective_limit(&self, sentence_len: usize) -> usize {
        let limit = Self::step_limit(sentence_len);
        self.max_steps.map_or(limit, |max| max.min(limit))
    }

    /// Run the state to completion
    ///
    /// Fails with [`ParseError::IllegalTransition`] as soon as the oracle
    /// proposes an illegal transition, and with
    /// [`ParseError::DecodingDiverged`] if the state is still not terminal
    /// after [`Self::step_limit`] steps (or the lower cap set with
    /// [`Self::with_max_steps`]).
    pub fn decode(&self, state: &mut ParserState) -> Result<DecodeStats> {
        let limit = self.effective_limit(state.sentence_len());
        let mut stats = DecodeStats::default();

        while !state.is_terminal() {
            if state.steps() >= limit {
                return Err(ParseError::DecodingDiverged {
                    steps: state.steps(),
                    limit,
                    state: state.snapshot(),
                });
            }

            let transition = self.oracle.choose(state);
            log::trace!(
                "[{}] step {}: {} on {}",
                self.oracle.name(),
                state.steps(),
                transition,
                state.snapshot()
            );

            let creates_arc = transition.creates_arc();
            state.apply(transition)?;

            stats.steps += 1;
            if creates_arc {
                stats.arcs += 1;
            } else {
                stats.shifts += 1;
            }
        }

        log::debug!(
            "[{}] decoded {} tokens in {} steps ({} shifts, {} arcs)",
            self.oracle.name(),
            state.sentence_len(),
            stats.steps,
            stats.shifts,
            stats.arcs
        );
        Ok(stats)
    }
}
