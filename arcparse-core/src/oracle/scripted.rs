//! Oracle that replays a fixed transition sequence

use super::DecisionOracle;
use crate::state::ParserState;
use crate::transition::Transition;

/// Replays a fixed list of transitions, indexed by the state's step count
///
/// Because the position comes from [`ParserState::steps`] rather than from
/// internal bookkeeping, one instance can drive any number of parses and
/// stays deterministic. Once the script runs out it proposes `SHIFT`, which
/// the parser rejects as soon as the buffer is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedOracle {
    script: Vec<Transition>,
}

impl ScriptedOracle {
    pub fn new(script: Vec<Transition>) -> Self {
        Self { script }
    }

    pub fn script(&self) -> &[Transition] {
        &self.script
    }
}

impl FromIterator<Transition> for ScriptedOracle {
    fn from_iter<I: IntoIterator<Item = Transition>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl DecisionOracle for ScriptedOracle {
    fn choose(&self, state: &ParserState) -> Transition {
        self.script
            .get(state.steps())
            .cloned()
            .unwrap_or(Transition::Shift)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
