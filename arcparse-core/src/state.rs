//! Parser state: buffer, stack and arc set
//!
//! The state is owned by a single decode invocation. Decision oracles only
//! ever see it through a shared reference.

use crate::error::{ParseError, Result};
use crate::token::{Token, ROOT};
use crate::transition::{Transition, TransitionKind};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::fmt;

/// Set of transition kinds legal in some state
pub type LegalActions = SmallVec<[TransitionKind; 3]>;

/// Head and relation label recorded for one child token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attachment {
    pub head: usize,
    pub label: String,
}

/// Compact, owned description of a state used in error reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Stack contents, bottom first
    pub stack: Vec<usize>,
    /// Buffer contents, front first
    pub buffer: Vec<usize>,
    /// Number of arcs built so far
    pub arcs: usize,
}

impl fmt::Display for StateSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stack={:?}, buffer={:?}, arcs={}",
            self.stack, self.buffer, self.arcs
        )
    }
}

/// Top of the stack and front of the buffer, as tokens
///
/// Slot 0 is `s1` / `b1`. Empty slots are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureWindow<'a> {
    pub stack: [Option<&'a Token>; 3],
    pub buffer: [Option<&'a Token>; 3],
}

/// Arc-standard configuration for one sentence
#[derive(Debug, Clone)]
pub struct ParserState {
    tokens: Vec<Token>,
    buffer: VecDeque<usize>,
    stack: Vec<usize>,
    arcs: Vec<Option<Attachment>>,
    arc_count: usize,
    steps: usize,
}

impl ParserState {
    /// Initial state: buffer = `1..=N`, stack = `[ROOT]`, no arcs
    ///
    /// `tokens` must come from [`crate::token::adapt`], i.e. ROOT at index 0
    /// followed by the sentence.
    pub fn new(tokens: Vec<Token>) -> Self {
        let len = tokens.len();
        Self {
            buffer: (1..len).collect(),
            stack: vec![ROOT],
            arcs: vec![None; len],
            arc_count: 0,
            steps: 0,
            tokens,
        }
    }

    /// Number of sentence tokens, ROOT excluded
    pub fn sentence_len(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }

    /// All tokens, ROOT first
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Stack contents, bottom first
    pub fn stack(&self) -> &[usize] {
        &self.stack
    }

    /// Buffer contents, front first
    pub fn buffer(&self) -> &VecDeque<usize> {
        &self.buffer
    }

    /// Number of transitions applied so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of arcs built so far
    pub fn arc_count(&self) -> usize {
        self.arc_count
    }

    /// Stack top
    pub fn s1(&self) -> Option<usize> {
        self.stack_from_top(0)
    }

    /// Element below the stack top
    pub fn s2(&self) -> Option<usize> {
        self.stack_from_top(1)
    }

    /// Front of the buffer
    pub fn b1(&self) -> Option<usize> {
        self.buffer.front().copied()
    }

    /// Stack element `depth` positions below the top
    pub fn stack_from_top(&self, depth: usize) -> Option<usize> {
        self.stack.len().checked_sub(depth + 1).map(|i| self.stack[i])
    }

    /// Head and label of `child`, if it has been attached
    pub fn head_of(&self, child: usize) -> Option<&Attachment> {
        self.arcs.get(child).and_then(Option::as_ref)
    }

    /// Arcs built so far as `(child, attachment)` in child order
    pub fn arcs(&self) -> impl Iterator<Item = (usize, &Attachment)> + '_ {
        self.arcs
            .iter()
            .enumerate()
            .filter_map(|(child, arc)| arc.as_ref().map(|arc| (child, arc)))
    }

    /// Accept condition: buffer empty and only ROOT left on the stack
    pub fn is_terminal(&self) -> bool {
        self.buffer.is_empty() && self.stack.len() == 1
    }

    /// Transition kinds legal in this state
    pub fn legal_actions(&self) -> LegalActions {
        let mut actions = LegalActions::new();
        if !self.buffer.is_empty() {
            actions.push(TransitionKind::Shift);
        }
        if self.stack.len() >= 2 {
            if self.s2() != Some(ROOT) {
                actions.push(TransitionKind::LeftArc);
            }
            actions.push(TransitionKind::RightArc);
        }
        actions
    }

    pub fn is_legal(&self, transition: &Transition) -> bool {
        match transition.kind() {
            TransitionKind::Shift => !self.buffer.is_empty(),
            TransitionKind::LeftArc => self.stack.len() >= 2 && self.s2() != Some(ROOT),
            TransitionKind::RightArc => self.stack.len() >= 2,
        }
    }

    /// Apply one transition
    ///
    /// Fails with [`ParseError::IllegalTransition`] when the transition is
    /// not legal here; the state is left untouched in that case.
    pub fn apply(&mut self, transition: Transition) -> Result<()> {
        if !self.is_legal(&transition) {
            return Err(ParseError::IllegalTransition {
                step: self.steps,
                state: self.snapshot(),
                transition,
            });
        }

        match transition {
            Transition::Shift => {
                if let Some(next) = self.buffer.pop_front() {
                    self.stack.push(next);
                }
            }
            Transition::LeftArc(label) => {
                let head = self.stack.pop().unwrap_or(ROOT);
                let child = self.stack.pop().unwrap_or(ROOT);
                self.attach(child, head, label);
                self.stack.push(head);
            }
            Transition::RightArc(label) => {
                let child = self.stack.pop().unwrap_or(ROOT);
                let head = self.s1().unwrap_or(ROOT);
                self.attach(child, head, label);
            }
        }

        self.steps += 1;
        Ok(())
    }

    fn attach(&mut self, child: usize, head: usize, label: String) {
        debug_assert!(child != ROOT, "ROOT can never become a child");
        debug_assert!(self.arcs[child].is_none(), "token {child} already has a head");
        self.arcs[child] = Some(Attachment { head, label });
        self.arc_count += 1;
    }

    /// Top three stack tokens and front three buffer tokens
    pub fn feature_window(&self) -> FeatureWindow<'_> {
        let stack = [0, 1, 2].map(|depth| {
            self.stack_from_top(depth)
                .and_then(|index| self.tokens.get(index))
        });
        let buffer = [0, 1, 2].map(|offset| {
            self.buffer
                .get(offset)
                .and_then(|&index| self.tokens.get(index))
        });
        FeatureWindow { stack, buffer }
    }

    /// Owned copy of the stack, buffer and arc count
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            stack: self.stack.clone(),
            buffer: self.buffer.iter().copied().collect(),
            arcs: self.arc_count,
        }
    }

    /// Consume the state, returning the tokens and the per-child attachments
    ///
    /// The attachment vector is indexed by token index; slot 0 (ROOT) is
    /// always `None`.
    pub fn into_parts(self) -> (Vec<Token>, Vec<Option<Attachment>>) {
        (self.tokens, self.arcs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::token::adapt;

    fn state_for(words: &[(&str, &str)]) -> ParserState {
        ParserState::new(adapt(words.iter().copied(), &ParserConfig::default()).unwrap())
    }

    #[test]
    fn test_initial_state() {
        let state = state_for(&[("I", "PRP"), ("saw", "VBD"), ("it", "PRP")]);

        assert_eq!(state.sentence_len(), 3);
        assert_eq!(state.stack(), &[ROOT]);
        assert_eq!(state.buffer().iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(state.arc_count(), 0);
        assert_eq!(state.steps(), 0);
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_initial_legal_actions() {
        let state = state_for(&[("Hello", "NN")]);
        assert_eq!(state.legal_actions().as_slice(), &[TransitionKind::Shift]);
    }

    #[test]
    fn test_left_arc_illegal_onto_root() {
        let mut state = state_for(&[("Hello", "NN")]);
        state.apply(Transition::Shift).unwrap();

        // Stack is [ROOT, 1]: s2 is ROOT so only RIGHT-ARC may attach
        assert_eq!(state.legal_actions().as_slice(), &[TransitionKind::RightArc]);
        assert!(!state.is_legal(&Transition::left_arc("dep")));
    }

    #[test]
    fn test_shift_moves_buffer_front() {
        let mut state = state_for(&[("I", "PRP"), ("saw", "VBD")]);
        state.apply(Transition::Shift).unwrap();

        assert_eq!(state.stack(), &[ROOT, 1]);
        assert_eq!(state.b1(), Some(2));
        assert_eq!(state.steps(), 1);
    }

    #[test]
    fn test_left_arc_effect() {
        let mut state = state_for(&[("I", "PRP"), ("saw", "VBD")]);
        state.apply(Transition::Shift).unwrap();
        state.apply(Transition::Shift).unwrap();
        state.apply(Transition::left_arc("nsubj")).unwrap();

        assert_eq!(state.stack(), &[ROOT, 2]);
        let arc = state.head_of(1).unwrap();
        assert_eq!(arc.head, 2);
        assert_eq!(arc.label, "nsubj");
        assert_eq!(state.arc_count(), 1);
    }

    #[test]
    fn test_right_arc_effect() {
        let mut state = state_for(&[("saw", "VBD"), ("it", "PRP")]);
        state.apply(Transition::Shift).unwrap();
        state.apply(Transition::Shift).unwrap();
        state.apply(Transition::right_arc("dobj")).unwrap();

        assert_eq!(state.stack(), &[ROOT, 1]);
        assert_eq!(state.head_of(2).unwrap().head, 1);

        state.apply(Transition::right_arc("root")).unwrap();
        assert!(state.is_terminal());
        assert_eq!(state.head_of(1).unwrap().head, ROOT);
        assert_eq!(state.steps(), 4);
    }

    #[test]
    fn test_illegal_apply_leaves_state_unchanged() {
        let mut state = state_for(&[("Hello", "NN")]);
        let before = state.snapshot();

        let err = state.apply(Transition::right_arc("root")).unwrap_err();
        match err {
            ParseError::IllegalTransition {
                transition,
                step,
                state: snapshot,
            } => {
                assert_eq!(transition, Transition::right_arc("root"));
                assert_eq!(step, 0);
                assert_eq!(snapshot, before);
            }
            other => panic!("Expected IllegalTransition, got {other:?}"),
        }
        assert_eq!(state.snapshot(), before);
        assert_eq!(state.steps(), 0);
    }

    #[test]
    fn test_apply_rejects_everything_outside_legal_set() {
        let mut state = state_for(&[("a", "DT"), ("dog", "NN")]);
        state.apply(Transition::Shift).unwrap();

        let candidates = [
            Transition::Shift,
            Transition::left_arc("det"),
            Transition::right_arc("dep"),
        ];
        let legal = state.legal_actions();
        for transition in candidates {
            let mut probe = state.clone();
            let accepted = probe.apply(transition.clone()).is_ok();
            assert_eq!(accepted, legal.contains(&transition.kind()), "{transition}");
        }
    }

    #[test]
    fn test_feature_window() {
        let mut state = state_for(&[("the", "DT"), ("big", "JJ"), ("dog", "NN"), ("ran", "VBD")]);
        state.apply(Transition::Shift).unwrap();
        state.apply(Transition::Shift).unwrap();

        let window = state.feature_window();
        assert_eq!(window.stack[0].map(|t| t.word.as_str()), Some("big"));
        assert_eq!(window.stack[1].map(|t| t.word.as_str()), Some("the"));
        assert!(window.stack[2].unwrap().is_root());
        assert_eq!(window.buffer[0].map(|t| t.word.as_str()), Some("dog"));
        assert_eq!(window.buffer[1].map(|t| t.word.as_str()), Some("ran"));
        assert!(window.buffer[2].is_none());
    }

    #[test]
    fn test_snapshot_display() {
        let mut state = state_for(&[("Hello", "NN")]);
        state.apply(Transition::Shift).unwrap();
        assert_eq!(state.snapshot().to_string(), "stack=[0, 1], buffer=[], arcs=0");
    }

    #[test]
    fn test_arcs_iterates_in_child_order() {
        let mut state = state_for(&[("I", "PRP"), ("saw", "VBD"), ("it", "PRP")]);
        for transition in [
            Transition::Shift,
            Transition::Shift,
            Transition::left_arc("nsubj"),
            Transition::Shift,
            Transition::right_arc("dobj"),
        ] {
            state.apply(transition).unwrap();
        }

        let children: Vec<usize> = state.arcs().map(|(child, _)| child).collect();
        assert_eq!(children, vec![1, 3]);
    }
}
