//! Rule-table oracle
//!
//! A deterministic scorer built from ordered head/dependent tag rules. It is
//! the stand-in for a trained classifier: good enough to produce sensible
//! trees for simple sentences, and it always proposes a legal transition.

use super::DecisionOracle;
use crate::error::{ParseError, Result};
use crate::state::ParserState;
use crate::token::{Token, ROOT};
use crate::transition::Transition;
use serde::{Deserialize, Serialize};
use std::path::Path;

const PENN_RULES: &str = include_str!("../../configs/rules/penn.toml");

/// Which side of its head a dependent sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Dependent precedes the head (built with LEFT-ARC)
    Left,
    /// Dependent follows the head (built with RIGHT-ARC)
    Right,
}

/// One head/dependent attachment rule
///
/// Tag patterns are matched against coarse tags: an exact tag, `*` for any
/// tag, or a prefix followed by `*` (`VB*` matches `VBD` and `VBZ`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub head: String,
    pub dependent: String,
    pub direction: Direction,
    pub label: String,
}

impl Rule {
    fn matches(&self, head: &Token, dependent: &Token, direction: Direction) -> bool {
        self.direction == direction
            && tag_matches(&self.head, &head.cpostag)
            && tag_matches(&self.dependent, &dependent.cpostag)
    }
}

fn tag_matches(pattern: &str, tag: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => tag.starts_with(prefix),
        None => pattern == tag,
    }
}

/// Ordered rule list plus fallback labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    /// Label for arcs no rule covers
    pub default_label: String,
    /// Label for the arc from ROOT
    pub root_label: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl RuleTable {
    /// The rule table shipped for Penn Treebank tags
    pub fn penn() -> Result<Self> {
        Self::from_toml_str(PENN_RULES)
    }

    /// Parse a rule table from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: RuleTable = toml::from_str(text)
            .map_err(|e| ParseError::Configuration(format!("failed to parse rule table: {e}")))?;
        table.validate()?;
        Ok(table)
    }

    /// Load a rule table from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ParseError::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject empty labels and empty tag patterns
    pub fn validate(&self) -> Result<()> {
        if self.default_label.is_empty() {
            return Err(ParseError::Configuration(
                "default_label must not be empty".into(),
            ));
        }
        if self.root_label.is_empty() {
            return Err(ParseError::Configuration(
                "root_label must not be empty".into(),
            ));
        }

        for (i, rule) in self.rules.iter().enumerate() {
            if rule.head.is_empty() || rule.dependent.is_empty() {
                return Err(ParseError::Configuration(format!(
                    "rule {} has an empty tag pattern",
                    i + 1
                )));
            }
            if rule.label.is_empty() {
                return Err(ParseError::Configuration(format!(
                    "rule {} has an empty label",
                    i + 1
                )));
            }
        }

        Ok(())
    }

    /// First rule attaching `dependent` to `head` on the given side
    pub fn find(&self, head: &Token, dependent: &Token, direction: Direction) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|rule| rule.matches(head, dependent, direction))
    }
}

/// Oracle that decides transitions from a [`RuleTable`]
///
/// Per step:
/// 1. LEFT-ARC if a left rule makes `s1` the head of `s2`
/// 2. RIGHT-ARC if a right rule makes `s2` the head of `s1`, unless `s1`
///    could still take a right dependent from the buffer
/// 3. SHIFT while the buffer has tokens
/// 4. RIGHT-ARC with the default label (the root label when `s2` is ROOT)
///
/// ROOT is only ever chosen as a head once the buffer is exhausted and a
/// single token is left above it, so trees come out single-rooted.
#[derive(Debug, Clone)]
pub struct RuleTableOracle {
    table: RuleTable,
}

impl RuleTableOracle {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    /// Oracle using the shipped Penn Treebank rules
    pub fn penn() -> Result<Self> {
        RuleTable::penn().map(Self::new)
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    fn rule_transition(&self, state: &ParserState) -> Option<Transition> {
        let s1 = state.token(state.s1()?)?;
        let s2_index = state.s2()?;
        if s2_index == ROOT {
            return None;
        }
        let s2 = state.token(s2_index)?;

        if let Some(rule) = self.table.find(s1, s2, Direction::Left) {
            return Some(Transition::left_arc(&*rule.label));
        }

        let rule = self.table.find(s2, s1, Direction::Right)?;
        if self.expects_right_dependent(state, s1) {
            None
        } else {
            Some(Transition::right_arc(&*rule.label))
        }
    }

    /// Whether `head` can still take a right dependent from the buffer
    ///
    /// Buffer tokens that would attach leftward to the token after them
    /// (determiners, adjectives) are skipped over.
    fn expects_right_dependent(&self, state: &ParserState, head: &Token) -> bool {
        let mut upcoming = state
            .buffer()
            .iter()
            .filter_map(|&index| state.token(index))
            .peekable();

        while let Some(candidate) = upcoming.next() {
            if self.table.find(head, candidate, Direction::Right).is_some() {
                return true;
            }
            let premodifies_next = upcoming
                .peek()
                .is_some_and(|next| self.table.find(next, candidate, Direction::Left).is_some());
            if !premodifies_next {
                return false;
            }
        }
        false
    }
}

impl DecisionOracle for RuleTableOracle {
    fn choose(&self, state: &ParserState) -> Transition {
        if let Some(transition) = self.rule_transition(state) {
            return transition;
        }

        if !state.buffer().is_empty() {
            return Transition::Shift;
        }

        if state.s2() == Some(ROOT) {
            Transition::right_arc(&*self.table.root_label)
        } else {
            Transition::right_arc(&*self.table.default_label)
        }
    }

    fn name(&self) -> &str {
        "rule-table"
    }
}
