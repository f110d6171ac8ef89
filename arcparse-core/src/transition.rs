//! Arc-standard transitions
//!
//! Three actions operate on the stack top `s1` and the element below it `s2`:
//!
//! - `SHIFT`: move the front of the buffer onto the stack
//! - `LEFT-ARC(l)`: attach `s2` to `s1` with label `l` and drop `s2`
//! - `RIGHT-ARC(l)`: attach `s1` to `s2` with label `l` and drop `s1`
//!
//! Every arc removes its child from the stack for good, so a token can never
//! collect a second head.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A transition chosen by a decision oracle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    /// Move the next buffer token onto the stack
    Shift,
    /// Make the stack top the head of the second element
    LeftArc(String),
    /// Make the second element the head of the stack top
    RightArc(String),
}

/// Label-free discriminant of a [`Transition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TransitionKind {
    Shift,
    LeftArc,
    RightArc,
}

impl Transition {
    /// Build a left arc with the given label
    pub fn left_arc(label: impl Into<String>) -> Self {
        Transition::LeftArc(label.into())
    }

    /// Build a right arc with the given label
    pub fn right_arc(label: impl Into<String>) -> Self {
        Transition::RightArc(label.into())
    }

    pub fn kind(&self) -> TransitionKind {
        match self {
            Transition::Shift => TransitionKind::Shift,
            Transition::LeftArc(_) => TransitionKind::LeftArc,
            Transition::RightArc(_) => TransitionKind::RightArc,
        }
    }

    /// Relation label for arc-creating transitions
    pub fn label(&self) -> Option<&str> {
        match self {
            Transition::Shift => None,
            Transition::LeftArc(label) | Transition::RightArc(label) => Some(label),
        }
    }

    /// Whether applying this transition adds an arc
    pub fn creates_arc(&self) -> bool {
        !matches!(self, Transition::Shift)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Shift => write!(f, "SHIFT"),
            Transition::LeftArc(label) => write!(f, "LEFT-ARC({label})"),
            Transition::RightArc(label) => write!(f, "RIGHT-ARC({label})"),
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransitionKind::Shift => "SHIFT",
            TransitionKind::LeftArc => "LEFT-ARC",
            TransitionKind::RightArc => "RIGHT-ARC",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_label() {
        assert_eq!(Transition::Shift.kind(), TransitionKind::Shift);
        assert_eq!(Transition::Shift.label(), None);

        let left = Transition::left_arc("nsubj");
        assert_eq!(left.kind(), TransitionKind::LeftArc);
        assert_eq!(left.label(), Some("nsubj"));
        assert!(left.creates_arc());

        let right = Transition::right_arc("dobj");
        assert_eq!(right.kind(), TransitionKind::RightArc);
        assert_eq!(right.label(), Some("dobj"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Transition::Shift.to_string(), "SHIFT");
        assert_eq!(Transition::left_arc("amod").to_string(), "LEFT-ARC(amod)");
        assert_eq!(Transition::right_arc("root").to_string(), "RIGHT-ARC(root)");
        assert_eq!(TransitionKind::RightArc.to_string(), "RIGHT-ARC");
    }
}
