//! Greedy arc-standard dependency parsing
//!
//! This crate turns a sentence of already tagged tokens into a labeled
//! dependency tree (one head and one relation per token, CoNLL-style). The
//! parser is a shift-reduce automaton over a buffer, a stack and an arc set,
//! driven by a pluggable [`DecisionOracle`].
//!
//! # Architecture
//!
//! - **Token adapter** ([`token`]): `(word, tag)` pairs to indexed tokens with
//!   a synthetic ROOT at index 0
//! - **Parser state** ([`state`]) and **transition system** ([`transition`]):
//!   SHIFT, LEFT-ARC and RIGHT-ARC with their legality rules
//! - **Decision oracle** ([`oracle`]): the injected scorer
//! - **Decoder** ([`decoder`]): runs the oracle until the state is terminal,
//!   capped at `2N` steps
//! - **Tree assembler** ([`tree`]): validates and returns the tree
//!
//! # Example
//!
//! ```rust
//! use arcparse_core::{DependencyParser, ScriptedOracle, Transition};
//!
//! let oracle = ScriptedOracle::new(vec![
//!     Transition::Shift,
//!     Transition::Shift,
//!     Transition::left_arc("nsubj"),
//!     Transition::Shift,
//!     Transition::right_arc("dobj"),
//!     Transition::right_arc("root"),
//! ]);
//! let parser = DependencyParser::new(oracle);
//!
//! let tree = parser
//!     .parse([("I", "PRP"), ("saw", "VBD"), ("it", "PRP")])
//!     .unwrap();
//!
//! assert_eq!(tree.heads(), vec![2, 0, 2]);
//! assert_eq!(tree.labels(), vec!["nsubj", "root", "dobj"]);
//! ```

pub mod config;
pub mod decoder;
pub mod error;
pub mod oracle;
pub mod parser;
pub mod state;
pub mod token;
pub mod transition;
pub mod tree;

pub use config::{ConfigBuilder, ParserConfig};
pub use decoder::{DecodeStats, Decoder};
pub use error::{ParseError, Result};
pub use oracle::{DecisionOracle, Direction, Rule, RuleTable, RuleTableOracle, ScriptedOracle};
pub use parser::DependencyParser;
pub use state::{Attachment, FeatureWindow, LegalActions, ParserState, StateSnapshot};
pub use token::{Token, ROOT};
pub use transition::{Transition, TransitionKind};
pub use tree::{DependencyTree, DependencyWord, TreeAssembler};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_components_compose() {
        // Adapter -> state -> decoder -> assembler, without the parser facade
        let config = ParserConfig::default();
        let tokens = token::adapt([("Hello", "NN")], &config).unwrap();
        let mut state = ParserState::new(tokens);

        let oracle = ScriptedOracle::new(vec![Transition::Shift, Transition::right_arc("root")]);
        let stats = Decoder::new(&oracle).decode(&mut state).unwrap();
        assert_eq!(stats.shifts, 1);

        let tree = TreeAssembler::new(&config).assemble(state).unwrap();
        assert_eq!(tree.word(1).unwrap().head, ROOT);
    }
}
