//! Property tests for decoding and tree invariants

use arcparse_core::{
    DecisionOracle, DependencyParser, DependencyTree, ParserConfig, ParserState, RuleTableOracle,
    Transition, TransitionKind,
};
use proptest::prelude::*;

const TAGS: &[&str] = &[
    "DT", "JJ", "NN", "NNS", "NNP", "PRP", "PRP$", "VB", "VBD", "VBZ", "MD", "RB", "IN", "TO",
    "CD", "UH", ".",
];

fn sentence_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z]{1,8}", prop::sample::select(TAGS)), 1..40).prop_map(|items| {
        items
            .into_iter()
            .map(|(word, tag)| (word, tag.to_string()))
            .collect()
    })
}

/// Oracle choosing among the legal actions with a fixed choice sequence
fn choice_oracle(choices: Vec<u8>) -> impl DecisionOracle {
    move |state: &ParserState| {
        let legal = state.legal_actions();
        let pick = choices.get(state.steps()).copied().unwrap_or(0) as usize % legal.len();
        match legal[pick] {
            TransitionKind::Shift => Transition::Shift,
            TransitionKind::LeftArc => Transition::left_arc("left"),
            TransitionKind::RightArc => Transition::right_arc("right"),
        }
    }
}

fn reaches_root_through(tree: &DependencyTree, mut node: usize, head: usize) -> bool {
    while node != 0 {
        node = tree.word(node).map(|w| w.head).unwrap_or(0);
        if node == head {
            return true;
        }
    }
    head == 0
}

fn is_projective(tree: &DependencyTree) -> bool {
    tree.iter().all(|word| {
        let (lo, hi) = if word.head < word.index {
            (word.head, word.index)
        } else {
            (word.index, word.head)
        };
        (lo + 1..hi).all(|between| reaches_root_through(tree, between, word.head))
    })
}

proptest! {
    #[test]
    fn prop_any_legal_derivation_takes_exactly_2n_steps(
        sentence in sentence_strategy(),
        choices in prop::collection::vec(any::<u8>(), 0..80),
    ) {
        let config = ParserConfig::builder().allow_multiple_roots(true).build().unwrap();
        let parser = DependencyParser::with_config(config, choice_oracle(choices)).unwrap();

        let (tree, stats) = parser.parse_with_stats(sentence.clone()).unwrap();

        let n = sentence.len();
        prop_assert_eq!(stats.shifts, n);
        prop_assert_eq!(stats.arcs, n);
        prop_assert_eq!(stats.steps, 2 * n);
        prop_assert_eq!(tree.len(), n);
        prop_assert!(tree.root_words().count() >= 1);
        prop_assert!(is_projective(&tree));
    }

    #[test]
    fn prop_rule_table_trees_are_single_rooted(sentence in sentence_strategy()) {
        let parser = DependencyParser::new(RuleTableOracle::penn().unwrap());

        let (tree, stats) = parser.parse_with_stats(sentence.clone()).unwrap();

        prop_assert_eq!(stats.shifts, sentence.len());
        prop_assert_eq!(tree.root_words().count(), 1);
        for (word, (surface, tag)) in tree.iter().zip(&sentence) {
            prop_assert_eq!(&word.word, surface);
            prop_assert_eq!(&word.postag, tag);
            prop_assert!(word.head <= sentence.len());
            prop_assert_ne!(word.head, word.index);
        }
        prop_assert!(is_projective(&tree));
    }

    #[test]
    fn prop_parsing_is_deterministic(sentence in sentence_strategy()) {
        let parser = DependencyParser::new(RuleTableOracle::penn().unwrap());

        let first = serde_json::to_string(&parser.parse(sentence.clone()).unwrap()).unwrap();
        let second = serde_json::to_string(&parser.parse(sentence).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_apply_accepts_exactly_the_legal_set(
        sentence in sentence_strategy(),
        choices in prop::collection::vec(any::<u8>(), 0..80),
    ) {
        let tokens = arcparse_core::token::adapt(sentence, &ParserConfig::default()).unwrap();
        let mut state = ParserState::new(tokens);
        let oracle = choice_oracle(choices);

        while !state.is_terminal() {
            let legal = state.legal_actions();
            for candidate in [
                Transition::Shift,
                Transition::left_arc("x"),
                Transition::right_arc("x"),
            ] {
                let mut probe = state.clone();
                let accepted = probe.apply(candidate.clone()).is_ok();
                prop_assert_eq!(accepted, legal.contains(&candidate.kind()));
            }
            let next = oracle.choose(&state);
            state.apply(next).unwrap();
        }
    }
}
