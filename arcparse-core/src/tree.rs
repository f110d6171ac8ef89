//! Dependency tree output and assembly
//!
//! [`TreeAssembler`] turns a terminal [`ParserState`] into a
//! [`DependencyTree`]. It is the last check before a result leaves the
//! parser: the head assignment is verified to be a single-rooted tree, and
//! nothing is returned if it is not.

use crate::config::ParserConfig;
use crate::error::{ParseError, Result};
use crate::state::ParserState;
use crate::token::{Token, ROOT};
use serde::{Deserialize, Serialize};

/// One word of a parsed sentence, CoNLL-style
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyWord {
    /// 1-based position in the sentence
    pub index: usize,
    pub word: String,
    /// Coarse tag
    pub cpostag: String,
    /// Fine tag
    pub postag: String,
    /// Index of the head word, 0 for ROOT
    pub head: usize,
    /// Relation to the head
    pub deprel: String,
}

impl DependencyWord {
    fn from_token(token: Token, head: usize, deprel: String) -> Self {
        Self {
            index: token.index,
            word: token.word,
            cpostag: token.cpostag,
            postag: token.postag,
            head,
            deprel,
        }
    }

    /// Whether this word hangs directly under ROOT
    pub fn is_root_child(&self) -> bool {
        self.head == ROOT
    }
}

/// A validated dependency tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyTree {
    words: Vec<DependencyWord>,
}

impl DependencyTree {
    /// Build a tree from words, checking every tree invariant
    pub fn from_words(words: Vec<DependencyWord>, allow_multiple_roots: bool) -> Result<Self> {
        validate(&words, allow_multiple_roots)?;
        Ok(Self { words })
    }

    /// Number of words, ROOT excluded
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[DependencyWord] {
        &self.words
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DependencyWord> {
        self.words.iter()
    }

    /// Word by 1-based index
    pub fn word(&self, index: usize) -> Option<&DependencyWord> {
        index.checked_sub(1).and_then(|i| self.words.get(i))
    }

    /// Words attached directly to ROOT
    pub fn root_words(&self) -> impl Iterator<Item = &DependencyWord> + '_ {
        self.words.iter().filter(|w| w.is_root_child())
    }

    /// Dependents of `index` in sentence order; 0 asks for ROOT's
    pub fn children(&self, index: usize) -> impl Iterator<Item = &DependencyWord> + '_ {
        self.words.iter().filter(move |w| w.head == index)
    }

    /// Head index of every word, in sentence order
    pub fn heads(&self) -> Vec<usize> {
        self.words.iter().map(|w| w.head).collect()
    }

    /// Relation label of every word, in sentence order
    pub fn labels(&self) -> Vec<&str> {
        self.words.iter().map(|w| w.deprel.as_str()).collect()
    }

    pub fn into_words(self) -> Vec<DependencyWord> {
        self.words
    }
}

impl<'a> IntoIterator for &'a DependencyTree {
    type Item = &'a DependencyWord;
    type IntoIter = std::slice::Iter<'a, DependencyWord>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

/// Converts terminal parser states into validated trees
#[derive(Debug, Clone, Copy)]
pub struct TreeAssembler<'c> {
    config: &'c ParserConfig,
}

impl<'c> TreeAssembler<'c> {
    pub fn new(config: &'c ParserConfig) -> Self {
        Self { config }
    }

    /// Assemble the tree for a decoded state
    ///
    /// Tokens that never received a head are attached to ROOT with the
    /// configured root label before validation.
    pub fn assemble(&self, state: ParserState) -> Result<DependencyTree> {
        let (tokens, arcs) = state.into_parts();

        if arcs.first().is_some_and(Option::is_some) {
            return Err(ParseError::malformed("ROOT was given a head"));
        }

        let words = tokens
            .into_iter()
            .zip(arcs)
            .skip(1)
            .map(|(token, arc)| match arc {
                Some(arc) => DependencyWord::from_token(token, arc.head, arc.label),
                None => {
                    log::warn!(
                        "token {} ('{}') left unattached, assigning it to ROOT",
                        token.index,
                        token.word
                    );
                    DependencyWord::from_token(token, ROOT, self.config.root_label.clone())
                }
            })
            .collect();

        DependencyTree::from_words(words, self.config.allow_multiple_roots)
    }
}

/// Check that `words` form a tree rooted at ROOT
fn validate(words: &[DependencyWord], allow_multiple_roots: bool) -> Result<()> {
    let len = words.len();
    if len == 0 {
        return Err(ParseError::malformed("tree has no words"));
    }

    for (position, word) in words.iter().enumerate() {
        if word.index != position + 1 {
            return Err(ParseError::malformed(format!(
                "word at position {} has index {}",
                position + 1,
                word.index
            )));
        }
        if word.head > len {
            return Err(ParseError::malformed(format!(
                "word {} has out-of-range head {}",
                word.index, word.head
            )));
        }
        if word.head == word.index {
            return Err(ParseError::malformed(format!(
                "word {} is its own head",
                word.index
            )));
        }
    }

    let root_children = words.iter().filter(|w| w.is_root_child()).count();
    if root_children == 0 {
        return Err(ParseError::malformed("no word is attached to ROOT"));
    }
    if root_children > 1 && !allow_multiple_roots {
        return Err(ParseError::malformed(format!(
            "{root_children} words are attached to ROOT"
        )));
    }

    // Follow head links from every word; reaching a word already on the
    // current path means a cycle.
    const UNSEEN: u8 = 0;
    const ON_PATH: u8 = 1;
    const REACHES_ROOT: u8 = 2;
    let mut marks = vec![UNSEEN; len + 1];
    marks[ROOT] = REACHES_ROOT;

    for start in 1..=len {
        let mut path = Vec::new();
        let mut current = start;
        while marks[current] == UNSEEN {
            marks[current] = ON_PATH;
            path.push(current);
            current = words[current - 1].head;
        }
        if marks[current] == ON_PATH {
            return Err(ParseError::malformed(format!(
                "cycle through word {current}"
            )));
        }
        for node in path {
            marks[node] = REACHES_ROOT;
        }
    }

    Ok(())
}
