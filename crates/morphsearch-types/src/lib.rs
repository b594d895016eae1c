//! Shared types for the irregular lexicon, the stemmer and the pattern builder.
//!
//! A [`WordClass`] selects one of the two irregular tables (verbs or nouns) and
//! a [`SynsetId`] names one group of surface forms inside that table. Ids are
//! 1-based line numbers of the word list the table was compiled from.
//!
//! ```rust
//! use morphsearch_types::{SynsetId, WordClass};
//!
//! let class = WordClass::from_char('v').unwrap();
//! assert_eq!(class, WordClass::Verb);
//! assert_eq!(SynsetId(3).to_string(), "3");
//! ```

use std::fmt;

/// Word class of an irregular table, keyed by the letters `v` and `n`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum WordClass {
    Verb,
    Noun,
}

impl WordClass {
    /// Priority order used whenever a word is looked up in both classes.
    pub const LOOKUP_ORDER: [WordClass; 2] = [WordClass::Verb, WordClass::Noun];

    /// Parse a class letter (`v` or `n`).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'v' => Some(WordClass::Verb),
            'n' => Some(WordClass::Noun),
            _ => None,
        }
    }

    /// Class letter, also used as the suffix of compiled table files.
    pub fn to_char(self) -> char {
        match self {
            WordClass::Verb => 'v',
            WordClass::Noun => 'n',
        }
    }
}

impl fmt::Display for WordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WordClass::Verb => "verb",
            WordClass::Noun => "noun",
        })
    }
}

/// Identifier of a synset, unique within its [`WordClass`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SynsetId(pub u32);

impl SynsetId {
    /// Synset id for a 1-based line number of a word list.
    ///
    /// Returns `None` for line `0` or numbers that do not fit in a `u32`.
    pub fn from_line(line: usize) -> Option<Self> {
        u32::try_from(line).ok().filter(|n| *n > 0).map(SynsetId)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SynsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
