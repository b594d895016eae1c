//! Irregular verb and noun lexicon.
//!
//! Each class holds two coupled tables: surface form to synset ids, and
//! synset id to the ordered list of all surface forms. A lexicon is built once
//! (from the embedded word lists, from compiled table files, or from tables
//! the caller assembled) and is read-only afterwards, so a single instance can
//! be shared across threads without locking.
//!
//! # Features
//! - Built-in word lists for English irregular verbs and nouns, compiled at
//!   start-up by [`IrregularLexicon::builtin`].
//! - A word-list compiler ([`compile`], [`compile_file`]) and a JSON table
//!   format ([`LexiconTables::write_to`], [`LexiconTables::read_from`]).
//! - Referential integrity is checked before a lexicon is handed out.
//!
//! # Example
//! ```
//! use morphsearch_lexicon::IrregularLexicon;
//! use morphsearch_types::WordClass;
//!
//! # fn main() -> Result<(), morphsearch_lexicon::LexiconError> {
//! let lexicon = IrregularLexicon::builtin()?;
//! let hit = lexicon.lookup(WordClass::Noun, "thieves").expect("irregular noun");
//! let forms = lexicon.forms_of(hit.class, hit.ids[0]).unwrap();
//! assert_eq!(forms, ["thief", "thieves"]);
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p morphsearch-lexicon --example stats`.

pub mod compile;
pub mod error;

use std::path::Path;

use morphsearch_types::{SynsetId, WordClass};
use tracing::info;

pub use compile::{LexiconTables, compile, compile_file, dict_file_name, keys_file_name};
pub use error::{LexiconError, Result};

const BUILTIN_VERBS: &str = include_str!("../data/verbs.txt");
const BUILTIN_NOUNS: &str = include_str!("../data/nouns.txt");

/// Positive result of a lexicon lookup.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Lookup<'a> {
    pub class: WordClass,
    pub ids: &'a [SynsetId],
}

/// Verb and noun irregular tables, validated at construction.
#[derive(Clone, Debug)]
pub struct IrregularLexicon {
    verbs: LexiconTables,
    nouns: LexiconTables,
}

impl IrregularLexicon {
    /// Compile the word lists shipped with this crate.
    pub fn builtin() -> Result<Self> {
        let verbs = compile(WordClass::Verb, BUILTIN_VERBS.lines())?;
        let nouns = compile(WordClass::Noun, BUILTIN_NOUNS.lines())?;
        Self::from_tables(verbs, nouns)
    }

    /// Load compiled `keys.v`/`dict.v`/`keys.n`/`dict.n` tables from `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let verbs = LexiconTables::read_from(dir, WordClass::Verb)?;
        let nouns = LexiconTables::read_from(dir, WordClass::Noun)?;
        let lexicon = Self::from_tables(verbs, nouns)?;
        info!("irregular lexicon loaded from {}", dir.display());
        Ok(lexicon)
    }

    /// Combine one table per class, refusing inconsistent input.
    pub fn from_tables(verbs: LexiconTables, nouns: LexiconTables) -> Result<Self> {
        for (expected, tables) in [(WordClass::Verb, &verbs), (WordClass::Noun, &nouns)] {
            if tables.class() != expected {
                return Err(LexiconError::ClassMismatch {
                    expected,
                    found: tables.class(),
                });
            }
            tables.check_integrity()?;
        }

        let lexicon = Self { verbs, nouns };
        info!(
            "irregular lexicon ready: {} verb synsets ({} forms), {} noun synsets ({} forms)",
            lexicon.synset_count(WordClass::Verb),
            lexicon.form_count(WordClass::Verb),
            lexicon.synset_count(WordClass::Noun),
            lexicon.form_count(WordClass::Noun),
        );
        Ok(lexicon)
    }

    /// Synset ids of `word` within `class`. Exact, case-sensitive match.
    pub fn lookup(&self, class: WordClass, word: &str) -> Option<Lookup<'_>> {
        self.tables(class)
            .ids_for(word)
            .map(|ids| Lookup { class, ids })
    }

    /// Look `word` up in every class, verbs first; the first hit wins.
    pub fn find(&self, word: &str) -> Option<Lookup<'_>> {
        WordClass::LOOKUP_ORDER
            .into_iter()
            .find_map(|class| self.lookup(class, word))
    }

    /// All surface forms of a synset, in word-list order.
    pub fn forms_of(&self, class: WordClass, id: SynsetId) -> Option<&[String]> {
        self.tables(class).forms_for(id)
    }

    pub fn tables(&self, class: WordClass) -> &LexiconTables {
        match class {
            WordClass::Verb => &self.verbs,
            WordClass::Noun => &self.nouns,
        }
    }

    pub fn synset_count(&self, class: WordClass) -> usize {
        self.tables(class).synset_to_forms().len()
    }

    pub fn form_count(&self, class: WordClass) -> usize {
        self.tables(class).form_to_synsets().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> IrregularLexicon {
        IrregularLexicon::from_tables(
            compile(WordClass::Verb, ["go goes went gone", "lie lay lain", "lay laid"]).unwrap(),
            compile(WordClass::Noun, ["lay lays", "child children"]).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let lexicon = small();
        let hit = lexicon.lookup(WordClass::Verb, "went").unwrap();
        assert_eq!(hit.class, WordClass::Verb);
        assert_eq!(hit.ids, &[SynsetId(1)]);
        assert!(lexicon.lookup(WordClass::Verb, "Went").is_none());
        assert!(lexicon.lookup(WordClass::Noun, "went").is_none());
    }

    #[test]
    fn find_prefers_verbs() {
        let lexicon = small();
        let hit = lexicon.find("lay").unwrap();
        assert_eq!(hit.class, WordClass::Verb);
        assert_eq!(hit.ids, &[SynsetId(2), SynsetId(3)]);

        let hit = lexicon.find("children").unwrap();
        assert_eq!(hit.class, WordClass::Noun);
        assert!(lexicon.find("walked").is_none());
    }

    #[test]
    fn forms_keep_word_list_order() {
        let lexicon = small();
        assert_eq!(
            lexicon.forms_of(WordClass::Verb, SynsetId(1)).unwrap(),
            ["go", "goes", "went", "gone"]
        );
        assert!(lexicon.forms_of(WordClass::Verb, SynsetId(9)).is_none());
    }

    #[test]
    fn swapped_tables_are_rejected() {
        let verbs = compile(WordClass::Verb, ["go went"]).unwrap();
        let nouns = compile(WordClass::Noun, ["ox oxen"]).unwrap();
        let err = IrregularLexicon::from_tables(nouns, verbs).unwrap_err();
        assert!(matches!(
            err,
            LexiconError::ClassMismatch {
                expected: WordClass::Verb,
                found: WordClass::Noun
            }
        ));
    }

    #[test]
    fn builtin_lists_compile() {
        let lexicon = IrregularLexicon::builtin().unwrap();
        assert!(lexicon.synset_count(WordClass::Verb) > 100);
        assert!(lexicon.synset_count(WordClass::Noun) > 50);
        assert!(lexicon.lookup(WordClass::Verb, "ran").is_some());
        assert!(lexicon.lookup(WordClass::Noun, "thieves").is_some());
    }
}
