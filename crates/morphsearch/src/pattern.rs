//! Turn words into inflection-tolerant regular expressions.
//!
//! A fragment is built per word: irregular words expand to every form of their
//! synsets, regular words to their stem followed by `\w*`. Fragments of a
//! multi-word query are joined by `\s+`. The output uses `regex` crate syntax
//! and every literal is escaped.

use std::fmt;

use morphsearch_lexicon::{IrregularLexicon, Lookup};
use morphsearch_stem::stem_with;
use morphsearch_types::WordClass;

/// Word boundary anchor.
pub const BOUNDARY: &str = r"\b";
/// Trailing wildcard accepting any further word characters.
pub const WILDCARD: &str = r"\w*";
/// Separator between the fragments of a multi-word query.
pub const SEPARATOR: &str = r"\s+";

/// How a fragment was derived from its word.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FragmentSource {
    /// The word itself is a listed irregular form.
    Irregular { class: WordClass },
    /// Too short to stem; matched exactly.
    Literal,
    /// Stem plus wildcard.
    Stem { stem: String },
    /// The stem turned out to be a listed irregular form.
    StemIrregular { stem: String, class: WordClass },
}

/// Pattern text for one input word.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchFragment {
    word: String,
    source: FragmentSource,
    pattern: String,
}

impl MatchFragment {
    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn source(&self) -> &FragmentSource {
        &self.source
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Display for MatchFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Ordered fragments of a multi-word query. Fragment `i` belongs to word `i`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchPattern {
    fragments: Vec<MatchFragment>,
}

impl SearchPattern {
    pub fn fragments(&self) -> &[MatchFragment] {
        &self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

impl fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, fragment) in self.fragments.iter().enumerate() {
            if idx > 0 {
                f.write_str(SEPARATOR)?;
            }
            f.write_str(fragment.as_str())?;
        }
        Ok(())
    }
}

/// Builds fragments and queries against a shared, read-only lexicon.
#[derive(Clone, Copy, Debug)]
pub struct PatternBuilder<'a> {
    lexicon: &'a IrregularLexicon,
}

impl<'a> PatternBuilder<'a> {
    pub fn new(lexicon: &'a IrregularLexicon) -> Self {
        Self { lexicon }
    }

    /// Build the fragment for a single word.
    ///
    /// Listed irregular forms skip the stemmer entirely. Words of at most two
    /// characters are matched exactly. Everything else is stemmed; a stem that
    /// is itself an irregular form also brings in that form's synsets.
    pub fn build_fragment(&self, word: &str) -> MatchFragment {
        if let Some(hit) = self.lexicon.find(word) {
            return MatchFragment {
                word: word.to_string(),
                source: FragmentSource::Irregular { class: hit.class },
                pattern: anchored_group(&self.alternatives(hit)),
            };
        }

        if word.chars().count() <= 2 {
            return MatchFragment {
                word: word.to_string(),
                source: FragmentSource::Literal,
                pattern: format!("{BOUNDARY}{}{BOUNDARY}", regex::escape(word)),
            };
        }

        let outcome = stem_with(word, |cand| self.lexicon.find(cand));
        let stem_alternative = format!("{}{WILDCARD}", regex::escape(&outcome.stem));
        match outcome.irregular {
            Some(hit) => {
                let mut alternatives = vec![stem_alternative];
                alternatives.extend(self.alternatives(hit));
                MatchFragment {
                    word: word.to_string(),
                    source: FragmentSource::StemIrregular {
                        stem: outcome.stem,
                        class: hit.class,
                    },
                    pattern: anchored_group(&alternatives),
                }
            }
            None => MatchFragment {
                word: word.to_string(),
                pattern: format!("{BOUNDARY}{stem_alternative}{BOUNDARY}"),
                source: FragmentSource::Stem { stem: outcome.stem },
            },
        }
    }

    /// Build one fragment per word, in input order.
    ///
    /// An empty input yields an empty pattern; callers are expected to supply
    /// at least one word.
    pub fn compose_query<I, S>(&self, words: I) -> SearchPattern
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        SearchPattern {
            fragments: words
                .into_iter()
                .map(|word| self.build_fragment(word.as_ref()))
                .collect(),
        }
    }

    // Forms of all hit synsets, flattened in order. Only the very first form
    // gets the wildcard; repeats across synsets are kept.
    fn alternatives(&self, hit: Lookup<'_>) -> Vec<String> {
        hit.ids
            .iter()
            .filter_map(|id| self.lexicon.forms_of(hit.class, *id))
            .flatten()
            .enumerate()
            .map(|(idx, form)| {
                if idx == 0 {
                    format!("{}{WILDCARD}", regex::escape(form))
                } else {
                    regex::escape(form)
                }
            })
            .collect()
    }
}

fn anchored_group(alternatives: &[String]) -> String {
    format!("{BOUNDARY}(?:{}){BOUNDARY}", alternatives.join("|"))
}

#[cfg(test)]
mod tests {
    use morphsearch_lexicon::compile;
    use regex::Regex;

    use super::*;

    fn builtin() -> IrregularLexicon {
        IrregularLexicon::builtin().expect("builtin lexicon")
    }

    fn regex_for(fragment: &MatchFragment) -> Regex {
        Regex::new(&format!("^{}$", fragment.as_str())).expect("valid fragment")
    }

    #[test]
    fn regular_word_becomes_stem_with_wildcard() {
        let lexicon = builtin();
        let fragment = PatternBuilder::new(&lexicon).build_fragment("search");
        assert_eq!(fragment.as_str(), r"\bsearch\w*\b");
        assert_eq!(
            fragment.source(),
            &FragmentSource::Stem {
                stem: "search".to_string()
            }
        );

        let re = Regex::new(fragment.as_str()).unwrap();
        for text in ["search", "searching", "searches", "searched", "searchers"] {
            assert!(re.is_match(text), "{text}");
        }
        for text in ["research", "such"] {
            assert!(!re.is_match(text), "{text}");
        }
    }

    #[test]
    fn short_words_are_literal() {
        let lexicon = builtin();
        let builder = PatternBuilder::new(&lexicon);
        let fragment = builder.build_fragment("of");
        assert_eq!(fragment.as_str(), r"\bof\b");
        assert_eq!(fragment.source(), &FragmentSource::Literal);

        // `is` is a listed form of `be`, so the lexicon wins over the length rule.
        let fragment = builder.build_fragment("is");
        assert_eq!(
            fragment.source(),
            &FragmentSource::Irregular {
                class: WordClass::Verb
            }
        );
    }

    #[test]
    fn irregular_noun_lists_every_form_once_with_one_wildcard() {
        let lexicon = builtin();
        let fragment = PatternBuilder::new(&lexicon).build_fragment("thieves");
        assert_eq!(fragment.as_str(), r"\b(?:thief\w*|thieves)\b");
        assert_eq!(fragment.as_str().matches(WILDCARD).count(), 1);

        let re = regex_for(&fragment);
        assert!(re.is_match("thief"));
        assert!(re.is_match("thieves"));
        assert!(!re.is_match("thieve"));
    }

    #[test]
    fn stem_reaching_irregular_verb_adds_its_synset() {
        let lexicon = builtin();
        let fragment = PatternBuilder::new(&lexicon).build_fragment("running");
        assert_eq!(fragment.as_str(), r"\b(?:run\w*|run\w*|ran)\b");
        assert_eq!(
            fragment.source(),
            &FragmentSource::StemIrregular {
                stem: "run".to_string(),
                class: WordClass::Verb
            }
        );
        let re = regex_for(&fragment);
        for text in ["run", "runs", "running", "ran"] {
            assert!(re.is_match(text), "{text}");
        }
    }

    #[test]
    fn ambiguous_form_expands_all_synsets_in_order() {
        let lexicon = IrregularLexicon::from_tables(
            compile(WordClass::Verb, ["lie lay lain", "lay laid"]).unwrap(),
            compile(WordClass::Noun, ["ox oxen"]).unwrap(),
        )
        .unwrap();
        let fragment = PatternBuilder::new(&lexicon).build_fragment("lay");
        assert_eq!(fragment.as_str(), r"\b(?:lie\w*|lay|lain|lay|laid)\b");
    }

    #[test]
    fn fragments_start_and_end_with_boundaries() {
        let lexicon = builtin();
        let builder = PatternBuilder::new(&lexicon);
        for word in ["", "a", "go", "went", "running", "bunnies", "x+y", "generalization"] {
            let fragment = builder.build_fragment(word);
            assert!(fragment.as_str().starts_with(BOUNDARY), "{word}");
            assert!(fragment.as_str().ends_with(BOUNDARY), "{word}");
            Regex::new(fragment.as_str()).expect("fragment compiles");
        }
    }

    #[test]
    fn query_keeps_word_order() {
        let lexicon = builtin();
        let words = ["thieves", "are", "running", "from", "bunnies"];
        let query = PatternBuilder::new(&lexicon).compose_query(words);
        assert_eq!(query.fragments().len(), 5);
        for (fragment, word) in query.fragments().iter().zip(words) {
            assert_eq!(fragment.word(), word);
        }

        let text = query.to_string();
        assert_eq!(text.matches(SEPARATOR).count(), 4);

        let re = Regex::new(&text).unwrap();
        assert!(re.is_match("thief was ran from bunny"));
        assert!(re.is_match("thieves be run from bunnies"));
        assert!(re.is_match("the thieves\n  were running   from bunnies"));
        assert!(!re.is_match("bunnies from running are thieves"));
    }

    #[test]
    fn empty_query_is_empty() {
        let lexicon = builtin();
        let query = PatternBuilder::new(&lexicon).compose_query(Vec::<String>::new());
        assert!(query.is_empty());
        assert_eq!(query.to_string(), "");
    }
}
