use morphsearch_lexicon::IrregularLexicon;
use morphsearch_stem::stem_with;
use morphsearch_types::WordClass;

#[test]
fn progressive_form_reduces_to_irregular_verb() {
    let lexicon = IrregularLexicon::builtin().expect("builtin lexicon");
    let outcome = stem_with("running", |cand| lexicon.find(cand));
    assert_eq!(outcome.stem, "run");

    let hit = outcome.irregular.expect("run is an irregular verb");
    assert_eq!(hit.class, WordClass::Verb);
    let forms = lexicon.forms_of(hit.class, hit.ids[0]).unwrap();
    assert!(forms.iter().any(|f| f == "ran"));
}

#[test]
fn regular_words_have_no_irregular_hit() {
    let lexicon = IrregularLexicon::builtin().expect("builtin lexicon");
    for word in ["searching", "bunnies", "relational"] {
        let outcome = stem_with(word, |cand| lexicon.find(cand));
        assert!(outcome.irregular.is_none(), "{word} -> {}", outcome.stem);
    }
}

#[test]
fn irregular_noun_found_after_plural_step() {
    let lexicon = IrregularLexicon::builtin().expect("builtin lexicon");
    // `foots` is not listed, but its singular is.
    let outcome = stem_with("foots", |cand| lexicon.find(cand));
    assert_eq!(outcome.stem, "foot");
    let hit = outcome.irregular.expect("foot is an irregular noun");
    assert_eq!(hit.class, WordClass::Noun);
}
