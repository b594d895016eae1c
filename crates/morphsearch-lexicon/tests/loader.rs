use std::fs;
use std::path::Path;

use morphsearch_lexicon::{
    IrregularLexicon, LexiconError, LexiconTables, compile_file, dict_file_name, keys_file_name,
};
use morphsearch_types::{SynsetId, WordClass};

fn write_list(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("write word list");
    path
}

#[test]
fn compiles_two_line_file_with_shared_form() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_list(dir.path(), "verbs.txt", "lie lay lain\nlay laid\n");

    let tables = compile_file(WordClass::Verb, &path).expect("compile");
    assert_eq!(tables.ids_for("lie"), Some(&[SynsetId(1)][..]));
    assert_eq!(tables.ids_for("laid"), Some(&[SynsetId(2)][..]));
    assert_eq!(tables.ids_for("lay"), Some(&[SynsetId(1), SynsetId(2)][..]));

    for (id, forms) in tables.synset_to_forms() {
        for form in forms {
            assert!(tables.ids_for(form).unwrap().contains(id));
        }
    }
    for (form, ids) in tables.form_to_synsets() {
        for id in ids {
            assert!(tables.forms_for(*id).unwrap().contains(form));
        }
    }
}

#[test]
fn malformed_file_reports_line_number() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_list(dir.path(), "nouns.txt", "man men\n\nfoot feet\n");

    let err = compile_file(WordClass::Noun, &path).unwrap_err();
    assert!(matches!(err, LexiconError::MalformedInput { line: 2, .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = compile_file(WordClass::Noun, dir.path().join("absent.txt")).unwrap_err();
    match err {
        LexiconError::Io { path, .. } => assert!(path.ends_with("absent.txt")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn written_tables_load_back_into_a_lexicon() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let verbs = write_list(dir.path(), "verbs.txt", "go goes went gone\nrun ran\n");
    let nouns = write_list(dir.path(), "nouns.txt", "thief thieves\n");

    let (keys, dict) = compile_file(WordClass::Verb, &verbs)?.write_to(dir.path())?;
    assert!(keys.ends_with(keys_file_name(WordClass::Verb)));
    assert!(dict.ends_with(dict_file_name(WordClass::Verb)));
    compile_file(WordClass::Noun, &nouns)?.write_to(dir.path())?;

    let lexicon = IrregularLexicon::load(dir.path())?;
    let hit = lexicon.lookup(WordClass::Verb, "ran").expect("ran");
    assert_eq!(hit.ids, &[SynsetId(2)]);
    assert_eq!(
        lexicon.forms_of(WordClass::Noun, SynsetId(1)).unwrap(),
        ["thief", "thieves"]
    );
    Ok(())
}

#[test]
fn inconsistent_tables_are_not_served() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("keys.v"), r#"{ "went": [1], "gone": [2] }"#).unwrap();
    fs::write(dir.path().join("dict.v"), r#"{ "1": ["go", "went"] }"#).unwrap();
    fs::write(dir.path().join("keys.n"), r#"{}"#).unwrap();
    fs::write(dir.path().join("dict.n"), r#"{}"#).unwrap();

    let verbs = LexiconTables::read_from(dir.path(), WordClass::Verb).unwrap();
    assert!(verbs.check_integrity().is_err());

    let err = IrregularLexicon::load(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        LexiconError::Integrity {
            class: WordClass::Verb,
            ..
        }
    ));
}

#[test]
fn garbage_table_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("keys.v"), "keys go here").unwrap();
    fs::write(dir.path().join("dict.v"), "{}").unwrap();

    let err = LexiconTables::read_from(dir.path(), WordClass::Verb).unwrap_err();
    assert!(matches!(err, LexiconError::Format { .. }));
}
