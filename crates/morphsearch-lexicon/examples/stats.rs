use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use morphsearch_lexicon::IrregularLexicon;
use morphsearch_types::WordClass;

fn main() -> Result<()> {
    let lexicon = match env::args().nth(1).map(PathBuf::from) {
        Some(dir) => IrregularLexicon::load(&dir)
            .with_context(|| format!("loading lexicon tables from {}", dir.display()))?,
        None => IrregularLexicon::builtin().context("compiling built-in word lists")?,
    };

    for class in WordClass::LOOKUP_ORDER {
        let tables = lexicon.tables(class);
        let shared = tables
            .form_to_synsets()
            .values()
            .filter(|ids| ids.len() > 1)
            .count();
        let largest = tables
            .synset_to_forms()
            .values()
            .map(Vec::len)
            .max()
            .unwrap_or(0);
        println!("{class}:");
        println!("  synsets        : {}", lexicon.synset_count(class));
        println!("  forms          : {}", lexicon.form_count(class));
        println!("  ambiguous forms: {shared}");
        println!("  largest synset : {largest}");
    }

    // Spot-check a couple of forms to confirm lookup.
    for word in ["went", "lay", "thieves"] {
        match lexicon.find(word) {
            Some(hit) => println!("'{word}' -> {} synsets {:?}", hit.class, hit.ids),
            None => println!("'{word}' -> not irregular"),
        }
    }

    Ok(())
}
