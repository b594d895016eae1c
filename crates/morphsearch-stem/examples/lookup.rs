use std::env;

use anyhow::{Context, Result, bail};
use morphsearch_lexicon::IrregularLexicon;
use morphsearch_stem::stem_with;

const USAGE: &str = "usage: cargo run -p morphsearch-stem --example lookup -- [--demo | <word>]";

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let words: Vec<String> = match args.next().as_deref() {
        Some("--demo") => vec![
            "running".into(),
            "searches".into(),
            "bunnies".into(),
            "generalization".into(),
            "thieves".into(),
        ],
        Some(word) => vec![word.to_string()],
        None => bail!(USAGE),
    };
    if args.next().is_some() {
        bail!("too many arguments");
    }

    let lexicon = IrregularLexicon::builtin().context("compiling built-in word lists")?;

    for word in words {
        let outcome = stem_with(&word, |cand| lexicon.find(cand));
        println!("\nSurface: {word}");
        println!("  stem: {}", outcome.stem);
        if let Some(hit) = outcome.irregular {
            for id in hit.ids {
                let forms = lexicon.forms_of(hit.class, *id).unwrap_or_default();
                println!("  {} synset {}: {}", hit.class, id, forms.join(" "));
            }
        }
    }

    Ok(())
}
