use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use morphsearch::{AppState, FragmentSource, Matcher, PatternBuilder, router};
use morphsearch_lexicon::{IrregularLexicon, compile_file};
use morphsearch_stem::stem_with;
use morphsearch_types::WordClass;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Parser)]
#[command(name = "morphsearch")]
#[command(about = "Build search patterns that match a word and its inflected forms")]
struct Cli {
    /// Directory holding compiled keys.v/dict.v/keys.n/dict.n tables.
    /// The built-in word lists are used when omitted.
    #[arg(long, global = true, env = "LEXICON_DIR")]
    lexicon_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a word list (one synset per line) into keys.<c> and dict.<c>.
    Compile {
        /// Word class: `v` or `n`.
        #[arg(value_parser = parse_class)]
        class: WordClass,
        file: PathBuf,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Print the pattern for an ordered sequence of words.
    Pattern {
        #[arg(required = true)]
        words: Vec<String>,
        /// Also print every fragment with the rule that produced it.
        #[arg(long, default_value_t = false)]
        explain: bool,
    },
    /// Print the stem of each word and any irregular synsets it reaches.
    Stem {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Print the lines of a file (or stdin) that match the words' pattern.
    Grep {
        #[arg(required = true)]
        words: Vec<String>,
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(short = 'i', long, default_value_t = false)]
        ignore_case: bool,
    },
    /// Serve the HTTP API.
    Serve {
        #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
        host: String,
        #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Serve { .. }));

    match cli.command {
        Commands::Compile {
            class,
            file,
            out_dir,
        } => {
            let tables = compile_file(class, &file)
                .with_context(|| format!("compiling {} list {}", class, file.display()))?;
            let (keys, dict) = tables
                .write_to(&out_dir)
                .with_context(|| format!("writing tables to {}", out_dir.display()))?;
            info!(
                "{} synsets, {} forms",
                tables.synset_to_forms().len(),
                tables.form_to_synsets().len()
            );
            println!("{}", keys.display());
            println!("{}", dict.display());
        }
        Commands::Pattern { words, explain } => {
            let lexicon = load_lexicon(cli.lexicon_dir.as_deref())?;
            let query = PatternBuilder::new(&lexicon).compose_query(&words);
            if explain {
                for fragment in query.fragments() {
                    println!(
                        "{:<16} {:<28} {}",
                        fragment.word(),
                        describe(fragment.source()),
                        fragment
                    );
                }
            }
            println!("{query}");
        }
        Commands::Stem { words } => {
            let lexicon = load_lexicon(cli.lexicon_dir.as_deref())?;
            for word in &words {
                let outcome = stem_with(word, |cand| lexicon.find(cand));
                match outcome.irregular {
                    Some(hit) => {
                        let synsets: Vec<String> = hit
                            .ids
                            .iter()
                            .filter_map(|id| lexicon.forms_of(hit.class, *id))
                            .map(|forms| forms.join(" "))
                            .collect();
                        println!(
                            "{word}\t{}\t{} [{}]",
                            outcome.stem,
                            hit.class,
                            synsets.join(" | ")
                        );
                    }
                    None => println!("{word}\t{}", outcome.stem),
                }
            }
        }
        Commands::Grep {
            words,
            file,
            ignore_case,
        } => {
            let lexicon = load_lexicon(cli.lexicon_dir.as_deref())?;
            let query = PatternBuilder::new(&lexicon).compose_query(&words);
            let matcher = Matcher::new(&query, !ignore_case)?;
            let hits = match &file {
                Some(path) => {
                    let reader = File::open(path)
                        .with_context(|| format!("opening {}", path.display()))?;
                    grep(&matcher, BufReader::new(reader))?
                }
                None => grep(&matcher, io::stdin().lock())?,
            };
            info!("{hits} matching lines for {}", matcher.as_str());
        }
        Commands::Serve { host, port } => serve(cli.lexicon_dir.as_deref(), &host, port).await?,
    }

    Ok(())
}

async fn serve(lexicon_dir: Option<&Path>, host: &str, port: u16) -> Result<()> {
    info!("binding to {}:{}", host, port);

    let start = Instant::now();
    let lexicon = Arc::new(load_lexicon(lexicon_dir)?);
    info!("lexicon ready in {} ms", start.elapsed().as_millis());

    let app = router(AppState { lexicon }).layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}

fn load_lexicon(dir: Option<&Path>) -> Result<IrregularLexicon> {
    match dir {
        Some(dir) => IrregularLexicon::load(dir)
            .with_context(|| format!("loading lexicon tables from {}", dir.display())),
        None => IrregularLexicon::builtin().context("compiling built-in word lists"),
    }
}

fn grep(matcher: &Matcher, reader: impl BufRead) -> Result<usize> {
    let mut hits = 0;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", lineno + 1))?;
        if matcher.is_match(&line) {
            hits += 1;
            println!("{}:{}", lineno + 1, line);
        }
    }
    Ok(hits)
}

fn describe(source: &FragmentSource) -> String {
    match source {
        FragmentSource::Irregular { class } => format!("irregular {class}"),
        FragmentSource::Literal => "literal".to_string(),
        FragmentSource::Stem { stem } => format!("stem {stem}"),
        FragmentSource::StemIrregular { stem, class } => format!("stem {stem} + irregular {class}"),
    }
}

fn parse_class(raw: &str) -> Result<WordClass, String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            WordClass::from_char(c).ok_or_else(|| format!("unknown word class `{raw}`, use v or n"))
        }
        _ => Err(format!("unknown word class `{raw}`, use v or n")),
    }
}

// Logs go to stderr; stdout carries command output.
fn init_tracing(serving: bool) {
    let default = if serving { "info" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .unwrap_or_else(|_| EnvFilter::new(default));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
