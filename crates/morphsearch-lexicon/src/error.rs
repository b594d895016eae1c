use std::path::{Path, PathBuf};

use morphsearch_types::WordClass;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LexiconError>;

#[derive(Debug, Error)]
pub enum LexiconError {
    /// A word-list line could not be turned into at least one word form.
    #[error("malformed word list at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    /// The form table and the synset table disagree.
    #[error("inconsistent {class} lexicon: {detail}")]
    Integrity { class: WordClass, detail: String },

    #[error("expected a {expected} table, got a {found} table")]
    ClassMismatch {
        expected: WordClass,
        found: WordClass,
    },

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid table file {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LexiconError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        LexiconError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn format(path: &Path, source: serde_json::Error) -> Self {
        LexiconError::Format {
            path: path.to_path_buf(),
            source,
        }
    }
}
