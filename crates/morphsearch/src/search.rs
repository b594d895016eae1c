use regex::{Regex, RegexBuilder};
use serde::Serialize;
use thiserror::Error;

use crate::pattern::SearchPattern;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("query has no words")]
    EmptyQuery,
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// One occurrence of a pattern in a text, in byte offsets.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Compiled [`SearchPattern`]. Case folding is decided by the caller.
#[derive(Clone, Debug)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    pub fn new(pattern: &SearchPattern, case_sensitive: bool) -> Result<Self, SearchError> {
        if pattern.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let regex = RegexBuilder::new(&pattern.to_string())
            .case_insensitive(!case_sensitive)
            .build()?;
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Non-overlapping matches, left to right.
    pub fn find_all(&self, text: &str) -> Vec<Match> {
        self.regex
            .find_iter(text)
            .map(|m| Match {
                start: m.start(),
                end: m.end(),
                text: m.as_str().to_string(),
            })
            .collect()
    }
}
