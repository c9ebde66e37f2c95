//! Directory-wide text search used by the Uclad editor core.
//!
//! A [`SearchQuery`] is compiled into a literal, case-insensitive [`QueryMatcher`];
//! [`search`] walks a workspace root through the [`uclad_project`] scanner and records
//! the first occurrence per file. [`offset_to_line_column`] and
//! [`line_column_to_offset`] translate match offsets into cursor positions.

use std::ops::Range;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

mod config;
mod position;
mod workspace;

pub use config::{ConfigError, SearchConfig, DEFAULT_EXCLUDED_DIRECTORIES, DEFAULT_MAX_FILE_SIZE};
pub use position::{line_column_to_offset, offset_to_line_column, TextPosition};
pub use workspace::{
    search, CancellationToken, ScanStats, SearchMatch, SearchStatus, WorkspaceSearch,
    WorkspaceSearchError,
};

/// Error conditions raised while preparing a query.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("search pattern cannot be empty")]
    EmptyPattern,
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Text to look for; always compared case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Result<Self, SearchError> {
        let text = text.into();
        if text.is_empty() {
            return Err(SearchError::EmptyPattern);
        }
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Compiles the query for repeated use across many files.
    pub fn matcher(&self) -> Result<QueryMatcher, SearchError> {
        let regex = RegexBuilder::new(&regex::escape(&self.text))
            .case_insensitive(true)
            .build()
            .map_err(|err| SearchError::InvalidPattern(err.to_string()))?;
        Ok(QueryMatcher { regex })
    }
}

/// Compiled form of a [`SearchQuery`].
#[derive(Clone, Debug)]
pub struct QueryMatcher {
    regex: Regex,
}

impl QueryMatcher {
    /// Byte range of the first occurrence in `text`.
    pub fn first_match(&self, text: &str) -> Option<Range<usize>> {
        self.regex.find(text).map(|m| m.range())
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(text: &str) -> QueryMatcher {
        SearchQuery::new(text).unwrap().matcher().unwrap()
    }

    #[test]
    fn empty_query_is_rejected() {
        assert_eq!(SearchQuery::new(""), Err(SearchError::EmptyPattern));
    }

    #[test]
    fn first_match_ignores_case() {
        assert_eq!(matcher("Hello").first_match("hello world"), Some(0..5));
        assert_eq!(matcher("WORLD").first_match("hello world"), Some(6..11));
    }

    #[test]
    fn first_match_reports_only_the_earliest_hit() {
        let text = "one Needle two needle three NEEDLE";
        assert_eq!(matcher("needle").first_match(text), Some(4..10));
    }

    #[test]
    fn query_text_is_matched_literally() {
        let m = matcher("a.b(");
        assert!(!m.is_match("axb("));
        assert_eq!(m.first_match("call a.b(1)"), Some(5..9));
    }

    #[test]
    fn non_ascii_queries_fold_case() {
        let m = matcher("ÉCOLE");
        assert_eq!(m.first_match("une école"), Some(4..10));
    }

    #[test]
    fn missing_text_yields_none() {
        assert_eq!(matcher("absent").first_match("nothing here"), None);
    }
}
