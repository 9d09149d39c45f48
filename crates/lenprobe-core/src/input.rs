//! Reading the URL set from a line-oriented source (stdin in the CLI).
//!
//! The first whitespace-delimited token of each line is the candidate URL.
//! The whole input is validated before anything is probed.

use std::collections::HashSet;
use std::io::BufRead;
use thiserror::Error;

/// Marker every accepted token must contain.
const SCHEME_MARKER: &str = "http";

#[derive(Debug, Error)]
pub enum InputError {
    /// A line's first token has no HTTP scheme marker.
    #[error("url malformed on line {line}: {token}")]
    Malformed { line: usize, token: String },
    /// No URL was supplied.
    #[error("empty set of URLs")]
    Empty,
    #[error("reading input: {0}")]
    Io(#[from] std::io::Error),
}

/// Non-empty set of unique URLs, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSet {
    urls: Vec<String>,
}

impl UrlSet {
    /// Builds a set from candidate URLs, dropping duplicates.
    pub fn new<I, S>(candidates: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut urls = Vec::new();
        for url in candidates {
            let url = url.into();
            if seen.insert(url.clone()) {
                urls.push(url);
            }
        }
        if urls.is_empty() {
            return Err(InputError::Empty);
        }
        Ok(Self { urls })
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.urls
    }
}

/// Reads lines until end of stream and returns the deduplicated URL set.
///
/// Blank lines are skipped. Any token without `"http"` aborts the read with
/// [`InputError::Malformed`]; an input with no tokens yields [`InputError::Empty`].
pub fn read_urls<R: BufRead>(reader: R) -> Result<UrlSet, InputError> {
    let mut candidates = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let Some(token) = line.split_whitespace().next() else {
            continue;
        };
        if !token.contains(SCHEME_MARKER) {
            return Err(InputError::Malformed {
                line: idx + 1,
                token: token.to_string(),
            });
        }
        candidates.push(token.to_string());
    }
    let set = UrlSet::new(candidates)?;
    tracing::debug!(urls = set.len(), "read url set");
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn dedups_and_keeps_first_token() {
        let input = "http://a/1\nhttp://a/1 extra words\nhttp://b/2\t123\n";
        let set = read_urls(Cursor::new(input)).unwrap();
        assert_eq!(set.len(), 2);
        let urls: Vec<&str> = set.iter().collect();
        assert_eq!(urls, vec!["http://a/1", "http://b/2"]);
    }

    #[test]
    fn leading_whitespace_is_ignored() {
        let set = read_urls(Cursor::new("   https://x.example/file  \n")).unwrap();
        assert_eq!(set.into_vec(), vec!["https://x.example/file".to_string()]);
    }

    #[test]
    fn malformed_token_reports_line() {
        let err = read_urls(Cursor::new("http://a/1\nnot-a-url\nhttp://b/2\n")).unwrap_err();
        match err {
            InputError::Malformed { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "not-a-url");
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn only_first_token_is_checked() {
        let err = read_urls(Cursor::new("ftp://host/file http://decoy\n")).unwrap_err();
        assert!(matches!(err, InputError::Malformed { line: 1, .. }));
    }

    #[test]
    fn empty_input_fails() {
        assert!(matches!(read_urls(Cursor::new("")), Err(InputError::Empty)));
        assert!(matches!(
            read_urls(Cursor::new("\n   \n\t\n")),
            Err(InputError::Empty)
        ));
    }

    #[test]
    fn url_set_rejects_empty() {
        let none: Vec<String> = Vec::new();
        assert!(matches!(UrlSet::new(none), Err(InputError::Empty)));
    }
}
