//! Stopword list: words that carry no category signal.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Line prefix marking a comment in word-list files.
pub const COMMENT_MARKER: char = '#';

/// Immutable set of words to drop before stemming.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Load from a newline-delimited file. Missing or unreadable file is fatal.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::from_io(path, e))?;
        let set = Self::parse(&text);
        tracing::info!("loaded {} stopwords from {:?}", set.len(), path);
        Ok(set)
    }

    /// Parse list text: one word per line, blank and `#` lines skipped.
    pub fn parse(text: &str) -> Self {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
            .map(str::to_string)
            .collect();
        Self { words }
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
