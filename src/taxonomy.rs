//! Stem -> category index built from the curated taxonomy list.
//!
//! Two file layouts exist. Version 2 (the default) lists a category followed by
//! example words; version 1 lists one example word followed by its categories.
//! A `# format: N` comment before the first data line selects the layout.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::stem::stem;
use crate::stopwords::COMMENT_MARKER;

/// Escape for a literal space inside a category name.
const SPACE_ESCAPE: &str = "%20";

static NO_CATEGORIES: BTreeSet<String> = BTreeSet::new();

/// Taxonomy file layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatVersion {
    /// `<word> <Category>...`
    V1,
    /// `<Category> <word>...`
    V2,
}

impl FormatVersion {
    fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(FormatVersion::V1),
            2 => Some(FormatVersion::V2),
            _ => None,
        }
    }
}

/// Read-only lookup from stem to the set of category names it signals.
#[derive(Debug, Clone)]
pub struct StemCategoryIndex {
    stem_categories: HashMap<String, BTreeSet<String>>,
    format: FormatVersion,
    skipped_lines: usize,
}

/// Decode `%20` escapes in a category token.
pub fn decode_category(token: &str) -> String {
    token.replace(SPACE_ESCAPE, " ")
}

/// `Some(version digits)` if the line is a `# format: N` marker.
/// A non-numeric value leaves the line an ordinary comment.
fn format_marker(line: &str) -> Option<&str> {
    let body = line.strip_prefix(COMMENT_MARKER)?;
    let (key, value) = body.split_once(':')?;
    let value = value.trim();
    let is_marker = key.trim().eq_ignore_ascii_case("format")
        && !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit());
    is_marker.then_some(value)
}

impl StemCategoryIndex {
    /// Load and index a taxonomy file. Missing, unreadable or malformed file is fatal.
    pub fn build(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::from_io(path, e))?;
        let index = Self::parse(&text).map_err(|e| e.with_path(path))?;
        tracing::info!(
            "loaded {} stems for {} categories from {:?} (format {:?}, {} lines skipped)",
            index.len(),
            index.categories().len(),
            path,
            index.format,
            index.skipped_lines
        );
        Ok(index)
    }

    /// Index taxonomy text. Lines with fewer than two tokens are skipped and logged.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut index = Self {
            stem_categories: HashMap::new(),
            format: FormatVersion::V2,
            skipped_lines: 0,
        };
        let mut seen_data = false;

        for (i, raw) in text.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(version) = format_marker(line) {
                if seen_data {
                    return Err(malformed(line_no, "format marker after data lines"));
                }
                index.format = version
                    .parse()
                    .ok()
                    .and_then(FormatVersion::from_number)
                    .ok_or_else(|| {
                        malformed(line_no, &format!("unknown format version {version:?}"))
                    })?;
                continue;
            }
            if line.starts_with(COMMENT_MARKER) {
                continue;
            }

            seen_data = true;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let Some((head, rest)) = tokens.split_first().filter(|(_, rest)| !rest.is_empty())
            else {
                tracing::warn!("taxonomy line {}: no example words, skipped: {:?}", line_no, line);
                index.skipped_lines += 1;
                continue;
            };

            match index.format {
                FormatVersion::V2 => {
                    let category = decode_category(head);
                    for word in rest {
                        index.insert(stem(&word.to_lowercase()), &category);
                    }
                }
                FormatVersion::V1 => {
                    let key = stem(&head.to_lowercase());
                    for category in rest {
                        index.insert(key.clone(), &decode_category(category));
                    }
                }
            }
        }

        Ok(index)
    }

    fn insert(&mut self, stem: String, category: &str) {
        self.stem_categories
            .entry(stem)
            .or_default()
            .insert(category.to_string());
    }

    /// Categories mapped to `stem`; empty when unknown.
    pub fn categories_for(&self, stem: &str) -> &BTreeSet<String> {
        self.stem_categories.get(stem).unwrap_or(&NO_CATEGORIES)
    }

    /// All distinct category names in the index.
    pub fn categories(&self) -> BTreeSet<&str> {
        self.stem_categories
            .values()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Number of distinct stems.
    pub fn len(&self) -> usize {
        self.stem_categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stem_categories.is_empty()
    }
}

fn malformed(line: usize, reason: &str) -> ConfigError {
    ConfigError::Malformed {
        path: PathBuf::new(),
        line,
        reason: reason.to_string(),
    }
}
