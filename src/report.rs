//! Stem discovery report: which words occur in bios and what they stem to.
//! Used when curating the taxonomy list.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;

use serde::Serialize;

use crate::stem::stem;
use crate::stopwords::StopwordSet;
use crate::tokenize;

/// One observed word with its stem split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordStem {
    pub word: String,
    pub count: usize,
    /// Word prefix as long as the stem.
    pub root: String,
    pub stem: String,
    /// Remainder of the word after the root.
    pub crop: String,
}

impl WordStem {
    /// True when the stem is not a plain prefix of the word.
    pub fn is_rewritten(&self) -> bool {
        self.root != self.stem
    }
}

/// Accumulates word/stem statistics over many bios.
#[derive(Debug, Default)]
pub struct StemReport {
    words: BTreeMap<String, WordStem>,
    stem_words: HashMap<String, Vec<String>>,
}

impl StemReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one raw bio. Empty bios are ignored.
    pub fn add_bio(&mut self, bio: &str, stopwords: &StopwordSet) {
        let bio = bio.to_lowercase();
        if bio.is_empty() {
            return;
        }
        for word in tokenize::tokenize(&bio, stopwords) {
            self.add_word(&word);
        }
    }

    fn add_word(&mut self, word: &str) {
        let word_stem = stem(word);
        let stem_len = word_stem.chars().count();
        let root: String = word.chars().take(stem_len).collect();
        let crop: String = word.chars().skip(stem_len).collect();

        let words = self.stem_words.entry(word_stem.clone()).or_default();
        if !words.iter().any(|w| w == word) {
            words.push(word.to_string());
        }

        let entry = self
            .words
            .entry(word.to_string())
            .or_insert_with(|| WordStem {
                word: word.to_string(),
                count: 0,
                root,
                stem: word_stem,
                crop,
            });
        entry.count += 1;
    }

    /// Entries sorted by word.
    pub fn entries(&self) -> impl Iterator<Item = &WordStem> {
        self.words.values()
    }

    /// Distinct words seen for `stem`, in first-seen order.
    pub fn words_for_stem(&self, stem: &str) -> &[String] {
        self.stem_words.get(stem).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Fixed-width table: count, word, stem, crop, `*` when the stem was rewritten.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        for entry in self.entries() {
            let flag = if entry.is_rewritten() { "*" } else { "" };
            let _ = writeln!(
                out,
                "{:>4} {:<25}{:<20}{:<10}{}",
                entry.count, entry.word, entry.stem, entry.crop, flag
            );
        }
        out
    }

    /// Stems reached from more than one word: `stem: word word ...`, sorted by stem.
    pub fn render_groups(&self) -> String {
        let mut stems: Vec<&String> = self
            .stem_words
            .iter()
            .filter(|(_, words)| words.len() > 1)
            .map(|(stem, _)| stem)
            .collect();
        stems.sort();
        let mut out = String::new();
        for stem in stems {
            let _ = writeln!(out, "{}: {}", stem, self.words_for_stem(stem).join(" "));
        }
        out
    }

    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        let entries: Vec<&WordStem> = self.entries().collect();
        serde_json::to_string_pretty(&entries)
    }
}
