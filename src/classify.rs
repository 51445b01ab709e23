//! Biography text -> sorted, deduplicated category names.

use std::collections::BTreeSet;

use crate::stem::stem;
use crate::stopwords::StopwordSet;
use crate::taxonomy::StemCategoryIndex;
use crate::tokenize;

/// Separator used when categories are stored in one output field.
pub const TERM_SEPARATOR: &str = "|";

/// Categories for one biography, sorted and without duplicates or empty names.
pub fn classify(bio: &str, stopwords: &StopwordSet, index: &StemCategoryIndex) -> Vec<String> {
    if bio.is_empty() {
        return Vec::new();
    }
    let normalized = tokenize::normalize(bio, stopwords);
    let mut found: BTreeSet<&str> = BTreeSet::new();
    for word in normalized.split_whitespace() {
        let word_stem = stem(word);
        let categories = index.categories_for(&word_stem);
        if !categories.is_empty() {
            tracing::debug!("stem {:?} matched {:?}", word_stem, categories);
        }
        found.extend(categories.iter().map(String::as_str));
    }
    found
        .into_iter()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join categories into the single-field form, e.g. `Art|Music`.
pub fn join_terms(categories: &[String]) -> String {
    categories.join(TERM_SEPARATOR)
}

/// Stopwords and taxonomy bundled for repeated classification.
#[derive(Debug, Clone)]
pub struct Classifier {
    stopwords: StopwordSet,
    index: StemCategoryIndex,
}

impl Classifier {
    pub fn new(stopwords: StopwordSet, index: StemCategoryIndex) -> Self {
        Self { stopwords, index }
    }

    pub fn classify(&self, bio: &str) -> Vec<String> {
        classify(bio, &self.stopwords, &self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(stopwords: &str, taxonomy: &str) -> Classifier {
        Classifier::new(
            StopwordSet::parse(stopwords),
            StemCategoryIndex::parse(taxonomy).unwrap(),
        )
    }

    #[test]
    fn test_empty_bio_has_no_categories() {
        let c = classifier("the\n", "Music guitar\n");
        assert!(c.classify("").is_empty());
        assert!(classify("", &StopwordSet::default(), &StemCategoryIndex::parse("").unwrap()).is_empty());
    }

    #[test]
    fn test_plural_matches_singular_example() {
        let c = classifier("", "Biology bird birds avian\n");
        assert_eq!(c.classify("I love birds"), vec!["Biology"]);
    }

    #[test]
    fn test_end_to_end_with_stopwords() {
        let stopwords = StopwordSet::parse("the\nand\na");
        let index = StemCategoryIndex::parse("Music\tguitar\tpiano").unwrap();
        let bio = "he plays the guitar and piano";
        assert_eq!(tokenize::normalize(bio, &stopwords), "he plays guitar piano");
        assert_eq!(classify(bio, &stopwords, &index), vec!["Music"]);
    }

    #[test]
    fn test_shared_stem_returns_both_sorted() {
        let c = classifier("", "Writing composer\nMusic composing\n");
        assert_eq!(c.classify("a composer of note"), vec!["Music", "Writing"]);
    }

    #[test]
    fn test_deduplicates_across_whole_bio() {
        let c = classifier("", "Science physics chemistry\nArt painting\n");
        let got = c.classify("Physics, chemistry, painting and more physics.");
        assert_eq!(got, vec!["Art", "Science"]);
    }

    #[test]
    fn test_output_sorted_and_unique() {
        let c = classifier(
            "",
            "Zoology animals\nArt painting\nMusic piano\nArt drawing\nLaw lawyer\n",
        );
        let got = c.classify("lawyer, piano player, drawing and painting animals");
        let mut expected = got.clone();
        expected.sort();
        expected.dedup();
        assert_eq!(got, expected);
        assert_eq!(got, vec!["Art", "Law", "Music", "Zoology"]);
    }

    #[test]
    fn test_uppercase_bio_still_matches() {
        let c = classifier("", "Music Guitar\n");
        assert_eq!(c.classify("GUITAR teacher"), vec!["Music"]);
    }

    #[test]
    fn test_no_match_and_garbage_input() {
        let c = classifier("", "Music guitar\n");
        assert!(c.classify("retired accountant").is_empty());
        assert!(c.classify(",,, ;;; ___ \"\" ()").is_empty());
    }

    #[test]
    fn test_join_terms() {
        assert_eq!(join_terms(&["Art".into(), "Social Science".into()]), "Art|Social Science");
        assert_eq!(join_terms(&[]), "");
    }
}
