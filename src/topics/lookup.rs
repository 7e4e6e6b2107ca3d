// Lemma lookup for topic keywords.
//
// Topic keywords are surface forms taken straight from the speeches. Mapping
// them through the resolved lemma table folds inflected variants together
// and drops everything the lemma filter rejected (stopwords, function words,
// numbers).

use std::collections::HashMap;

use crate::lemmas::LemmaEntry;

/// Surface word → resolved lemma.
#[derive(Debug, Clone, Default)]
pub struct LemmaLookup {
    lemmas: HashMap<String, String>,
}

impl LemmaLookup {
    /// Build from extractor output. A repeated word keeps its last lemma.
    pub fn from_entries(entries: impl IntoIterator<Item = LemmaEntry>) -> Self {
        Self {
            lemmas: entries.into_iter().map(|e| (e.word, e.lemma)).collect(),
        }
    }

    pub fn lemma(&self, word: &str) -> Option<&str> {
        self.lemmas.get(word).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }

    /// Replace each keyword by its lemma, dropping keywords with no entry.
    /// Order is preserved and duplicates are kept.
    pub fn postprocess<S: AsRef<str>>(&self, keywords: &[S]) -> Vec<String> {
        keywords
            .iter()
            .filter_map(|kw| self.lemma(kw.as_ref()))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup() -> LemmaLookup {
        LemmaLookup::from_entries(vec![
            LemmaEntry::new("ceste", "cesta"),
            LemmaEntry::new("cesti", "cesta"),
            LemmaEntry::new("šole", "šola"),
        ])
    }

    #[test]
    fn test_postprocess_maps_and_drops() {
        let out = lookup().postprocess(&["ceste", "in", "šole", "cesti"]);
        assert_eq!(out, vec!["cesta", "šola", "cesta"]);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(lookup().lemma("Ceste"), None);
        assert_eq!(lookup().lemma("ceste"), Some("cesta"));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let l = LemmaLookup::from_entries(vec![
            LemmaEntry::new("a", "first"),
            LemmaEntry::new("a", "second"),
        ]);
        assert_eq!(l.lemma("a"), Some("second"));
        assert_eq!(l.len(), 1);
    }
}
