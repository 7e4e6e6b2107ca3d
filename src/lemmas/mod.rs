// Lemma extraction: the word → lemma map used to clean topic keywords.

pub mod pos;
pub mod resolver;
pub mod stopwords;

use serde::{Deserialize, Serialize};

/// One output pair, serialized as `[surface_word, lemma]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct LemmaEntry {
    pub word: String,
    pub lemma: String,
}

impl LemmaEntry {
    pub fn new(word: impl Into<String>, lemma: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            lemma: lemma.into(),
        }
    }
}

impl From<(String, String)> for LemmaEntry {
    fn from((word, lemma): (String, String)) -> Self {
        Self { word, lemma }
    }
}

impl From<LemmaEntry> for (String, String) {
    fn from(entry: LemmaEntry) -> Self {
        (entry.word, entry.lemma)
    }
}
