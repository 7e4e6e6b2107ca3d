// Topic model results: what a fitted model reports about the corpus.

use serde::{Deserialize, Serialize};

/// Topic id given to documents that match no topic.
pub const OUTLIER_TOPIC: i64 = -1;

/// A discovered topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    /// Human-readable label built from the top keywords
    pub label: String,
    /// Keywords with their scores, highest score first
    pub keywords: Vec<(String, f32)>,
}

impl Topic {
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords.iter().map(|(w, _)| w.clone()).collect()
    }
}

/// One row of the topic overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicInfo {
    pub id: i64,
    /// Number of documents assigned to the topic
    pub count: usize,
    pub label: String,
}

/// How often a topic occurs within one timestamp bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicTimeBucket {
    pub timestamp: String,
    pub topic: i64,
    /// Number of documents in this bucket assigned to the topic
    pub frequency: usize,
    /// Topic keywords that occur in this bucket's documents
    pub keywords: Vec<String>,
}

/// Join the first three keywords into a label, e.g. `"cesta / most / denar"`.
pub fn label_from_keywords(keywords: &[String]) -> String {
    let words: Vec<&str> = keywords.iter().take(3).map(|s| s.as_str()).collect();
    words.join(" / ")
}
