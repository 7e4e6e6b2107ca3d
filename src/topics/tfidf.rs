// TF-IDF topic model.
//
// Uses the `keyword_extraction` crate to rank keywords across all speeches,
// then clusters co-occurring keywords into topics. Each speech is treated as
// a separate document for IDF computation: procedural words that appear in
// every speech get downweighted, while words distinctive to a debate get
// boosted.
//
// Documents are assigned to the topic whose keywords they contain most often.
// Documents containing no topic keyword are outliers (topic -1).

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::Result;
use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use stop_words::{get, LANGUAGE};
use tracing::{debug, info};

use super::model::{label_from_keywords, Topic, TopicInfo, TopicTimeBucket, OUTLIER_TOPIC};
use super::traits::TopicModel;
use crate::lemmas::stopwords::corpus_stopwords;

/// TF-IDF based topic model, the default.
///
/// Runs locally with no model download.
pub struct TfIdfTopicModel {
    /// How many top keywords to rank before clustering
    pub top_n_keywords: usize,
    /// Upper bound on the number of topics
    pub max_topics: usize,
    /// Keywords per topic, seed keyword included
    pub keywords_per_topic: usize,
    stop_words: Vec<String>,
    topics: Vec<Topic>,
    assignments: Vec<i64>,
}

impl Default for TfIdfTopicModel {
    fn default() -> Self {
        Self::new(400, 50)
    }
}

impl TfIdfTopicModel {
    pub fn new(top_n_keywords: usize, max_topics: usize) -> Self {
        Self {
            top_n_keywords,
            max_topics,
            keywords_per_topic: 10,
            stop_words: default_stop_words(),
            topics: Vec::new(),
            assignments: Vec::new(),
        }
    }

    pub fn with_stop_words(mut self, stop_words: Vec<String>) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Topic ids from the last fit, one per document.
    pub fn assignments(&self) -> &[i64] {
        &self.assignments
    }
}

/// German stopwords from `stop-words` plus the corpus lists, sorted.
pub fn default_stop_words() -> Vec<String> {
    let mut words: Vec<String> = get(LANGUAGE::German);
    words.extend(corpus_stopwords());
    words.sort();
    words.dedup();
    words
}

impl TopicModel for TfIdfTopicModel {
    fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<i64>> {
        if documents.is_empty() {
            anyhow::bail!("No documents to analyze, cannot fit a topic model");
        }

        let params = TfIdfParams::UnprocessedDocuments(documents, &self.stop_words, None);
        let tfidf = TfIdf::new(params);
        let ranked: Vec<(String, f32)> = tfidf.get_ranked_word_scores(self.top_n_keywords);

        if ranked.is_empty() {
            anyhow::bail!(
                "TF-IDF produced no keywords from {} documents; documents may be too short or uniform",
                documents.len()
            );
        }

        info!(
            keywords = ranked.len(),
            top_keyword = &ranked[0].0,
            top_score = ranked[0].1,
            "Ranked TF-IDF keywords"
        );

        let doc_terms: Vec<HashSet<String>> = documents.iter().map(|d| terms(d)).collect();
        self.topics = cluster_keywords(&ranked, &doc_terms, self.max_topics, self.keywords_per_topic);
        self.assignments = doc_terms.iter().map(|t| assign(&self.topics, t)).collect();

        let outliers = self.assignments.iter().filter(|&&a| a == OUTLIER_TOPIC).count();
        info!(
            topics = self.topics.len(),
            documents = documents.len(),
            outliers,
            "Fitted topic model"
        );

        Ok(self.assignments.clone())
    }

    fn topics(&self) -> &[Topic] {
        &self.topics
    }

    fn topic_info(&self) -> Vec<TopicInfo> {
        let mut counts: HashMap<i64, usize> = HashMap::new();
        for &a in &self.assignments {
            *counts.entry(a).or_insert(0) += 1;
        }

        let mut info: Vec<TopicInfo> = counts
            .into_iter()
            .map(|(id, count)| TopicInfo {
                id,
                count,
                label: match self.topic(id) {
                    Some(t) => t.label.clone(),
                    None => "outliers".to_string(),
                },
            })
            .collect();
        info.sort_by(|a, b| b.count.cmp(&a.count).then(a.id.cmp(&b.id)));
        info
    }

    fn topics_over_time(
        &self,
        documents: &[String],
        assignments: &[i64],
        timestamps: &[String],
    ) -> Result<Vec<TopicTimeBucket>> {
        if documents.len() != assignments.len() || documents.len() != timestamps.len() {
            anyhow::bail!(
                "Length mismatch: {} documents, {} assignments, {} timestamps",
                documents.len(),
                assignments.len(),
                timestamps.len()
            );
        }

        // (timestamp, topic) -> (frequency, topic keywords seen in the bucket)
        let mut buckets: BTreeMap<(&str, i64), (usize, HashSet<&str>)> = BTreeMap::new();

        for ((doc, &topic), timestamp) in documents.iter().zip(assignments).zip(timestamps) {
            let bucket = buckets
                .entry((timestamp.as_str(), topic))
                .or_insert_with(|| (0, HashSet::new()));
            bucket.0 += 1;

            if let Some(t) = self.topic(topic) {
                let doc_terms = terms(doc);
                for (kw, _) in &t.keywords {
                    if doc_terms.contains(kw) {
                        bucket.1.insert(kw.as_str());
                    }
                }
            }
        }

        debug!(buckets = buckets.len(), "Computed topics over time");

        Ok(buckets
            .into_iter()
            .map(|((timestamp, topic), (frequency, seen))| TopicTimeBucket {
                timestamp: timestamp.to_string(),
                topic,
                frequency,
                keywords: self
                    .topic(topic)
                    .map(|t| {
                        t.keywords
                            .iter()
                            .filter(|(kw, _)| seen.contains(kw.as_str()))
                            .map(|(kw, _)| kw.clone())
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect())
    }
}

/// Lowercased word set of a document.
fn terms(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Group ranked keywords into topics based on co-occurrence in documents.
///
/// Strategy: for each pair of keywords, count how many documents contain
/// both. Then greedily build topics by taking the highest-scored unassigned
/// keyword as a seed and pulling in its most co-occurring unassigned
/// neighbours. Topics are numbered by total keyword score, highest first.
fn cluster_keywords(
    ranked: &[(String, f32)],
    doc_terms: &[HashSet<String>],
    max_topics: usize,
    keywords_per_topic: usize,
) -> Vec<Topic> {
    let keywords: Vec<String> = ranked.iter().map(|(w, _)| w.to_lowercase()).collect();
    let n = keywords.len();

    // For each document, record which keywords appear in it
    let doc_keywords: Vec<Vec<usize>> = doc_terms
        .iter()
        .map(|terms| {
            keywords
                .iter()
                .enumerate()
                .filter(|(_, kw)| terms.contains(kw.as_str()))
                .map(|(i, _)| i)
                .collect()
        })
        .collect();

    let mut cooccurrence = vec![vec![0u32; n]; n];
    for dk in &doc_keywords {
        for &i in dk {
            for &j in dk {
                if i != j {
                    cooccurrence[i][j] += 1;
                }
            }
        }
    }

    let mut assigned = vec![false; n];
    let mut clusters: Vec<(Vec<usize>, f32)> = Vec::new();

    for seed in 0..n {
        if clusters.len() >= max_topics {
            break;
        }
        if assigned[seed] {
            continue;
        }

        assigned[seed] = true;
        let mut members = vec![seed];
        let mut score = ranked[seed].1;

        let mut candidates: Vec<(usize, u32)> = (0..n)
            .filter(|&i| !assigned[i] && cooccurrence[seed][i] > 0)
            .map(|i| (i, cooccurrence[seed][i]))
            .collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        for (idx, _count) in candidates
            .into_iter()
            .take(keywords_per_topic.saturating_sub(1))
        {
            assigned[idx] = true;
            score += ranked[idx].1;
            members.push(idx);
        }

        clusters.push((members, score));
    }

    // Stable sort: equal scores keep seed order
    clusters.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    clusters
        .into_iter()
        .enumerate()
        .map(|(id, (members, _))| {
            let mut kws: Vec<(String, f32)> = members
                .iter()
                .map(|&i| (keywords[i].clone(), ranked[i].1))
                .collect();
            kws.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
            let words: Vec<String> = kws.iter().map(|(w, _)| w.clone()).collect();
            Topic {
                id: id as i64,
                label: label_from_keywords(&words),
                keywords: kws,
            }
        })
        .collect()
}

/// Pick the topic with the most keyword hits; ties go to the lower id.
fn assign(topics: &[Topic], doc_terms: &HashSet<String>) -> i64 {
    let mut best = OUTLIER_TOPIC;
    let mut best_hits = 0;
    for topic in topics {
        let hits = topic
            .keywords
            .iter()
            .filter(|(kw, _)| doc_terms.contains(kw))
            .count();
        if hits > best_hits {
            best = topic.id;
            best_hits = hits;
        }
    }
    best
}
