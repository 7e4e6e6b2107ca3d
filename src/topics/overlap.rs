// Weighted Jaccard similarity between topics.
//
// Compares two topics by their keyword score vectors. For each keyword in
// either topic we take the minimum score from both sides and the maximum
// score from both sides:
//
//   sum(min(score_a, score_b)) / sum(max(score_a, score_b))
//
// 0.0 means no shared keywords, 1.0 identical keyword profiles. Used for the
// topic similarity heatmap.

use std::collections::{HashMap, HashSet};

use super::model::Topic;

/// Weighted Jaccard similarity of two topics' keyword scores.
pub fn topic_similarity(a: &Topic, b: &Topic) -> f64 {
    jaccard_from_weights(&keyword_weights(a), &keyword_weights(b))
}

/// Pairwise similarity of every topic against every other, row-major.
pub fn similarity_matrix(topics: &[Topic]) -> Vec<Vec<f64>> {
    topics
        .iter()
        .map(|a| topics.iter().map(|b| topic_similarity(a, b)).collect())
        .collect()
}

fn keyword_weights(topic: &Topic) -> HashMap<String, f64> {
    let mut weights = HashMap::new();
    for (kw, score) in &topic.keywords {
        *weights.entry(kw.clone()).or_insert(0.0) += f64::from(*score);
    }
    weights
}

/// Compute weighted Jaccard from raw keyword weight maps.
pub fn jaccard_from_weights(
    weights_a: &HashMap<String, f64>,
    weights_b: &HashMap<String, f64>,
) -> f64 {
    let all_keys: HashSet<&String> = weights_a.keys().chain(weights_b.keys()).collect();

    if all_keys.is_empty() {
        return 0.0;
    }

    let mut min_sum = 0.0;
    let mut max_sum = 0.0;

    for key in all_keys {
        let a = weights_a.get(key).copied().unwrap_or(0.0);
        let b = weights_b.get(key).copied().unwrap_or(0.0);
        min_sum += a.min(b);
        max_sum += a.max(b);
    }

    if max_sum == 0.0 {
        0.0
    } else {
        min_sum / max_sum
    }
}
