// Topic model trait, the seam for swapping in another model.
//
// The pipeline only needs document assignments, keyword lists, and a
// per-timestamp breakdown. The default implementation is TF-IDF keyword
// clustering; an embedding-based model can replace it without touching the
// reporting code.

use anyhow::Result;

use super::model::{Topic, TopicInfo, TopicTimeBucket};

/// A topic model fitted on a list of documents.
pub trait TopicModel {
    /// Fit the model and return one topic id per document (`-1` = outlier).
    fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<i64>>;

    /// All topics found by the last fit, ordered by id.
    fn topics(&self) -> &[Topic];

    fn topic(&self, id: i64) -> Option<&Topic> {
        self.topics().iter().find(|t| t.id == id)
    }

    /// Topic overview, largest topic first. Includes the outlier topic when
    /// any document is an outlier.
    fn topic_info(&self) -> Vec<TopicInfo>;

    /// Break the fitted assignments down by timestamp.
    fn topics_over_time(
        &self,
        documents: &[String],
        assignments: &[i64],
        timestamps: &[String],
    ) -> Result<Vec<TopicTimeBucket>>;
}
