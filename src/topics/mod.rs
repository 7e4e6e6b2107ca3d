// Topic modeling: TF-IDF topics, lemma postprocessing, and topic similarity.

pub mod lookup;
pub mod model;
pub mod overlap;
pub mod tfidf;
pub mod traits;
