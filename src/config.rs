use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;

/// Name prefix of corpus files that are not session transcripts.
pub const DEFAULT_EXCLUDE_PREFIX: &str = "Corpus-Kranjska";

/// Central configuration loaded from environment variables.
///
/// Every value has a default matching the standard checkout layout, so a
/// bare `kranjska all` works once the corpus is unpacked under `corpus/`.
/// The .env file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory of linguistically annotated TEI documents
    pub annotated_dir: PathBuf,
    /// Directory of plain-text TEI documents
    pub text_dir: PathBuf,
    /// Files whose name starts with this are skipped
    pub exclude_prefix: String,
    /// Lemma extractor output (word → lemma pairs)
    pub lemmas_file: PathBuf,
    /// Speech extractor output (date, text) pairs
    pub speeches_file: PathBuf,
    /// Directory for topic reports
    pub vis_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Ok(Self {
            annotated_dir: path_var("KRANJSKA_ANNOTATED_DIR", "corpus/Kranjska-xml"),
            text_dir: path_var("KRANJSKA_TEXT_DIR", "corpus/Kranjska-xml-text"),
            exclude_prefix: env::var("KRANJSKA_EXCLUDE_PREFIX")
                .unwrap_or_else(|_| DEFAULT_EXCLUDE_PREFIX.to_string()),
            lemmas_file: path_var("KRANJSKA_LEMMAS_FILE", "data/word_lemmas.json"),
            speeches_file: path_var("KRANJSKA_SPEECHES_FILE", "data/bert_docs_time_stamps.json"),
            vis_dir: path_var("KRANJSKA_VIS_DIR", "model_vis"),
        })
    }

    /// Check that the annotated corpus is where we expect it.
    /// Call this before running the lemma extractor.
    pub fn require_annotated_corpus(&self) -> Result<()> {
        require_dir(&self.annotated_dir, "KRANJSKA_ANNOTATED_DIR")
    }

    /// Check that the plain-text corpus is where we expect it.
    /// Call this before running the speech extractor.
    pub fn require_text_corpus(&self) -> Result<()> {
        require_dir(&self.text_dir, "KRANJSKA_TEXT_DIR")
    }

    /// Check that both extractor outputs exist.
    /// Call this before topic modeling.
    pub fn require_prepared_data(&self) -> Result<()> {
        for (path, cmd) in [(&self.speeches_file, "speeches"), (&self.lemmas_file, "lemmas")] {
            if !path.is_file() {
                anyhow::bail!(
                    "{} not found.\nRun `kranjska {cmd}` first to prepare it.",
                    path.display()
                );
            }
        }
        Ok(())
    }
}

fn path_var(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn require_dir(dir: &Path, var: &str) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!(
            "Corpus directory {} does not exist.\n\
             Unpack the Kranjska 1.0 corpus there, or set {var} in your .env file.",
            dir.display()
        );
    }
    Ok(())
}
