// Speech extractor pipeline.
//
// Turns every plain-text session transcript into one record per segment,
// stamped with the session date from the file name.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::document_progress;
use crate::config::Config;
use crate::corpus::{self, tei};
use crate::output::{terminal, write_json};
use crate::speeches::{date_from_filename, segment_records, SpeechRecord};

/// Result of a speech extraction pass.
#[derive(Debug)]
pub struct SpeechRun {
    pub documents: usize,
    pub records: Vec<SpeechRecord>,
    /// Sentences skipped because they had no text
    pub skipped_sentences: usize,
}

/// Extract speech records from every document in `dir`.
pub fn extract(dir: &Path, exclude_prefix: &str) -> Result<SpeechRun> {
    let paths = corpus::list_documents(dir, exclude_prefix)?;
    info!(documents = paths.len(), dir = %dir.display(), "Scanning text corpus");

    let mut records = Vec::new();
    let mut skipped_sentences = 0;
    let pb = document_progress(paths.len(), "Speeches");

    for path in &paths {
        let date = date_from_filename(path)?;
        let text = corpus::read_document(path)?;
        let doc = tei::parse(&text).with_context(|| format!("Failed to parse {}", path.display()))?;

        let segments = tei::segment_sentences(&doc);
        skipped_sentences += segments.iter().flatten().filter(|s| s.is_none()).count();

        let source = path.display().to_string();
        records.extend(segment_records(&date, segments, &source));
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(records = records.len(), skipped_sentences, "Extracted speech segments");

    Ok(SpeechRun {
        documents: paths.len(),
        records,
        skipped_sentences,
    })
}

/// Run the speech extractor with the configured paths and save its output.
pub fn run(config: &Config) -> Result<SpeechRun> {
    config.require_text_corpus()?;
    let run = extract(&config.text_dir, &config.exclude_prefix)?;
    write_json(&config.speeches_file, &run.records)?;
    terminal::display_speech_summary(
        run.documents,
        run.records.len(),
        run.skipped_sentences,
        &config.speeches_file,
    );
    Ok(run)
}
