// Lemma extractor pipeline.
//
// Scans every annotated document, feeds its `<w>` tokens through one shared
// resolver, and writes the resolved (word, lemma) pairs as JSON. Any
// unreadable file or corrupt annotation aborts the run before anything is
// written.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::document_progress;
use crate::config::Config;
use crate::corpus::{self, tei};
use crate::lemmas::resolver::{LemmaResolver, ResolverStats};
use crate::lemmas::LemmaEntry;
use crate::output::{terminal, write_json};

/// Result of a lemma extraction pass.
#[derive(Debug)]
pub struct LemmaRun {
    pub documents: usize,
    pub stats: ResolverStats,
    pub entries: Vec<LemmaEntry>,
}

/// Extract and resolve lemmas from every document in `dir`.
pub fn extract(dir: &Path, exclude_prefix: &str) -> Result<LemmaRun> {
    let paths = corpus::list_documents(dir, exclude_prefix)?;
    info!(documents = paths.len(), dir = %dir.display(), "Scanning annotated corpus");

    let mut resolver = LemmaResolver::default();
    let pb = document_progress(paths.len(), "Lemmas");

    for path in &paths {
        let text = corpus::read_document(path)?;
        let doc = tei::parse(&text).with_context(|| format!("Failed to parse {}", path.display()))?;
        let tokens = tei::word_tokens(&doc)
            .with_context(|| format!("Corrupt annotation in {}", path.display()))?;
        resolver
            .extend(tokens)
            .with_context(|| format!("Corrupt annotation in {}", path.display()))?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    let stats = resolver.stats();
    info!(
        tokens = stats.tokens,
        words = resolver.len(),
        promoted = stats.promoted,
        "Resolved lemmas"
    );

    Ok(LemmaRun {
        documents: paths.len(),
        stats,
        entries: resolver.into_entries(),
    })
}

/// Run the lemma extractor with the configured paths and save its output.
pub fn run(config: &Config) -> Result<LemmaRun> {
    config.require_annotated_corpus()?;
    let run = extract(&config.annotated_dir, &config.exclude_prefix)?;
    write_json(&config.lemmas_file, &run.entries)?;
    terminal::display_lemma_summary(run.documents, &run.stats, run.entries.len(), &config.lemmas_file);
    Ok(run)
}
