// Colored terminal output for extraction summaries and topic listings.
//
// This module handles all terminal-specific formatting. The pipeline
// functions delegate here so they stay free of presentation details.

use std::path::Path;

use colored::Colorize;

use super::truncate_chars;
use crate::lemmas::resolver::ResolverStats;
use crate::topics::model::{Topic, TopicInfo, OUTLIER_TOPIC};

/// Summary printed after the lemma extractor finishes.
pub fn display_lemma_summary(documents: usize, stats: &ResolverStats, entries: usize, path: &Path) {
    println!("\n{}", "=== Lemma extraction ===".bold());
    println!("  Documents scanned:   {documents}");
    println!("  Word tokens:         {}", stats.tokens);
    println!(
        "  Filtered out:        {}  {}",
        stats.filtered,
        format!("(+{} empty lemmas)", stats.empty_lemmas).dimmed()
    );
    println!("  Promoted readings:   {}", stats.promoted);
    println!("  Distinct words:      {}", entries.to_string().bold());
    println!("  Saved to: {}", path.display());
}

/// Summary printed after the speech extractor finishes.
pub fn display_speech_summary(documents: usize, records: usize, skipped: usize, path: &Path) {
    println!("\n{}", "=== Speech extraction ===".bold());
    println!("  Documents scanned:   {documents}");
    println!("  Speech segments:     {}", records.to_string().bold());
    if skipped > 0 {
        println!(
            "  {} {skipped} sentences without text were skipped",
            "Warning:".yellow()
        );
    }
    println!("  Saved to: {}", path.display());
}

/// Display the topic overview, largest topic first.
pub fn display_topic_info(info: &[TopicInfo], limit: usize) {
    println!(
        "\n{}",
        format!("-- TOPIC INFO - TOP {limit} ").bold()
    );
    println!(
        "  {:>5}  {:>7}  {}",
        "Topic".dimmed(),
        "Count".dimmed(),
        "Label".dimmed()
    );
    println!("  {}", "-".repeat(68).dimmed());

    for row in info.iter().take(limit) {
        let label = truncate_chars(&row.label, 50);
        let label = if row.id == OUTLIER_TOPIC {
            label.dimmed().to_string()
        } else {
            label
        };
        println!("  {:>5}  {:>7}  {}", row.id, row.count, label);
    }
}

/// Display document counts per topic as a bar chart.
pub fn display_topic_freq(info: &[TopicInfo], limit: usize) {
    println!(
        "\n{}",
        format!("-- TOPIC FREQ - TOP {limit} ").bold()
    );

    let max = info.iter().map(|r| r.count).max().unwrap_or(0).max(1);
    let bar_width: usize = 30;

    for row in info.iter().take(limit) {
        let filled = (row.count * bar_width).div_ceil(max);
        let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(bar_width - filled));
        let bar = if row.id == OUTLIER_TOPIC {
            bar.dimmed()
        } else {
            bar.bright_green()
        };
        println!("  {:>5}  {} {}", row.id, bar, row.count);
    }
}

/// Display one topic's raw keywords and their lemmatized form.
pub fn display_topic_keywords(topic: &Topic, postprocessed: &[String]) {
    println!("TOPIC # {} :: {}", topic.id, topic.keyword_list().join(", "));
    println!(
        "TOPIC # {} - postprocessed keywords :: {}",
        topic.id,
        if postprocessed.is_empty() {
            "(none)".dimmed().to_string()
        } else {
            postprocessed.join(", ").green().to_string()
        }
    );
    println!("{}", "-".repeat(68).dimmed());
}
