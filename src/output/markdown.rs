// Markdown report generation for topic modeling results.
//
// Writes a set of standalone files into the report directory: topics over
// time by year, a keyword bar chart, a topic overview, and a similarity
// heatmap. Each renders as a table in any markdown viewer.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use super::ensure_parent;
use crate::topics::model::{Topic, TopicInfo, TopicTimeBucket, OUTLIER_TOPIC};
use crate::topics::overlap::similarity_matrix;

/// Number of topics shown in each report.
pub const TOP_N_TOPICS: usize = 20;

/// The `TOP_N_TOPICS` largest topics, excluding outliers, in size order.
pub fn top_topics<'a>(topics: &'a [Topic], info: &[TopicInfo]) -> Vec<&'a Topic> {
    info.iter()
        .filter(|row| row.id != OUTLIER_TOPIC)
        .filter_map(|row| topics.iter().find(|t| t.id == row.id))
        .take(TOP_N_TOPICS)
        .collect()
}

/// Write all reports into `dir`. Returns the paths written.
pub fn write_reports(
    dir: &Path,
    topics: &[Topic],
    info: &[TopicInfo],
    over_time: &[TopicTimeBucket],
) -> Result<Vec<PathBuf>> {
    let top = top_topics(topics, info);

    let reports = [
        ("over_time_by_year.md", render_over_time(&top, over_time)),
        ("barchart.md", render_barchart(&top)),
        ("topics.md", render_topics(&top, info)),
        ("heatmap.md", render_heatmap(&top)),
    ];

    let mut written = Vec::with_capacity(reports.len());
    for (name, content) in reports {
        let path = dir.join(name);
        ensure_parent(&path)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

fn header(title: &str) -> String {
    format!(
        "# {title}\n\nGenerated: {}\n\n",
        Local::now().format("%Y-%m-%d %H:%M")
    )
}

/// Topic frequency per year, one column per topic.
pub fn render_over_time(top: &[&Topic], over_time: &[TopicTimeBucket]) -> String {
    let mut out = header("Topics over time (by year)");

    let mut table: BTreeMap<&str, BTreeMap<i64, usize>> = BTreeMap::new();
    for b in over_time {
        table
            .entry(b.timestamp.as_str())
            .or_default()
            .insert(b.topic, b.frequency);
    }

    out.push_str("| Year |");
    for t in top {
        let _ = write!(out, " {} |", t.id);
    }
    out.push_str("\n|------|");
    out.push_str(&"---:|".repeat(top.len()));
    out.push('\n');

    for (year, counts) in &table {
        let _ = write!(out, "| {year} |");
        for t in top {
            let _ = write!(out, " {} |", counts.get(&t.id).copied().unwrap_or(0));
        }
        out.push('\n');
    }

    out.push_str("\n## Keywords per year\n\n");
    let shown: BTreeSet<i64> = top.iter().map(|t| t.id).collect();
    for b in over_time.iter().filter(|b| shown.contains(&b.topic)) {
        if !b.keywords.is_empty() {
            let _ = writeln!(
                out,
                "- {} / topic {}: {}",
                b.timestamp,
                b.topic,
                b.keywords.join(", ")
            );
        }
    }

    out
}

/// Keyword scores per topic as text bars.
pub fn render_barchart(top: &[&Topic]) -> String {
    let mut out = header("Topic keyword scores");
    let bar_width = 30.0_f32;

    for t in top {
        let _ = writeln!(out, "## Topic {}: {}\n", t.id, t.label);
        let max = t
            .keywords
            .iter()
            .map(|(_, s)| *s)
            .fold(0.0_f32, f32::max);
        out.push_str("```\n");
        for (kw, score) in t.keywords.iter().take(5) {
            let filled = if max > 0.0 {
                (score / max * bar_width).round() as usize
            } else {
                0
            };
            let _ = writeln!(out, "{kw:<20} {} {score:.4}", "#".repeat(filled));
        }
        out.push_str("```\n\n");
    }
    out
}

/// Overview table of the shown topics.
pub fn render_topics(top: &[&Topic], info: &[TopicInfo]) -> String {
    let mut out = header("Topics");
    out.push_str("| Topic | Count | Label | Keywords |\n|---:|---:|---|---|\n");
    for t in top {
        let count = info
            .iter()
            .find(|r| r.id == t.id)
            .map(|r| r.count)
            .unwrap_or(0);
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} |",
            t.id,
            count,
            t.label,
            t.keyword_list().join(", ")
        );
    }
    out
}

/// Pairwise topic similarity (weighted Jaccard over keyword scores).
pub fn render_heatmap(top: &[&Topic]) -> String {
    let mut out = header("Topic similarity");
    let owned: Vec<Topic> = top.iter().map(|t| (*t).clone()).collect();
    let matrix = similarity_matrix(&owned);

    out.push_str("| |");
    for t in &owned {
        let _ = write!(out, " {} |", t.id);
    }
    out.push_str("\n|---|");
    out.push_str(&"---:|".repeat(owned.len()));
    out.push('\n');

    for (t, row) in owned.iter().zip(&matrix) {
        let _ = write!(out, "| **{}** |", t.id);
        for v in row {
            let _ = write!(out, " {v:.2} |");
        }
        out.push('\n');
    }
    out
}
