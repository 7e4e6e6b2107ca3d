// Topic modeling pipeline.
//
// Reads the two extractor outputs, fits the topic model on the speech texts,
// prints topic summaries with lemmatized keywords, and writes the
// topics-over-time reports. Speeches are bucketed by year.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::lemmas::LemmaEntry;
use crate::output::{markdown, read_json, terminal, write_json};
use crate::speeches::SpeechRecord;
use crate::topics::lookup::LemmaLookup;
use crate::topics::model::{TopicInfo, TopicTimeBucket};
use crate::topics::traits::TopicModel;

/// Rows shown in the topic info and frequency listings.
pub const SUMMARY_ROWS: usize = 50;

/// Topic ids `0..KEYWORD_TOPICS` get their keywords printed.
pub const KEYWORD_TOPICS: i64 = 100;

/// Everything the topic stage computes before presenting it.
#[derive(Debug)]
pub struct TopicAnalysis {
    /// One topic id per speech
    pub assignments: Vec<i64>,
    pub info: Vec<TopicInfo>,
    /// Lemmatized keywords of each topic with id below `KEYWORD_TOPICS`
    pub postprocessed: Vec<(i64, Vec<String>)>,
    pub over_time: Vec<TopicTimeBucket>,
}

/// Fit `model` on the speeches and derive all summaries.
pub fn analyze(
    records: &[SpeechRecord],
    lookup: &LemmaLookup,
    model: &mut dyn TopicModel,
) -> Result<TopicAnalysis> {
    let documents: Vec<String> = records.iter().map(|r| r.text.clone()).collect();
    let timestamps: Vec<String> = records.iter().map(SpeechRecord::year).collect();

    let assignments = model.fit_transform(&documents)?;
    let info = model.topic_info();

    let postprocessed = (0..KEYWORD_TOPICS)
        .filter_map(|id| model.topic(id))
        .map(|topic| (topic.id, lookup.postprocess(&topic.keyword_list())))
        .collect();

    let over_time = model.topics_over_time(&documents, &assignments, &timestamps)?;

    Ok(TopicAnalysis {
        assignments,
        info,
        postprocessed,
        over_time,
    })
}

/// Run topic modeling on the configured inputs and write reports.
pub fn run(config: &Config, model: &mut dyn TopicModel) -> Result<Vec<PathBuf>> {
    config.require_prepared_data()?;

    let records: Vec<SpeechRecord> = read_json(&config.speeches_file)?;
    let entries: Vec<LemmaEntry> = read_json(&config.lemmas_file)?;
    let lookup = LemmaLookup::from_entries(entries);
    info!(speeches = records.len(), lemmas = lookup.len(), "Loaded prepared data");

    println!("Fitting topic model on {} speeches...", records.len());
    let analysis = analyze(&records, &lookup, model)?;

    terminal::display_topic_info(&analysis.info, SUMMARY_ROWS);
    terminal::display_topic_freq(&analysis.info, SUMMARY_ROWS);

    println!();
    for (id, keywords) in &analysis.postprocessed {
        if let Some(topic) = model.topic(*id) {
            terminal::display_topic_keywords(topic, keywords);
        }
    }

    let mut written = markdown::write_reports(
        &config.vis_dir,
        model.topics(),
        &analysis.info,
        &analysis.over_time,
    )?;

    let json_path = config.vis_dir.join("topics_over_time.json");
    write_json(&json_path, &analysis.over_time)?;
    written.push(json_path);

    Ok(written)
}
