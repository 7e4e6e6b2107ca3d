// Composition tests: the three stages chained over a small on-disk corpus.
//
// Each test builds a temporary corpus in the Kranjska layout (annotated and
// plain-text TEI directories plus the corpus header file that must be
// skipped), then runs the extractors and the topic stage against it.

use std::fs;
use std::path::Path;

use kranjska::config::{Config, DEFAULT_EXCLUDE_PREFIX};
use kranjska::lemmas::LemmaEntry;
use kranjska::output::{read_json, write_json};
use kranjska::pipeline;
use kranjska::speeches::SpeechRecord;
use kranjska::topics::lookup::LemmaLookup;
use kranjska::topics::model::OUTLIER_TOPIC;
use kranjska::topics::tfidf::TfIdfTopicModel;
use kranjska::topics::traits::TopicModel;

const HEADER: &str = r#"<teiCorpus xmlns="http://www.tei-c.org/ns/1.0"><teiHeader/></teiCorpus>"#;

fn annotated(words: &[(&str, &str, &str)]) -> String {
    let ws: String = words
        .iter()
        .map(|(w, lemma, pos)| format!(r#"<w lemma="{lemma}" msd="UPosTag={pos}|Case=Nom">{w}</w>"#))
        .collect();
    format!(
        r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><text><body><u><seg><s>{ws}</s></seg></u></body></text></TEI>"#
    )
}

fn plain(segments: &[&[&str]]) -> String {
    let segs: String = segments
        .iter()
        .map(|sentences| {
            let ss: String = sentences.iter().map(|s| format!("<s>{s}</s>")).collect();
            format!("<seg>{ss}</seg>")
        })
        .collect();
    format!(
        r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><text><body><u>{segs}</u></body></text></TEI>"#
    )
}

/// Lay out a two-session corpus under `root` and return a config for it.
fn corpus(root: &Path) -> Config {
    let config = Config {
        annotated_dir: root.join("Kranjska-xml"),
        text_dir: root.join("Kranjska-xml-text"),
        exclude_prefix: DEFAULT_EXCLUDE_PREFIX.to_string(),
        lemmas_file: root.join("data/word_lemmas.json"),
        speeches_file: root.join("data/bert_docs_time_stamps.json"),
        vis_dir: root.join("model_vis"),
    };
    fs::create_dir_all(&config.annotated_dir).unwrap();
    fs::create_dir_all(&config.text_dir).unwrap();

    fs::write(config.annotated_dir.join("Corpus-Kranjska.xml"), HEADER).unwrap();
    fs::write(
        config.annotated_dir.join("Kranjska-18610406-ana.xml"),
        annotated(&[
            ("železnice", "železnica", "NOUN"),
            ("Schloss", "schliessen", "VERB"),
            ("in", "in", "CCONJ"),
        ]),
    )
    .unwrap();
    fs::write(
        config.annotated_dir.join("Kranjska-18620110-ana.xml"),
        annotated(&[
            ("Schloss", "Schloss", "NOUN"),
            ("šole", "šola", "NOUN"),
            ("železnice", "železniški", "ADJ"),
        ]),
    )
    .unwrap();

    fs::write(config.text_dir.join("Corpus-Kranjska.xml"), HEADER).unwrap();
    fs::write(
        config.text_dir.join("Kranjska-18610406.xml"),
        plain(&[
            &["Železnice so potrebne.", "Železnice v Trst."],
            &["Železnice in postaje."],
        ]),
    )
    .unwrap();
    fs::write(
        config.text_dir.join("Kranjska-18620110.xml"),
        plain(&[&["Šole potrebujejo učitelje."], &["Šole in učitelje."]]),
    )
    .unwrap();

    config
}

// ============================================================
// Lemma extraction
// ============================================================

#[test]
fn lemma_extraction_spans_documents_and_skips_header() {
    let tmp = tempfile::tempdir().unwrap();
    let config = corpus(tmp.path());

    let run = pipeline::lemmas::extract(&config.annotated_dir, &config.exclude_prefix).unwrap();

    assert_eq!(run.documents, 2);
    assert_eq!(
        run.entries,
        vec![
            LemmaEntry::new("železnice", "železnica"),
            LemmaEntry::new("Schloss", "schloss"),
            LemmaEntry::new("šole", "šola"),
        ]
    );
    assert_eq!(run.stats.promoted, 1);
}

#[test]
fn lemma_output_survives_json_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let config = corpus(tmp.path());

    let run = pipeline::lemmas::extract(&config.annotated_dir, &config.exclude_prefix).unwrap();
    write_json(&config.lemmas_file, &run.entries).unwrap();

    let raw = fs::read_to_string(&config.lemmas_file).unwrap();
    assert!(raw.contains(r#"["železnice","železnica"]"#), "{raw}");

    let back: Vec<LemmaEntry> = read_json(&config.lemmas_file).unwrap();
    assert_eq!(back, run.entries);
}

#[test]
fn corrupt_annotation_aborts_extraction() {
    let tmp = tempfile::tempdir().unwrap();
    let config = corpus(tmp.path());
    fs::write(
        config.annotated_dir.join("Kranjska-18630101-ana.xml"),
        r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><w lemma="zbor">zbor</w></TEI>"#,
    )
    .unwrap();

    let err = pipeline::lemmas::extract(&config.annotated_dir, &config.exclude_prefix).unwrap_err();
    assert!(format!("{err:#}").contains("Kranjska-18630101-ana.xml"), "{err:#}");
}

#[test]
fn textless_word_with_empty_lemma_is_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let config = corpus(tmp.path());
    fs::write(
        config.annotated_dir.join("Kranjska-18630101-ana.xml"),
        r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><w lemma="zbor" msd="UPosTag=NOUN">zbor</w><w lemma="" msd="UPosTag=X"/></TEI>"#,
    )
    .unwrap();

    let run = pipeline::lemmas::extract(&config.annotated_dir, &config.exclude_prefix).unwrap();
    assert_eq!(run.entries.last(), Some(&LemmaEntry::new("zbor", "zbor")));
    assert_eq!(run.stats.empty_lemmas, 1);
}

#[test]
fn textless_qualifying_word_aborts_extraction() {
    let tmp = tempfile::tempdir().unwrap();
    let config = corpus(tmp.path());
    fs::write(
        config.annotated_dir.join("Kranjska-18630101-ana.xml"),
        r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><w lemma="zbor" msd="UPosTag=NOUN"/></TEI>"#,
    )
    .unwrap();

    let err = pipeline::lemmas::extract(&config.annotated_dir, &config.exclude_prefix).unwrap_err();
    assert!(format!("{err:#}").contains("Kranjska-18630101-ana.xml"), "{err:#}");
}

// ============================================================
// Speech extraction
// ============================================================

#[test]
fn speech_extraction_dates_every_segment() {
    let tmp = tempfile::tempdir().unwrap();
    let config = corpus(tmp.path());

    let run = pipeline::speeches::extract(&config.text_dir, &config.exclude_prefix).unwrap();

    assert_eq!(run.documents, 2);
    assert_eq!(run.skipped_sentences, 0);
    assert_eq!(
        run.records,
        vec![
            SpeechRecord::new("1861-04-06", "Železnice so potrebne.\nŽeleznice v Trst."),
            SpeechRecord::new("1861-04-06", "Železnice in postaje."),
            SpeechRecord::new("1862-01-10", "Šole potrebujejo učitelje."),
            SpeechRecord::new("1862-01-10", "Šole in učitelje."),
        ]
    );
}

#[test]
fn undated_file_aborts_speech_extraction() {
    let tmp = tempfile::tempdir().unwrap();
    let config = corpus(tmp.path());
    fs::write(config.text_dir.join("Kranjska-povzetek.xml"), plain(&[&["X."]])).unwrap();

    assert!(pipeline::speeches::extract(&config.text_dir, &config.exclude_prefix).is_err());
}

// ============================================================
// Full chain: extract -> save -> topics -> reports
// ============================================================

#[test]
fn full_pipeline_writes_reports() {
    let tmp = tempfile::tempdir().unwrap();
    let config = corpus(tmp.path());

    let lemmas = pipeline::lemmas::extract(&config.annotated_dir, &config.exclude_prefix).unwrap();
    write_json(&config.lemmas_file, &lemmas.entries).unwrap();
    let speeches = pipeline::speeches::extract(&config.text_dir, &config.exclude_prefix).unwrap();
    write_json(&config.speeches_file, &speeches.records).unwrap();

    let mut model = TfIdfTopicModel::new(20, 5);
    let written = pipeline::topics::run(&config, &mut model).unwrap();

    assert!(!written.is_empty());
    for path in &written {
        assert!(path.starts_with(&config.vis_dir), "{}", path.display());
        assert!(path.is_file(), "{} missing", path.display());
    }

    let buckets: Vec<kranjska::topics::model::TopicTimeBucket> =
        read_json(&config.vis_dir.join("topics_over_time.json")).unwrap();
    let total: usize = buckets.iter().map(|b| b.frequency).sum();
    assert_eq!(total, speeches.records.len());
    assert!(buckets
        .iter()
        .all(|b| b.timestamp == "1861" || b.timestamp == "1862"));
}

#[test]
fn analysis_postprocesses_keywords_through_lemmas() {
    let tmp = tempfile::tempdir().unwrap();
    let config = corpus(tmp.path());

    let lemmas = pipeline::lemmas::extract(&config.annotated_dir, &config.exclude_prefix).unwrap();
    let speeches = pipeline::speeches::extract(&config.text_dir, &config.exclude_prefix).unwrap();
    let lookup = LemmaLookup::from_entries(lemmas.entries);

    let mut model = TfIdfTopicModel::new(20, 5);
    let analysis = pipeline::topics::analyze(&speeches.records, &lookup, &mut model).unwrap();

    assert_eq!(analysis.assignments.len(), speeches.records.len());
    for a in &analysis.assignments {
        assert!(*a == OUTLIER_TOPIC || model.topic(*a).is_some());
    }
    // Topic keywords are lowercased, so only lowercase surface forms can map
    for (_, keywords) in &analysis.postprocessed {
        for kw in keywords {
            assert!(["železnica", "šola", "schloss"].contains(&kw.as_str()), "{kw}");
        }
    }
}

#[test]
fn topics_require_prepared_data() {
    let tmp = tempfile::tempdir().unwrap();
    let config = corpus(tmp.path());
    let mut model = TfIdfTopicModel::default();

    let err = pipeline::topics::run(&config, &mut model).unwrap_err();
    assert!(err.to_string().contains("kranjska"), "{err}");
}
