// Speech segmentation: one timestamped text per TEI `<seg>`.
//
// The session date is not in the document body; it is encoded in the file
// name (`Kranjska-18610406-...xml`), so every segment of a document shares
// the date of its file.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One speech segment, serialized as `[date, text]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct SpeechRecord {
    /// Session date, `YYYY-MM-DD`.
    pub date: String,
    /// Sentences of the segment joined with `\n`.
    pub text: String,
}

impl SpeechRecord {
    pub fn new(date: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            text: text.into(),
        }
    }

    /// The year part of the date, used as the topics-over-time bucket.
    pub fn year(&self) -> String {
        self.date.chars().take(4).collect()
    }
}

impl From<(String, String)> for SpeechRecord {
    fn from((date, text): (String, String)) -> Self {
        Self { date, text }
    }
}

impl From<SpeechRecord> for (String, String) {
    fn from(record: SpeechRecord) -> Self {
        (record.date, record.text)
    }
}

/// Derive the session date from a document file name.
///
/// The second hyphen-delimited field must start with `YYYYMMDD` and be a real
/// calendar date. Returns it as `YYYY-MM-DD`.
pub fn date_from_filename(path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("No usable file name in {}", path.display()))?;

    let field = name
        .split('-')
        .nth(1)
        .with_context(|| format!("File name {name:?} has no date field after the first '-'"))?;

    let digits = field.get(..8).filter(|d| d.bytes().all(|b| b.is_ascii_digit()));
    let digits =
        digits.with_context(|| format!("Date field {field:?} in {name:?} is not YYYYMMDD"))?;

    let date = NaiveDate::parse_from_str(digits, "%Y%m%d")
        .with_context(|| format!("Date field {digits:?} in {name:?} is not a valid date"))?;

    Ok(date.format("%Y-%m-%d").to_string())
}

/// Build the records for one parsed document.
///
/// Sentences without text are skipped with a warning naming `source`. A
/// segment whose sentences are all skipped still yields a record with empty
/// text.
pub fn segment_records(
    date: &str,
    segments: Vec<Vec<Option<&str>>>,
    source: &str,
) -> Vec<SpeechRecord> {
    segments
        .into_iter()
        .map(|sentences| {
            let kept: Vec<&str> = sentences
                .into_iter()
                .filter_map(|s| {
                    if s.is_none() {
                        warn!(document = source, "Sentence without text, skipping");
                    }
                    s
                })
                .collect();
            SpeechRecord::new(date, kept.join("\n"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_date_from_filename() {
        let path = PathBuf::from("corpus/Corpus-19001201-proceedings.xml");
        assert_eq!(date_from_filename(&path).unwrap(), "1900-12-01");
    }

    #[test]
    fn test_date_field_followed_by_extension() {
        let path = PathBuf::from("Kranjska-18610406.xml");
        assert_eq!(date_from_filename(&path).unwrap(), "1861-04-06");
    }

    #[test]
    fn test_date_missing_field_fails() {
        assert!(date_from_filename(&PathBuf::from("Kranjska.xml")).is_err());
    }

    #[test]
    fn test_date_non_digits_fail() {
        assert!(date_from_filename(&PathBuf::from("Kranjska-1861ab06-x.xml")).is_err());
        assert!(date_from_filename(&PathBuf::from("Kranjska-1861-x.xml")).is_err());
    }

    #[test]
    fn test_date_impossible_calendar_day_fails() {
        assert!(date_from_filename(&PathBuf::from("Kranjska-18610231-x.xml")).is_err());
    }

    #[test]
    fn test_segment_records_join_sentences() {
        let records = segment_records("1861-04-06", vec![vec![Some("Eno."), Some("Dve.")]], "t");
        assert_eq!(records, vec![SpeechRecord::new("1861-04-06", "Eno.\nDve.")]);
    }

    #[test]
    fn test_segment_records_skip_textless_sentences() {
        let records = segment_records("1861-04-06", vec![vec![None, Some("Tri.")], vec![None]], "t");
        assert_eq!(records[0].text, "Tri.");
        assert_eq!(records[1].text, "");
    }

    #[test]
    fn test_year() {
        assert_eq!(SpeechRecord::new("1883-10-02", "x").year(), "1883");
    }

    #[test]
    fn test_record_serializes_as_pair() {
        let json = serde_json::to_string(&SpeechRecord::new("1861-04-06", "Eno.\nDve.")).unwrap();
        assert_eq!(json, r#"["1861-04-06","Eno.\nDve."]"#);
    }
}
