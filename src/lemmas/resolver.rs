// Lemma resolution: normalize, filter, and deduplicate (word, lemma) pairs.
//
// Every qualifying token competes for its surface word. The record kept for a
// word only ever moves up the priority ladder (see `PosTag::rank`): a noun
// reading overrides an earlier verb or adjective reading, but nothing ever
// overrides an earlier reading of equal or higher rank.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use tracing::debug;

use super::pos::PosTag;
use super::stopwords::corpus_stopwords;
use super::LemmaEntry;

/// One `<w>` element from an annotated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordToken {
    /// The word as written, case preserved. Used verbatim as the map key.
    /// `None` when the element has no text.
    pub surface: Option<String>,
    /// The raw `lemma` attribute, before normalization.
    pub lemma: String,
    pub pos: PosTag,
}

impl WordToken {
    pub fn new(surface: impl Into<String>, lemma: impl Into<String>, pos: PosTag) -> Self {
        Self {
            surface: Some(surface.into()),
            lemma: lemma.into(),
            pos,
        }
    }

    /// A token whose element carried no text.
    pub fn without_text(lemma: impl Into<String>, pos: PosTag) -> Self {
        Self {
            surface: None,
            lemma: lemma.into(),
            pos,
        }
    }
}

/// Lowercase a raw lemma and strip every `.` and `,`.
pub fn normalize_lemma(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| *c != '.' && *c != ',')
        .collect()
}

/// Decides whether a normalized token may enter the lemma map.
#[derive(Debug, Clone)]
pub struct LemmaFilter {
    stopwords: HashSet<String>,
}

impl Default for LemmaFilter {
    fn default() -> Self {
        Self::new(corpus_stopwords())
    }
}

impl LemmaFilter {
    pub fn new(stopwords: HashSet<String>) -> Self {
        Self { stopwords }
    }

    pub fn is_stopword(&self, lemma: &str) -> bool {
        self.stopwords.contains(lemma)
    }

    /// All three conditions must hold: not a stopword, purely alphabetic,
    /// and one of the six allowed POS tags.
    pub fn qualifies(&self, lemma: &str, pos: &PosTag) -> bool {
        !self.is_stopword(lemma) && is_alphabetic(lemma) && pos.is_allowed()
    }
}

/// Letters only: Unicode categories Lu, Ll, Lt, Lm and Lo. Letter numbers
/// (`Ⅻ`) and combining marks do not count.
static LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{L}+$").expect("letter class pattern is valid"));

fn is_alphabetic(s: &str) -> bool {
    LETTERS.is_match(s)
}

/// The reading currently retained for one surface word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub pos: PosTag,
    pub lemma: String,
}

/// What happened to a single token passed to [`LemmaResolver::push`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// First qualifying occurrence of the surface word.
    Inserted,
    /// Replaced a lower-ranked reading.
    Promoted,
    /// Qualified, but the existing reading ranks equal or higher.
    Kept,
    /// Failed the stopword, alphabetic, or POS check.
    Filtered,
    /// Lemma was empty after normalization.
    EmptyLemma,
    /// Qualified, but the token has no surface text to key it by.
    MissingText,
}

/// Counters over everything pushed into a resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub tokens: usize,
    pub inserted: usize,
    pub promoted: usize,
    pub kept: usize,
    pub filtered: usize,
    pub empty_lemmas: usize,
    pub missing_text: usize,
}

/// Accumulates word tokens and keeps the best reading per surface word.
///
/// Records are stored in first-insertion order, which is also the order of
/// the final output.
#[derive(Debug, Clone, Default)]
pub struct LemmaResolver {
    filter: LemmaFilter,
    index: HashMap<String, usize>,
    records: Vec<(String, Resolution)>,
    stats: ResolverStats,
}

impl LemmaResolver {
    pub fn new(filter: LemmaFilter) -> Self {
        Self {
            filter,
            index: HashMap::new(),
            records: Vec::new(),
            stats: ResolverStats::default(),
        }
    }

    /// Feed one token through normalization, filtering, and aggregation.
    pub fn push(&mut self, token: WordToken) -> PushOutcome {
        self.stats.tokens += 1;

        let lemma = normalize_lemma(&token.lemma);
        if lemma.is_empty() {
            debug!(word = ?token.surface, raw_lemma = %token.lemma, "Lemma is empty after normalization, skipping");
            self.stats.empty_lemmas += 1;
            return PushOutcome::EmptyLemma;
        }

        if !self.filter.qualifies(&lemma, &token.pos) {
            self.stats.filtered += 1;
            return PushOutcome::Filtered;
        }

        let Some(surface) = token.surface else {
            self.stats.missing_text += 1;
            return PushOutcome::MissingText;
        };

        let outcome = match self.index.get(&surface) {
            Some(&i) => {
                let current = &mut self.records[i].1;
                if token.pos.rank() > current.pos.rank() {
                    *current = Resolution {
                        pos: token.pos,
                        lemma,
                    };
                    PushOutcome::Promoted
                } else {
                    PushOutcome::Kept
                }
            }
            None => {
                self.index.insert(surface.clone(), self.records.len());
                self.records.push((
                    surface,
                    Resolution {
                        pos: token.pos,
                        lemma,
                    },
                ));
                PushOutcome::Inserted
            }
        };

        match outcome {
            PushOutcome::Inserted => self.stats.inserted += 1,
            PushOutcome::Promoted => self.stats.promoted += 1,
            _ => self.stats.kept += 1,
        }
        outcome
    }

    /// Push every token. A qualifying token without text is corrupt
    /// annotation and stops the stream with an error.
    pub fn extend<I: IntoIterator<Item = WordToken>>(&mut self, tokens: I) -> Result<()> {
        for token in tokens {
            let lemma = token.lemma.clone();
            if self.push(token) == PushOutcome::MissingText {
                anyhow::bail!("<w> with lemma {lemma:?} has no text");
            }
        }
        Ok(())
    }

    /// The reading currently held for a surface word.
    pub fn resolution(&self, surface: &str) -> Option<&Resolution> {
        self.index.get(surface).map(|&i| &self.records[i].1)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> ResolverStats {
        self.stats
    }

    /// Flatten to `(surface, lemma)` entries in first-insertion order.
    pub fn into_entries(self) -> Vec<LemmaEntry> {
        self.records
            .into_iter()
            .map(|(surface, res)| LemmaEntry::new(surface, res.lemma))
            .collect()
    }
}

/// Resolve a whole token stream with the default corpus filter.
///
/// Qualifying tokens without text are counted and left out.
pub fn resolve<I: IntoIterator<Item = WordToken>>(tokens: I) -> Vec<LemmaEntry> {
    let mut resolver = LemmaResolver::default();
    for token in tokens {
        resolver.push(token);
    }
    resolver.into_entries()
}
