// Universal part-of-speech tags as they appear in the `msd` attribute.
//
// Kranjska word elements carry a composite morphosyntactic description like
// `UPosTag=NOUN|Case=Nom|Gender=Masc|Number=Sing`. Only the first field is
// needed here: it decides whether a token is kept and how strongly its lemma
// competes against other readings of the same surface word.

use std::fmt;

use anyhow::Result;

/// Prefix of the first `msd` field.
const UPOS_PREFIX: &str = "UPosTag=";

/// A part-of-speech tag, narrowed to the six tags the lemma map keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosTag {
    Adj,
    Adv,
    Noun,
    Propn,
    Verb,
    Pron,
    /// Any other tag (DET, ADP, PUNCT, NUM, ...). Never qualifies.
    Other(String),
}

impl PosTag {
    /// Map a bare UPOS tag string (`"NOUN"`) to a `PosTag`.
    pub fn from_upos(tag: &str) -> Self {
        match tag {
            "ADJ" => PosTag::Adj,
            "ADV" => PosTag::Adv,
            "NOUN" => PosTag::Noun,
            "PROPN" => PosTag::Propn,
            "VERB" => PosTag::Verb,
            "PRON" => PosTag::Pron,
            other => PosTag::Other(other.to_string()),
        }
    }

    /// Extract the tag from a full `msd` attribute value.
    ///
    /// The first pipe-delimited field must be `UPosTag=<TAG>`; anything else
    /// means the annotation is corrupt and the caller should abort.
    pub fn from_msd(msd: &str) -> Result<Self> {
        let first = msd.split('|').next().unwrap_or_default();
        match first.strip_prefix(UPOS_PREFIX) {
            Some(tag) if !tag.is_empty() => Ok(Self::from_upos(tag)),
            _ => anyhow::bail!("msd attribute {msd:?} does not start with a {UPOS_PREFIX}<TAG> field"),
        }
    }

    /// Whether tokens with this tag may enter the lemma map at all.
    pub fn is_allowed(&self) -> bool {
        !matches!(self, PosTag::Other(_))
    }

    /// Priority of this tag when two readings of one surface word compete.
    ///
    /// Nouns and proper nouns outrank verbs, verbs outrank everything else.
    /// A later reading only replaces an earlier one with a strictly higher
    /// rank, so NOUN and PROPN never displace each other.
    pub fn rank(&self) -> u8 {
        match self {
            PosTag::Noun | PosTag::Propn => 2,
            PosTag::Verb => 1,
            _ => 0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PosTag::Adj => "ADJ",
            PosTag::Adv => "ADV",
            PosTag::Noun => "NOUN",
            PosTag::Propn => "PROPN",
            PosTag::Verb => "VERB",
            PosTag::Pron => "PRON",
            PosTag::Other(tag) => tag,
        }
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
