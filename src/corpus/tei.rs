// TEI element access for the two document shapes the pipeline reads.
//
// Annotated documents hold `<w lemma=".." msd="UPosTag=..|..">word</w>`
// elements; plain documents hold `<seg>` elements containing `<s>` sentences.
// All elements live in the TEI namespace and may sit at any depth.

use anyhow::{Context, Result};
use roxmltree::{Document, Node, ParsingOptions};

use crate::lemmas::pos::PosTag;
use crate::lemmas::resolver::WordToken;

/// The TEI P5 namespace.
pub const TEI_NS: &str = "http://www.tei-c.org/ns/1.0";

/// Parse a TEI document. A DOCTYPE declaration is tolerated.
pub fn parse(text: &str) -> Result<Document<'_>> {
    let opts = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(text, opts).context("Invalid XML")
}

/// All TEI elements with the given local name, in document order.
pub fn elements<'a, 'input>(
    root: Node<'a, 'input>,
    local_name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    root.descendants()
        .filter(move |n| n.is_element() && n.has_tag_name((TEI_NS, local_name)))
}

/// Extract every `<w>` element as a word token.
///
/// A `<w>` without a `lemma` attribute or without a readable `msd`
/// attribute is a structural error: the annotation is corrupt and the whole
/// run should stop rather than guess. A `<w>` without text becomes a token
/// with no surface; whether that matters is decided by the resolver.
pub fn word_tokens(doc: &Document) -> Result<Vec<WordToken>> {
    elements(doc.root(), "w")
        .map(|w| {
            let at = doc.text_pos_at(w.range().start);
            let lemma = w
                .attribute("lemma")
                .with_context(|| format!("<w> at {at} has no lemma attribute"))?;
            let msd = w
                .attribute("msd")
                .with_context(|| format!("<w> at {at} has no msd attribute"))?;
            let pos = PosTag::from_msd(msd).with_context(|| format!("<w> at {at}"))?;
            Ok(match w.text() {
                Some(surface) => WordToken::new(surface, lemma, pos),
                None => WordToken::without_text(lemma, pos),
            })
        })
        .collect()
}

/// The sentences of every `<seg>` element, in document order.
///
/// Each sentence is the leading text of an `<s>` element, or `None` when the
/// element has none (empty, or starting with a child element).
pub fn segment_sentences<'a>(doc: &'a Document) -> Vec<Vec<Option<&'a str>>> {
    elements(doc.root(), "seg")
        .map(|seg| elements(seg, "s").map(|s| s.text()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANNOTATED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <text><body><div><u><seg><s>
    <w lemma="deželen" msd="UPosTag=ADJ|Case=Nom">Deželni</w>
    <w lemma="zbor" msd="UPosTag=NOUN|Case=Nom">zbor</w>
    <pc msd="UPosTag=PUNCT">.</pc>
  </s></seg></u></div></body></text>
</TEI>"#;

    #[test]
    fn test_word_tokens_in_order() {
        let doc = parse(ANNOTATED).unwrap();
        let tokens = word_tokens(&doc).unwrap();
        assert_eq!(
            tokens,
            vec![
                WordToken::new("Deželni", "deželen", PosTag::Adj),
                WordToken::new("zbor", "zbor", PosTag::Noun),
            ]
        );
    }

    #[test]
    fn test_word_without_lemma_is_an_error() {
        let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><w msd="UPosTag=NOUN">zbor</w></TEI>"#;
        let doc = parse(xml).unwrap();
        let err = word_tokens(&doc).unwrap_err();
        assert!(format!("{err:#}").contains("lemma"), "{err:#}");
    }

    #[test]
    fn test_word_without_text_has_no_surface() {
        let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><w lemma="zbor" msd="UPosTag=NOUN">zbor</w><w lemma="" msd="UPosTag=X"/></TEI>"#;
        let doc = parse(xml).unwrap();
        let tokens = word_tokens(&doc).unwrap();
        assert_eq!(
            tokens,
            vec![
                WordToken::new("zbor", "zbor", PosTag::Noun),
                WordToken::without_text("", PosTag::Other("X".into())),
            ]
        );
    }

    #[test]
    fn test_word_with_bad_msd_is_an_error() {
        let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><w lemma="zbor" msd="Case=Nom">zbor</w></TEI>"#;
        let doc = parse(xml).unwrap();
        assert!(word_tokens(&doc).is_err());
    }

    #[test]
    fn test_elements_outside_tei_namespace_are_ignored() {
        let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><x:w xmlns:x="urn:other">zbor</x:w></TEI>"#;
        let doc = parse(xml).unwrap();
        assert!(word_tokens(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_segment_sentences() {
        let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><body>
            <seg><s>Eno.</s><s>Dve.</s></seg>
            <seg><s/><s>Tri.</s></seg>
        </body></TEI>"#;
        let doc = parse(xml).unwrap();
        let segs = segment_sentences(&doc);
        assert_eq!(segs, vec![vec![Some("Eno."), Some("Dve.")], vec![None, Some("Tri.")]]);
    }

    #[test]
    fn test_invalid_xml_fails() {
        assert!(parse("<TEI><seg></TEI>").is_err());
    }
}
