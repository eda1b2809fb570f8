//! # Extração de Contexto
//!
//! Para cada trecho `[start, end)` recorta as janelas de contexto:
//!
//! - esquerda: tokens em `[max(0, start - window), start)`
//! - direita: tokens em `[end, end + window)`
//!
//! As janelas são truncadas nas bordas do texto, nunca preenchidas.

use serde::{Deserialize, Serialize};

use crate::matcher::MatchSpan;
use crate::tagger::TaggedToken;

/// Uma linha da concordância (KWIC).
///
/// Objeto de valor: depois de construído só é reordenado, nunca alterado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcordanceResult {
    /// Até `window` tokens imediatamente antes do trecho
    pub left: Vec<String>,
    /// Texto do trecho (tokens unidos por espaço; no modo `ner`, o texto da entidade)
    pub keyword: String,
    /// Até `window` tokens imediatamente depois do trecho
    pub right: Vec<String>,
    pub start: usize,
    pub end: usize,
    /// Tags do trecho, uma por token
    pub pos_tags: Vec<String>,
    /// Primeiro token do contexto direito (vazio se não houver)
    pub next_word: String,
    /// Tag do token logo após o trecho, independente da janela (vazia no fim do texto)
    pub next_pos: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_label: Option<String>,
}

impl ConcordanceResult {
    pub fn has_next_word(&self) -> bool {
        !self.next_word.is_empty()
    }

    /// Último token do contexto esquerdo (vazio se não houver)
    pub fn prev_word(&self) -> &str {
        self.left.last().map(String::as_str).unwrap_or("")
    }
}

/// Monta o resultado de um trecho encontrado.
pub fn extract_context(tagged: &[TaggedToken], span: &MatchSpan, window: usize) -> ConcordanceResult {
    let len = tagged.len();
    let end = span.end.min(len);
    let start = span.start.min(end);
    let text_of = |slice: &[TaggedToken]| -> Vec<String> {
        slice.iter().map(|t| t.token.text.clone()).collect()
    };

    let left = text_of(&tagged[start.saturating_sub(window)..start]);
    let right = text_of(&tagged[end..end.saturating_add(window).min(len)]);
    let pos_tags = tagged[start..end]
        .iter()
        .map(|t| t.label().to_string())
        .collect();

    let (keyword, entity_label) = match &span.entity {
        Some((text, label)) => (text.clone(), Some(label.name().to_string())),
        None => (
            tagged[start..end]
                .iter()
                .map(|t| t.token.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            None,
        ),
    };

    let next_word = right.first().cloned().unwrap_or_default();
    let next_pos = tagged
        .get(end)
        .map(|t| t.label().to_string())
        .unwrap_or_default();

    ConcordanceResult {
        left,
        keyword,
        right,
        start,
        end,
        pos_tags,
        next_word,
        next_pos,
        entity_label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::EntityLabel;
    use crate::rule_based::pos_tag;
    use crate::tokenizer::tokenize;

    fn span(start: usize, end: usize) -> MatchSpan {
        MatchSpan { start, end, entity: None }
    }

    #[test]
    fn test_context_windows() {
        let tagged = pos_tag(&tokenize("the cat sat on the mat"));
        let r = extract_context(&tagged, &span(2, 3), 2);
        assert_eq!(r.left, ["the", "cat"]);
        assert_eq!(r.keyword, "sat");
        assert_eq!(r.right, ["on", "the"]);
        assert_eq!(r.next_word, "on");
        assert_eq!(r.next_pos, "IN");
        assert_eq!(r.pos_tags.len(), r.end - r.start);
    }

    #[test]
    fn test_context_truncated_at_edges() {
        let tagged = pos_tag(&tokenize("a b c"));
        let first = extract_context(&tagged, &span(0, 1), 10);
        assert!(first.left.is_empty());
        assert_eq!(first.right, ["b", "c"]);

        let last = extract_context(&tagged, &span(2, 3), 10);
        assert_eq!(last.left, ["a", "b"]);
        assert!(last.right.is_empty());
        assert_eq!(last.next_word, "");
        assert_eq!(last.next_pos, "");
    }

    #[test]
    fn test_zero_window() {
        let tagged = pos_tag(&tokenize("a b c"));
        let r = extract_context(&tagged, &span(1, 2), 0);
        assert!(r.left.is_empty());
        assert!(r.right.is_empty());
        assert_eq!(r.next_word, "");
        // A tag seguinte não depende da janela
        assert_eq!(r.next_pos, "NN");
    }

    #[test]
    fn test_zero_window_at_text_end() {
        let tagged = pos_tag(&tokenize("a b c"));
        let r = extract_context(&tagged, &span(2, 3), 0);
        assert_eq!(r.next_word, "");
        assert_eq!(r.next_pos, "");
    }

    #[test]
    fn test_multi_token_keyword_joined() {
        let tagged = pos_tag(&tokenize("New York, again"));
        let r = extract_context(&tagged, &span(0, 2), 1);
        assert_eq!(r.keyword, "New York");
        assert_eq!(r.next_word, ",");
        assert_eq!(r.next_pos, ",");
    }

    #[test]
    fn test_entity_keyword_and_label() {
        let tagged = pos_tag(&tokenize("in New Jersey today"));
        let m = MatchSpan {
            start: 1,
            end: 2,
            entity: Some(("New Jersey".into(), EntityLabel::Gpe)),
        };
        let r = extract_context(&tagged, &m, 1);
        assert_eq!(r.keyword, "New Jersey");
        assert_eq!(r.right, ["Jersey"]);
        assert_eq!(r.entity_label.as_deref(), Some("GPE"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let tagged = pos_tag(&tokenize("a b"));
        let json = serde_json::to_value(extract_context(&tagged, &span(0, 1), 1)).unwrap();
        assert_eq!(json["nextWord"], "b");
        assert_eq!(json["posTags"][0], "DT");
        assert!(json.get("entityLabel").is_none());
    }
}
