//! # Matcher de Concordância
//!
//! Encontra todos os trechos `[start, end)` que satisfazem uma busca, em um de
//! três modos:
//!
//! - **word**: janela deslizante sobre os tokens em minúsculas, comparação exata
//!   com o termo tokenizado. Ocorrências sobrepostas são reportadas.
//! - **pos**: mesma janela deslizante, mas sobre a sequência de tags.
//! - **ner**: cada entidade com o rótulo buscado é localizada pela primeira
//!   palavra: a N-ésima ocorrência ainda não consumida daquele texto no documento.
//!
//! O matcher é uma função pura de (tokens, tags, entidades, busca). Os contadores
//! de ocorrência do modo `ner` são locais a cada chamada.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chunker::{Entity, EntityLabel};
use crate::error::KwicError;
use crate::tagger::TaggedToken;
use crate::tokenizer::{tokenize_words, Token};

/// Modo de busca.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Palavra ou frase literal (case-insensitive)
    #[default]
    Word,
    /// Sequência de tags POS
    Pos,
    /// Rótulo de entidade nomeada
    Ner,
}

impl SearchMode {
    pub fn name(&self) -> &'static str {
        match self {
            SearchMode::Word => "word",
            SearchMode::Pos => "pos",
            SearchMode::Ner => "ner",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchMode {
    type Err = KwicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "word" => Ok(SearchMode::Word),
            "pos" => Ok(SearchMode::Pos),
            "ner" => Ok(SearchMode::Ner),
            other => Err(KwicError::invalid("search mode", other, "word, pos, ner")),
        }
    }
}

/// Valor buscado: uma string ou uma sequência de strings.
///
/// Em JSON aceita tanto `"cat"` quanto `["NNP", "CC"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchValue {
    Single(String),
    Sequence(Vec<String>),
}

impl SearchValue {
    /// Sequência de palavras em minúsculas para o modo `word`.
    ///
    /// Uma string é tokenizada como o texto principal; uma sequência é usada
    /// elemento a elemento.
    pub fn word_sequence(&self) -> Vec<String> {
        match self {
            SearchValue::Single(s) => tokenize_words(&s.to_lowercase()),
            SearchValue::Sequence(words) => words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Sequência de tags para o modo `pos` (sem normalização de caixa).
    pub fn tag_sequence(&self) -> Vec<String> {
        match self {
            SearchValue::Single(s) => vec![s.clone()],
            SearchValue::Sequence(tags) => tags.clone(),
        }
    }

    /// Rótulo de entidade para o modo `ner`: uma string, ou uma sequência de um só elemento.
    pub fn entity_label(&self) -> Option<&str> {
        match self {
            SearchValue::Single(s) => Some(s.as_str()),
            SearchValue::Sequence(items) if items.len() == 1 => Some(items[0].as_str()),
            SearchValue::Sequence(_) => None,
        }
    }
}

impl fmt::Display for SearchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchValue::Single(s) => write!(f, "{s}"),
            SearchValue::Sequence(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<&str> for SearchValue {
    fn from(s: &str) -> Self {
        SearchValue::Single(s.to_string())
    }
}

impl From<String> for SearchValue {
    fn from(s: String) -> Self {
        SearchValue::Single(s)
    }
}

impl From<Vec<String>> for SearchValue {
    fn from(items: Vec<String>) -> Self {
        SearchValue::Sequence(items)
    }
}

impl From<Vec<&str>> for SearchValue {
    fn from(items: Vec<&str>) -> Self {
        SearchValue::Sequence(items.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SearchValue {
    fn from(items: [&str; N]) -> Self {
        SearchValue::Sequence(items.iter().map(|s| s.to_string()).collect())
    }
}

/// Especificação completa de uma busca.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSpec {
    pub mode: SearchMode,
    pub value: SearchValue,
    /// Máximo de tokens de contexto de cada lado
    pub window: usize,
}

impl SearchSpec {
    pub fn new(mode: SearchMode, value: impl Into<SearchValue>, window: usize) -> Self {
        Self {
            mode,
            value: value.into(),
            window,
        }
    }
}

/// Um trecho encontrado, antes da extração de contexto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
    /// Entidade de origem (apenas no modo `ner`): texto completo e rótulo
    pub entity: Option<(String, EntityLabel)>,
}

/// Executa a busca e devolve os trechos em ordem de varredura.
pub fn find_matches(
    tokens: &[Token],
    tagged: &[TaggedToken],
    entities: &[Entity],
    spec: &SearchSpec,
) -> Vec<MatchSpan> {
    match spec.mode {
        SearchMode::Word => {
            let lowered: Vec<String> = tokens.iter().map(Token::lower).collect();
            sliding_matches(&lowered, &spec.value.word_sequence())
        }
        SearchMode::Pos => {
            let labels: Vec<String> = tagged.iter().map(|t| t.label().to_string()).collect();
            sliding_matches(&labels, &spec.value.tag_sequence())
        }
        SearchMode::Ner => match spec.value.entity_label().and_then(EntityLabel::from_name) {
            Some(label) => entity_matches(tokens, entities, label),
            None => {
                debug!(value = %spec.value, "rótulo de entidade desconhecido");
                Vec::new()
            }
        },
    }
}

/// Janela deslizante de passo 1: todo início onde a fatia é igual à sequência.
fn sliding_matches(haystack: &[String], needle: &[String]) -> Vec<MatchSpan> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return Vec::new();
    }
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(|(_, window)| *window == needle)
        .map(|(start, _)| MatchSpan {
            start,
            end: start + needle.len(),
            entity: None,
        })
        .collect()
}

/// Localiza cada entidade do rótulo pela N-ésima ocorrência da sua primeira palavra.
///
/// Entidades que não podem ser localizadas são puladas silenciosamente.
fn entity_matches(tokens: &[Token], entities: &[Entity], label: EntityLabel) -> Vec<MatchSpan> {
    let mut occurrences: HashMap<&str, Vec<usize>> = HashMap::new();
    for token in tokens {
        occurrences.entry(token.text.as_str()).or_default().push(token.index);
    }
    let mut consumed: HashMap<&str, usize> = HashMap::new();
    let mut spans = Vec::new();

    for entity in entities.iter().filter(|e| e.label == label) {
        let Some(word) = entity.first_word() else {
            debug!(entity = %entity.text, "entidade sem palavras, ignorada");
            continue;
        };
        let seen = consumed.get(word).copied().unwrap_or(0);
        match occurrences.get(word).and_then(|idxs| idxs.get(seen)) {
            Some(&idx) => {
                consumed.insert(word, seen + 1);
                spans.push(MatchSpan {
                    start: idx,
                    end: idx + 1,
                    entity: Some((entity.text.clone(), entity.label)),
                });
            }
            None => {
                debug!(entity = %entity.text, occurrence = seen, "ocorrência não encontrada, entidade ignorada");
            }
        }
    }

    spans
}
