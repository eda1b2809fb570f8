//! # Agrupador de Entidades Nomeadas
//!
//! Recebe a sequência de tokens etiquetados e produz uma **árvore de chunks**:
//! cada nó é uma folha (token solto) ou um chunk rotulado que agrupa tokens
//! contíguos em uma entidade. As entidades são então extraídas dos chunks.
//!
//! ## Variantes
//!
//! - [`ChunkerMode::Minimal`]: passagem identidade. Nenhuma estrutura de
//!   agrupamento existe, então **nenhuma entidade** é produzida e buscas `ner`
//!   não encontram nada. É o comportamento do motor que roda no navegador.
//! - [`ChunkerMode::Heuristic`]: regras fixas sobre sequências de `NNP`
//!   (títulos, nomes conhecidos, designadores corporativos, preposições de
//!   lugar). Não é um modelo aprendido.
//!
//! Os rótulos produzidos são apenas `PERSON`, `ORGANIZATION` e `GPE`. Lugares
//! que não são entidades geopolíticas (`LOCATION`, `FACILITY`) não são
//! distinguidos, então buscas `ner` por esses rótulos não encontram nada.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KwicError;
use crate::tagger::{PosTag, TaggedToken};

/// Categorias de entidade produzidas pelo agrupador heurístico.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    /// **Pessoa**: "Mr Darcy", "Elizabeth Bennet".
    Person,
    /// **Organização**: "Acme Corp", "Oxford University".
    Organization,
    /// **Entidade geopolítica**: "London", "Hertfordshire".
    Gpe,
}

impl EntityLabel {
    pub fn name(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Organization => "ORGANIZATION",
            EntityLabel::Gpe => "GPE",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "PERSON" => Some(EntityLabel::Person),
            "ORGANIZATION" => Some(EntityLabel::Organization),
            "GPE" => Some(EntityLabel::Gpe),
            _ => None,
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Uma entidade identificada no texto
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Texto da entidade, tokens unidos por espaço (ex: "Elizabeth Bennet")
    pub text: String,
    pub label: EntityLabel,
    /// Índice do primeiro token
    pub start_token: usize,
    /// Índice após o último token (exclusivo)
    pub end_token: usize,
}

impl Entity {
    /// Primeira palavra da entidade, usada para localizá-la no modo `ner`.
    pub fn first_word(&self) -> Option<&str> {
        self.text.split_whitespace().next()
    }
}

/// Nó da árvore de chunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkNode {
    Leaf(TaggedToken),
    Chunk {
        label: EntityLabel,
        leaves: Vec<TaggedToken>,
    },
}

/// Qual agrupador usar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkerMode {
    /// Identidade: nenhuma entidade.
    #[default]
    Minimal,
    /// Regras heurísticas sobre nomes próprios.
    Heuristic,
}

impl FromStr for ChunkerMode {
    type Err = KwicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimal" => Ok(ChunkerMode::Minimal),
            "heuristic" => Ok(ChunkerMode::Heuristic),
            other => Err(KwicError::invalid("chunker mode", other, "minimal, heuristic")),
        }
    }
}

impl ChunkerMode {
    pub fn chunker(&self) -> Box<dyn EntityChunker> {
        match self {
            ChunkerMode::Minimal => Box::new(FlatChunker),
            ChunkerMode::Heuristic => Box::new(HeuristicChunker::new()),
        }
    }
}

/// Constrói a árvore de chunks a partir dos tokens etiquetados.
pub trait EntityChunker {
    fn chunk(&self, tagged: &[TaggedToken]) -> Vec<ChunkNode>;
}

/// Agrupador identidade: toda posição vira folha.
pub struct FlatChunker;

impl EntityChunker for FlatChunker {
    fn chunk(&self, tagged: &[TaggedToken]) -> Vec<ChunkNode> {
        tagged.iter().cloned().map(ChunkNode::Leaf).collect()
    }
}

/// Agrupador por regras fixas sobre sequências de nomes próprios.
///
/// Um chunk começa em um token capitalizado que é `NNP`, ou que vem logo após um
/// título ("Mr", "Dr."), ou que abre a sentença e é um nome conhecido. O chunk
/// se estende pelos `NNP` seguintes. O rótulo é decidido na ordem:
///
/// 1. Precedido de título → PERSON
/// 2. Primeira palavra é um nome próprio conhecido → PERSON
/// 3. Última palavra é designador corporativo → ORGANIZATION
/// 4. Precedido de preposição de lugar → GPE
/// 5. Mais de uma palavra → PERSON
/// 6. Caso contrário → GPE
pub struct HeuristicChunker {
    honorifics: Vec<String>,
    given_names: Vec<String>,
    org_designators: Vec<String>,
    locatives: Vec<String>,
}

impl HeuristicChunker {
    pub fn new() -> Self {
        Self {
            honorifics: [
                "mr", "mrs", "ms", "miss", "dr", "prof", "sir", "madam", "lady", "lord",
                "president", "king", "queen", "captain", "colonel", "general", "senator",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            given_names: [
                "john", "mary", "james", "elizabeth", "george", "william", "anne", "jane",
                "charles", "alice", "robert", "michael", "sarah", "david", "emma", "thomas",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            org_designators: [
                "inc", "corp", "corporation", "ltd", "llc", "company", "co", "university",
                "institute", "bank", "association", "society", "agency", "council", "committee",
                "party",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            locatives: ["in", "at", "from", "to", "near", "across", "into", "towards"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn add_given_name(&mut self, name: &str) {
        self.given_names.push(name.to_lowercase());
    }

    pub fn add_org_designator(&mut self, word: &str) {
        self.org_designators.push(word.to_lowercase());
    }

    fn is_honorific(&self, t: &TaggedToken) -> bool {
        self.honorifics.contains(&t.token.lower())
    }

    /// "Mr Smith" ou "Dr. Smith": o token anterior (ignorando um ponto) é título.
    fn follows_honorific(&self, tagged: &[TaggedToken], i: usize) -> bool {
        match i {
            0 => false,
            1 => self.is_honorific(&tagged[0]),
            _ => {
                let prev = &tagged[i - 1];
                self.is_honorific(prev)
                    || (prev.token.text == "." && self.is_honorific(&tagged[i - 2]))
            }
        }
    }

    /// Início de sentença não recebe `NNP`; um nome conhecido ali ainda abre chunk.
    fn opens_sentence_with_name(&self, tagged: &[TaggedToken], i: usize) -> bool {
        let at_sentence_start = i == 0 || tagged[i - 1].tag == PosTag::SentenceEnd;
        at_sentence_start && self.given_names.contains(&tagged[i].token.lower())
    }

    fn label(&self, tagged: &[TaggedToken], start: usize, end: usize, titled: bool) -> EntityLabel {
        let first = tagged[start].token.lower();
        let last = tagged[end - 1].token.lower();
        let after_locative = start > 0 && self.locatives.contains(&tagged[start - 1].token.lower());

        if titled || self.given_names.contains(&first) {
            EntityLabel::Person
        } else if self.org_designators.contains(&last) {
            EntityLabel::Organization
        } else if after_locative {
            EntityLabel::Gpe
        } else if end - start > 1 {
            EntityLabel::Person
        } else {
            EntityLabel::Gpe
        }
    }
}

impl Default for HeuristicChunker {
    fn default() -> Self {
        Self::new()
    }
}

fn is_capitalized(t: &TaggedToken) -> bool {
    t.token.text.chars().next().is_some_and(char::is_uppercase)
}

impl EntityChunker for HeuristicChunker {
    fn chunk(&self, tagged: &[TaggedToken]) -> Vec<ChunkNode> {
        let mut nodes = Vec::new();
        let mut i = 0;

        while i < tagged.len() {
            let titled = self.follows_honorific(tagged, i);
            let starts = is_capitalized(&tagged[i])
                && !self.is_honorific(&tagged[i])
                && (tagged[i].tag == PosTag::Nnp
                    || titled
                    || self.opens_sentence_with_name(tagged, i));

            if !starts {
                nodes.push(ChunkNode::Leaf(tagged[i].clone()));
                i += 1;
                continue;
            }

            // Acumula NNP consecutivos (um título no meio encerra o chunk)
            let mut j = i + 1;
            while j < tagged.len() && tagged[j].tag == PosTag::Nnp && !self.is_honorific(&tagged[j]) {
                j += 1;
            }

            let label = self.label(tagged, i, j, titled);
            nodes.push(ChunkNode::Chunk {
                label,
                leaves: tagged[i..j].to_vec(),
            });
            i = j;
        }

        nodes
    }
}

/// Extrai as entidades dos chunks rotulados, em ordem de aparição.
pub fn extract_entities(tree: &[ChunkNode]) -> Vec<Entity> {
    tree.iter()
        .filter_map(|node| match node {
            ChunkNode::Chunk { label, leaves } if !leaves.is_empty() => Some(Entity {
                text: leaves
                    .iter()
                    .map(|t| t.token.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
                label: *label,
                start_token: leaves[0].token.index,
                end_token: leaves[leaves.len() - 1].token.index + 1,
            }),
            _ => None,
        })
        .collect()
}

/// Atalho: chunking + extração com o modo escolhido.
pub fn group_entities(tagged: &[TaggedToken], mode: ChunkerMode) -> Vec<Entity> {
    extract_entities(&mode.chunker().chunk(tagged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule_based::pos_tag;
    use crate::tokenizer::tokenize;

    fn entities(text: &str) -> Vec<(String, &'static str)> {
        group_entities(&pos_tag(&tokenize(text)), ChunkerMode::Heuristic)
            .into_iter()
            .map(|e| (e.text, e.label.name()))
            .collect()
    }

    #[test]
    fn test_minimal_chunker_is_identity() {
        let tagged = pos_tag(&tokenize("Yesterday Elizabeth met Mr Darcy in London."));
        let tree = FlatChunker.chunk(&tagged);
        assert_eq!(tree.len(), tagged.len());
        assert!(tree.iter().all(|n| matches!(n, ChunkNode::Leaf(_))));
        assert!(group_entities(&tagged, ChunkerMode::Minimal).is_empty());
    }

    #[test]
    fn test_honorific_marks_person() {
        assert_eq!(entities("She met Mr Darcy"), [("Darcy".to_string(), "PERSON")]);
        assert_eq!(entities("She met Dr. Watson"), [("Watson".to_string(), "PERSON")]);
    }

    #[test]
    fn test_locative_marks_gpe() {
        assert_eq!(entities("They stayed in London"), [("London".to_string(), "GPE")]);
    }

    #[test]
    fn test_org_designator() {
        assert_eq!(
            entities("She joined Acme Corp"),
            [("Acme Corp".to_string(), "ORGANIZATION")]
        );
    }

    #[test]
    fn test_sentence_initial_name_joins_chunk() {
        // "Elizabeth" abre a sentença (NN) mas é um nome conhecido
        assert_eq!(
            entities("Elizabeth Bennet laughed"),
            [("Elizabeth Bennet".to_string(), "PERSON")]
        );
    }

    #[test]
    fn test_sentence_initial_word_is_not_a_name() {
        assert_eq!(
            entities("Yesterday Elizabeth laughed"),
            [("Elizabeth".to_string(), "PERSON")]
        );
    }

    #[test]
    fn test_entity_token_range() {
        let tagged = pos_tag(&tokenize("They stayed in New Jersey today"));
        let found = group_entities(&tagged, ChunkerMode::Heuristic);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start_token, 3);
        assert_eq!(found[0].end_token, 5);
        assert_eq!(found[0].first_word(), Some("New"));
    }

    #[test]
    fn test_custom_given_name_and_designator() {
        let tagged = pos_tag(&tokenize("They visited Bingley Trust and met Fitzwilliam"));
        let labels = |chunker: &HeuristicChunker| -> Vec<(String, EntityLabel)> {
            extract_entities(&chunker.chunk(&tagged))
                .into_iter()
                .map(|e| (e.text, e.label))
                .collect()
        };

        let default = HeuristicChunker::new();
        assert_eq!(
            labels(&default),
            [
                ("Bingley Trust".to_string(), EntityLabel::Person),
                ("Fitzwilliam".to_string(), EntityLabel::Gpe),
            ]
        );

        let mut custom = HeuristicChunker::new();
        custom.add_org_designator("Trust");
        custom.add_given_name("Fitzwilliam");
        assert_eq!(
            labels(&custom),
            [
                ("Bingley Trust".to_string(), EntityLabel::Organization),
                ("Fitzwilliam".to_string(), EntityLabel::Person),
            ]
        );
    }

    #[test]
    fn test_entity_label_names() {
        for label in [EntityLabel::Person, EntityLabel::Organization, EntityLabel::Gpe] {
            assert_eq!(EntityLabel::from_name(label.name()), Some(label));
        }
        assert_eq!(EntityLabel::from_name("LOCATION"), None);
    }

    #[test]
    fn test_chunker_mode_from_str() {
        assert_eq!("heuristic".parse::<ChunkerMode>(), Ok(ChunkerMode::Heuristic));
        assert!("nltk".parse::<ChunkerMode>().is_err());
    }
}
