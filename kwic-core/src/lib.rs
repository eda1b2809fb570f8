//! # kwic-core: Concordância KWIC (Keyword-In-Context)
//!
//! Dado um texto e um alvo de busca (palavra/frase, sequência de tags POS ou
//! rótulo de entidade), localiza cada ocorrência, recorta janelas de contexto à
//! esquerda e à direita e devolve as linhas em uma das ordenações disponíveis.
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui em uma única direção, uma vez por busca:
//!
//! 1.  **Tokenização** ([`tokenizer`]): palavras e pontuação, espaços descartados.
//! 2.  **Tags POS** ([`rule_based`], [`tagger`]): cascata ordenada de regras, primeira que dispara vence.
//! 3.  **Entidades** ([`chunker`]): agrupamento de nomes próprios (ou identidade, no modo mínimo).
//! 4.  **Matcher** ([`matcher`]): modos `word`, `pos` e `ner`.
//! 5.  **Contexto** ([`context`]): janelas truncadas nas bordas, próximo token e sua tag.
//! 6.  **Ordenação** ([`ranker`]): `default`/`kwic`, `frequency`, `right_sort`, `left_sort`, `position`.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! let results = kwic_core::search("the cat sat on the cat", "cat", "word", "position", 1).unwrap();
//!
//! assert_eq!(results.len(), 2);
//! assert_eq!(results[0].left, ["the"]);
//! assert_eq!(results[0].right, ["sat"]);
//! assert_eq!(results[1].start, 5);
//! ```

pub mod chunker;
pub mod config;
pub mod context;
pub mod corpus;
pub mod error;
pub mod grouping;
pub mod matcher;
pub mod pipeline;
pub mod ranker;
pub mod rule_based;
pub mod tagger;
pub mod tokenizer;

pub use chunker::{ChunkerMode, Entity, EntityLabel};
pub use config::SearchConfig;
pub use context::ConcordanceResult;
pub use error::{KwicError, Result};
pub use matcher::{SearchMode, SearchSpec, SearchValue};
pub use pipeline::{Concordancer, PipelineEvent};
pub use ranker::RankMode;
pub use tagger::{PosTag, TaggedToken};
pub use tokenizer::Token;

/// Ponto de entrada com modos em texto.
///
/// `mode` e `rank_mode` são validados antes de qualquer processamento; um valor
/// desconhecido devolve [`KwicError::InvalidArgument`]. Usa o agrupador mínimo,
/// portanto buscas `ner` não encontram entidades (veja [`chunker`]).
pub fn search(
    text: &str,
    value: impl Into<SearchValue>,
    mode: &str,
    rank_mode: &str,
    window: usize,
) -> Result<Vec<ConcordanceResult>> {
    let mode: SearchMode = mode.parse()?;
    let rank_mode: RankMode = rank_mode.parse()?;
    let spec = SearchSpec::new(mode, value, window);
    Ok(Concordancer::new().search(text, &spec, rank_mode))
}
