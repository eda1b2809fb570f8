//! # Pipeline KWIC: Orquestrador com Eventos Observáveis
//!
//! Conecta as etapas em uma única passada por chamada:
//!
//! tokenização → tags POS → entidades → matcher → contexto → ordenação
//!
//! Cada etapa emite um evento por um canal `mpsc`, no mesmo thread e de forma
//! síncrona, permitindo que a interface web mostre o progresso. Nenhum estado
//! sobrevive entre chamadas: todos os contêineres são criados a cada busca.

use std::sync::mpsc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chunker::{extract_entities, ChunkerMode, Entity};
use crate::config::SearchConfig;
use crate::context::{extract_context, ConcordanceResult};
use crate::matcher::{find_matches, SearchSpec, SearchValue};
use crate::ranker::{rank, RankMode};
use crate::rule_based::RuleEngine;
use crate::tagger::TaggedToken;
use crate::tokenizer::{tokenize, Token};

/// Eventos emitidos pelo pipeline durante uma busca.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
    /// **Passo 1**: Tokenização concluída.
    TokenizationDone { tokens: Vec<Token>, total: usize },
    /// **Passo 2**: Todos os tokens receberam uma tag.
    TaggingDone { tagged: Vec<TaggedToken> },
    /// **Passo 3**: Entidades agrupadas (vazio no agrupador mínimo).
    EntitiesGrouped {
        entities: Vec<Entity>,
        chunker: ChunkerMode,
    },
    /// **Passo 4**: Um trecho foi encontrado (ordem de varredura).
    MatchFound { result: ConcordanceResult },
    /// **Conclusão**: Resultados já ordenados.
    Done {
        results: Vec<ConcordanceResult>,
        total_tokens: usize,
        processing_ms: u64,
    },
}

/// Tokens, tags e entidades de um texto.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub tagged: Vec<TaggedToken>,
    pub entities: Vec<Entity>,
}

/// O motor de concordância.
///
/// Guarda apenas a configuração imutável (cascata de regras e agrupador). Pode
/// ser compartilhado entre threads e chamado quantas vezes for preciso.
pub struct Concordancer {
    engine: RuleEngine,
    chunker: ChunkerMode,
}

impl Concordancer {
    /// Motor com o agrupador mínimo (sem entidades).
    pub fn new() -> Self {
        Self::with_chunker(ChunkerMode::Minimal)
    }

    pub fn with_chunker(chunker: ChunkerMode) -> Self {
        Self {
            engine: RuleEngine::new(),
            chunker,
        }
    }

    pub fn chunker_mode(&self) -> ChunkerMode {
        self.chunker
    }

    /// Tokeniza, etiqueta e agrupa entidades.
    pub fn analyze(&self, text: &str) -> Analysis {
        let tokens = tokenize(text);
        let tagged = self.engine.apply(&tokens);
        let entities = extract_entities(&self.chunker.chunker().chunk(&tagged));
        Analysis {
            tokens,
            tagged,
            entities,
        }
    }

    /// Executa a busca completa e devolve os resultados ordenados.
    pub fn search(&self, text: &str, spec: &SearchSpec, rank_mode: RankMode) -> Vec<ConcordanceResult> {
        self.run(text, spec, rank_mode, self.chunker, None)
    }

    /// Busca com modo, janela, ordenação e agrupador de uma [`SearchConfig`].
    ///
    /// O agrupador da configuração prevalece sobre o do motor.
    pub fn search_with_config(
        &self,
        text: &str,
        value: impl Into<SearchValue>,
        config: &SearchConfig,
    ) -> Vec<ConcordanceResult> {
        self.run(text, &config.spec(value), config.rank, config.chunker, None)
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::with_chunker(config.chunker)
    }

    /// Executa a busca enviando um evento por etapa.
    ///
    /// # Fluxo de Eventos
    /// 1. `TokenizationDone`
    /// 2. `TaggingDone`
    /// 3. `EntitiesGrouped`
    /// 4. `MatchFound` (Loop): um por trecho, em ordem de varredura
    /// 5. `Done`: resultados ordenados
    pub fn search_streaming(
        &self,
        text: &str,
        spec: &SearchSpec,
        rank_mode: RankMode,
        tx: mpsc::Sender<PipelineEvent>,
    ) {
        self.run(text, spec, rank_mode, self.chunker, Some(&tx));
    }

    /// Como [`Concordancer::search_streaming`], com os parâmetros de uma [`SearchConfig`].
    pub fn stream_with_config(
        &self,
        text: &str,
        value: impl Into<SearchValue>,
        config: &SearchConfig,
        tx: mpsc::Sender<PipelineEvent>,
    ) {
        self.run(text, &config.spec(value), config.rank, config.chunker, Some(&tx));
    }

    /// Caminho comum. Sem canal, nenhum evento é montado.
    fn run(
        &self,
        text: &str,
        spec: &SearchSpec,
        rank_mode: RankMode,
        chunker: ChunkerMode,
        tx: Option<&mpsc::Sender<PipelineEvent>>,
    ) -> Vec<ConcordanceResult> {
        let start = Instant::now();
        debug!(mode = %spec.mode, value = %spec.value, window = spec.window, rank = %rank_mode, "kwic search");

        // === Passo 1: Tokenização ===
        let tokens = tokenize(text);
        emit(tx, || PipelineEvent::TokenizationDone {
            tokens: tokens.clone(),
            total: tokens.len(),
        });

        // === Passo 2: Cascata de tags ===
        let tagged = self.engine.apply(&tokens);
        emit(tx, || PipelineEvent::TaggingDone {
            tagged: tagged.clone(),
        });

        // === Passo 3: Entidades ===
        let entities = extract_entities(&chunker.chunker().chunk(&tagged));
        emit(tx, || PipelineEvent::EntitiesGrouped {
            entities: entities.clone(),
            chunker,
        });

        // === Passo 4: Matcher + contexto ===
        let results: Vec<ConcordanceResult> = find_matches(&tokens, &tagged, &entities, spec)
            .iter()
            .map(|span| {
                let result = extract_context(&tagged, span, spec.window);
                emit(tx, || PipelineEvent::MatchFound {
                    result: result.clone(),
                });
                result
            })
            .collect();
        debug!(matches = results.len(), tokens = tokens.len(), "matching done");

        // === Passo 5: Ordenação ===
        let results = rank(results, rank_mode);

        emit(tx, || PipelineEvent::Done {
            results: results.clone(),
            total_tokens: tokens.len(),
            processing_ms: start.elapsed().as_millis() as u64,
        });
        results
    }
}

/// Envia o evento apenas quando há um ouvinte.
fn emit(tx: Option<&mpsc::Sender<PipelineEvent>>, event: impl FnOnce() -> PipelineEvent) {
    if let Some(tx) = tx {
        let _ = tx.send(event());
    }
}

impl Default for Concordancer {
    fn default() -> Self {
        Self::new()
    }
}
