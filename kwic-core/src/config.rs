//! Configuração de uma busca: modo, ordenação, janela e agrupador de entidades.
//!
//! Todos os campos têm padrão, então um JSON parcial (ou vazio) é válido.

use serde::{Deserialize, Serialize};

use crate::chunker::ChunkerMode;
use crate::matcher::{SearchMode, SearchSpec, SearchValue};
use crate::ranker::RankMode;

/// Janela padrão de contexto, em tokens de cada lado
pub const DEFAULT_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub mode: SearchMode,
    pub rank: RankMode,
    pub window: usize,
    pub chunker: ChunkerMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::Word,
            rank: RankMode::Default,
            window: DEFAULT_WINDOW,
            chunker: ChunkerMode::Minimal,
        }
    }
}

impl SearchConfig {
    /// Combina a configuração com um valor de busca.
    pub fn spec(&self, value: impl Into<SearchValue>) -> SearchSpec {
        SearchSpec::new(self.mode, value, self.window)
    }
}
