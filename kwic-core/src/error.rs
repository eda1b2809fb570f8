//! Erros do motor de concordância.
//!
//! Só existe uma falha visível ao chamador: argumento inválido (modo de busca,
//! modo de ordenação, etc). Ela é detectada antes de qualquer varredura.
//! Falhas de localização de entidade no modo `ner` são absorvidas pelo matcher.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KwicError {
    /// Valor desconhecido para um parâmetro enumerado.
    #[error("invalid {what}: '{value}' (expected one of: {expected})")]
    InvalidArgument {
        what: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl KwicError {
    pub(crate) fn invalid(what: &'static str, value: &str, expected: &'static str) -> Self {
        KwicError::InvalidArgument {
            what,
            value: value.to_string(),
            expected,
        }
    }
}

pub type Result<T> = std::result::Result<T, KwicError>;
