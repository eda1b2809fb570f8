//! # Tokenizador
//!
//! Divide o texto bruto em tokens atômicos, da esquerda para a direita.
//!
//! ## Esquema de Tokenização
//!
//! Um token é:
//! - uma sequência maximal de caracteres de "palavra" (letras, dígitos, `_`), ou
//! - um único caractere que não é palavra nem espaço (pontuação/símbolo).
//!
//! Espaços em branco são apenas separadores e nunca viram tokens.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use kwic_core::tokenizer::tokenize;
//!
//! let tokens = tokenize("Don't stop.");
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, ["Don", "'", "t", "stop", "."]);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Palavra (`\w+`) ou um único caractere que não é palavra nem espaço.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+|[^\w\s]").expect("padrão de token válido"));

/// Um token extraído do texto original.
///
/// O `Token` é imutável depois de criado. Os offsets (`start`, `end`) apontam para
/// o texto original, permitindo reconstruir o conteúdo sem espaços em ordem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// O texto do token (ex: "cat", ",", "3rd").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusivo).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Posição do token na sequência (0, 1, 2...).
    pub index: usize,
}

impl Token {
    /// Forma minúscula do token, usada nas comparações case-insensitive.
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}

/// Tokeniza um texto.
///
/// Determinístico: a mesma entrada sempre produz a mesma sequência.
/// Nenhum token é vazio.
pub fn tokenize(text: &str) -> Vec<Token> {
    TOKEN_PATTERN
        .find_iter(text)
        .enumerate()
        .map(|(index, m)| Token {
            text: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
            index,
        })
        .collect()
}

/// Tokeniza e devolve apenas os textos (usado para termos de busca).
pub fn tokenize_words(text: &str) -> Vec<String> {
    TOKEN_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
