//! # Vocabulário de Tags POS (Part-of-Speech)
//!
//! Define o conjunto fechado de tags gramaticais atribuídas pelo etiquetador.
//! Os rótulos seguem a convenção do Penn Treebank.
//!
//! | Tag      | Significado                          | Exemplos             |
//! |----------|--------------------------------------|----------------------|
//! | CD       | Número cardinal                      | 3, 1999              |
//! | JJ       | Adjetivo / ordinal                   | 3rd, 21st            |
//! | JJR/JJS  | Adjetivo comparativo / superlativo   | faster, fastest      |
//! | DT       | Determinante                         | the, this            |
//! | PRP/PRP$ | Pronome pessoal / possessivo         | she, their           |
//! | VB*      | Formas verbais                       | is, had, walked      |
//! | MD       | Modal                                | can, must            |
//! | NN/NNS   | Substantivo / plural                 | cat, cats            |
//! | NNP      | Nome próprio                         | London               |
//! | . , ``'' | Pontuação                            | . , " '              |
//! | SYM      | Símbolo (qualquer outra coisa)       | @, %, abc123         |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;

/// Tag gramatical atribuída a um token.
///
/// O vocabulário é fechado: todo token recebe exatamente uma destas tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    #[serde(rename = "CD")]
    Cd,
    #[serde(rename = "JJ")]
    Jj,
    #[serde(rename = "JJR")]
    Jjr,
    #[serde(rename = "JJS")]
    Jjs,
    /// Terminador de sentença (`.`, `!`, `?`).
    #[serde(rename = ".")]
    SentenceEnd,
    /// Separador de lista (`,`, `;`, `:`).
    #[serde(rename = ",")]
    Comma,
    #[serde(rename = "-LRB-")]
    OpenBracket,
    #[serde(rename = "-RRB-")]
    CloseBracket,
    #[serde(rename = "``")]
    OpenQuote,
    #[serde(rename = "''")]
    CloseQuote,
    #[serde(rename = "DT")]
    Dt,
    #[serde(rename = "VB")]
    Vb,
    #[serde(rename = "VBZ")]
    Vbz,
    #[serde(rename = "VBP")]
    Vbp,
    #[serde(rename = "VBD")]
    Vbd,
    #[serde(rename = "VBG")]
    Vbg,
    #[serde(rename = "MD")]
    Md,
    #[serde(rename = "PRP")]
    Prp,
    #[serde(rename = "PRP$")]
    PrpPossessive,
    #[serde(rename = "CC")]
    Cc,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "RB")]
    Rb,
    #[serde(rename = "NN")]
    Nn,
    #[serde(rename = "NNS")]
    Nns,
    #[serde(rename = "NNP")]
    Nnp,
    #[serde(rename = "SYM")]
    Sym,
}

impl PosTag {
    /// Todas as tags do vocabulário (para iteração)
    pub const ALL: [PosTag; 26] = [
        PosTag::Cd,
        PosTag::Jj,
        PosTag::Jjr,
        PosTag::Jjs,
        PosTag::SentenceEnd,
        PosTag::Comma,
        PosTag::OpenBracket,
        PosTag::CloseBracket,
        PosTag::OpenQuote,
        PosTag::CloseQuote,
        PosTag::Dt,
        PosTag::Vb,
        PosTag::Vbz,
        PosTag::Vbp,
        PosTag::Vbd,
        PosTag::Vbg,
        PosTag::Md,
        PosTag::Prp,
        PosTag::PrpPossessive,
        PosTag::Cc,
        PosTag::In,
        PosTag::Rb,
        PosTag::Nn,
        PosTag::Nns,
        PosTag::Nnp,
        PosTag::Sym,
    ];

    /// Rótulo textual da tag (ex: "NNP", "PRP$", ".")
    pub fn label(&self) -> &'static str {
        match self {
            PosTag::Cd => "CD",
            PosTag::Jj => "JJ",
            PosTag::Jjr => "JJR",
            PosTag::Jjs => "JJS",
            PosTag::SentenceEnd => ".",
            PosTag::Comma => ",",
            PosTag::OpenBracket => "-LRB-",
            PosTag::CloseBracket => "-RRB-",
            PosTag::OpenQuote => "``",
            PosTag::CloseQuote => "''",
            PosTag::Dt => "DT",
            PosTag::Vb => "VB",
            PosTag::Vbz => "VBZ",
            PosTag::Vbp => "VBP",
            PosTag::Vbd => "VBD",
            PosTag::Vbg => "VBG",
            PosTag::Md => "MD",
            PosTag::Prp => "PRP",
            PosTag::PrpPossessive => "PRP$",
            PosTag::Cc => "CC",
            PosTag::In => "IN",
            PosTag::Rb => "RB",
            PosTag::Nn => "NN",
            PosTag::Nns => "NNS",
            PosTag::Nnp => "NNP",
            PosTag::Sym => "SYM",
        }
    }

    /// Parseia uma tag a partir do rótulo (ex: "NNP" → Some(Nnp))
    pub fn from_label(s: &str) -> Option<Self> {
        PosTag::ALL.iter().copied().find(|tag| tag.label() == s)
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PosTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PosTag::from_label(s).ok_or_else(|| format!("tag POS desconhecida: {s}"))
    }
}

/// Um token com sua tag POS e o nome da regra que a decidiu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub token: Token,
    pub tag: PosTag,
    /// Regra da cascata que disparou (ex: "cardinal", "suffix_ly")
    pub rule: String,
}

impl TaggedToken {
    pub fn label(&self) -> &'static str {
        self.tag.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for tag in PosTag::ALL {
            assert_eq!(PosTag::from_label(tag.label()), Some(tag));
        }
        assert_eq!(PosTag::from_label("XYZ"), None);
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<&str> = PosTag::ALL.iter().map(|t| t.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), PosTag::ALL.len());
    }

    #[test]
    fn test_serializes_as_penn_label() {
        let json = serde_json::to_string(&PosTag::PrpPossessive).unwrap();
        assert_eq!(json, "\"PRP$\"");
        let tag: PosTag = serde_json::from_str("\"-LRB-\"").unwrap();
        assert_eq!(tag, PosTag::OpenBracket);
    }
}
