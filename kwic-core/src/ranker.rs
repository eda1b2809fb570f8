//! # Ordenação dos Resultados
//!
//! Única etapa que enxerga o conjunto inteiro de resultados. Todas as
//! ordenações são estáveis: empates preservam a ordem de varredura.
//!
//! | Modo              | Chave                                                   |
//! |-------------------|---------------------------------------------------------|
//! | `default`/`kwic`  | keyword em minúsculas, crescente                        |
//! | `frequency`       | frequência do próximo token, decrescente (vazio no fim) |
//! | `right_sort`      | próximo token em minúsculas (vazio primeiro)            |
//! | `left_sort`       | último token à esquerda em minúsculas (vazio primeiro)  |
//! | `position`        | índice de início                                        |

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::context::ConcordanceResult;
use crate::error::KwicError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMode {
    #[default]
    Default,
    Kwic,
    Frequency,
    RightSort,
    LeftSort,
    Position,
}

impl RankMode {
    pub fn name(&self) -> &'static str {
        match self {
            RankMode::Default => "default",
            RankMode::Kwic => "kwic",
            RankMode::Frequency => "frequency",
            RankMode::RightSort => "right_sort",
            RankMode::LeftSort => "left_sort",
            RankMode::Position => "position",
        }
    }
}

impl fmt::Display for RankMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RankMode {
    type Err = KwicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(RankMode::Default),
            "kwic" => Ok(RankMode::Kwic),
            "frequency" => Ok(RankMode::Frequency),
            "right_sort" => Ok(RankMode::RightSort),
            "left_sort" => Ok(RankMode::LeftSort),
            "position" => Ok(RankMode::Position),
            other => Err(KwicError::invalid(
                "rank mode",
                other,
                "default, kwic, frequency, right_sort, left_sort, position",
            )),
        }
    }
}

/// Quantos resultados compartilham cada próximo token (vazios não contam).
pub fn next_word_counts(results: &[ConcordanceResult]) -> HashMap<&str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in results.iter().filter(|r| r.has_next_word()) {
        *counts.entry(r.next_word.as_str()).or_default() += 1;
    }
    counts
}

/// Reordena o conjunto de resultados segundo o modo.
pub fn rank(mut results: Vec<ConcordanceResult>, mode: RankMode) -> Vec<ConcordanceResult> {
    match mode {
        RankMode::Default | RankMode::Kwic => {
            results.sort_by_cached_key(|r| r.keyword.to_lowercase());
        }
        RankMode::Frequency => {
            let counts: HashMap<String, usize> = next_word_counts(&results)
                .into_iter()
                .map(|(word, n)| (word.to_string(), n))
                .collect();
            results.sort_by_key(|r| {
                let count = counts.get(&r.next_word).copied().unwrap_or(0);
                (!r.has_next_word(), Reverse(count))
            });
        }
        RankMode::RightSort => {
            results.sort_by_cached_key(|r| r.next_word.to_lowercase());
        }
        RankMode::LeftSort => {
            results.sort_by_cached_key(|r| r.prev_word().to_lowercase());
        }
        RankMode::Position => {
            results.sort_by_key(|r| r.start);
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(keyword: &str, start: usize, prev: &str, next: &str) -> ConcordanceResult {
        ConcordanceResult {
            left: if prev.is_empty() { vec![] } else { vec![prev.to_string()] },
            keyword: keyword.to_string(),
            right: if next.is_empty() { vec![] } else { vec![next.to_string()] },
            start,
            end: start + 1,
            pos_tags: vec!["NN".to_string()],
            next_word: next.to_string(),
            next_pos: if next.is_empty() { String::new() } else { "NN".to_string() },
            entity_label: None,
        }
    }

    fn starts(results: &[ConcordanceResult]) -> Vec<usize> {
        results.iter().map(|r| r.start).collect()
    }

    #[test]
    fn test_kwic_alphabetical_case_insensitive() {
        let results = vec![
            result("beta", 0, "", ""),
            result("Alpha", 1, "", ""),
            result("alpha", 2, "", ""),
        ];
        assert_eq!(starts(&rank(results.clone(), RankMode::Default)), [1, 2, 0]);
        assert_eq!(starts(&rank(results, RankMode::Kwic)), [1, 2, 0]);
    }

    #[test]
    fn test_frequency() {
        let results = vec![
            result("x", 0, "", "cat"),
            result("x", 1, "", ""),
            result("x", 2, "", "dog"),
            result("x", 3, "", "dog"),
            result("x", 4, "", "dog"),
        ];
        assert_eq!(starts(&rank(results, RankMode::Frequency)), [2, 3, 4, 0, 1]);
    }

    #[test]
    fn test_right_sort_empty_first() {
        let results = vec![
            result("x", 0, "", "Zebra"),
            result("x", 1, "", ""),
            result("x", 2, "", "apple"),
        ];
        assert_eq!(starts(&rank(results, RankMode::RightSort)), [1, 2, 0]);
    }

    #[test]
    fn test_left_sort_uses_last_left_token() {
        let results = vec![
            result("x", 0, "b", ""),
            result("x", 1, "", ""),
            result("x", 2, "A", ""),
        ];
        assert_eq!(starts(&rank(results, RankMode::LeftSort)), [1, 2, 0]);
    }

    #[test]
    fn test_position_restores_scan_order() {
        let results = vec![
            result("c", 7, "", ""),
            result("a", 2, "", ""),
            result("b", 5, "", ""),
        ];
        assert_eq!(starts(&rank(results, RankMode::Position)), [2, 5, 7]);
    }

    #[test]
    fn test_rank_mode_from_str() {
        assert_eq!("right_sort".parse::<RankMode>(), Ok(RankMode::RightSort));
        assert!("alphabetical".parse::<RankMode>().is_err());
    }
}
