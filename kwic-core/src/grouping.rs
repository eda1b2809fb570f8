//! # Agrupamentos para Relatórios
//!
//! Visões derivadas de um conjunto de resultados, usadas pela saída de terminal.
//! Nada aqui altera os resultados: as funções devolvem índices para a fatia
//! recebida, de modo que qualquer saída nova reaproveita o mesmo motor.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::context::ConcordanceResult;
use crate::error::KwicError;
use crate::ranker::next_word_counts;

/// Layout do relatório de terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportLayout {
    /// Colocados mais frequentes primeiro
    #[default]
    Collocation,
    /// Ordem do conjunto de resultados
    Sequential,
    /// Agrupado por keyword, grupos maiores primeiro
    FrequentWord,
    /// Agrupado por sequência de tags, grupos maiores primeiro
    FrequentPos,
}

impl FromStr for ReportLayout {
    type Err = KwicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "collocation" | "default" => Ok(ReportLayout::Collocation),
            "sequential" | "sequentially" => Ok(ReportLayout::Sequential),
            "frequent_word" => Ok(ReportLayout::FrequentWord),
            "frequent_pos" => Ok(ReportLayout::FrequentPos),
            other => Err(KwicError::invalid(
                "report layout",
                other,
                "collocation, sequential, frequent_word, frequent_pos",
            )),
        }
    }
}

impl fmt::Display for ReportLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportLayout::Collocation => "collocation",
            ReportLayout::Sequential => "sequential",
            ReportLayout::FrequentWord => "frequent_word",
            ReportLayout::FrequentPos => "frequent_pos",
        };
        f.write_str(name)
    }
}

/// Um grupo de resultados com a mesma chave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<K> {
    pub key: K,
    /// Índices na fatia de resultados, em ordem original
    pub members: Vec<usize>,
}

impl<K> Group<K> {
    pub fn frequency(&self) -> usize {
        self.members.len()
    }
}

/// Agrupa por chave; grupos ordenados por tamanho decrescente e, no empate,
/// pela primeira aparição.
fn group_by<K, F>(results: &[ConcordanceResult], key_of: F) -> Vec<Group<K>>
where
    K: Eq + Hash + Clone,
    F: Fn(&ConcordanceResult) -> K,
{
    let mut slot: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Group<K>> = Vec::new();
    for (i, r) in results.iter().enumerate() {
        let key = key_of(r);
        match slot.get(&key) {
            Some(&g) => groups[g].members.push(i),
            None => {
                slot.insert(key.clone(), groups.len());
                groups.push(Group { key, members: vec![i] });
            }
        }
    }
    groups.sort_by_key(|g| Reverse(g.frequency()));
    groups
}

/// Resultados agrupados pelo texto da keyword.
pub fn by_keyword(results: &[ConcordanceResult]) -> Vec<Group<String>> {
    group_by(results, |r| r.keyword.clone())
}

/// Resultados agrupados pela sequência de tags do trecho.
pub fn by_pos_tags(results: &[ConcordanceResult]) -> Vec<Group<Vec<String>>> {
    group_by(results, |r| r.pos_tags.clone())
}

/// Ordem por colocado.
///
/// Resultados com próximo token vêm primeiro, por frequência decrescente do
/// próximo token, depois o próprio token, depois frequência decrescente da
/// próxima tag e a própria tag. Empates mantêm a ordem original.
pub fn collocation_order(results: &[ConcordanceResult]) -> Vec<usize> {
    let word_counts = next_word_counts(results);
    let mut tag_counts: HashMap<&str, usize> = HashMap::new();
    for r in results.iter().filter(|r| r.has_next_word()) {
        *tag_counts.entry(r.next_pos.as_str()).or_default() += 1;
    }

    let mut order: Vec<usize> = (0..results.len()).collect();
    order.sort_by_key(|&i| {
        let r = &results[i];
        (
            !r.has_next_word(),
            Reverse(word_counts.get(r.next_word.as_str()).copied().unwrap_or(0)),
            r.next_word.as_str(),
            Reverse(tag_counts.get(r.next_pos.as_str()).copied().unwrap_or(0)),
            r.next_pos.as_str(),
        )
    });
    order
}
