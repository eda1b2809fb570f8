//! Saída de terminal: linhas KWIC coloridas e relatórios agrupados.

use std::fmt::Write;

use colored::{Color, Colorize};

use kwic_core::grouping::{by_keyword, by_pos_tags, collocation_order, Group, ReportLayout};
use kwic_core::ConcordanceResult;

/// Largura de cada lado do banner
const BANNER_SIZE: usize = 50;

/// Cores da keyword e do colocado
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub highlight: Color,
    pub collocate: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            highlight: Color::Blue,
            collocate: Color::Cyan,
        }
    }
}

/// Título centralizado entre preenchimentos, ex.: `..... Título .....`
pub fn side_fill(title: &str, size: usize, fill: char) -> String {
    let side: String = std::iter::repeat(fill)
        .take(size.saturating_sub(title.chars().count() / 2))
        .collect();
    format!("{side} {title} {side}")
}

/// `esquerda KEYWORD direita`, ignorando partes vazias.
fn plain_line(r: &ConcordanceResult, palette: &Palette) -> String {
    let keyword = r.keyword.color(palette.highlight).to_string();
    [r.left.join(" "), keyword, r.right.join(" ")]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `esquerda KEYWORD COLOCADO resto TAG`, com o colocado destacado à parte.
fn collocation_line(r: &ConcordanceResult, palette: &Palette) -> String {
    let collocate = if r.has_next_word() {
        r.next_word.color(palette.collocate).to_string()
    } else {
        String::new()
    };
    let rest = r.right.iter().skip(1).cloned().collect::<Vec<_>>().join(" ");
    [
        r.left.join(" "),
        r.keyword.color(palette.highlight).to_string(),
        collocate,
        rest,
        r.next_pos.clone(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

fn grouped<K>(
    out: &mut String,
    results: &[ConcordanceResult],
    groups: &[Group<K>],
    key_label: impl Fn(&K) -> String,
    palette: &Palette,
) {
    for group in groups {
        let _ = writeln!(
            out,
            "[token = {}, frequency = {}]:",
            key_label(&group.key),
            group.frequency()
        );
        for &i in &group.members {
            let _ = writeln!(out, "    {}", plain_line(&results[i], palette));
        }
    }
}

/// Relatório completo de um conjunto de resultados no layout pedido.
pub fn report(results: &[ConcordanceResult], layout: ReportLayout, palette: &Palette) -> String {
    let mut out = String::new();
    match layout {
        ReportLayout::Collocation => {
            for (n, i) in collocation_order(results).into_iter().enumerate() {
                let _ = writeln!(out, "{n}. {}", collocation_line(&results[i], palette));
            }
        }
        ReportLayout::Sequential => {
            let _ = writeln!(out, "{}", side_fill("Results in sequential order", BANNER_SIZE, '.'));
            for (n, r) in results.iter().enumerate() {
                let _ = writeln!(out, "{n}. {}", plain_line(r, palette));
            }
        }
        ReportLayout::FrequentWord => {
            let _ = writeln!(out, "{}", side_fill("Results in keyword frequency order", BANNER_SIZE, '.'));
            grouped(&mut out, results, &by_keyword(results), |k| k.clone(), palette);
        }
        ReportLayout::FrequentPos => {
            let _ = writeln!(out, "{}", side_fill("Results in POS tag frequency order", BANNER_SIZE, '.'));
            grouped(&mut out, results, &by_pos_tags(results), |k| format!("{k:?}"), palette);
        }
    }
    out
}
