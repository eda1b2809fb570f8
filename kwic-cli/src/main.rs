//! kwic - Concordância KWIC no terminal
//!
//! Lê um texto (arquivo, stdin ou texto de demonstração), executa uma busca e
//! imprime as linhas com a keyword e o colocado coloridos.

mod render;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use colored::Color;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kwic_core::corpus::{demo_text, demo_texts};
use kwic_core::grouping::ReportLayout;
use kwic_core::{ChunkerMode, Concordancer, RankMode, SearchConfig, SearchMode, SearchValue};

use render::Palette;

#[derive(Parser, Debug)]
#[command(name = "kwic", version, about = "Concordância KWIC (Keyword-In-Context)")]
struct Cli {
    /// Arquivo de texto ("-" lê de stdin). Sem arquivo, usa um texto de demonstração
    file: Option<PathBuf>,

    /// Termo(s) de busca: palavras de uma frase, tags POS ou um rótulo de entidade
    #[arg(short, long, num_args = 1.., required = true)]
    query: Vec<String>,

    /// Modo de busca: word, pos ou ner
    #[arg(short, long, default_value = "word", env = "KWIC_MODE")]
    mode: SearchMode,

    /// Ordenação: default, kwic, frequency, right_sort, left_sort, position
    #[arg(short, long, default_value = "default", env = "KWIC_RANK")]
    rank: RankMode,

    /// Layout do relatório: collocation, sequential, frequent_word, frequent_pos
    #[arg(short, long, default_value = "collocation", env = "KWIC_LAYOUT")]
    layout: ReportLayout,

    /// Tokens de contexto de cada lado
    #[arg(short, long, default_value_t = kwic_core::config::DEFAULT_WINDOW, env = "KWIC_WINDOW")]
    window: usize,

    /// Agrupador de entidades: minimal ou heuristic
    #[arg(long, default_value = "minimal", env = "KWIC_CHUNKER")]
    chunker: ChunkerMode,

    /// Texto de demonstração usado quando nenhum arquivo é informado
    #[arg(long, default_value = "novel")]
    demo: String,

    /// Cor da keyword
    #[arg(long, default_value = "blue")]
    highlight: String,

    /// Cor do colocado (primeiro token à direita)
    #[arg(long, default_value = "cyan")]
    collocate: String,

    /// Imprime os resultados como JSON
    #[arg(long)]
    json: bool,

    /// Aumenta o detalhe dos logs (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Desliga os logs
    #[arg(long, global = true)]
    quiet: bool,
}

impl Cli {
    fn config(&self) -> SearchConfig {
        SearchConfig {
            mode: self.mode,
            rank: self.rank,
            window: self.window,
            chunker: self.chunker,
        }
    }

    /// Um único `-q` é tokenizado como frase; vários formam a sequência exata.
    fn query_value(&self) -> SearchValue {
        match self.query.as_slice() {
            [single] => SearchValue::Single(single.clone()),
            many => SearchValue::Sequence(many.to_vec()),
        }
    }

    fn palette(&self) -> Result<Palette> {
        Ok(Palette {
            highlight: parse_color(&self.highlight)?,
            collocate: parse_color(&self.collocate)?,
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let palette = cli.palette()?;
    let text = read_text(cli)?;
    let config = cli.config();

    info!(
        mode = %config.mode,
        rank = %config.rank,
        window = config.window,
        chunker = ?config.chunker,
        bytes = text.len(),
        "running search"
    );

    let concordancer = Concordancer::from_config(&config);
    let results = concordancer.search_with_config(&text, cli.query_value(), &config);
    debug!(results = results.len(), "search finished");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!(
        "query = {:?}, mode = {}, rank = {}, layout = {}",
        cli.query, config.mode, config.rank, cli.layout
    );
    print!("{}", render::report(&results, cli.layout, &palette));
    println!();
    Ok(())
}

fn read_text(cli: &Cli) -> Result<String> {
    match &cli.file {
        Some(path) if path.as_os_str() == "-" => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read text from stdin")?;
            Ok(text)
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let names: Vec<&str> = demo_texts().iter().map(|(name, _)| *name).collect();
            demo_text(&cli.demo)
                .map(str::to_string)
                .ok_or_else(|| anyhow!("unknown demo text '{}' (available: {})", cli.demo, names.join(", ")))
        }
    }
}

fn parse_color(name: &str) -> Result<Color> {
    name.parse::<Color>()
        .map_err(|_| anyhow!("unknown color '{name}'"))
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info,kwic_core=debug",
        2 => "debug,kwic_core=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["kwic", "-q", "that"]).unwrap();
        assert_eq!(cli.config(), SearchConfig::default());
        assert_eq!(cli.layout, ReportLayout::Collocation);
        assert_eq!(cli.query, ["that"]);
        assert!(cli.file.is_none());
    }

    #[test]
    fn test_cli_pos_sequence() {
        let cli = Cli::try_parse_from([
            "kwic", "text.txt", "-m", "pos", "-q", "NNP", "CC", "-l", "sequentially", "-w", "3",
        ])
        .unwrap();
        assert_eq!(cli.mode, SearchMode::Pos);
        assert_eq!(cli.query, ["NNP", "CC"]);
        assert_eq!(cli.layout, ReportLayout::Sequential);
        assert_eq!(cli.window, 3);
        assert_eq!(cli.file, Some(PathBuf::from("text.txt")));
    }

    #[test]
    fn test_single_query_is_a_phrase() {
        let cli = Cli::try_parse_from(["kwic", "-q", "the cat"]).unwrap();
        assert_eq!(cli.query_value(), SearchValue::Single("the cat".into()));
        let cli = Cli::try_parse_from(["kwic", "-q", "the", "cat"]).unwrap();
        assert_eq!(cli.query_value(), SearchValue::from(["the", "cat"]));
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["kwic", "-q", "x", "-m", "regex"]).is_err());
        assert!(Cli::try_parse_from(["kwic", "-q", "x", "-r", "random"]).is_err());
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("green").unwrap(), Color::Green);
        assert!(parse_color("chartreuse-ish").is_err());
    }
}
