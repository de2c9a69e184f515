//! SciKG CLI - Command-line interface
//!
//! Usage:
//!   scikg build <corpus.json> [--top-k N] [--out PATH] [--dot PATH]
//!   scikg extract <corpus.json>
//!   scikg stats <corpus.json>
//!
//! A corpus file is a JSON array of parsed papers:
//! `[{"title", "abstract", "conclusion", "sentences": [{"tokens": [...]}]}]`

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scikg_core::{AppConfig, ParsedPaper};
use scikg_extractor::{CorpusExtraction, CorpusExtractor, DependencyRe};
use scikg_graph::{select_top_k, to_export_format, write_dot, GraphBuilder};

#[derive(Parser)]
#[command(name = "scikg")]
#[command(about = "Combined knowledge graph from scientific paper summaries")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph and export the top-K subgraph
    Build {
        /// Parsed corpus (JSON)
        corpus: PathBuf,
        /// Number of most connected nodes to keep
        #[arg(long)]
        top_k: Option<usize>,
        /// Output path of the graph JSON
        #[arg(long)]
        out: Option<PathBuf>,
        /// Output path of the Graphviz DOT file
        #[arg(long)]
        dot: Option<PathBuf>,
    },
    /// Print the triples extracted from each paper
    Extract {
        /// Parsed corpus (JSON)
        corpus: PathBuf,
    },
    /// Print graph and extraction statistics
    Stats {
        /// Parsed corpus (JSON)
        corpus: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };
    Ok(config)
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.json_format {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn load_corpus(path: &Path) -> anyhow::Result<Vec<ParsedPaper>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read corpus {}", path.display()))?;
    let papers: Vec<ParsedPaper> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse corpus {}", path.display()))?;
    tracing::info!(papers = papers.len(), path = %path.display(), "corpus loaded");
    Ok(papers)
}

fn extract(config: &AppConfig, corpus: &Path) -> anyhow::Result<CorpusExtraction> {
    let papers = load_corpus(corpus)?;
    let extractor = CorpusExtractor::new(DependencyRe::with_config(&config.extractor));
    Ok(extractor.extract_parsed(&papers))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    init_tracing(&config);

    match cli.command {
        Commands::Build {
            corpus,
            top_k,
            out,
            dot,
        } => {
            if let Some(k) = top_k {
                config.selection.top_k = k;
            }
            if let Some(out) = out {
                config.export.json_path = out;
            }
            if dot.is_some() {
                config.export.dot_path = dot;
            }

            let extraction = extract(&config, &corpus)?;
            let graph = GraphBuilder::build(&extraction.papers);
            let subgraph = select_top_k(&graph, config.selection.top_k);
            tracing::info!(
                nodes = subgraph.node_count(),
                edges = subgraph.edge_count(),
                top_k = config.selection.top_k,
                "subgraph selected"
            );

            to_export_format(&subgraph)
                .write_json(&config.export.json_path, config.export.pretty)
                .with_context(|| {
                    format!("failed to write {}", config.export.json_path.display())
                })?;

            if let Some(dot_path) = &config.export.dot_path {
                write_dot(&subgraph, dot_path)
                    .with_context(|| format!("failed to write {}", dot_path.display()))?;
            }

            println!(
                "Graph: {} nodes, {} edges; exported {} nodes to {}",
                graph.node_count(),
                graph.edge_count(),
                subgraph.node_count(),
                config.export.json_path.display()
            );
        }
        Commands::Extract { corpus } => {
            let extraction = extract(&config, &corpus)?;
            for paper in &extraction.papers {
                println!("[{}] {}", paper.paper_id, paper.title);
                for triple in &paper.triples {
                    println!("  {}", triple);
                }
            }
        }
        Commands::Stats { corpus } => {
            let extraction = extract(&config, &corpus)?;
            let graph = GraphBuilder::build(&extraction.papers);
            let report = serde_json::json!({
                "extraction": extraction.stats,
                "graph": graph.stats(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
