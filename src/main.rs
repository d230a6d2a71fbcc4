use table_finder::config::{AnalyzerConfig, ConfidenceMode};
use table_finder::relevance::{query_words, RelevanceAnalyzer};
use table_finder::report::render_text;
use table_finder::schema::load_schema;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "table-finder")]
#[command(about = "Find the tables of a schema that are relevant to a question")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the tables of a schema file against a natural-language query
    Analyze {
        /// The question, e.g. "find all orders with user information"
        query: String,

        /// JSON file holding an array of tables
        #[arg(short, long)]
        schema: PathBuf,

        /// Analyzer configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Minimum score a table must exceed to be reported
        #[arg(long)]
        threshold: Option<f64>,

        /// Table whose score drives the confidence value
        #[arg(long)]
        confidence: Option<ConfidenceMode>,

        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    /// Print the words of a query that take part in scoring
    Tokens {
        query: String,

        /// Analyzer configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    let config = match path {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };
    Ok(config.with_env_overrides()?)
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Analyze {
            query,
            schema,
            config,
            threshold,
            confidence,
            format,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(threshold) = threshold {
                config.threshold = threshold;
            }
            if let Some(mode) = confidence {
                config.confidence_mode = mode;
            }
            config.validate()?;

            info!("Loading schema from {:?}", schema);
            let tables = load_schema(&schema)
                .with_context(|| format!("Could not load schema from {}", schema.display()))?;

            let analyzer = RelevanceAnalyzer::new(config);
            let result = analyzer.analyze(&tables, &query)?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Text => print!("{}", render_text(&result)),
            }
        }
        Commands::Tokens { query, config } => {
            let config = load_config(config.as_deref())?;
            for word in query_words(&query, &config.lexicon()) {
                println!("{}", word);
            }
        }
    }

    Ok(())
}
