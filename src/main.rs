use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use kranjska::config::Config;
use kranjska::pipeline;
use kranjska::topics::tfidf::TfIdfTopicModel;

/// Kranjska: topics over time in the Carniolan parliamentary corpus.
///
/// Extracts a word → lemma map and timestamped speeches from the TEI corpus,
/// then discovers topics and how they shift from year to year.
#[derive(Parser)]
#[command(name = "kranjska", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the word → lemma map from the annotated corpus
    Lemmas,

    /// Extract timestamped speech segments from the plain-text corpus
    Speeches,

    /// Fit topics on the extracted speeches and write reports
    Topics {
        /// Maximum number of topics (default: 50)
        #[arg(long, default_value = "50")]
        max_topics: usize,

        /// Keywords ranked before clustering (default: 400)
        #[arg(long, default_value = "400")]
        top_n_keywords: usize,
    },

    /// Run lemmas, speeches, and topics in sequence
    All,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("kranjska=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Lemmas => {
            pipeline::lemmas::run(&config)?;
        }

        Commands::Speeches => {
            pipeline::speeches::run(&config)?;
        }

        Commands::Topics {
            max_topics,
            top_n_keywords,
        } => {
            run_topics(&config, TfIdfTopicModel::new(top_n_keywords, max_topics))?;
        }

        Commands::All => {
            info!("Running full pipeline");
            pipeline::lemmas::run(&config)?;
            pipeline::speeches::run(&config)?;
            run_topics(&config, TfIdfTopicModel::default())?;
        }
    }

    Ok(())
}

fn run_topics(config: &Config, mut model: TfIdfTopicModel) -> Result<()> {
    let written = pipeline::topics::run(config, &mut model)?;

    println!("\n{}", "Reports written:".bold());
    for path in &written {
        println!("  {}", path.display());
    }
    Ok(())
}
