use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;

use dbpedia_explorer::{EntityRecord, Explorer, RankedEntity, RelevanceEngine, Settings};

#[derive(Parser)]
#[command(name = "explorer-cli")]
#[command(about = "DBpedia Explorer CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// SPARQL endpoint (overrides DBPEDIA_ENDPOINT)
    #[arg(short, long)]
    endpoint: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show an entity as resolved from the endpoint
    Entity {
        /// Entity name, e.g. Paris
        name: String,
    },

    /// Rank the related entities of an entity
    Related {
        /// Entity name, e.g. Paris
        name: String,

        /// Maximum rows to print
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Rank entities from a JSON file without network access
    Rank {
        /// File with {"main": ..., "candidates": [...]}
        file: PathBuf,

        /// Print the per-signal breakdown
        #[arg(long)]
        explain: bool,
    },
}

#[derive(Deserialize)]
struct RankInput {
    main: EntityRecord,
    #[serde(default)]
    candidates: Vec<EntityRecord>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::from_env();
    if let Some(endpoint) = cli.endpoint {
        settings.dbpedia_endpoint = endpoint;
    }

    match cli.command {
        Commands::Entity { name } => {
            let explorer = Explorer::from_settings(&settings)?;
            let entity = explorer.entity(&name).await?;

            println!("{}", serde_json::to_string_pretty(&entity)?);
        }

        Commands::Related { name, limit } => {
            println!("🔍 Exploring: {}", name);

            let explorer = Explorer::from_settings(&settings)?;
            let ranked = explorer.explore(&name).await?;

            print_table(&ranked, limit);
        }

        Commands::Rank { file, explain } => {
            let input: RankInput = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
            let engine = RelevanceEngine::new();

            if explain {
                let signals = engine.signals(&input.main, &input.candidates)?;

                println!("{:<32} {:>8} {:>10} {:>8} {:>8} {:>9}", "ENTITY", "LEXICAL", "STRUCTURAL", "MAIN→C", "C→MAIN", "RELEVANCE");
                for (candidate, s) in input.candidates.iter().zip(&signals) {
                    println!(
                        "{:<32} {:>8.3} {:>10.3} {:>8.0} {:>8.0} {:>9.3}",
                        candidate.identifier,
                        s.lexical,
                        s.structural,
                        s.main_in_candidate,
                        s.candidate_in_main,
                        s.relevance()
                    );
                }
            } else {
                let ranked = engine.rank(input.main, input.candidates)?;
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            }
        }
    }

    Ok(())
}

fn print_table(ranked: &[RankedEntity], limit: usize) {
    println!("\n{:>9} {:>6} {:>8}  ENTITY", "RELEVANCE", "SIZE", "DISTANCE");
    for entity in ranked.iter().take(limit) {
        println!(
            "{:>9.3} {:>6.1} {:>8.1}  {}",
            entity.relevance,
            entity.card_size,
            entity.distance,
            entity.identifier()
        );
    }

    if ranked.len() > limit {
        println!("   ... {} more", ranked.len() - limit);
    }
}
