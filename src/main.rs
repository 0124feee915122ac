//! pokedex CLI - fetch Pokémon collections from the public PokeAPI.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use pokedex::{
    load_type_catalog, render, CollectionFetcher, Config, CountChoice, FetchSession,
    PokeApiClient,
};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(version)]
#[command(about = "Fetch Pokémon collections from the public PokeAPI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "pokedex.toml")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available type tags
    Types,

    /// Fetch a collection (random sample, or members of one type)
    Fetch {
        /// Type tag to filter by (omit for a random sample)
        #[arg(short, long)]
        type_tag: Option<String>,

        /// How many Pokémon to fetch: 4, 6, 10 or all
        #[arg(short = 'n', long, default_value = "4")]
        count: CountChoice,
    },

    /// Validate configuration file
    Validate,

    /// Show example configuration
    Example,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

fn print_example_config() {
    let example = r#"# pokedex configuration file

[api]
base_url = "https://pokeapi.co/api/v2"
timeout_secs = 30

[catalog]
# Reserved tags never shown to the user
excluded_types = ["shadow", "unknown"]

[fetch]
# Valid Pokémon id domain is [1, max_pokemon_id]
max_pokemon_id = 898
"#;
    println!("{example}");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Example => {
            print_example_config();
            Ok(())
        }

        Commands::Validate => {
            let config = Config::from_file(&cli.config)
                .with_context(|| format!("Failed to load config from {:?}", cli.config))?;

            info!("Configuration is valid");
            info!("  Base URL: {}", config.api.base_url);
            info!("  Timeout:  {}s", config.api.timeout_secs);
            info!("  Excluded: {}", config.catalog.excluded_types.join(", "));
            info!("  Id range: 1..={}", config.fetch.max_pokemon_id);
            Ok(())
        }

        Commands::Types => {
            let config = Config::from_file_or_default(&cli.config)?;
            let client = PokeApiClient::new(&config.api)?;

            let catalog = load_type_catalog(&client, &config.catalog.excluded_types)
                .await
                .context("Failed to load type catalog")?;

            print!("{}", render::render_catalog(&catalog));
            Ok(())
        }

        Commands::Fetch { type_tag, count } => {
            let config = Config::from_file_or_default(&cli.config)?;
            let client = PokeApiClient::new(&config.api)?;
            let fetcher = CollectionFetcher::new(client.clone(), config.fetch.max_pokemon_id);

            // Catalog failure is non-fatal: the random path works without it.
            let catalog = match load_type_catalog(&client, &config.catalog.excluded_types).await {
                Ok(catalog) => catalog,
                Err(e) => {
                    warn!(error = %e, "Failed to load type catalog, continuing without it");
                    Vec::new()
                }
            };

            if let Some(tag) = &type_tag {
                if !catalog.is_empty() && !catalog.iter().any(|t| t == tag) {
                    warn!(type_tag = %tag, "Type tag not in the catalog");
                }
            }

            let mut session = FetchSession::new();
            session.select_type(type_tag);
            session.select_count(count);

            let pb = ProgressBar::new(0);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("##-"),
            );
            pb.set_message("fetching");

            session.run_cycle_with_progress(&fetcher, &pb).await;
            pb.finish_and_clear();

            print!("{}", render::render_session(&session));

            if session.status().error_message().is_some() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
