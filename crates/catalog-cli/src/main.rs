// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::PathBuf;

use anyhow::Result;
use catalog_client::CatalogClient;
use catalog_config::{load as load_config, ClientConfig};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(version, about = "Search and look up tracks, albums and artists", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Free text search.
    Search {
        kind: Kind,
        query: String,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Look up a single record by resource identifier.
    Lookup { kind: Kind, uri: String },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Track,
    Album,
    Artist,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.telemetry.log_level);
    info!(target: "config", path = ?cli.config, "configuration loaded");

    let client = build_client(&config.client)?;
    let output = run(&client, cli.command).await?;
    println!("{}", output);

    Ok(())
}

fn init_tracing(default_level: &str) {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn build_client(config: &ClientConfig) -> Result<CatalogClient> {
    let mut builder = CatalogClient::builder()
        .search_base_url(&config.search_base_url)
        .lookup_base_url(&config.lookup_base_url)
        .timeout(config.timeout());

    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }

    Ok(builder.build()?)
}

/// Run a command and render its result as pretty JSON.
async fn run(client: &CatalogClient, command: Commands) -> Result<String> {
    let output = match command {
        Commands::Search { kind, query, page } => {
            info!(target: "cli", ?kind, %query, page, "searching");
            match kind {
                Kind::Track => serde_json::to_string_pretty(&client.search_tracks(&query, page).await?)?,
                Kind::Album => serde_json::to_string_pretty(&client.search_albums(&query, page).await?)?,
                Kind::Artist => {
                    serde_json::to_string_pretty(&client.search_artists(&query, page).await?)?
                }
            }
        }
        Commands::Lookup { kind, uri } => {
            info!(target: "cli", ?kind, %uri, "looking up");
            match kind {
                Kind::Track => serde_json::to_string_pretty(&client.lookup_track(&uri).await?)?,
                Kind::Album => serde_json::to_string_pretty(&client.lookup_album(&uri).await?)?,
                Kind::Artist => serde_json::to_string_pretty(&client.lookup_artist(&uri).await?)?,
            }
        }
    };

    Ok(output)
}
