//! `social` — command-line access to a social model SQLite store.
//!
//! # Usage
//!
//! ```
//! social resync
//! social seed --fixtures ./seed
//! social show user 1
//! social --store /tmp/demo.db count
//! ```
//!
//! The store path comes from `--store`, then the `SOCIAL_STORE_PATH`
//! environment variable, then `store_path` in the config file (`social.toml`
//! unless `--config` says otherwise), then `social.db`.

mod commands;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use social_core::entity::RecordId;
use social_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "social", version, about = "Social model store tool")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "social.toml")]
  config: PathBuf,

  /// SQLite database file; overrides the configured `store_path`.
  #[arg(long, value_name = "FILE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Drop and recreate every table. All data is lost.
  Resync,

  /// Bulk-load seed fixtures.
  Seed {
    /// Directory holding users.json, profiles.json, posts.json,
    /// comments.json and likes.json. Defaults to the bundled fixtures.
    #[arg(long, value_name = "DIR")]
    fixtures: Option<PathBuf>,

    /// Resync the schema before loading.
    #[arg(long)]
    resync: bool,
  },

  /// Print one record and its associations as JSON.
  Show { kind: Kind, id: RecordId },

  /// Print every record of a kind as JSON.
  List { kind: Kind },

  /// Print the number of records of every kind.
  Count,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
  User,
  Profile,
  Post,
  Comment,
  Like,
}

// ─── Config file ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CliConfig {
  #[serde(default = "default_store_path")]
  store_path: PathBuf,
}

fn default_store_path() -> PathBuf { PathBuf::from("social.db") }

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("SOCIAL"))
    .build()
    .context("failed to read config file")?;

  let cfg: CliConfig = settings
    .try_deserialize()
    .context("failed to deserialise CliConfig")?;

  let store_path = expand_tilde(cli.store.as_deref().unwrap_or(&cfg.store_path));

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  commands::run(&store, cli.command).await
}

/// Expand a leading `~/` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  match (path.strip_prefix("~"), std::env::var_os("HOME")) {
    (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
    _ => path.to_path_buf(),
  }
}
