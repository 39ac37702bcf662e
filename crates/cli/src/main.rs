//! CLI binary to run one aggregation pass over a local fleet file.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use fleet_aggregator::{Aggregator, AggregatorConfig, DEFAULT_TARGET_NAME};
use fleet_members_memory::MemoryMemberSource;
use fleet_status_store::StatusStore;
use fleet_status_store_memory::MemoryStatusStore;
use tracing::info;

/// CLI-specific error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Aggregation error
    #[error(transparent)]
    Aggregator(#[from] fleet_aggregator::Error),

    /// Fleet file error
    #[error(transparent)]
    Members(#[from] fleet_members_memory::Error),

    /// Status store error
    #[error(transparent)]
    Store(#[from] fleet_status_store_memory::Error),

    /// Output serialization error
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file describing the fleet members
    #[arg(long, env = "FLEET_FILE")]
    fleet_file: PathBuf,

    /// Name of the composite target to write
    #[arg(long, default_value = DEFAULT_TARGET_NAME, env = "FLEET_TARGET_NAME")]
    target_name: String,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let members = MemoryMemberSource::from_fleet_file(&args.fleet_file)?;
    let store = Arc::new(MemoryStatusStore::with_target(args.target_name.clone()));

    let config = AggregatorConfig {
        target_name: args.target_name.clone(),
        ..AggregatorConfig::default()
    };
    let aggregator = Aggregator::with_config(Arc::new(members), store.clone(), config);

    let verdict = aggregator.reconcile().await?;
    info!("Verdict for {}: {:?}", args.target_name, verdict);

    let target = store.get(&args.target_name).await?;
    println!("{}", serde_json::to_string_pretty(&target)?);

    Ok(())
}
