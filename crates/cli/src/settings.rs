//! Command-line / environment configuration.

use std::path::PathBuf;

use clap::Parser;

use stockroom_observability::LogFormat;

/// Load an inventory seed, process its orders and print the resulting report.
#[derive(Debug, Clone, Parser)]
#[command(name = "stockroom", version)]
pub struct Settings {
    /// Seed file with products, discounts and order requests (JSON).
    #[arg(long, env = "STOCKROOM_SEED", default_value = "demos/seed.json")]
    pub seed: PathBuf,

    /// Write the final inventory snapshot to this path (JSON).
    #[arg(long, env = "STOCKROOM_SNAPSHOT_OUT")]
    pub snapshot_out: Option<PathBuf>,

    /// Log output format: `json` or `text`.
    #[arg(long, env = "STOCKROOM_LOG_FORMAT", default_value = "json")]
    pub log_format: LogFormat,
}
