//! Command-line definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use oac_core::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_LOOKBACK_DAYS, DEFAULT_OUTPUT_FILE, DEFAULT_POLITE_DELAY_MS,
    DEFAULT_TABLE_NAME,
};
use oac_infopost::config::{DEFAULT_LANDING_URL, DEFAULT_ROUTER_URL};

use crate::config::DEFAULT_SETTINGS_FILE;

pub const DEFAULT_DB_PATH: &str = "iroquois_oac.db";

#[derive(Parser)]
#[command(name = "oac")]
#[command(about = "Fetch Iroquois Operationally Available Capacity postings")]
#[command(version)]
pub struct Cli {
    /// Settings file holding SUPABASE_URL and SUPABASE_KEY
    #[arg(long, global = true, env = "OAC_SETTINGS", default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch every gas day in a range that is not yet written
    Backfill(BackfillArgs),
    /// Re-fetch the most recent gas days and upsert them
    Update(UpdateArgs),
    /// Load the durable CSV into a store
    LoadCsv(LoadCsvArgs),
}

/// Where records are written.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Target {
    /// The durable append-only CSV file
    Csv,
    /// A local SQLite mirror
    Sqlite,
    /// The PostgREST (Supabase) table
    Rest,
}

#[derive(Args, Clone)]
pub struct SourceArgs {
    /// Router endpoint URL
    #[arg(long, env = "OAC_ROUTER_URL", default_value = DEFAULT_ROUTER_URL)]
    pub router_url: String,

    /// Landing page visited once for the session cookie
    #[arg(long, env = "OAC_LANDING_URL", default_value = DEFAULT_LANDING_URL)]
    pub landing_url: String,

    /// Attempts per date before giving up
    #[arg(long, default_value_t = 4)]
    pub max_attempts: u32,

    /// Pause between consecutive dates, in milliseconds
    #[arg(long, default_value_t = DEFAULT_POLITE_DELAY_MS)]
    pub polite_delay_ms: u64,
}

#[derive(Args, Clone)]
pub struct StoreArgs {
    /// SQLite file used by the sqlite target
    #[arg(long, env = "OAC_DB_PATH", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Table name used by the rest target
    #[arg(long, default_value = DEFAULT_TABLE_NAME)]
    pub table: String,

    /// Rows per upsert request
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,
}

#[derive(Args)]
pub struct BackfillArgs {
    /// First gas day (YYYY-MM-DD); defaults to 2010-01-01
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last gas day (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Durable CSV written by the csv target
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = Target::Csv)]
    pub target: Target,

    /// CSV file recording dates that failed
    #[arg(long, env = "OAC_LEDGER")]
    pub ledger: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Number of gas days to refresh, today included
    #[arg(long, default_value_t = DEFAULT_LOOKBACK_DAYS)]
    pub lookback: u32,

    /// Override today's gas day (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    #[arg(long, value_enum, default_value_t = Target::Rest)]
    pub target: Target,

    /// CSV file recording dates that failed
    #[arg(long, env = "OAC_LEDGER")]
    pub ledger: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args)]
pub struct LoadCsvArgs {
    /// Durable CSV to load
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub input: PathBuf,

    #[arg(long, value_enum, default_value_t = Target::Rest)]
    pub target: Target,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_backfill_defaults() {
        let cli = Cli::parse_from(["oac", "backfill", "--start", "2025-06-01"]);
        match cli.command {
            Commands::Backfill(args) => {
                assert_eq!(args.start, NaiveDate::from_ymd_opt(2025, 6, 1));
                assert_eq!(args.end, None);
                assert_eq!(args.target, Target::Csv);
                assert_eq!(args.source.polite_delay_ms, 500);
                assert_eq!(args.store.batch_size, 500);
            }
            _ => panic!("expected backfill"),
        }
    }

    #[test]
    fn test_update_target_and_lookback() {
        let cli = Cli::parse_from(["oac", "update", "--lookback", "5", "--target", "sqlite"]);
        match cli.command {
            Commands::Update(args) => {
                assert_eq!(args.lookback, 5);
                assert_eq!(args.target, Target::Sqlite);
            }
            _ => panic!("expected update"),
        }
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        assert!(Cli::try_parse_from(["oac", "backfill", "--start", "06/01/2025"]).is_err());
    }
}
