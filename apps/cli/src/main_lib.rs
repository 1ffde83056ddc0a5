use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use oac_core::output::scan_covered_dates;
use oac_core::utils::gas_day_today;
use oac_core::{
    BackfillReport, BackfillRunner, CoveredDates, CsvAppendSink, CsvLoader, DayFetcher, GapLedger,
    IncrementalUpdater, InfopostDayFetcher, PipelineConfig, RecordStore, StoreSink,
    StoreUpsertClient, UpdateReport,
};
use oac_infopost::RetryPolicy;
use oac_storage_sqlite::OacRepository;
use oac_store_rest::{PostgrestStore, RestStoreSettings};

use crate::cli::{BackfillArgs, Cli, Commands, LoadCsvArgs, SourceArgs, StoreArgs, Target, UpdateArgs};
use crate::config::Settings;

pub fn init_tracing() {
    let log_format = std::env::var("OAC_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry.with(fmt::layer().with_target(false)).init();
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Backfill(args) => run_backfill(args, &cli.settings).await,
        Commands::Update(args) => run_update(args, &cli.settings).await,
        Commands::LoadCsv(args) => run_load_csv(args, &cli.settings).await,
    }
}

fn pipeline_config(source: Option<&SourceArgs>, store: &StoreArgs) -> anyhow::Result<PipelineConfig> {
    let mut config = PipelineConfig {
        batch_size: store.batch_size,
        table_name: store.table.clone(),
        ..PipelineConfig::default()
    };
    if let Some(source) = source {
        config.source.router_url = source.router_url.clone();
        config.source.landing_url = source.landing_url.clone();
        config.source.retry = RetryPolicy {
            max_attempts: source.max_attempts,
            ..config.source.retry.clone()
        };
        config.polite_delay = Duration::from_millis(source.polite_delay_ms);
    }
    config.validate()?;
    Ok(config)
}

/// Opens the store behind `target`. Credentials are checked here, before any fetch;
/// the settings file is only read for the rest target.
fn open_store(
    target: Target,
    store: &StoreArgs,
    settings_path: &Path,
) -> anyhow::Result<Arc<dyn RecordStore>> {
    match target {
        Target::Sqlite => {
            let db_path = store
                .db
                .to_str()
                .context("Database path is not valid UTF-8")?;
            let (pool, writer) = oac_storage_sqlite::open(db_path)?;
            tracing::info!("Using SQLite mirror at {}", db_path);
            Ok(Arc::new(OacRepository::new(pool, writer)))
        }
        Target::Rest => {
            let creds = Settings::load(settings_path)?.remote_credentials()?;
            let rest = PostgrestStore::new(RestStoreSettings {
                table: store.table.clone(),
                ..RestStoreSettings::new(creds.url, creds.key)
            })?;
            tracing::info!("Using REST table {}", rest.table_url());
            Ok(Arc::new(rest))
        }
        Target::Csv => bail!("This command needs a store target (sqlite or rest)"),
    }
}

fn ledger_for(path: Option<&Path>) -> GapLedger {
    match path {
        Some(path) => GapLedger::with_file(path),
        None => GapLedger::in_memory(),
    }
}

async fn run_backfill(args: BackfillArgs, settings: &Path) -> anyhow::Result<()> {
    let config = pipeline_config(Some(&args.source), &args.store)?;
    let start = args.start.unwrap_or(config.backfill_start);
    let end = args.end.unwrap_or_else(gas_day_today);
    if start > end {
        bail!("Start date {} is after end date {}", start, end);
    }

    let fetcher: Arc<dyn DayFetcher> = Arc::new(InfopostDayFetcher::new(config.source.clone())?);
    let runner = BackfillRunner::new(fetcher, &config);
    let mut ledger = ledger_for(args.ledger.as_deref());

    let report = match args.target {
        Target::Csv => {
            let cursor = scan_covered_dates(&args.output);
            if let Some(latest) = cursor.latest() {
                tracing::info!(
                    "Resuming {}: {} dates present, latest {}",
                    args.output.display(),
                    cursor.len(),
                    latest
                );
            }
            let mut sink = CsvAppendSink::open(&args.output)?;
            runner
                .run(start, end, &cursor, &mut sink, &mut ledger)
                .await
        }
        target => {
            let store = open_store(target, &args.store, settings)?;
            let cursor = match store.covered_dates(start, end).await {
                Ok(cursor) => cursor,
                Err(e) => {
                    tracing::warn!(
                        "Could not read covered dates from the store, fetching the whole range: {}",
                        e
                    );
                    CoveredDates::new()
                }
            };
            let mut sink = StoreSink::new(StoreUpsertClient::new(store, config.batch_size));
            runner
                .run(start, end, &cursor, &mut sink, &mut ledger)
                .await
        }
    };

    log_backfill(&report);
    Ok(())
}

fn log_backfill(report: &BackfillReport) {
    tracing::info!(
        "Backfill finished: {} requested, {} skipped, {} with data, {} rows written",
        report.dates_requested,
        report.dates_skipped,
        report.dates_with_data,
        report.rows_written
    );
    if !report.is_complete() {
        tracing::warn!(
            "{} dates failed and will be retried by the next run: {:?}",
            report.failed_dates.len(),
            report.failed_dates
        );
    }
}

async fn run_update(args: UpdateArgs, settings: &Path) -> anyhow::Result<()> {
    let mut config = pipeline_config(Some(&args.source), &args.store)?;
    config.lookback_days = args.lookback;
    let store = open_store(args.target, &args.store, settings)?;

    let fetcher: Arc<dyn DayFetcher> = Arc::new(InfopostDayFetcher::new(config.source.clone())?);
    let updater = IncrementalUpdater::new(
        fetcher,
        StoreUpsertClient::new(store, config.batch_size),
        &config,
    );
    let today = args.today.unwrap_or_else(gas_day_today);
    let mut ledger = ledger_for(args.ledger.as_deref());

    let report = updater.run(today, &mut ledger).await;
    log_update(&report);
    Ok(())
}

fn log_update(report: &UpdateReport) {
    tracing::info!(
        "Update finished: {} dates, {} with data, {} rows written, {} rows failed",
        report.window.len(),
        report.dates_with_data,
        report.rows_written,
        report.rows_failed
    );
    if !report.is_complete() {
        tracing::warn!("Dates with gaps: {:?}", report.failed_dates);
    }
}

async fn run_load_csv(args: LoadCsvArgs, settings: &Path) -> anyhow::Result<()> {
    let config = pipeline_config(None, &args.store)?;
    let store = open_store(args.target, &args.store, settings)?;
    let loader = CsvLoader::new(StoreUpsertClient::new(store, config.batch_size));

    let report = loader.load(&args.input).await?;
    tracing::info!(
        "Load finished: {} rows read, {} skipped, {} written, {} failed",
        report.rows_read,
        report.rows_skipped,
        report.written,
        report.failed
    );
    for failure in &report.failed_batches {
        tracing::warn!(
            "Batch {} ({} rows) failed: {}",
            failure.index,
            failure.rows,
            failure.reason
        );
    }
    Ok(())
}
