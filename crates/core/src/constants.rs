/// Canonical name of the gas day column, in the store and the durable CSV.
pub const GAS_DATE_COLUMN: &str = "gas_date";

/// Columns forming the natural key, in the order sent as the upsert conflict target.
pub const CONFLICT_COLUMNS: [&str; 4] = ["gas_date", "loc", "loc_purp_desc", "flow_ind_desc"];

/// Store table holding OAC postings.
pub const DEFAULT_TABLE_NAME: &str = "iroquois_oac";

/// Durable append-only output of the backfill.
pub const DEFAULT_OUTPUT_FILE: &str = "iroquois_daily_flows_2025_to_present.csv";

/// First gas day requested by a backfill when no start is given.
pub const DEFAULT_BACKFILL_START: (i32, u32, u32) = (2010, 1, 1);

/// Pause between consecutive date fetches, in milliseconds.
pub const DEFAULT_POLITE_DELAY_MS: u64 = 500;

/// Maximum rows per upsert request.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Dates re-fetched by the incremental update, today included.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 3;

/// Date format of the `gas_date` column.
pub const GAS_DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns the conflict target as sent to the store (`gas_date,loc,...`).
pub fn conflict_target() -> String {
    CONFLICT_COLUMNS.join(",")
}
