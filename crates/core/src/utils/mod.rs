pub mod time_utils;

pub use time_utils::{gas_day_from_utc, gas_day_today, get_days_between, trailing_window};
