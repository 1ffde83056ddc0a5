use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// Timezone gas days are posted in.
/// Iroquois publishes on Eastern time, so "today" is derived there rather
/// than from the host clock's zone.
pub const DEFAULT_GAS_DAY_TZ: Tz = chrono_tz::America::New_York;

/// Converts a UTC instant to the gas day it falls on in the given timezone.
pub fn gas_day_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Current gas day in the default timezone.
pub fn gas_day_today() -> NaiveDate {
    gas_day_from_utc(Utc::now(), DEFAULT_GAS_DAY_TZ)
}

/// Every day from `start` to `end`, both inclusive. Empty when `start > end`.
pub fn get_days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(current);
        if let Some(next) = current.succ_opt() {
            current = next;
        } else {
            break;
        }
    }
    days
}

/// The `days` most recent dates ending at `today`, oldest first.
/// At least `today` itself is always returned.
pub fn trailing_window(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    let span = i64::from(days.max(1)) - 1;
    get_days_between(today - Duration::days(span), today)
}
