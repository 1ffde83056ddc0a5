//! Fetch module - one gas day of postings per call.

mod fetch_model;
mod fetch_traits;
mod infopost_fetcher;

pub use fetch_model::DayOutcome;
pub use fetch_traits::DayFetcher;
pub use infopost_fetcher::InfopostDayFetcher;
