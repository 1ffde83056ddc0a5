//! Which gas days are already durably written.

use std::collections::BTreeSet;

use chrono::NaiveDate;

/// Answers whether a date still needs fetching.
pub trait FetchCursor: Send + Sync {
    fn is_covered(&self, date: NaiveDate) -> bool;

    /// Dates from `candidates` that are not covered, in the given order.
    fn pending(&self, candidates: &[NaiveDate]) -> Vec<NaiveDate> {
        candidates
            .iter()
            .copied()
            .filter(|date| !self.is_covered(*date))
            .collect()
    }
}

/// In-memory set of covered dates, built from a CSV scan, a store query or by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoveredDates {
    dates: BTreeSet<NaiveDate>,
}

impl CoveredDates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn latest(&self) -> Option<NaiveDate> {
        self.dates.iter().next_back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }
}

impl FetchCursor for CoveredDates {
    fn is_covered(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

impl FromIterator<NaiveDate> for CoveredDates {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl Extend<NaiveDate> for CoveredDates {
    fn extend<I: IntoIterator<Item = NaiveDate>>(&mut self, iter: I) {
        self.dates.extend(iter);
    }
}
