use crate::records::OacRecord;

/// Result of fetching one gas day.
#[derive(Debug, Clone, PartialEq)]
pub enum DayOutcome {
    /// The day has postings. Never empty.
    Records(Vec<OacRecord>),
    /// The request succeeded but nothing was posted.
    NoData,
    /// The day could not be fetched; `reason` says why.
    Failed { reason: String },
}

impl DayOutcome {
    /// Builds `Records` or `NoData` depending on whether anything was posted.
    pub fn from_records(records: Vec<OacRecord>) -> Self {
        if records.is_empty() {
            DayOutcome::NoData
        } else {
            DayOutcome::Records(records)
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DayOutcome::Failed { .. })
    }

    /// The records, or an empty list for `NoData` and `Failed`.
    pub fn into_records(self) -> Vec<OacRecord> {
        match self {
            DayOutcome::Records(records) => records,
            DayOutcome::NoData | DayOutcome::Failed { .. } => Vec::new(),
        }
    }
}
