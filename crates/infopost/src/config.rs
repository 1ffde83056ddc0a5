//! Endpoint and request settings.

use std::time::Duration;

/// Router endpoint used by the infopost grid pages.
pub const DEFAULT_ROUTER_URL: &str =
    "https://ioly.iroquois.com/infopost/classes/common/RouterClass.php";

/// Landing page visited once to pick up the session cookie.
pub const DEFAULT_LANDING_URL: &str = "https://ioly.iroquois.com/infopost/";

/// Class selector for the Operationally Available grid.
pub const OAC_CLASS_NAME: &str = "OperationallyAvailableClass";

/// Operation selector for the Operationally Available grid.
pub const OAC_OPERATION_NAME: &str = "getGrdCpctyOperAvail";

/// Browser user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Retry budget and backoff for transient failures.
///
/// After failed attempt `n` (1-based) the client waits `base_delay * 2^n`
/// before the next one. No wait follows the final attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per date, including the first.
    pub max_attempts: u32,
    /// Multiplier for the exponential backoff.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.min(16));
        self.base_delay.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Settings for talking to the infopost router.
#[derive(Clone, Debug)]
pub struct InfopostConfig {
    pub router_url: String,
    pub landing_url: String,
    /// Plain (not yet encoded) `class` selector.
    pub class_name: String,
    /// Plain (not yet encoded) `type` selector.
    pub operation_name: String,
    /// Scheduling cycle requested, e.g. "Timely".
    pub cycle: String,
    /// Location scope, e.g. "All".
    pub location: String,
    /// Wall-clock time appended to the gas date in the payload.
    pub search_time: String,
    /// Value of the `limit` pagination parameter.
    pub page_limit: u32,
    pub request_timeout: Duration,
    pub warm_up_timeout: Duration,
    pub user_agent: String,
    pub retry: RetryPolicy,
}

impl Default for InfopostConfig {
    fn default() -> Self {
        Self {
            router_url: DEFAULT_ROUTER_URL.to_string(),
            landing_url: DEFAULT_LANDING_URL.to_string(),
            class_name: OAC_CLASS_NAME.to_string(),
            operation_name: OAC_OPERATION_NAME.to_string(),
            cycle: "Timely".to_string(),
            location: "All".to_string(),
            search_time: "09:00 AM".to_string(),
            // ~50 locations per day
            page_limit: 500,
            request_timeout: Duration::from_secs(30),
            warm_up_timeout: Duration::from_secs(15),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}
