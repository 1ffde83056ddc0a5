/// Classification for retry policy.
///
/// Used by the client to decide whether a failed request is attempted again.
///
/// | Class | Retry? |
/// |-------|--------|
/// | `Never` | No, the date is given up immediately |
/// | `WithBackoff` | Yes, after an exponential delay, until the attempt budget runs out |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - malformed body, bad request, or terminal failure.
    Never,

    /// Transport failure (timeout, connection error, HTTP status).
    WithBackoff,
}
