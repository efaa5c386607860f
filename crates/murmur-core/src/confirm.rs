use std::time::Duration;

/// How long a destructive-confirmation prompt stays answerable.
pub const CONFIRM_TIMEOUT: Duration = Duration::from_secs(15);

/// Terminal outcome of a confirmation prompt. The surface's collector
/// accepts at most one qualifying click from the invoking user and
/// yields `TimedOut` otherwise, so the three outcomes are mutually
/// exclusive by construction; no second event is ever observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Confirmed,
    Cancelled,
    TimedOut,
}
