//! Error type for the revenue tracker.

/// Errors produced when analyzing tracker inputs
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    /// Every channel has zero bookings, so there is nothing to rank
    #[error("Please enter at least one booking to analyze.")]
    EmptyInput,
}
