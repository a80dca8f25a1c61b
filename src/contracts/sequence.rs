/// Generates monotonically increasing sequence numbers for one key.
///
/// # Invariants
/// - `seq[n+1] == seq[n] + 1` for every completed call, across all callers
/// - No two callers ever observe the same value
/// - Lock-free in hot path
pub trait SequenceGenerator: Send + Sync {
    /// Increments the counter and returns the new value.
    fn next(&self) -> u64;

    /// Returns the current sequence number without incrementing.
    fn current(&self) -> u64;
}
