use std::time::Duration;

/// On the very first windowed pass the engine reaches this many retention
/// windows below the head, so a node that ran without pruning for a while
/// catches up on the backlog.
pub const BOOTSTRAP_WINDOW_FACTOR: u64 = 3;

#[derive(Clone, Copy, Debug)]
pub struct VacuumConfig {
    /// Number of most-recent blocks whose state is never pruned.
    pub retention_depth: u64,
    /// Period of the windowed (structural) pass.
    pub diff_interval: Duration,
    /// Period of the full namespace sweep. Clamped so the sweep runs strictly
    /// less often than the windowed pass; the sweep's blast radius is far
    /// larger.
    pub full_interval: Duration,
}

impl VacuumConfig {
    pub const DEFAULT_RETENTION_DEPTH: u64 = 65536;
    pub const DEFAULT_DIFF_INTERVAL: Duration = Duration::from_secs(5 * 60);
    pub const DEFAULT_FULL_INTERVAL: Duration = Duration::from_secs(3 * 60 * 60);

    pub fn new(retention_depth: u64, diff_interval: Duration, full_interval: Duration) -> Self {
        Self { retention_depth, diff_interval, full_interval: full_interval.max(diff_interval.saturating_mul(2)) }
    }
}

impl Default for VacuumConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RETENTION_DEPTH, Self::DEFAULT_DIFF_INTERVAL, Self::DEFAULT_FULL_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_interval_clamp() {
        let config = VacuumConfig::new(100, Duration::from_secs(60), Duration::from_secs(1));
        assert_eq!(config.full_interval, Duration::from_secs(120));

        // Equal periods still get separated: the sweep must tick strictly
        // less often than the windowed pass
        let config = VacuumConfig::new(100, Duration::from_secs(60), Duration::from_secs(60));
        assert_eq!(config.full_interval, Duration::from_secs(120));

        // A config already satisfying the ordering is left untouched
        let config = VacuumConfig::default();
        assert_eq!(config.full_interval, VacuumConfig::DEFAULT_FULL_INTERVAL);
    }
}
