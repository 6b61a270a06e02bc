use serde::{Deserialize, Serialize};

use super::defaults;

/// Metric-computation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Operations count above which a computation logs a warning.
    pub compute_operations_threshold: u64,
    /// Checking period applied when the caller does not pass one (days).
    pub default_checking_period_days: u32,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            compute_operations_threshold: defaults::DEFAULT_COMPUTE_OPERATIONS_THRESHOLD,
            default_checking_period_days: defaults::DEFAULT_CHECKING_PERIOD_DAYS,
        }
    }
}
