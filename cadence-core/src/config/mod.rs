pub mod defaults;
pub mod metrics_config;
pub mod report_config;

pub use metrics_config::MetricsConfig;
pub use report_config::ReportConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{CadenceError, CadenceResult};

/// Top-level Cadence configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CadenceConfig {
    pub metrics: MetricsConfig,
    pub report: ReportConfig,
}

impl CadenceConfig {
    /// Parse a configuration from TOML text. Missing sections and fields
    /// fall back to defaults.
    pub fn from_toml_str(text: &str) -> CadenceResult<Self> {
        toml::from_str(text).map_err(|e| CadenceError::Config {
            message: e.to_string(),
        })
    }
}
