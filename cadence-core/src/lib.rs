//! # cadence-core
//!
//! Foundation crate for the Cadence delivery-metrics engine.
//! Defines all event types, models, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CadenceConfig;
pub use errors::{CadenceError, CadenceResult};
pub use events::{
    ChangeListEvent, CoverageEvent, CoverageKind, DeployStatus, DeploymentEvent, EnvironmentId,
    ProjectId, ServiceStatus, ServiceStatusEvent,
};
pub use models::{DailyDataPoint, Environment, MetricDataPoint, TimeWindow};
pub use traits::IEventStore;
