pub mod data_point;
pub mod environment;
pub mod statistics;
pub mod time_window;

pub use data_point::{DailyDataPoint, MetricDataPoint};
pub use environment::Environment;
pub use statistics::{DoraMetricKind, EnvironmentStatistics};
pub use time_window::TimeWindow;
