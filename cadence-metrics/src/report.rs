//! Daily-report parameter validation and the closed-enum DORA graph
//! dispatch consumed by the dashboard.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde::Deserialize;

use cadence_core::config::{CadenceConfig, ReportConfig};
use cadence_core::errors::{CadenceResult, ReportError};
use cadence_core::models::{DailyDataPoint, DoraMetricKind, Environment};
use cadence_core::traits::IEventStore;

use crate::computer::MetricComputer;
use crate::dora::{
    ChangeFailureRateComputer, DeploymentFrequencyComputer, LeadTimeComputer,
    TimeToRestoreComputer,
};

/// Raw, unvalidated report parameters as they arrive from a caller.
/// Absent fields fall back to the configured defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyReportRequest {
    pub checking_period_days: Option<u32>,
    pub period_start_date: Option<NaiveDate>,
    pub period_end_date: Option<NaiveDate>,
}

/// Validated report parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyReportParams {
    pub checking_period: Duration,
    pub period_start_date: NaiveDate,
    pub period_end_date: NaiveDate,
}

impl DailyReportRequest {
    /// Resolve defaults and validate. Rejected requests never reach a
    /// computer.
    pub fn validate(
        &self,
        config: &ReportConfig,
        today: NaiveDate,
    ) -> Result<DailyReportParams, ReportError> {
        let checking_period_days = self
            .checking_period_days
            .unwrap_or(config.default_checking_period_days);
        if checking_period_days < 1 {
            return Err(ReportError::InvalidCheckingPeriod {
                days: checking_period_days,
            });
        }

        let period_end_date = self.period_end_date.unwrap_or(today);
        let period_start_date = self
            .period_start_date
            .unwrap_or_else(|| period_end_date - Duration::days(config.default_period_days as i64));

        if period_start_date > period_end_date {
            return Err(ReportError::PeriodEndsBeforeStart);
        }
        let span_days = (period_end_date - period_start_date).num_days();
        if span_days > config.max_period_days as i64 {
            return Err(ReportError::PeriodTooLong {
                days: span_days,
                max: config.max_period_days,
            });
        }
        if period_end_date > today {
            return Err(ReportError::PeriodEndInFuture);
        }

        Ok(DailyReportParams {
            checking_period: Duration::days(checking_period_days as i64),
            period_start_date,
            period_end_date,
        })
    }
}

/// Compute the daily chart for one DORA metric.
///
/// The metric set is fixed, so dispatch is a closed enum. Values are
/// unified to `Option<f64>` for the `[{date, value}]` JSON contract:
/// lead time's whole seconds widen losslessly enough for charting, and
/// time-to-restore's `0` sentinel passes through as a number.
pub fn compute_daily_dora_graph(
    kind: DoraMetricKind,
    store: Arc<dyn IEventStore>,
    environment: Environment,
    params: &DailyReportParams,
    config: &CadenceConfig,
) -> CadenceResult<Vec<DailyDataPoint<Option<f64>>>> {
    let tz = config.report.timezone();
    let threshold = config.metrics.compute_operations_threshold;
    let start = params.period_start_date;
    let end = params.period_end_date;

    match kind {
        DoraMetricKind::LeadTime => {
            let computer = LeadTimeComputer::new(store, environment, params.checking_period)
                .with_operations_threshold(threshold);
            Ok(computer
                .daily_graph_data(start, end, tz)?
                .into_iter()
                .map(|p| DailyDataPoint::new(p.date, p.value.map(|v| v as f64)))
                .collect())
        }
        DoraMetricKind::DeploymentFrequency => {
            let computer =
                DeploymentFrequencyComputer::new(store, environment, params.checking_period)
                    .with_operations_threshold(threshold);
            computer.daily_graph_data(start, end, tz)
        }
        DoraMetricKind::ChangeFailureRate => {
            let computer =
                ChangeFailureRateComputer::new(store, environment, params.checking_period)
                    .with_operations_threshold(threshold);
            computer.daily_graph_data(start, end, tz)
        }
        DoraMetricKind::TimeToRestore => {
            let computer = TimeToRestoreComputer::new(store, environment, params.checking_period)
                .with_operations_threshold(threshold);
            Ok(computer
                .daily_graph_data(start, end, tz)?
                .into_iter()
                .map(|p| DailyDataPoint::new(p.date, Some(p.value as f64)))
                .collect())
        }
    }
}
