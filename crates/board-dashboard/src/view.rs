use board_core::{AggregateResult, AggregateStatus, ErrorInfo, Outcome};
use board_model::{CoffeeBrand, CoffeeConsumption, WeeklyMood};
use serde::Serialize;

use crate::{
    charts::{self, Chart},
    dataset::{Dataset, DatasetKind},
};

/// Datasets that loaded; a slot is `None` when its fetch failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub brands: Option<Vec<CoffeeBrand>>,
    pub mood_trend: Option<Vec<WeeklyMood>>,
    pub consumption: Option<CoffeeConsumption>,
}

impl DashboardData {
    fn insert(&mut self, dataset: Dataset) {
        match dataset {
            Dataset::Brands(v) => self.brands = Some(v),
            Dataset::MoodTrend(v) => self.mood_trend = Some(v),
            Dataset::Consumption(v) => self.consumption = Some(v),
        }
    }

    /// Charts for every loaded dataset, in tab order.
    pub fn charts(&self) -> Vec<Chart> {
        let mut out = Vec::new();
        if let Some(brands) = &self.brands {
            out.push(charts::brand_bar(brands));
            out.push(charts::brand_donut(brands));
        }
        if let Some(mood) = &self.mood_trend {
            out.push(charts::mood_stacked_bar(mood));
            out.push(charts::mood_stacked_area(mood));
        }
        if let Some(consumption) = &self.consumption {
            out.push(charts::consumption_lines(consumption));
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetFailure {
    pub dataset: DatasetKind,
    pub error: ErrorInfo,
}

/// What the dashboard shows once a load has settled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum DashboardView {
    /// Every dataset loaded.
    Ready { data: DashboardData },
    /// Some datasets failed; the rest are shown with a non-blocking warning.
    Degraded {
        data: DashboardData,
        warning: String,
        failures: Vec<DatasetFailure>,
    },
    /// Nothing loaded; a single blocking message replaces the dashboard.
    Failed {
        message: String,
        failures: Vec<DatasetFailure>,
    },
}

impl DashboardView {
    /// Map a settled batch to a view. `kinds[i]` names the dataset of `outcomes[i]`.
    pub(crate) fn from_result(kinds: &[DatasetKind], result: AggregateResult<Dataset>) -> Self {
        let status = result.status();
        let total = result.len();
        let failed = result.failed_count();

        let mut data = DashboardData::default();
        let mut failures = Vec::new();
        for (kind, outcome) in kinds.iter().zip(result.into_outcomes()) {
            match outcome {
                Outcome::Fulfilled { value } => data.insert(value),
                Outcome::Rejected { error } => failures.push(DatasetFailure {
                    dataset: *kind,
                    error,
                }),
            }
        }

        match status {
            AggregateStatus::AllOk => DashboardView::Ready { data },
            AggregateStatus::Partial => DashboardView::Degraded {
                data,
                warning: format!("{failed} of {total} datasets failed to load"),
                failures,
            },
            AggregateStatus::AllFailed => {
                let reason = failures
                    .first()
                    .map(|f| f.error.message.as_str())
                    .unwrap_or("unknown");
                DashboardView::Failed {
                    message: format!("failed to load the dashboard: {reason}"),
                    failures,
                }
            }
        }
    }

    pub fn data(&self) -> Option<&DashboardData> {
        match self {
            DashboardView::Ready { data } | DashboardView::Degraded { data, .. } => Some(data),
            DashboardView::Failed { .. } => None,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            DashboardView::Degraded { warning, .. } => Some(warning),
            _ => None,
        }
    }

    pub fn failures(&self) -> &[DatasetFailure] {
        match self {
            DashboardView::Ready { .. } => &[],
            DashboardView::Degraded { failures, .. } | DashboardView::Failed { failures, .. } => {
                failures
            }
        }
    }
}
