//! # View Selection & Aggregation
//!
//! Answers one dashboard interaction against the immutable [`Dataset`]:
//!
//! - **Hourly**: a single sample addressed by exact label or index, plus a trend window
//! - **Monthly**: one month grouped by day-of-month
//! - **Yearly**: the whole year grouped by month, in calendar order
//!
//! Every request is a pure computation; nothing in the dataset is mutated.

pub mod aggregate;
pub mod error;
pub mod insight;

pub use aggregate::{
    aggregate, aggregate_groups, summarize, AggregateRow, AggregateTable, AggregationMethod,
    EnergySplit, GroupBy, Summary,
};
pub use error::ViewError;
pub use insight::{FlowRegime, Insight};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::debug;
use validator::Validate;

use crate::domain::Sample;
use crate::simulation::Dataset;

/// Dashboard view modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[strum(to_string = "REAL-TIME (Hourly)")]
    Hourly,
    #[strum(to_string = "MONTHLY (Aggregate)")]
    Monthly,
    #[strum(to_string = "YEARLY (Report)")]
    Yearly,
}

/// How an hourly request addresses its row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HourSelector {
    /// Formatted label, matched verbatim
    Label(String),
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRequest {
    Hourly(HourSelector),
    Monthly {
        month: String,
        method: AggregationMethod,
    },
    Yearly {
        method: AggregationMethod,
    },
}

impl ViewRequest {
    pub fn mode(&self) -> ViewMode {
        match self {
            ViewRequest::Hourly(_) => ViewMode::Hourly,
            ViewRequest::Monthly { .. } => ViewMode::Monthly,
            ViewRequest::Yearly { .. } => ViewMode::Yearly,
        }
    }
}

/// One hour and its surrounding trend window
#[derive(Debug, Clone, Serialize)]
pub struct HourlyView<'a> {
    pub index: usize,
    pub sample: &'a Sample,
    pub window: &'a [Sample],
    pub insight: Insight,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateView {
    pub mode: ViewMode,
    /// Month filter for monthly views
    pub selection: Option<String>,
    pub summary: Summary,
    pub table: AggregateTable,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewOutput<'a> {
    Hourly(HourlyView<'a>),
    Aggregate(AggregateView),
}

/// Tunables for view selection
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ViewConfig {
    /// Hours before the selected row included in the trend window;
    /// the window ends the same distance after it (exclusive)
    #[validate(range(min = 1, max = 168))]
    pub window_radius_hours: usize,
    /// Row shown when no hour is requested
    pub default_hour_index: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            window_radius_hours: 12,
            default_hour_index: 4000,
        }
    }
}

/// Read-only view engine over one dataset
pub struct ViewSelector<'a> {
    dataset: &'a Dataset,
    config: ViewConfig,
}

impl<'a> ViewSelector<'a> {
    pub fn new(dataset: &'a Dataset, config: ViewConfig) -> Self {
        Self { dataset, config }
    }

    pub fn default_hour(&self) -> HourSelector {
        HourSelector::Index(self.config.default_hour_index)
    }

    pub fn select(&self, request: &ViewRequest) -> Result<ViewOutput<'a>, ViewError> {
        debug!(mode = %request.mode(), ?request, "computing view");
        match request {
            ViewRequest::Hourly(selector) => self.hourly(selector).map(ViewOutput::Hourly),
            ViewRequest::Monthly { month, method } => {
                self.monthly(month, *method).map(ViewOutput::Aggregate)
            }
            ViewRequest::Yearly { method } => self.yearly(*method).map(ViewOutput::Aggregate),
        }
    }

    pub fn hourly(&self, selector: &HourSelector) -> Result<HourlyView<'a>, ViewError> {
        let len = self.dataset.len();
        let index = match selector {
            HourSelector::Label(label) => self
                .dataset
                .index_of_label(label)
                .ok_or_else(|| ViewError::LabelNotFound(label.clone()))?,
            HourSelector::Index(index) => *index,
        };
        let sample = self
            .dataset
            .get(index)
            .ok_or(ViewError::IndexOutOfRange { index, len })?;

        let radius = self.config.window_radius_hours;
        let start = index.saturating_sub(radius);
        let end = index.saturating_add(radius).min(len);

        Ok(HourlyView {
            index,
            sample,
            window: &self.dataset.samples()[start..end],
            insight: Insight::for_sample(sample),
        })
    }

    pub fn monthly(
        &self,
        month: &str,
        method: AggregationMethod,
    ) -> Result<AggregateView, ViewError> {
        let rows: Vec<&Sample> = self
            .dataset
            .samples()
            .iter()
            .filter(|s| s.month_name() == month)
            .collect();

        let summary = summarize(&rows, method)
            .ok_or_else(|| ViewError::EmptySelection(format!("month '{month}'")))?;
        let table = aggregate_groups(rows, GroupBy::DayOfMonth, method);

        Ok(AggregateView {
            mode: ViewMode::Monthly,
            selection: Some(month.to_string()),
            summary,
            table,
        })
    }

    pub fn yearly(&self, method: AggregationMethod) -> Result<AggregateView, ViewError> {
        let rows: Vec<&Sample> = self.dataset.samples().iter().collect();

        let summary = summarize(&rows, method)
            .ok_or_else(|| ViewError::EmptySelection("empty dataset".to_string()))?;
        let table = aggregate_groups(rows, GroupBy::Month, method);

        Ok(AggregateView {
            mode: ViewMode::Yearly,
            selection: None,
            summary,
            table,
        })
    }
}
