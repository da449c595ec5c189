//! Aggregation of hourly samples into headline summaries and grouped tables.

use chrono::Month;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::domain::{Metric, MetricValues, Sample};

/// Watt-hours per kilowatt-hour
const WH_PER_KWH: f64 = 1000.0;

/// Statistic applied per metric within each group
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum AggregationMethod {
    #[strum(to_string = "average", serialize = "avg", serialize = "mean")]
    Average,
    #[strum(to_string = "sum", serialize = "total")]
    Sum,
    #[strum(to_string = "max", serialize = "maximum", serialize = "peak")]
    Maximum,
}

impl AggregationMethod {
    /// Unit caption for the headline power figures
    pub fn unit_label(&self) -> &'static str {
        match self {
            AggregationMethod::Average => "Avg Watt",
            AggregationMethod::Sum => "kWh (Total)",
            AggregationMethod::Maximum => "Peak Watt",
        }
    }

    /// Statistic actually applied to `metric`; ratios and voltages are never summed
    pub fn effective_for(&self, metric: Metric) -> AggregationMethod {
        match self {
            AggregationMethod::Sum if !metric.is_cumulative() => AggregationMethod::Average,
            other => *other,
        }
    }
}

/// Grouping dimension of an aggregate table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum GroupBy {
    #[strum(to_string = "Day")]
    DayOfMonth,
    Month,
}

impl GroupBy {
    pub fn key(&self, sample: &Sample) -> u32 {
        match self {
            GroupBy::DayOfMonth => sample.day(),
            GroupBy::Month => sample.month().number_from_month(),
        }
    }

    pub fn label(&self, key: u32) -> String {
        match self {
            GroupBy::DayOfMonth => key.to_string(),
            GroupBy::Month => u8::try_from(key)
                .ok()
                .and_then(|n| Month::try_from(n).ok())
                .map(|m| m.name().to_string())
                .unwrap_or_else(|| key.to_string()),
        }
    }
}

/// Running totals for one group, single pass over its rows
#[derive(Debug, Default)]
struct Accumulator {
    hours: usize,
    sum: MetricValues,
    max: Option<MetricValues>,
}

impl Accumulator {
    fn push(&mut self, sample: &Sample) {
        self.hours += 1;
        self.sum = MetricValues::from_fn(|m| self.sum.get(m) + m.of(sample));
        self.max = Some(match self.max {
            Some(max) => MetricValues::from_fn(|m| max.get(m).max(m.of(sample))),
            None => MetricValues::from_fn(|m| m.of(sample)),
        });
    }

    fn finish(self, method: AggregationMethod) -> Option<MetricValues> {
        let max = self.max?;
        let n = self.hours as f64;
        Some(MetricValues::from_fn(|m| match method.effective_for(m) {
            AggregationMethod::Average => self.sum.get(m) / n,
            AggregationMethod::Sum => self.sum.get(m),
            AggregationMethod::Maximum => max.get(m),
        }))
    }
}

/// Aggregate raw values (W, not yet unit-converted). `None` when there are no rows.
pub fn aggregate<'a>(
    samples: impl IntoIterator<Item = &'a Sample>,
    method: AggregationMethod,
) -> Option<MetricValues> {
    let mut acc = Accumulator::default();
    for sample in samples {
        acc.push(sample);
    }
    acc.finish(method)
}

/// Convert summed power from Wh to kWh; other methods are left in W
pub fn to_display_units(values: MetricValues, method: AggregationMethod) -> MetricValues {
    match method {
        AggregationMethod::Sum => MetricValues::from_fn(|m| {
            if m.is_power() {
                values.get(m) / WH_PER_KWH
            } else {
                values.get(m)
            }
        }),
        _ => values,
    }
}

/// One row of a grouped table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub key: u32,
    pub label: String,
    pub hours: usize,
    pub values: MetricValues,
}

/// Grouped table, rows in ascending calendar order of the group key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateTable {
    pub group_by: GroupBy,
    pub rows: Vec<AggregateRow>,
}

pub fn aggregate_groups<'a>(
    samples: impl IntoIterator<Item = &'a Sample>,
    group_by: GroupBy,
    method: AggregationMethod,
) -> AggregateTable {
    let rows = samples
        .into_iter()
        .into_group_map_by(|s| group_by.key(s))
        .into_iter()
        .sorted_by_key(|(key, _)| *key)
        .filter_map(|(key, group)| {
            let hours = group.len();
            aggregate(group, method).map(|values| AggregateRow {
                key,
                label: group_by.label(key),
                hours,
                values: to_display_units(values, method),
            })
        })
        .collect();

    AggregateTable { group_by, rows }
}

/// How generated energy divides between the ED stack and storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergySplit {
    pub desalination: f64,
    pub surplus: f64,
}

/// Headline figures for an aggregate view, already in display units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub method: AggregationMethod,
    pub unit: &'static str,
    pub hours: usize,
    pub values: MetricValues,
    pub energy_split: EnergySplit,
}

pub fn summarize(samples: &[&Sample], method: AggregationMethod) -> Option<Summary> {
    let values = to_display_units(aggregate(samples.iter().copied(), method)?, method);
    Some(Summary {
        method,
        unit: method.unit_label(),
        hours: samples.len(),
        energy_split: EnergySplit {
            desalination: values.power_load,
            surplus: values.power_surplus,
        },
        values,
    })
}
