use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use super::Sample;

/// Numeric columns of the dataset that views aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Metric {
    FlowRate,
    PowerGenerated,
    PowerLoad,
    PowerSurplus,
    TurbinePerformanceRatio,
    Voltage,
    SeparationPct,
    RotorRpm,
    GeneratorRpm,
}

impl Metric {
    pub fn of(&self, sample: &Sample) -> f64 {
        match self {
            Metric::FlowRate => sample.flow_rate,
            Metric::PowerGenerated => sample.power_generated,
            Metric::PowerLoad => sample.power_load,
            Metric::PowerSurplus => sample.power_surplus(),
            Metric::TurbinePerformanceRatio => sample.turbine_performance_ratio,
            Metric::Voltage => sample.voltage,
            Metric::SeparationPct => sample.separation_pct,
            Metric::RotorRpm => sample.rotor_rpm,
            Metric::GeneratorRpm => sample.generator_rpm,
        }
    }

    /// Whether summing this metric over hours is physically meaningful.
    /// Ratios and voltages are always averaged instead.
    pub fn is_cumulative(&self) -> bool {
        !matches!(
            self,
            Metric::Voltage | Metric::SeparationPct | Metric::TurbinePerformanceRatio
        )
    }

    /// Power quantities, reported in W per hour (Wh when summed)
    pub fn is_power(&self) -> bool {
        matches!(
            self,
            Metric::PowerGenerated | Metric::PowerLoad | Metric::PowerSurplus
        )
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::FlowRate => "m/s",
            Metric::PowerGenerated | Metric::PowerLoad | Metric::PowerSurplus => "W",
            Metric::TurbinePerformanceRatio | Metric::SeparationPct => "%",
            Metric::Voltage => "V",
            Metric::RotorRpm | Metric::GeneratorRpm => "rpm",
        }
    }
}

/// One value per [`Metric`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricValues {
    pub flow_rate: f64,
    pub power_generated: f64,
    pub power_load: f64,
    pub power_surplus: f64,
    pub turbine_performance_ratio: f64,
    pub voltage: f64,
    pub separation_pct: f64,
    pub rotor_rpm: f64,
    pub generator_rpm: f64,
}

impl MetricValues {
    /// Build a record by evaluating `f` for every metric
    pub fn from_fn(mut f: impl FnMut(Metric) -> f64) -> Self {
        let mut values = Self::default();
        for metric in Metric::iter() {
            *values.get_mut(metric) = f(metric);
        }
        values
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::FlowRate => self.flow_rate,
            Metric::PowerGenerated => self.power_generated,
            Metric::PowerLoad => self.power_load,
            Metric::PowerSurplus => self.power_surplus,
            Metric::TurbinePerformanceRatio => self.turbine_performance_ratio,
            Metric::Voltage => self.voltage,
            Metric::SeparationPct => self.separation_pct,
            Metric::RotorRpm => self.rotor_rpm,
            Metric::GeneratorRpm => self.generator_rpm,
        }
    }

    fn get_mut(&mut self, metric: Metric) -> &mut f64 {
        match metric {
            Metric::FlowRate => &mut self.flow_rate,
            Metric::PowerGenerated => &mut self.power_generated,
            Metric::PowerLoad => &mut self.power_load,
            Metric::PowerSurplus => &mut self.power_surplus,
            Metric::TurbinePerformanceRatio => &mut self.turbine_performance_ratio,
            Metric::Voltage => &mut self.voltage,
            Metric::SeparationPct => &mut self.separation_pct,
            Metric::RotorRpm => &mut self.rotor_rpm,
            Metric::GeneratorRpm => &mut self.generator_rpm,
        }
    }
}
