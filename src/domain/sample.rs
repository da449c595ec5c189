use chrono::{Datelike, Month, NaiveDateTime};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;
use strum::{Display, EnumIter};

/// Hourly label format shared by every view that addresses a single row
pub const LABEL_FORMAT: &str = "%d %b %Y %H:00";

/// Operating regime of the electrodialysis stack, ordered by voltage band
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, Deserialize,
    serde::Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OperatingStatus {
    /// Voltage too low to drive the stack; only the controller idles
    #[strum(to_string = "stopped/low power")]
    Stopped,
    /// Partial load, separation scales with voltage
    #[strum(to_string = "running normal")]
    Normal,
    /// Full load with stable, high separation
    #[strum(to_string = "running optimal")]
    Optimal,
}

/// One simulated hour of the turbine + ED system
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    /// Current speed in m/s
    pub flow_rate: f64,
    /// Electrical output in W
    pub power_generated: f64,
    /// ED stack draw in W
    pub power_load: f64,
    /// Turbine efficiency in percent
    pub turbine_performance_ratio: f64,
    pub rotor_rpm: f64,
    pub generator_rpm: f64,
    /// Cell voltage in V
    pub voltage: f64,
    /// Salt separation quality in percent
    pub separation_pct: f64,
    pub status: OperatingStatus,
}

impl Sample {
    /// Power left over for storage once the ED stack is served (negative = deficit)
    pub fn power_surplus(&self) -> f64 {
        self.power_generated - self.power_load
    }

    /// Formatted hourly label, e.g. `01 Jan 2024 00:00`
    pub fn label(&self) -> String {
        self.timestamp.format(LABEL_FORMAT).to_string()
    }

    pub fn month(&self) -> Month {
        // month0() is always 0..=11
        Month::try_from(self.timestamp.month0() as u8 + 1).unwrap_or(Month::January)
    }

    /// Full English month name, e.g. `January`
    pub fn month_name(&self) -> &'static str {
        self.month().name()
    }

    pub fn day(&self) -> u32 {
        self.timestamp.day()
    }
}

impl Serialize for Sample {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Sample", 13)?;
        state.serialize_field("timestamp", &self.timestamp)?;
        state.serialize_field("label", &self.label())?;
        state.serialize_field("month", self.month_name())?;
        state.serialize_field("flow_rate", &self.flow_rate)?;
        state.serialize_field("power_generated", &self.power_generated)?;
        state.serialize_field("power_load", &self.power_load)?;
        state.serialize_field("power_surplus", &self.power_surplus())?;
        state.serialize_field("turbine_performance_ratio", &self.turbine_performance_ratio)?;
        state.serialize_field("voltage", &self.voltage)?;
        state.serialize_field("separation_pct", &self.separation_pct)?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("rotor_rpm", &self.rotor_rpm)?;
        state.serialize_field("generator_rpm", &self.generator_rpm)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_at(hour: u32) -> Sample {
        Sample {
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 7)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            flow_rate: 0.7,
            power_generated: 200.0,
            power_load: 120.0,
            turbine_performance_ratio: 40.0,
            rotor_rpm: 45.5,
            generator_rpm: 682.5,
            voltage: 13.6,
            separation_pct: 74.0,
            status: OperatingStatus::Normal,
        }
    }

    #[test]
    fn test_label_format() {
        assert_eq!(sample_at(9).label(), "07 Mar 2024 09:00");
        assert_eq!(sample_at(23).label(), "07 Mar 2024 23:00");
    }

    #[test]
    fn test_surplus_is_derived() {
        let mut s = sample_at(0);
        assert_eq!(s.power_surplus(), 80.0);
        s.power_load = 250.0;
        assert_eq!(s.power_surplus(), -50.0);
    }

    #[test]
    fn test_month_name() {
        assert_eq!(sample_at(0).month_name(), "March");
        assert_eq!(sample_at(0).day(), 7);
    }

    #[test]
    fn test_status_ordering_and_display() {
        assert!(OperatingStatus::Stopped < OperatingStatus::Normal);
        assert!(OperatingStatus::Normal < OperatingStatus::Optimal);
        assert_eq!(OperatingStatus::Stopped.to_string(), "stopped/low power");
        assert_eq!(OperatingStatus::Optimal.to_string(), "running optimal");
    }

    #[test]
    fn test_serialized_row_carries_surplus() {
        let json = serde_json::to_value(sample_at(5)).unwrap();
        assert_eq!(json["power_surplus"], 80.0);
        assert_eq!(json["label"], "07 Mar 2024 05:00");
        assert_eq!(json["status"], "normal");
    }
}
