//! Operator-facing analysis of a single hour: flow regime, turbine remark,
//! gauge thresholds and a one-paragraph narrative.

use serde::Serialize;
use strum::Display;

use crate::domain::Sample;

/// Turbine PR above this is shown as healthy, in percent
pub const HEALTHY_PERFORMANCE_RATIO: f64 = 30.0;

/// Separation gauge target line, in percent
pub const SEPARATION_TARGET_PCT: f64 = 95.0;

/// Current-speed regime as seen by the turbine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowRegime {
    #[strum(to_string = "very low (critical)")]
    Critical,
    #[strum(to_string = "moderate (stable)")]
    Stable,
    #[strum(to_string = "high (optimal)")]
    High,
}

impl FlowRegime {
    pub fn from_flow(flow_rate: f64) -> Self {
        if flow_rate < 0.2 {
            FlowRegime::Critical
        } else if flow_rate < 0.6 {
            FlowRegime::Stable
        } else {
            FlowRegime::High
        }
    }

    pub fn turbine_remark(&self) -> &'static str {
        match self {
            FlowRegime::Critical => "Turbine nearly stopped, low efficiency.",
            FlowRegime::Stable => "Turbine operating in the moderate/normal efficiency zone.",
            FlowRegime::High => "Turbine spinning at full speed, driving optimal efficiency.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub flow_regime: FlowRegime,
    pub turbine_remark: &'static str,
    pub performance_healthy: bool,
    pub separation_on_target: bool,
    pub narrative: String,
}

impl Insight {
    pub fn for_sample(sample: &Sample) -> Self {
        let flow_regime = FlowRegime::from_flow(sample.flow_rate);
        let turbine_remark = flow_regime.turbine_remark();

        let narrative = format!(
            "At {}, the current is {:.2} m/s ({}). {} \
             The generator delivers {:.1} V, which puts the stack in '{}' mode. \
             Salt separation reaches {:.2}% with a surplus of {:.0} W for the battery.",
            sample.label(),
            sample.flow_rate,
            flow_regime,
            turbine_remark,
            sample.voltage,
            sample.status,
            sample.separation_pct,
            sample.power_surplus(),
        );

        Self {
            flow_regime,
            turbine_remark,
            performance_healthy: sample.turbine_performance_ratio > HEALTHY_PERFORMANCE_RATIO,
            separation_on_target: sample.separation_pct > SEPARATION_TARGET_PCT,
            narrative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OperatingStatus;
    use chrono::NaiveDate;

    #[test]
    fn test_flow_regime_thresholds() {
        assert_eq!(FlowRegime::from_flow(0.05), FlowRegime::Critical);
        assert_eq!(FlowRegime::from_flow(0.2), FlowRegime::Stable);
        assert_eq!(FlowRegime::from_flow(0.599), FlowRegime::Stable);
        assert_eq!(FlowRegime::from_flow(0.6), FlowRegime::High);
    }

    #[test]
    fn test_narrative_mentions_key_figures() {
        let sample = Sample {
            timestamp: NaiveDate::from_ymd_opt(2024, 6, 16)
                .unwrap()
                .and_hms_opt(16, 0, 0)
                .unwrap(),
            flow_rate: 0.82,
            power_generated: 300.0,
            power_load: 180.0,
            turbine_performance_ratio: 43.8,
            rotor_rpm: 53.3,
            generator_rpm: 799.5,
            voltage: 15.45,
            separation_pct: 78.6,
            status: OperatingStatus::Normal,
        };

        let insight = Insight::for_sample(&sample);
        assert_eq!(insight.flow_regime, FlowRegime::High);
        assert!(insight.performance_healthy);
        assert!(!insight.separation_on_target);
        assert!(insight.narrative.contains("16 Jun 2024 16:00"));
        assert!(insight.narrative.contains("0.82 m/s"));
        assert!(insight.narrative.contains("running normal"));
        assert!(insight.narrative.contains("120 W"));
    }
}
