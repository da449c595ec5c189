//! # Tidal Turbine Model
//!
//! Converts current speed into electrical output and generator voltage using a
//! cubic hydraulic power law and a saturating efficiency curve.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Physical parameters of the turbine, drivetrain and ED stack
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_clip_bounds"))]
pub struct TidalModelConfig {
    /// Water density in kg/m³
    #[validate(range(min = 900.0, max = 1100.0))]
    pub water_density: f64,
    /// Rotor swept area in m²
    #[validate(range(exclusive_min = 0.0))]
    pub swept_area_m2: f64,
    /// Mean current speed in m/s
    pub flow_mean: f64,
    /// Amplitude of the tidal sinusoid in m/s
    pub flow_amplitude: f64,
    /// Number of full tidal cycles across the year
    #[validate(range(min = 0.0))]
    pub flow_cycles: f64,
    /// Standard deviation of the flow noise in m/s
    #[validate(range(min = 0.0, max = 1.0))]
    pub flow_noise_std: f64,
    pub flow_min: f64,
    pub flow_max: f64,
    /// Peak turbine efficiency (0.0-1.0)
    #[validate(range(min = 0.0, max = 1.0))]
    pub max_efficiency: f64,
    /// Steepness of the efficiency curve
    pub efficiency_slope: f64,
    /// Cut-in flow where the efficiency curve crosses zero, in m/s
    pub cut_in_flow: f64,
    /// Electrical output ceiling in W
    #[validate(range(min = 0.0))]
    pub max_power_w: f64,
    /// Rotor rpm per m/s of flow
    pub rotor_rpm_per_flow: f64,
    /// Gearbox ratio (generator:rotor)
    pub gear_ratio: f64,
    /// Watts per volt above the baseline
    #[validate(range(exclusive_min = 0.0))]
    pub watts_per_volt: f64,
    /// Open-circuit baseline voltage
    pub baseline_voltage: f64,
    #[validate(range(min = 0.0))]
    pub max_voltage: f64,
}

/// Every clip range used by [`TurbineModel`] must be ordered (NaN rejected too)
fn validate_clip_bounds(config: &TidalModelConfig) -> Result<(), ValidationError> {
    if config.flow_min.is_nan() || config.flow_max.is_nan() || config.flow_min > config.flow_max {
        return Err(ValidationError::new("flow_min_exceeds_flow_max"));
    }
    let ceilings = [config.max_power_w, config.max_voltage, config.max_efficiency];
    if ceilings.iter().any(|c| c.is_nan() || *c < 0.0) {
        return Err(ValidationError::new("negative_ceiling"));
    }
    Ok(())
}

impl Default for TidalModelConfig {
    fn default() -> Self {
        Self {
            water_density: 1000.0,
            swept_area_m2: 2.0,
            flow_mean: 0.5,
            flow_amplitude: 0.35,
            flow_cycles: 2.0,
            flow_noise_std: 0.05,
            flow_min: 0.05,
            flow_max: 0.95,
            max_efficiency: 0.45,
            efficiency_slope: 5.0,
            cut_in_flow: 0.1,
            max_power_w: 1500.0,
            rotor_rpm_per_flow: 65.0,
            gear_ratio: 15.0, // 1:15 gearbox
            watts_per_volt: 55.0,
            baseline_voltage: 10.0,
            max_voltage: 48.0,
        }
    }
}

/// Turbine operating point for one flow value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurbineOutput {
    pub efficiency: f64,
    pub power_w: f64,
    pub rotor_rpm: f64,
    pub generator_rpm: f64,
    pub voltage: f64,
}

/// Deterministic part of the simulation: flow → power → voltage
#[derive(Debug, Clone)]
pub struct TurbineModel {
    config: TidalModelConfig,
}

impl TurbineModel {
    pub fn new(config: TidalModelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TidalModelConfig {
        &self.config
    }

    /// Noise-free tidal flow at phase `t` (radians)
    pub fn base_flow(&self, t: f64) -> f64 {
        self.config.flow_mean + self.config.flow_amplitude * t.sin()
    }

    pub fn clip_flow(&self, flow: f64) -> f64 {
        flow.clamp(self.config.flow_min, self.config.flow_max)
    }

    /// Kinetic power available in the swept area: ½·ρ·A·v³
    pub fn theoretical_power(&self, flow: f64) -> f64 {
        0.5 * self.config.water_density * self.config.swept_area_m2 * flow.powi(3)
    }

    /// Saturating efficiency curve, zero below cut-in
    pub fn efficiency(&self, flow: f64) -> f64 {
        let c = &self.config;
        let eff = c.max_efficiency * (1.0 - (-c.efficiency_slope * (flow - c.cut_in_flow)).exp());
        eff.clamp(0.0, c.max_efficiency)
    }

    pub fn operate(&self, flow: f64) -> TurbineOutput {
        let c = &self.config;
        let efficiency = self.efficiency(flow);
        let power_w = (self.theoretical_power(flow) * efficiency).clamp(0.0, c.max_power_w);
        let rotor_rpm = flow * c.rotor_rpm_per_flow;
        let voltage =
            (power_w / c.watts_per_volt + c.baseline_voltage).clamp(0.0, c.max_voltage);

        TurbineOutput {
            efficiency,
            power_w,
            rotor_rpm,
            generator_rpm: rotor_rpm * c.gear_ratio,
            voltage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> TurbineModel {
        TurbineModel::new(TidalModelConfig::default())
    }

    #[test]
    fn test_theoretical_power() {
        // 0.5 * 1000 * 2 * 0.5³
        assert!((model().theoretical_power(0.5) - 125.0).abs() < 1e-9);
    }

    #[test]
    fn test_efficiency_clipped_below_cut_in() {
        let m = model();
        assert_eq!(m.efficiency(0.05), 0.0);
        assert_eq!(m.efficiency(0.1), 0.0);
        assert!(m.efficiency(0.95) <= 0.45);
        assert!(m.efficiency(0.95) > 0.44);
    }

    #[test]
    fn test_operating_point_at_half_metre_per_second() {
        let out = model().operate(0.5);
        let eff = 0.45 * (1.0 - (-2.0_f64).exp());
        assert!((out.efficiency - eff).abs() < 1e-12);
        assert!((out.power_w - 125.0 * eff).abs() < 1e-9);
        assert!((out.voltage - (125.0 * eff / 55.0 + 10.0)).abs() < 1e-9);
        assert!((out.rotor_rpm - 32.5).abs() < 1e-12);
        assert!((out.generator_rpm - 487.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_power_gives_baseline_voltage() {
        let out = model().operate(0.05);
        assert_eq!(out.power_w, 0.0);
        assert_eq!(out.voltage, 10.0);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(TidalModelConfig::default().validate().is_ok());

        let bad = TidalModelConfig {
            swept_area_m2: 0.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_unordered_clip_bounds_rejected() {
        let inverted_flow = TidalModelConfig {
            flow_min: 0.9,
            flow_max: 0.1,
            ..Default::default()
        };
        assert!(inverted_flow.validate().is_err());

        let negative_voltage = TidalModelConfig {
            max_voltage: -1.0,
            ..Default::default()
        };
        assert!(negative_voltage.validate().is_err());

        let negative_power = TidalModelConfig {
            max_power_w: -10.0,
            ..Default::default()
        };
        assert!(negative_power.validate().is_err());

        let nan_voltage = TidalModelConfig {
            max_voltage: f64::NAN,
            ..Default::default()
        };
        assert!(nan_voltage.validate().is_err());

        // a single fixed flow is still a valid range
        let pinned = TidalModelConfig {
            flow_min: 0.5,
            flow_max: 0.5,
            ..Default::default()
        };
        assert!(pinned.validate().is_ok());
    }
}
