//! Invariants of the synthesized yearly dataset and the band classifier.

use chrono::{Datelike, Duration};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tidal_dashboard::domain::OperatingStatus;
use tidal_dashboard::simulation::{
    band_for, classify, year_start, Dataset, DatasetSynthesizer, SynthesizerConfig,
    TidalModelConfig, TurbineModel, HOURS_PER_YEAR,
};

fn synthesize(seed: Option<u64>) -> Dataset {
    DatasetSynthesizer::new(SynthesizerConfig {
        random_seed: seed,
        ..Default::default()
    })
    .synthesize()
    .expect("synthesis")
}

#[test]
fn clipped_fields_respect_bounds() {
    // unseeded on purpose: bounds must hold for any noise draw
    let ds = synthesize(None);
    for s in ds.samples() {
        assert!((0.05..=0.95).contains(&s.flow_rate), "flow {}", s.flow_rate);
        assert!((0.0..=1500.0).contains(&s.power_generated));
        assert!((0.0..=48.0).contains(&s.voltage));
        assert!((0.0..=99.9).contains(&s.separation_pct));
        assert!((0.0..=45.0).contains(&s.turbine_performance_ratio));
    }
}

#[test]
fn surplus_is_generation_minus_load() {
    let ds = synthesize(Some(3));
    for s in ds.samples() {
        assert_eq!(s.power_surplus(), s.power_generated - s.power_load);
    }
}

#[test]
fn one_row_per_hour_for_the_whole_year() {
    let ds = synthesize(Some(3));
    assert_eq!(ds.len(), HOURS_PER_YEAR);

    let start = year_start();
    for (i, s) in ds.samples().iter().enumerate() {
        assert_eq!(s.timestamp, start + Duration::hours(i as i64));
        assert_eq!(s.timestamp.year(), 2024);
    }

    let mut labels: Vec<String> = ds.labels().collect();
    labels.sort();
    labels.dedup();
    assert_eq!(labels.len(), HOURS_PER_YEAR);
}

#[test]
fn status_matches_voltage_band_for_every_row() {
    let ds = synthesize(Some(9));
    for s in ds.samples() {
        assert_eq!(s.status, band_for(s.voltage).status);
        if s.status == OperatingStatus::Stopped {
            assert_eq!(s.power_load, 5.0);
            assert_eq!(s.separation_pct, 0.0);
        }
    }
}

#[test]
fn derived_rpm_and_ratio() {
    let ds = synthesize(Some(4));
    for s in ds.samples().iter().step_by(97) {
        assert!((s.rotor_rpm - s.flow_rate * 65.0).abs() < 1e-9);
        assert!((s.generator_rpm - s.rotor_rpm * 15.0).abs() < 1e-9);
    }
}

#[test]
fn half_metre_per_second_matches_closed_form() {
    let model = TurbineModel::new(TidalModelConfig::default());
    let out = model.operate(0.5);

    let eff = (0.45 * (1.0 - (-5.0_f64 * (0.5 - 0.1)).exp())).clamp(0.0, 0.45);
    let power = (0.5 * 1000.0 * 2.0 * 0.5_f64.powi(3) * eff).clamp(0.0, 1500.0);
    let voltage = (power / 55.0 + 10.0).clamp(0.0, 48.0);
    assert!((out.power_w - power).abs() < 1e-9);
    assert!((out.voltage - voltage).abs() < 1e-9);

    let mut rng = StdRng::seed_from_u64(0);
    let class = classify(out.voltage, out.power_w, &mut rng);
    let expected = if voltage >= 22.0 {
        OperatingStatus::Optimal
    } else if voltage >= 12.0 {
        OperatingStatus::Normal
    } else {
        OperatingStatus::Stopped
    };
    assert_eq!(class.status, expected);
}

#[test]
fn zero_generation_costs_exactly_the_idle_draw() {
    let model = TurbineModel::new(TidalModelConfig::default());
    let out = model.operate(0.1);
    assert_eq!(out.power_w, 0.0);

    let mut rng = StdRng::seed_from_u64(0);
    let class = classify(out.voltage, out.power_w, &mut rng);
    assert_eq!(class.status, OperatingStatus::Stopped);
    assert_eq!(out.power_w - class.power_load, -5.0);
}

proptest! {
    #[test]
    fn classifier_is_monotonic_in_voltage(a in 0.0f64..48.0, b in 0.0f64..48.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(band_for(lo).status <= band_for(hi).status);
    }

    #[test]
    fn separation_never_exceeds_cap(voltage in 0.0f64..48.0, power in 0.0f64..1500.0, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let class = classify(voltage, power, &mut rng);
        prop_assert!(class.separation_pct >= 0.0);
        prop_assert!(class.separation_pct <= 99.9);
    }

    #[test]
    fn turbine_output_stays_in_range(flow in 0.05f64..=0.95) {
        let out = TurbineModel::new(TidalModelConfig::default()).operate(flow);
        prop_assert!((0.0..=1500.0).contains(&out.power_w));
        prop_assert!((0.0..=48.0).contains(&out.voltage));
        prop_assert!((0.0..=0.45).contains(&out.efficiency));
    }
}
