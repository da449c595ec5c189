//! # Yearly Dataset Synthesis
//!
//! Builds one year of hourly samples from the turbine model and band classifier.
//! The resulting [`Dataset`] is immutable: it is created once and every view
//! borrows it read-only.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::time::Instant;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

use super::classifier::classify;
use super::turbine::{TidalModelConfig, TurbineModel};
use crate::domain::Sample;

/// Hours in the simulated year (2024 is a leap year: 366 × 24)
pub const HOURS_PER_YEAR: usize = 8784;

/// First simulated hour
pub fn year_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Synthesizer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SynthesizerConfig {
    #[validate(nested)]
    pub model: TidalModelConfig,
    /// Random seed for reproducibility (None = random)
    pub random_seed: Option<u64>,
}

/// Immutable hourly dataset for one year
#[derive(Debug, Clone)]
pub struct Dataset {
    samples: Vec<Sample>,
    label_index: HashMap<String, usize>,
}

impl Dataset {
    /// Wrap already-ordered samples. Rows must be strictly increasing in time.
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        let label_index = samples
            .iter()
            .enumerate()
            .map(|(idx, s)| (s.label(), idx))
            .collect();
        Self {
            samples,
            label_index,
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// Exact-match lookup of a formatted hourly label
    pub fn index_of_label(&self, label: &str) -> Option<usize> {
        self.label_index.get(label).copied()
    }

    /// Formatted labels for every row, in time order
    pub fn labels(&self) -> impl Iterator<Item = String> + '_ {
        self.samples.iter().map(Sample::label)
    }

    /// Distinct month names in the order they first appear
    pub fn months(&self) -> Vec<&'static str> {
        let mut months: Vec<&'static str> = Vec::with_capacity(12);
        for sample in &self.samples {
            let name = sample.month_name();
            if !months.contains(&name) {
                months.push(name);
            }
        }
        months
    }
}

/// Produces the synthetic tidal dataset
pub struct DatasetSynthesizer {
    turbine: TurbineModel,
    rng: StdRng,
    seeded: bool,
}

impl DatasetSynthesizer {
    pub fn new(config: SynthesizerConfig) -> Self {
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            turbine: TurbineModel::new(config.model),
            rng,
            seeded: config.random_seed.is_some(),
        }
    }

    /// Build the full year. Consumes the synthesizer so the noise stream is used once.
    pub fn synthesize(mut self) -> anyhow::Result<Dataset> {
        let started = Instant::now();
        let model = self.turbine.config();
        let noise = Normal::new(0.0, model.flow_noise_std)?;

        // Phase spans [0, 2π·cycles] inclusive of both ends
        let phase_end = 2.0 * PI * model.flow_cycles;
        let step = phase_end / (HOURS_PER_YEAR - 1) as f64;
        let start = year_start();

        let mut samples = Vec::with_capacity(HOURS_PER_YEAR);
        for hour in 0..HOURS_PER_YEAR {
            let t = step * hour as f64;
            let flow = self
                .turbine
                .clip_flow(self.turbine.base_flow(t) + noise.sample(&mut self.rng));
            let out = self.turbine.operate(flow);
            let class = classify(out.voltage, out.power_w, &mut self.rng);

            samples.push(Sample {
                timestamp: start + Duration::hours(hour as i64),
                flow_rate: flow,
                power_generated: out.power_w,
                power_load: class.power_load,
                turbine_performance_ratio: out.efficiency * 100.0,
                rotor_rpm: out.rotor_rpm,
                generator_rpm: out.generator_rpm,
                voltage: out.voltage,
                separation_pct: class.separation_pct,
                status: class.status,
            });
        }

        let dataset = Dataset::from_samples(samples);
        debug!(labels = dataset.label_index.len(), "label index built");
        info!(
            rows = dataset.len(),
            seeded = self.seeded,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "synthesized tidal dataset"
        );
        Ok(dataset)
    }
}
