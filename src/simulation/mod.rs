//! # Tidal System Simulation
//!
//! Synthesizes the hourly operating record of a tidal-current turbine feeding a
//! multicell electrodialysis (ED) desalination stack.
//!
//! ## Components
//!
//! - **Turbine**: flow → hydraulic power → electrical output, rpm and cell voltage
//! - **Classifier**: voltage bands deciding ED load and separation quality
//! - **Dataset**: one year of hourly samples built from the two above plus noise
//!
//! ## Usage
//!
//! ```rust
//! use tidal_dashboard::simulation::{DatasetSynthesizer, SynthesizerConfig};
//!
//! let config = SynthesizerConfig {
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let dataset = DatasetSynthesizer::new(config).synthesize().unwrap();
//! assert_eq!(dataset.len(), 8784);
//! ```

pub mod classifier;
pub mod dataset;
pub mod turbine;

pub use classifier::{band_for, classify, Classification, VoltageBand, BANDS, IDLE_DRAW_W};
pub use dataset::{year_start, Dataset, DatasetSynthesizer, SynthesizerConfig, HOURS_PER_YEAR};
pub use turbine::{TidalModelConfig, TurbineModel, TurbineOutput};
