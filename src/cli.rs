use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{OutputFormat, DEFAULT_CONFIG_PATH};
use crate::view::{AggregationMethod, HourSelector, ViewRequest};

/// Tidal turbine + electrodialysis dashboard simulator
#[derive(Parser, Debug)]
#[command(name = "tidal-dashboard")]
#[command(about = "Simulate a year of tidal power and desalination, then inspect it", long_about = None)]
pub struct Cli {
    /// Configuration file (missing file = built-in defaults)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Output format (text, json); overrides the config file
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Random seed for a reproducible dataset; overrides the config file
    #[arg(short, long)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Real-time view of one hour plus its 24-hour trend
    Hourly {
        /// Exact hourly label, e.g. "16 Jun 2024 16:00"
        #[arg(short, long, conflicts_with = "index")]
        label: Option<String>,
        /// Row index (0 = 01 Jan 2024 00:00)
        #[arg(short, long)]
        index: Option<usize>,
    },
    /// One month aggregated by day
    Monthly {
        /// Month name, e.g. "June"
        #[arg(short, long)]
        month: String,
        /// average, sum (total) or max
        #[arg(short = 'a', long, default_value = "average")]
        method: AggregationMethod,
    },
    /// Whole year aggregated by month
    Yearly {
        #[arg(short = 'a', long, default_value = "average")]
        method: AggregationMethod,
    },
    /// List the month options
    Months,
    /// List hourly labels, optionally for one month
    Labels {
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Full hourly data table, optionally for one month
    Dump {
        #[arg(short, long)]
        month: Option<String>,
    },
}

impl Command {
    /// The view request this command asks for; `None` for listing commands
    pub fn view_request(&self, default_hour: HourSelector) -> Option<ViewRequest> {
        match self {
            Command::Hourly { label, index } => {
                let selector = match (label, index) {
                    (Some(label), _) => HourSelector::Label(label.clone()),
                    (None, Some(index)) => HourSelector::Index(*index),
                    (None, None) => default_hour,
                };
                Some(ViewRequest::Hourly(selector))
            }
            Command::Monthly { month, method } => Some(ViewRequest::Monthly {
                month: month.clone(),
                method: *method,
            }),
            Command::Yearly { method } => Some(ViewRequest::Yearly { method: *method }),
            Command::Months | Command::Labels { .. } | Command::Dump { .. } => None,
        }
    }
}
