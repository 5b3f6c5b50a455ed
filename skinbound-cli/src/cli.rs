//! Root CLI structure for skinbound

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skinbound")]
#[command(about = "Sample animation curves and compute skinned mesh bounds", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the bounds of a skinned mesh across its animations
    Bounds {
        /// Path to the scene document
        file: PathBuf,

        /// Simulation step in animation time units
        #[arg(long, default_value_t = skinbound::skinned_bounds::DEFAULT_STEP_MS)]
        step_ms: f32,

        /// How transformed sphere radii are scaled
        #[arg(long, value_enum, default_value_t = RadiusScalingArg::Scale)]
        radius_scaling: RadiusScalingArg,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sample the SRT curves of channels targeting a node
    Sample {
        /// Path to the scene document
        file: PathBuf,

        /// Node id the channels target
        #[arg(short, long)]
        target: String,

        /// Number of samples across normalized time [0, 1]
        #[arg(short, long, default_value = "11")]
        samples: usize,

        /// Print the samples as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RadiusScalingArg {
    /// Largest axis scale of each joint transform
    Scale,
    /// Largest translation component, as older pipelines did
    Translation,
}

impl From<RadiusScalingArg> for skinbound::RadiusScaling {
    fn from(arg: RadiusScalingArg) -> Self {
        match arg {
            RadiusScalingArg::Scale => Self::Scale,
            RadiusScalingArg::Translation => Self::Translation,
        }
    }
}
