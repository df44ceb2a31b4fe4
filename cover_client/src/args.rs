//! Command-line arguments for the quote client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, Subcommand};
use cover_common::vehicle::{BodyType, CoverageType, PolicyDuration};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Print every view as a JSON line instead of formatted text.
    #[clap(long)]
    pub json: bool,

    /// Milliseconds between purchase countdown ticks.
    #[clap(long, default_value_t = 1000)]
    pub tick_ms: u64,

    /// Run a one-shot mode instead of the interactive flow.
    #[command(subcommand)]
    pub mode: Option<Mode>,
}

/// One-shot modes.
#[derive(Debug, Subcommand)]
pub enum Mode {
    /// Print the premium for a single combination and exit.
    Price {
        /// Vehicle body type.
        #[clap(long, value_enum, default_value_t = BodyType::Saloon)]
        body_type: BodyType,

        /// Coverage tier.
        #[clap(long, value_enum, default_value_t = CoverageType::Comprehensive)]
        coverage: CoverageType,

        /// Policy period.
        #[clap(long, value_enum, default_value_t = PolicyDuration::Year)]
        duration: PolicyDuration,
    },
}
