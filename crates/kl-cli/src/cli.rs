//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use kl_core::{Discipline, Gender};

/// Speed skating klassement tool.
///
/// Computes championship standings from per-distance race times using the
/// truncating points formula, and projects the time needed to beat a rival.
#[derive(Debug, Parser)]
#[command(name = "kl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Selection flags shared by all views.
#[derive(Debug, Args)]
pub struct SelectArgs {
    /// Championship discipline.
    #[arg(short, long, value_enum)]
    pub discipline: Option<DisciplineArg>,

    /// Gender category.
    #[arg(short, long, value_enum)]
    pub gender: Option<GenderArg>,

    /// JSON results file; the built-in mock data is used when absent.
    #[arg(short, long)]
    pub results: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the overall klassement.
    Klassement {
        #[command(flatten)]
        select: SelectArgs,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the ranking for a single distance.
    Distance {
        /// Distance key (e.g. d1_500) or label (e.g. "1st 500m").
        distance: String,

        #[command(flatten)]
        select: SelectArgs,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Project the time a rider needs to beat a target.
    HeadToHead {
        /// The acting rider, by ID or name.
        #[arg(short, long)]
        athlete: String,

        /// Target the rider currently at this klassement rank.
        #[arg(long, conflicts_with = "target")]
        target_rank: Option<u32>,

        /// Target a specific rider, by ID or name.
        #[arg(long)]
        target: Option<String>,

        /// Focus distance left open, by key or label; defaults to the first
        /// configured distance.
        #[arg(short, long)]
        focus: Option<String>,

        #[command(flatten)]
        select: SelectArgs,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show allround final-distance qualification.
    Qualification {
        #[command(flatten)]
        select: SelectArgs,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Discipline flag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisciplineArg {
    Sprint,
    Allround,
}

impl From<DisciplineArg> for Discipline {
    fn from(arg: DisciplineArg) -> Self {
        match arg {
            DisciplineArg::Sprint => Self::Sprint,
            DisciplineArg::Allround => Self::Allround,
        }
    }
}

/// Gender flag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenderArg {
    Men,
    Women,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Men => Self::Men,
            GenderArg::Women => Self::Women,
        }
    }
}
