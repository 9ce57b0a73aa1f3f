//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use geofence::Action;
use std::path::PathBuf;

/// Geofence: load WKT geofences from spreadsheet exports and drive their visibility
#[derive(Parser)]
#[command(name = "geofence")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a JSON mapper configuration
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read a file and report the geofences and warnings it yields
    Inspect {
        /// Path to the data file (CSV/TSV/JSON rows)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the example template with three sample polygons
    Template {
        /// Output path (default: geofence_template.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load a file into a session and replay a sequence of actions
    Replay {
        /// Path to the data file (CSV/TSV/JSON rows)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Action to apply, repeatable: toggle-on=<id>, toggle-off=<id>,
        /// select-all, clear-all, filter=<term>
        #[arg(short = 'a', long = "action", value_name = "ACTION")]
        actions: Vec<Action>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
