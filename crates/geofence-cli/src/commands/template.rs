//! Template command - write the example file users start from.

use std::path::PathBuf;

use colored::Colorize;
use geofence::ingest::{save_template, TEMPLATE_ROWS};

const DEFAULT_TEMPLATE_NAME: &str = "geofence_template.csv";

pub fn run(output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let path = output.unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_NAME));
    save_template(&path)?;

    println!(
        "{} {} ({} sample geofences)",
        "Wrote template".green().bold(),
        path.display().to_string().white(),
        TEMPLATE_ROWS.len()
    );
    Ok(())
}
