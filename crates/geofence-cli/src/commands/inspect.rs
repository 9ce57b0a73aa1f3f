//! Inspect command - read a file and report what ingestion makes of it.

use std::path::PathBuf;

use colored::Colorize;
use geofence::{GeofenceMapper, MapperConfig};

pub fn run(
    file: PathBuf,
    config: MapperConfig,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mapper = GeofenceMapper::with_config(config);
    let inspection = mapper
        .inspect(&file)
        .map_err(|e| e.user_message(&mapper.config().messages))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&inspection)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Inspecting".cyan().bold(),
        inspection.source.file.white()
    );
    println!(
        "  {} rows, {} columns, format {}",
        inspection.source.row_count,
        inspection.source.column_count,
        inspection.source.format
    );
    if verbose {
        println!("  {}", inspection.source.hash.dimmed());
    }
    println!();

    let ingestion = &inspection.ingestion;
    println!(
        "Loaded {} geofences, skipped {} rows",
        ingestion.geofences.len().to_string().white().bold(),
        ingestion.warnings.len().to_string().yellow()
    );

    if !ingestion.geofences.is_empty() {
        println!();
        println!("{}", "Geofences:".green().bold());
        for geofence in &ingestion.geofences {
            let popup = geofence.popup();
            println!(
                "  {:12} {:30} {:>4} vertices  {} {:.6}, {:.6}",
                geofence.id.to_string().dimmed(),
                geofence.name,
                popup.vertices,
                mapper.config().color(geofence.color_index),
                popup.center.lat,
                popup.center.lng
            );
        }
    }

    if !ingestion.warnings.is_empty() {
        println!();
        println!("{}", "Warnings:".yellow().bold());
        for warning in &ingestion.warnings {
            println!("  {}", warning);
        }
    }

    if ingestion.is_empty() {
        println!();
        println!("{}", mapper.config().messages.no_valid_geofences.red());
    }

    Ok(())
}
