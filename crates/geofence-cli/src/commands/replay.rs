//! Replay command - drive a session with recorded adapters.

use std::path::PathBuf;

use colored::Colorize;
use geofence::view::MapCall;
use geofence::{Action, GeofenceMapper, LoadOutcome, MapperConfig, RecordingList, RecordingMap, Session};

pub fn run(
    file: PathBuf,
    config: MapperConfig,
    actions: Vec<Action>,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mapper = GeofenceMapper::with_config(config);
    let mut session = Session::new();
    let mut map = RecordingMap::new();
    let mut list = RecordingList::new();
    mapper.controller().attach(&mut map, &mut list);

    let outcome = mapper
        .load_file(&mut session, &file, &mut map, &mut list)
        .map_err(|e| e.user_message(&mapper.config().messages))?;
    let LoadOutcome::Loaded(summary) = outcome else {
        return Err("load was superseded".into());
    };

    let mut transitions = Vec::with_capacity(actions.len());
    for action in &actions {
        let transition = mapper
            .controller()
            .dispatch(&mut session, action.clone(), &mut map, &mut list);
        transitions.push(serde_json::json!({
            "action": action.to_string(),
            "transition": transition,
        }));
    }

    if json_output {
        let report = serde_json::json!({
            "load": summary,
            "steps": transitions,
            "map_calls": map.calls,
            "state": session.snapshot(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} geofences from {} rows",
        "Loaded".cyan().bold(),
        summary.geofences.to_string().white().bold(),
        summary.rows
    );
    for warning in &summary.warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
    println!();

    for (action, step) in actions.iter().zip(&transitions) {
        let selected = step["transition"]["selected_count"].as_u64().unwrap_or(0);
        println!("{} {:24} selected: {}", ">".cyan(), action.to_string(), selected);
    }

    if verbose {
        println!();
        println!("{}", "Map calls:".yellow().bold());
        for call in &map.calls {
            println!("  {}", describe(call));
        }
    }

    let snapshot = session.snapshot();
    println!();
    println!(
        "{} {}/{} visible{}",
        "State:".green().bold(),
        snapshot.selected_count,
        snapshot.geofences.len(),
        if snapshot.filter.is_empty() {
            String::new()
        } else {
            format!(", filter '{}'", snapshot.filter)
        }
    );
    for state in &snapshot.geofences {
        let mark = if state.visible { "[x]".green() } else { "[ ]".normal() };
        let name = if state.filtered_out {
            state.name.dimmed()
        } else {
            state.name.normal()
        };
        println!("  {} {:12} {}", mark, state.id.to_string(), name);
    }

    if let Some(info) = &list.info {
        println!();
        println!("{}", "Info panel:".blue().bold());
        for entry in &info.entries {
            println!("  {} {} ({})", entry.count_label, entry.name, entry.color);
        }
    }

    Ok(())
}

fn describe(call: &MapCall) -> String {
    match call {
        MapCall::SetView { center, zoom, max_zoom } => format!(
            "set_view [{:.4}, {:.4}] zoom {} max zoom {}",
            center.lat, center.lng, zoom, max_zoom
        ),
        MapCall::AddLayer { id, color, vertices } => {
            format!("add_layer {} {} ({} vertices)", id, color, vertices)
        }
        MapCall::RemoveLayer { id } => format!("remove_layer {}", id),
        MapCall::FitBounds { request } => format!(
            "fit_bounds {} boxes -> [{:.4}, {:.4}, {:.4}, {:.4}]",
            request.boxes.len(),
            request.target.south,
            request.target.west,
            request.target.north,
            request.target.east
        ),
        MapCall::FlyTo { bounds, max_zoom } => format!(
            "fly_to [{:.4}, {:.4}, {:.4}, {:.4}] max zoom {}",
            bounds.south, bounds.west, bounds.north, bounds.east, max_zoom
        ),
    }
}
