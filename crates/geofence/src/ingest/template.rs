//! Sample dataset describing the expected input schema.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{GeofenceError, Result};
use crate::input::RawRow;

/// Header names of the template.
pub const TEMPLATE_HEADERS: [&str; 2] = ["name", "wkt"];

/// The three sample areas.
pub const TEMPLATE_ROWS: [(&str, &str); 3] = [
    (
        "Abu Dhabi Downtown",
        "POLYGON ((54.35 24.46, 54.38 24.46, 54.38 24.48, 54.35 24.48, 54.35 24.46))",
    ),
    (
        "Yas Island",
        "POLYGON ((54.59 24.47, 54.63 24.47, 54.63 24.5, 54.59 24.5, 54.59 24.47))",
    ),
    (
        "Saadiyat Island",
        "POLYGON ((54.41 24.53, 54.45 24.53, 54.45 24.56, 54.41 24.56, 54.41 24.53))",
    ),
];

/// Template as keyed rows.
pub fn template_rows() -> Vec<RawRow> {
    TEMPLATE_ROWS
        .iter()
        .map(|(name, wkt)| {
            RawRow::new()
                .with(TEMPLATE_HEADERS[0], *name)
                .with(TEMPLATE_HEADERS[1], *wkt)
        })
        .collect()
}

/// Write the template as CSV.
pub fn write_template<W: Write>(writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(TEMPLATE_HEADERS)?;
    for (name, wkt) in TEMPLATE_ROWS {
        csv_writer.write_record([name, wkt])?;
    }
    csv_writer.flush().map_err(|e| GeofenceError::Csv(e.into()))?;
    Ok(())
}

/// Write the template CSV to a file.
pub fn save_template(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| GeofenceError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_template(file)
}
