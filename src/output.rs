//! Output formatting and persistence for merged tables and run summaries.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::parser::InteractionRow;

/// Writes interaction rows to a CSV file with an `x,y,frel` header,
/// replacing any existing file.
pub fn write_interactions(path: &Path, rows: &[InteractionRow]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing interaction CSV");

    let file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes any serializable value as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

/// Logs a serializable value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
