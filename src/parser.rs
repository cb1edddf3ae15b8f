//! Readers for interaction tables.
//!
//! Raw NESSRA expansion files carry a banner line naming the network,
//! followed by a CSV with a leading index column and `x`, `y`, `Frel`
//! columns. Merged files are plain `x,y,frel` CSVs. Either kind may be
//! gzip-compressed.

use anyhow::{Context, Result, bail};
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::warn;

use crate::gene::network_name;

/// One gene-pair interaction with its relative frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRow {
    pub x: String,
    pub y: String,
    pub frel: f64,
}

/// A parsed raw expansion file: the network named in its banner plus rows.
#[derive(Debug)]
pub struct RawInteractionFile {
    pub network: String,
    pub rows: Vec<InteractionRow>,
}

/// Opens a table file, decoding through gzip when the path ends in `.gz`.
pub(crate) fn open_table(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

struct Columns {
    x: usize,
    y: usize,
    frel: usize,
}

/// Locates the needed columns by header name. Lookup is case-insensitive
/// (`Frel` in raw files, `frel` in merged ones) and tolerates the unnamed
/// index column pandas left in front.
fn locate_columns(headers: &csv::StringRecord, path: &Path) -> Result<Columns> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    match (find("x"), find("y"), find("frel")) {
        (Some(x), Some(y), Some(frel)) => Ok(Columns { x, y, frel }),
        _ => bail!(
            "{}: expected x/y/frel columns, found {:?}",
            path.display(),
            headers
        ),
    }
}

fn read_rows<R: Read>(reader: R, path: &Path) -> Result<Vec<InteractionRow>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let cols = locate_columns(&headers, path)?;

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let fields = (
            record.get(cols.x),
            record.get(cols.y),
            record.get(cols.frel),
        );
        let (Some(x), Some(y), Some(frel)) = fields else {
            warn!(file = %path.display(), row = idx, "Row is missing fields, skipping");
            continue;
        };
        let Ok(frel) = frel.trim().parse::<f64>() else {
            warn!(file = %path.display(), row = idx, value = frel, "Unparsable frel, skipping row");
            continue;
        };
        rows.push(InteractionRow {
            x: x.to_string(),
            y: y.to_string(),
            frel,
        });
    }

    Ok(rows)
}

/// Reads a raw expansion file: banner line first, CSV body after.
pub fn read_raw_file(path: &Path) -> Result<RawInteractionFile> {
    let mut reader = open_table(path)?;

    let mut banner = String::new();
    reader
        .read_line(&mut banner)
        .with_context(|| format!("reading banner of {}", path.display()))?;
    let Some(network) = network_name(&banner) else {
        bail!("{}: banner line does not name a network", path.display());
    };

    Ok(RawInteractionFile {
        network: network.to_string(),
        rows: read_rows(reader, path)?,
    })
}

/// Reads an already-merged `x,y,frel` CSV (no banner line).
pub fn read_merged_file(path: &Path) -> Result<Vec<InteractionRow>> {
    read_rows(open_table(path)?, path)
}
