//! Writers for scraped listings.

use crate::error::Result;
use crate::models::VehicleListing;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{info, warn};

/// Output format, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
}

impl Format {
    /// `.csv` means CSV, anything else JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Format::Csv,
            _ => Format::Json,
        }
    }
}

pub fn write(listings: &[VehicleListing], path: &Path) -> Result<()> {
    match Format::from_path(path) {
        Format::Json => write_json(listings, path),
        Format::Csv => write_csv(listings, path),
    }
}

/// Pretty-printed JSON array
pub fn write_json(listings: &[VehicleListing], path: &Path) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, listings)?;
    info!("💾 Saved {} vehicles to JSON: {}", listings.len(), path.display());
    Ok(())
}

/// One row per listing, header first. Nothing is written for an empty set.
pub fn write_csv(listings: &[VehicleListing], path: &Path) -> Result<()> {
    if listings.is_empty() {
        warn!("No vehicles to save to CSV");
        return Ok(());
    }

    let mut writer = csv::Writer::from_path(path)?;
    for listing in listings {
        writer.serialize(listing)?;
    }
    writer.flush()?;

    info!("💾 Saved {} vehicles to CSV: {}", listings.len(), path.display());
    Ok(())
}
