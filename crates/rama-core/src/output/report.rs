use crate::analysis::region::Region;
use crate::analysis::summary::{ClassifiedSample, RegionSummary};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV writing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

/// One row of the per-sample table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleRow {
    #[serde(rename = "Phi")]
    pub phi: f64,
    #[serde(rename = "Psi")]
    pub psi: f64,
    #[serde(rename = "Region")]
    pub region: Region,
}

impl From<&ClassifiedSample> for SampleRow {
    fn from(classified: &ClassifiedSample) -> Self {
        Self {
            phi: classified.sample.phi,
            psi: classified.sample.psi,
            region: classified.region,
        }
    }
}

/// One row of the per-region summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Region")]
    pub region: Region,
    #[serde(rename = "Percentage")]
    pub percentage: String,
}

pub fn summary_rows(summary: &RegionSummary) -> Vec<SummaryRow> {
    summary
        .entries()
        .iter()
        .map(|share| SummaryRow {
            region: share.region,
            percentage: share.formatted_percentage(),
        })
        .collect()
}

fn write_rows<W: Write, R: Serialize>(writer: W, rows: impl IntoIterator<Item = R>) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes the `Phi,Psi,Region` table, one row per sample in input order.
pub fn write_samples<W: Write>(writer: W, samples: &[ClassifiedSample]) -> Result<(), csv::Error> {
    write_rows(writer, samples.iter().map(SampleRow::from))
}

/// Writes the `Region,Percentage` table in summary order.
pub fn write_summary<W: Write>(writer: W, summary: &RegionSummary) -> Result<(), csv::Error> {
    write_rows(writer, summary_rows(summary))
}

fn write_to_path(
    path: &Path,
    write: impl FnOnce(BufWriter<File>) -> Result<(), csv::Error>,
) -> Result<(), ReportError> {
    let file = File::create(path).map_err(|e| ReportError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    write(BufWriter::new(file)).map_err(|e| ReportError::Csv {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    debug!("Wrote table to '{}'.", path.display());
    Ok(())
}

pub fn write_samples_to_path(path: &Path, samples: &[ClassifiedSample]) -> Result<(), ReportError> {
    write_to_path(path, |writer| write_samples(writer, samples))
}

pub fn write_summary_to_path(path: &Path, summary: &RegionSummary) -> Result<(), ReportError> {
    write_to_path(path, |writer| write_summary(writer, summary))
}
