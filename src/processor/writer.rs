//! Parquet export of a year's records and connections
//!
//! Writes two flat tables per year with Snappy compression. Partner lists
//! are rendered as `partner:value` pairs joined with `;`.

use crate::error::{Result, WitsError};
use crate::models::{Connection, Partner, TradeRecord};

use polars::df;
use polars::prelude::{DataFrame, ParquetCompression, ParquetWriter as PolarsParquetWriter};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes per-year Parquet tables into an output directory
#[derive(Debug, Clone)]
pub struct ParquetExporter {
    output_dir: PathBuf,
}

impl ParquetExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn records_path(&self, year: i32) -> PathBuf {
        self.output_dir.join(format!("records_{}.parquet", year))
    }

    pub fn connections_path(&self, year: i32) -> PathBuf {
        self.output_dir.join(format!("connections_{}.parquet", year))
    }

    /// Write the records table, returning the number of rows written
    pub fn write_records(&self, year: i32, records: &[TradeRecord]) -> Result<usize> {
        let path = self.records_path(year);

        let mut df = df!(
            "country" => records.iter().map(|r| r.country().to_string()).collect::<Vec<_>>(),
            "country_code" => records.iter().map(|r| r.country_code().to_string()).collect::<Vec<_>>(),
            "year" => records.iter().map(|r| r.year()).collect::<Vec<i32>>(),
            "exports" => records.iter().map(|r| r.exports()).collect::<Vec<f64>>(),
            "imports" => records.iter().map(|r| r.imports()).collect::<Vec<f64>>(),
            "trade_balance" => records.iter().map(|r| r.trade_balance()).collect::<Vec<f64>>(),
            "latitude" => records.iter().map(|r| r.coordinates().latitude).collect::<Vec<f64>>(),
            "longitude" => records.iter().map(|r| r.coordinates().longitude).collect::<Vec<f64>>(),
            "top_export_partners" => records.iter().map(|r| render_partners(r.top_export_partners())).collect::<Vec<_>>(),
            "top_import_partners" => records.iter().map(|r| render_partners(r.top_import_partners())).collect::<Vec<_>>()
        )?;

        self.write_frame(&path, &mut df)
    }

    /// Write the connections table, including the rendering weight
    pub fn write_connections(
        &self,
        year: i32,
        connections: &[Connection],
        threshold: f64,
    ) -> Result<usize> {
        let path = self.connections_path(year);

        let mut df = df!(
            "year" => vec![year; connections.len()],
            "source" => connections.iter().map(|c| c.source.clone()).collect::<Vec<_>>(),
            "target" => connections.iter().map(|c| c.target.clone()).collect::<Vec<_>>(),
            "value" => connections.iter().map(|c| c.value).collect::<Vec<f64>>(),
            "type" => connections.iter().map(|c| c.connection_type.as_str().to_string()).collect::<Vec<_>>(),
            "weight" => connections.iter().map(|c| c.weight(threshold)).collect::<Vec<f64>>()
        )?;

        self.write_frame(&path, &mut df)
    }

    fn write_frame(&self, path: &Path, df: &mut DataFrame) -> Result<usize> {
        fs::create_dir_all(&self.output_dir)?;
        let file = File::create(path)?;

        PolarsParquetWriter::new(file)
            .with_compression(ParquetCompression::Snappy)
            .finish(df)
            .map_err(|e| WitsError::Export {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        debug!("Wrote {} rows to {}", df.height(), path.display());
        Ok(df.height())
    }
}

fn render_partners(partners: &[Partner]) -> String {
    partners
        .iter()
        .map(|p| format!("{}:{}", p.partner, p.value))
        .collect::<Vec<_>>()
        .join(";")
}
