//! Integration tests for the pipeline cache
//!
//! Tests fan-out, caching and failure isolation over in-memory and on-disk
//! WITS extracts.

pub mod basic_pipeline;

use crate::config::PipelineConfig;
use crate::coordinates::CoordinateTable;
use crate::processor::PipelineCache;
use crate::registry::CodeRegistry;
use crate::source::TradeSource;
use std::sync::Arc;

pub const HEADER: &str =
    "Reporter,Year,Partner,Product categories,Indicator Type,Indicator,Indicator Value";

pub const EXPORT_PARTNER: &str = "Trade (US$ Mil)-Top 5 Export Partner";
pub const IMPORT_PARTNER: &str = "Trade (US$ Mil)-Top 5 Import Partner";

/// Builder for a synthetic At-a-Glance extract
pub struct ExtractBuilder {
    reporter: String,
    lines: Vec<String>,
}

impl ExtractBuilder {
    pub fn new(reporter: &str) -> Self {
        Self {
            reporter: reporter.to_string(),
            lines: vec![HEADER.to_string()],
        }
    }

    /// World/All Products totals in millions
    pub fn totals(self, year: i32, exports: f64, imports: f64) -> Self {
        self.row(year, "World", "Exports (in US$ Mil)", exports)
            .row(year, "World", "Imports (in US$ Mil)", imports)
    }

    pub fn export_partner(self, year: i32, partner: &str, millions: f64) -> Self {
        self.row(year, partner, EXPORT_PARTNER, millions)
    }

    pub fn import_partner(self, year: i32, partner: &str, millions: f64) -> Self {
        self.row(year, partner, IMPORT_PARTNER, millions)
    }

    pub fn row(mut self, year: i32, partner: &str, indicator: &str, value: f64) -> Self {
        self.lines.push(format!(
            "{},{},{},All Products,,\"{}\",{}",
            self.reporter, year, partner, indicator, value
        ));
        self
    }

    pub fn build(self) -> String {
        let mut payload = self.lines.join("\n");
        payload.push('\n');
        payload
    }
}

pub fn cache_over<S: TradeSource + 'static>(source: Arc<S>, codes: &[&str]) -> PipelineCache {
    let config = PipelineConfig::default().with_country_codes(codes.iter().copied());
    PipelineCache::new(
        config,
        source,
        Arc::new(CodeRegistry::builtin().unwrap()),
        Arc::new(CoordinateTable::builtin()),
    )
    .unwrap()
}
