//! Connection building across all countries for one year
//!
//! Each country contributes candidate edges to its top-5 partners. Once the
//! year's records are known, candidates are kept only if they are material
//! and both endpoints resolve to a record with known coordinates.

use crate::constants::{
    ALL_PRODUCTS, INDICATOR_TOP_EXPORT_PARTNER, INDICATOR_TOP_IMPORT_PARTNER, PARTNER_UNSPECIFIED,
    PARTNER_WORLD,
};
use crate::coordinates::CoordinateTable;
use crate::models::{Connection, ConnectionType, TradeRecord, TradeRow};
use crate::registry::CodeRegistry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ConnectionBuilder {
    registry: Arc<CodeRegistry>,
    coordinates: Arc<CoordinateTable>,
    materiality_threshold: f64,
    value_scale: f64,
}

impl ConnectionBuilder {
    pub fn new(
        registry: Arc<CodeRegistry>,
        coordinates: Arc<CoordinateTable>,
        materiality_threshold: f64,
        value_scale: f64,
    ) -> Self {
        Self {
            registry,
            coordinates,
            materiality_threshold,
            value_scale,
        }
    }

    /// Candidate edges from one country's rows, before endpoint filtering
    pub fn candidates(&self, code: &str, year: i32, rows: &[TradeRow]) -> Vec<Connection> {
        rows.iter()
            .filter(|r| r.year() == Some(year))
            .filter(|r| r.partner != PARTNER_WORLD && r.partner != PARTNER_UNSPECIFIED)
            .filter(|r| r.product_category == ALL_PRODUCTS)
            .filter_map(|r| {
                let connection_type = partner_indicator_type(&r.indicator)?;
                let value = r.value()? * self.value_scale;
                Some(Connection {
                    source: code.to_string(),
                    target: r.partner.clone(),
                    value,
                    connection_type,
                })
            })
            .collect()
    }

    /// Keep the candidates that pass the materiality threshold and whose
    /// endpoints both resolve to a record with known coordinates.
    ///
    /// Retained edges carry the resolved records' country codes.
    pub fn retain(&self, candidates: Vec<Connection>, records: &[TradeRecord]) -> Vec<Connection> {
        let index = RecordIndex::new(&self.registry, records);
        let total = candidates.len();

        let retained: Vec<Connection> = candidates
            .into_iter()
            .filter(|c| c.value > self.materiality_threshold)
            .filter_map(|c| {
                let source = index.by_code(&self.registry, &c.source)?;
                let Some(target) = index.resolve(&self.registry, &c.target) else {
                    self.registry.log_unknown(&c.target);
                    return None;
                };

                let mapped = self.coordinates.contains(source.country_code())
                    && self.coordinates.contains(target.country_code());

                mapped.then(|| Connection {
                    source: source.country_code().to_string(),
                    target: target.country_code().to_string(),
                    ..c
                })
            })
            .collect();

        debug!(
            "Retained {} of {} candidate connections (threshold {})",
            retained.len(),
            total,
            self.materiality_threshold
        );

        retained
    }
}

/// Export/import tag from a top-5 partner indicator name
fn partner_indicator_type(indicator: &str) -> Option<ConnectionType> {
    if indicator.contains(INDICATOR_TOP_EXPORT_PARTNER) {
        Some(ConnectionType::Export)
    } else if indicator.contains(INDICATOR_TOP_IMPORT_PARTNER) {
        Some(ConnectionType::Import)
    } else {
        None
    }
}

/// Records indexed by normalized code and by lowercased display name
struct RecordIndex<'a> {
    codes: HashMap<String, &'a TradeRecord>,
    names: HashMap<String, &'a TradeRecord>,
}

impl<'a> RecordIndex<'a> {
    fn new(registry: &CodeRegistry, records: &'a [TradeRecord]) -> Self {
        let mut codes = HashMap::with_capacity(records.len());
        let mut names = HashMap::with_capacity(records.len());

        for record in records {
            codes
                .entry(registry.normalize(record.country_code()))
                .or_insert(record);
            names
                .entry(record.country().trim().to_lowercase())
                .or_insert(record);
        }

        Self { codes, names }
    }

    fn by_code(&self, registry: &CodeRegistry, code: &str) -> Option<&'a TradeRecord> {
        self.codes.get(&registry.normalize(code)).copied()
    }

    /// Resolve a partner identifier, by code first and display name second
    fn resolve(&self, registry: &CodeRegistry, partner: &str) -> Option<&'a TradeRecord> {
        self.by_code(registry, partner)
            .or_else(|| self.names.get(&partner.trim().to_lowercase()).copied())
    }
}
