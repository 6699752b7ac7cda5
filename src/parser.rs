//! WITS At-a-Glance CSV parsing.
//!
//! Turns one country's CSV payload into [`TradeRow`]s. The parser is lenient:
//! rows whose field count differs from the header are dropped without an
//! error, since the source files are known to carry formatting noise. A file
//! whose header lacks a required column cannot be used at all and is
//! rejected as a whole.

use crate::constants::columns;
use crate::error::{Result, WitsError};
use crate::models::TradeRow;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

/// Column positions resolved from a header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    reporter: usize,
    year: usize,
    partner: usize,
    product_category: usize,
    indicator_type: Option<usize>,
    indicator: usize,
    indicator_value: usize,
}

impl ColumnIndex {
    fn from_headers(code: &str, headers: &StringRecord) -> Result<Self> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
        };

        if let Some(missing) = columns::REQUIRED.iter().find(|c| position(**c).is_none()) {
            return Err(WitsError::InvalidFormat {
                code: code.to_string(),
                reason: format!("missing column '{}'", missing),
            });
        }

        let required = |name: &str| position(name).unwrap_or_default();

        Ok(Self {
            reporter: required(columns::REPORTER),
            year: required(columns::YEAR),
            partner: required(columns::PARTNER),
            product_category: required(columns::PRODUCT_CATEGORIES),
            indicator_type: position(columns::INDICATOR_TYPE),
            indicator: required(columns::INDICATOR),
            indicator_value: required(columns::INDICATOR_VALUE),
        })
    }

    fn row(&self, record: &StringRecord) -> TradeRow {
        let field = |i: usize| record.get(i).unwrap_or_default().to_string();

        TradeRow {
            reporter: field(self.reporter),
            year: field(self.year),
            partner: field(self.partner),
            product_category: field(self.product_category),
            indicator_type: self
                .indicator_type
                .map(field)
                .filter(|value| !value.is_empty()),
            indicator: field(self.indicator),
            indicator_value: field(self.indicator_value),
        }
    }
}

/// Parse one country's CSV payload into rows.
///
/// `code` is only used for error context.
pub fn parse_trade_csv(code: &str, payload: &str) -> Result<Vec<TradeRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(payload.as_bytes());

    let headers = reader.headers()?.clone();
    let index = ColumnIndex::from_headers(code, &headers)?;

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for result in reader.records() {
        match result {
            Ok(record) if record.len() == headers.len() => rows.push(index.row(&record)),
            _ => dropped += 1,
        }
    }

    debug!(
        "Parsed {} rows for {} ({} malformed rows dropped)",
        rows.len(),
        code,
        dropped
    );

    Ok(rows)
}
