//! Record aggregation for one country and one year
//!
//! Reduces a country's parsed rows to a single [`TradeRecord`]: the
//! World/All Products totals plus the largest export and import partners.

use crate::constants::{
    ALL_PRODUCTS, INDICATOR_TOP_EXPORT_PARTNER, INDICATOR_TOP_IMPORT_PARTNER,
    INDICATOR_TOTAL_EXPORTS, INDICATOR_TOTAL_IMPORTS, PARTNER_UNSPECIFIED, PARTNER_WORLD,
};
use crate::coordinates::CoordinateTable;
use crate::models::{Partner, TradeRecord, TradeRow};
use std::sync::Arc;
use tracing::debug;

/// Builds trade records from parsed rows
#[derive(Debug, Clone)]
pub struct RecordAggregator {
    coordinates: Arc<CoordinateTable>,
    top_partners: usize,
    value_scale: f64,
}

impl RecordAggregator {
    pub fn new(coordinates: Arc<CoordinateTable>, top_partners: usize, value_scale: f64) -> Self {
        Self {
            coordinates,
            top_partners,
            value_scale,
        }
    }

    /// Aggregate one country's rows for `year`.
    ///
    /// Returns `None` when the World/All Products export or import total is
    /// missing or unusable; the country then has no record for that year.
    pub fn aggregate(&self, code: &str, year: i32, rows: &[TradeRow]) -> Option<TradeRecord> {
        let year_rows: Vec<&TradeRow> = rows.iter().filter(|r| r.year() == Some(year)).collect();

        let exports_row = find_total(&year_rows, INDICATOR_TOTAL_EXPORTS);
        let imports_row = find_total(&year_rows, INDICATOR_TOTAL_IMPORTS);

        let (Some(exports_row), Some(imports_row)) = (exports_row, imports_row) else {
            debug!("No export/import totals for {} in {}", code, year);
            return None;
        };

        let exports = self.scaled(exports_row)?;
        let imports = self.scaled(imports_row)?;
        if exports < 0.0 || imports < 0.0 {
            debug!("Negative totals for {} in {}, skipping", code, year);
            return None;
        }

        let export_partners = self.partners(&year_rows, INDICATOR_TOP_EXPORT_PARTNER);
        let import_partners = self.partners(&year_rows, INDICATOR_TOP_IMPORT_PARTNER);

        Some(TradeRecord::new(
            exports_row.reporter.clone(),
            code,
            year,
            exports,
            imports,
            self.coordinates.get_or_origin(code),
            select_top_partners(export_partners, self.top_partners),
            select_top_partners(import_partners, self.top_partners),
        ))
    }

    fn scaled(&self, row: &TradeRow) -> Option<f64> {
        row.value().map(|v| v * self.value_scale)
    }

    fn partners(&self, rows: &[&TradeRow], indicator: &str) -> Vec<Partner> {
        rows.iter()
            .filter(|r| r.indicator.contains(indicator) && r.partner != PARTNER_UNSPECIFIED)
            .filter(|r| r.product_category == ALL_PRODUCTS)
            .filter_map(|r| {
                let value = self.scaled(r)?;
                (value >= 0.0).then(|| Partner {
                    partner: r.partner.clone(),
                    value,
                })
            })
            .collect()
    }
}

fn find_total<'a>(rows: &[&'a TradeRow], indicator: &str) -> Option<&'a TradeRow> {
    rows.iter().copied().find(|r| {
        r.partner == PARTNER_WORLD && r.product_category == ALL_PRODUCTS && r.indicator == indicator
    })
}

/// Sort partners by descending value and keep the first `limit`.
///
/// The sort is stable, so equal values keep their first-seen order.
pub fn select_top_partners(mut partners: Vec<Partner>, limit: usize) -> Vec<Partner> {
    partners.sort_by(|a, b| b.value.total_cmp(&a.value));
    partners.truncate(limit);
    partners
}
