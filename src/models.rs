//! Core data structures for WITS trade processing.
//!
//! Defines the parsed CSV row, the per-country trade record with its top
//! partners, the directed connection between two countries, and the
//! statistics reported for each year's fan-out.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// One data row of a WITS At-a-Glance extract, fields kept as given
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRow {
    pub reporter: String,
    pub year: String,
    pub partner: String,
    pub product_category: String,
    /// Missing in some extract variants
    pub indicator_type: Option<String>,
    pub indicator: String,
    pub indicator_value: String,
}

impl TradeRow {
    /// Year as an integer, if the field is a whole number ("2019" or "2019.0")
    pub fn year(&self) -> Option<i32> {
        let year = self.year.trim().parse::<f64>().ok()?;
        (year.fract() == 0.0 && year >= i32::MIN as f64 && year <= i32::MAX as f64)
            .then_some(year as i32)
    }

    /// Indicator value as a finite number in source units
    pub fn value(&self) -> Option<f64> {
        self.indicator_value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }
}

/// Geographic position of a country centroid
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const ORIGIN: Coordinates = Coordinates {
        latitude: 0.0,
        longitude: 0.0,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A counterpart in a trade relationship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    /// Partner identifier as reported by the source
    pub partner: String,
    /// Value in base currency units
    pub value: f64,
}

/// One country's trade summary for one year.
///
/// The trade balance is derived from exports and imports at construction
/// and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    country: String,
    country_code: String,
    year: i32,
    exports: f64,
    imports: f64,
    trade_balance: f64,
    latitude: f64,
    longitude: f64,
    top_export_partners: Vec<Partner>,
    top_import_partners: Vec<Partner>,
}

impl TradeRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        country: impl Into<String>,
        country_code: impl Into<String>,
        year: i32,
        exports: f64,
        imports: f64,
        coordinates: Coordinates,
        top_export_partners: Vec<Partner>,
        top_import_partners: Vec<Partner>,
    ) -> Self {
        Self {
            country: country.into(),
            country_code: country_code.into(),
            year,
            exports,
            imports,
            trade_balance: exports - imports,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            top_export_partners,
            top_import_partners,
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn exports(&self) -> f64 {
        self.exports
    }

    pub fn imports(&self) -> f64 {
        self.imports
    }

    pub fn trade_balance(&self) -> f64 {
        self.trade_balance
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn top_export_partners(&self) -> &[Partner] {
        &self.top_export_partners
    }

    pub fn top_import_partners(&self) -> &[Partner] {
        &self.top_import_partners
    }
}

/// Direction of a trade connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Export,
    Import,
}

impl ConnectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionType::Export => "export",
            ConnectionType::Import => "import",
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A directed trade edge for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub source: String,
    pub target: String,
    /// Value in base currency units
    pub value: f64,
    #[serde(rename = "type")]
    pub connection_type: ConnectionType,
}

impl Connection {
    /// Rendering weight: natural log of the value relative to the threshold.
    ///
    /// Positive for every connection that passed the materiality filter.
    pub fn weight(&self, threshold: f64) -> f64 {
        (self.value / threshold).ln()
    }
}

/// Statistics for one year's fan-out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FanOutStats {
    pub year: i32,
    pub countries_requested: usize,
    pub countries_loaded: usize,
    pub countries_failed: usize,
    /// Loaded without a World/All Products export or import total
    pub countries_without_totals: usize,
    pub candidate_connections: usize,
    pub connections_retained: usize,
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_balance_is_derived() {
        let record = TradeRecord::new(
            "Testland",
            "TST",
            2020,
            100e6,
            40e6,
            Coordinates::ORIGIN,
            Vec::new(),
            Vec::new(),
        );
        assert_eq!(record.trade_balance(), record.exports() - record.imports());

        let deficit = TradeRecord::new(
            "Deficitland",
            "DEF",
            2020,
            10.5,
            30.25,
            Coordinates::ORIGIN,
            Vec::new(),
            Vec::new(),
        );
        assert_eq!(deficit.trade_balance(), 10.5 - 30.25);
        assert!(deficit.trade_balance() < 0.0);
    }

    #[test]
    fn test_row_numeric_coercion() {
        let row = TradeRow {
            reporter: "Testland".to_string(),
            year: " 2019 ".to_string(),
            partner: "World".to_string(),
            product_category: "All Products".to_string(),
            indicator_type: None,
            indicator: "Exports (in US$ Mil)".to_string(),
            indicator_value: "12.5".to_string(),
        };
        assert_eq!(row.year(), Some(2019));
        assert_eq!(row.value(), Some(12.5));

        let bad = TradeRow {
            year: "n/a".to_string(),
            indicator_value: "NaN".to_string(),
            ..row
        };
        assert_eq!(bad.year(), None);
        assert_eq!(bad.value(), None);

        let decimal_year = TradeRow {
            year: "2019.0".to_string(),
            ..bad.clone()
        };
        assert_eq!(decimal_year.year(), Some(2019));

        let fractional_year = TradeRow {
            year: "2019.5".to_string(),
            ..bad
        };
        assert_eq!(fractional_year.year(), None);
    }

    #[test]
    fn test_connection_weight_and_serialization() {
        let connection = Connection {
            source: "USA".to_string(),
            target: "CHN".to_string(),
            value: 2e8,
            connection_type: ConnectionType::Export,
        };
        assert!((connection.weight(1e8) - 2f64.ln()).abs() < 1e-12);

        let json = serde_json::to_value(&connection).unwrap();
        assert_eq!(json["type"], "export");
        assert_eq!(json["source"], "USA");
    }
}
