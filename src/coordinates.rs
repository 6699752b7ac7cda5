//! Static country centroid lookup.

use crate::constants::COUNTRY_COORDINATES;
use crate::models::Coordinates;
use std::collections::HashMap;

/// Country centroids keyed by statistical-source code
#[derive(Debug, Clone, Default)]
pub struct CoordinateTable {
    entries: HashMap<String, Coordinates>,
}

impl CoordinateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table over the built-in centroids
    pub fn builtin() -> Self {
        COUNTRY_COORDINATES
            .iter()
            .fold(Self::new(), |table, (code, lat, lon)| {
                table.with_entry(*code, Coordinates::new(*lat, *lon))
            })
    }

    pub fn with_entry(mut self, code: impl Into<String>, coordinates: Coordinates) -> Self {
        self.entries.insert(code.into().to_uppercase(), coordinates);
        self
    }

    /// Known coordinates for a code
    pub fn get(&self, code: &str) -> Option<Coordinates> {
        self.entries.get(&code.to_uppercase()).copied()
    }

    /// Coordinates for a code, or the origin when unmapped
    pub fn get_or_origin(&self, code: &str) -> Coordinates {
        self.get(code).unwrap_or(Coordinates::ORIGIN)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
