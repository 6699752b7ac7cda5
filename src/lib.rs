//! WITS Processor Library
//!
//! Ingests per-country World Integrated Trade Solution (WITS) "At-a-Glance"
//! CSV extracts and turns them into per-year trade summaries and a graph of
//! trade connections between countries.
//!
//! This library provides tools for:
//! - Reconciling WITS statistical-source codes with ISO3 geographic codes
//! - Leniently parsing per-country CSV extracts
//! - Aggregating totals and top-5 partners into one record per country-year
//! - Building material, fully resolved connections between countries
//! - Memoizing each year's load behind a concurrent, failure-isolating fan-out
//! - Exporting a year's tables to Parquet

pub mod cli;
pub mod config;
pub mod constants;
pub mod coordinates;
pub mod error;
pub mod models;
pub mod parser;
pub mod processor;
pub mod registry;
pub mod source;

pub use config::PipelineConfig;
pub use coordinates::CoordinateTable;
pub use error::{Result, WitsError};
pub use models::{Connection, ConnectionType, Coordinates, FanOutStats, Partner, TradeRecord};
pub use processor::PipelineCache;
pub use registry::CodeRegistry;
pub use source::{FileSource, MemorySource, TradeSource};
