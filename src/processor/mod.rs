//! Year-keyed pipeline cache.
//!
//! Orchestrates loading a year of WITS data: one fetch, parse and aggregate
//! task per country, joined once every task has settled. A country whose
//! extract is missing or unusable is logged and left out; the rest of the
//! year still loads. Results are memoized per year for the lifetime of the
//! cache, and concurrent callers asking for the same uncached year share a
//! single fan-out.

pub mod aggregator;
pub mod connections;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{aggregator::RecordAggregator, connections::ConnectionBuilder};

use crate::config::PipelineConfig;
use crate::coordinates::CoordinateTable;
use crate::error::{Result, WitsError};
use crate::models::{Connection, FanOutStats, TradeRecord};
use crate::parser::parse_trade_csv;
use crate::registry::CodeRegistry;
use crate::source::{FileSource, TradeSource};

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Everything loaded for one year
#[derive(Debug)]
struct YearData {
    records: Arc<[TradeRecord]>,
    connections: Arc<[Connection]>,
    stats: FanOutStats,
}

/// Result of one country's fetch-parse-aggregate task
#[derive(Debug)]
struct CountryOutcome {
    record: Option<TradeRecord>,
    candidates: Vec<Connection>,
}

type YearSlot = Arc<OnceCell<Arc<YearData>>>;

/// Memoizing cache of trade records and connections, keyed by year
pub struct PipelineCache {
    config: PipelineConfig,
    source: Arc<dyn TradeSource>,
    registry: Arc<CodeRegistry>,
    coordinates: Arc<CoordinateTable>,
    years: Mutex<HashMap<i32, YearSlot>>,
}

impl std::fmt::Debug for PipelineCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineCache")
            .field("config", &self.config)
            .field("cached_years", &self.cached_years())
            .finish()
    }
}

impl PipelineCache {
    /// Create a cache over an explicit source, registry and coordinate table
    pub fn new(
        config: PipelineConfig,
        source: Arc<dyn TradeSource>,
        registry: Arc<CodeRegistry>,
        coordinates: Arc<CoordinateTable>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            source,
            registry,
            coordinates,
            years: Mutex::new(HashMap::new()),
        })
    }

    /// Create a cache reading extracts from `config.data_dir`, with the
    /// built-in registry and coordinates
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        let source = Arc::new(FileSource::from_config(&config));
        let registry = Arc::new(CodeRegistry::builtin()?);
        let coordinates = Arc::new(CoordinateTable::builtin());
        Self::new(config, source, registry, coordinates)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn registry(&self) -> &CodeRegistry {
        &self.registry
    }

    pub fn coordinates(&self) -> &CoordinateTable {
        &self.coordinates
    }

    /// Trade records for `year`, loading the year on first request
    pub async fn get_records(&self, year: i32) -> Result<Arc<[TradeRecord]>> {
        Ok(self.year(year).await?.records.clone())
    }

    /// Retained connections for `year`, loading the year on first request
    pub async fn get_connections(&self, year: i32) -> Result<Arc<[Connection]>> {
        Ok(self.year(year).await?.connections.clone())
    }

    /// Fan-out statistics for a year already loaded
    pub fn stats(&self, year: i32) -> Option<FanOutStats> {
        self.slot_if_present(year)
            .and_then(|slot| slot.get().map(|data| data.stats.clone()))
    }

    pub fn is_cached(&self, year: i32) -> bool {
        self.slot_if_present(year)
            .is_some_and(|slot| slot.initialized())
    }

    /// Years with a completed load, ascending
    pub fn cached_years(&self) -> Vec<i32> {
        let years = self.years.lock().unwrap_or_else(|p| p.into_inner());
        let mut cached: Vec<i32> = years
            .iter()
            .filter(|(_, slot)| slot.initialized())
            .map(|(year, _)| *year)
            .collect();
        cached.sort_unstable();
        cached
    }

    fn slot_if_present(&self, year: i32) -> Option<YearSlot> {
        let years = self.years.lock().unwrap_or_else(|p| p.into_inner());
        years.get(&year).cloned()
    }

    fn slot(&self, year: i32) -> YearSlot {
        let mut years = self.years.lock().unwrap_or_else(|p| p.into_inner());
        years.entry(year).or_default().clone()
    }

    async fn year(&self, year: i32) -> Result<Arc<YearData>> {
        let slot = self.slot(year);
        if let Some(data) = slot.get() {
            debug!("Cache hit for {}", year);
            return Ok(data.clone());
        }

        let data = slot.get_or_try_init(|| self.load_year(year)).await?;
        Ok(data.clone())
    }

    /// Fan out over every configured country and consolidate the results
    async fn load_year(&self, year: i32) -> Result<Arc<YearData>> {
        let start_time = Instant::now();
        let mut seen = HashSet::new();
        let codes: Vec<String> = self
            .config
            .country_codes
            .iter()
            .map(|c| c.trim().to_uppercase())
            .filter(|c| seen.insert(c.clone()))
            .collect();

        info!("Loading trade data for {} from {} countries", year, codes.len());

        let aggregator = RecordAggregator::new(
            self.coordinates.clone(),
            self.config.top_partners,
            self.config.value_scale,
        );
        let builder = ConnectionBuilder::new(
            self.registry.clone(),
            self.coordinates.clone(),
            self.config.materiality_threshold,
            self.config.value_scale,
        );

        let progress_bar = self.progress_bar(codes.len(), year);
        let limit = self.config.fan_out_limit(codes.len());

        let settled = stream::iter(codes.iter().cloned())
            .map(|code| {
                let source = self.source.clone();
                let aggregator = aggregator.clone();
                let builder = builder.clone();
                let task_code = code.clone();
                let handle = tokio::spawn(async move {
                    load_country(source.as_ref(), &aggregator, &builder, &task_code, year).await
                });

                let pb = progress_bar.clone();
                async move {
                    let result = handle.await;
                    pb.inc(1);
                    (code, result)
                }
            })
            .buffer_unordered(limit)
            .collect::<Vec<_>>()
            .await;

        progress_bar.finish_and_clear();

        let mut stats = FanOutStats {
            year,
            countries_requested: codes.len(),
            ..FanOutStats::default()
        };
        let mut records = Vec::new();
        let mut candidates = Vec::new();
        let mut fault = None;

        for (code, result) in settled {
            match result {
                Ok(Ok(outcome)) => {
                    match outcome.record {
                        Some(record) => {
                            stats.countries_loaded += 1;
                            records.push(record);
                        }
                        None => stats.countries_without_totals += 1,
                    }
                    candidates.extend(outcome.candidates);
                }
                Ok(Err(e)) if !e.is_per_country() => {
                    stats.countries_failed += 1;
                    fault.get_or_insert_with(|| format!("loading {} failed: {}", code, e));
                }
                Ok(Err(e)) => {
                    stats.countries_failed += 1;
                    warn!(
                        "Error loading data for {} ({}): {}",
                        code,
                        self.source.describe(&code),
                        e
                    );
                }
                Err(join_error) => {
                    stats.countries_failed += 1;
                    fault.get_or_insert_with(|| format!("task for {} failed: {}", code, join_error));
                }
            }
        }

        if let Some(reason) = fault {
            return Err(WitsError::FanOutFailed { year, reason });
        }

        records.sort_by(|a, b| a.country_code().cmp(b.country_code()));

        stats.candidate_connections = candidates.len();
        let mut connections = builder.retain(candidates, &records);
        connections.sort_by(|a, b| a.source.cmp(&b.source));
        stats.connections_retained = connections.len();
        stats.elapsed = start_time.elapsed();

        info!(
            "Loaded {}: {} records, {} failed, {} without totals, {} of {} connections retained in {}ms",
            year,
            stats.countries_loaded,
            stats.countries_failed,
            stats.countries_without_totals,
            stats.connections_retained,
            stats.candidate_connections,
            stats.elapsed.as_millis()
        );

        Ok(Arc::new(YearData {
            records: records.into(),
            connections: connections.into(),
            stats,
        }))
    }

    fn progress_bar(&self, len: usize, year: i32) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message(format!("Loading {}", year));
        pb
    }
}

async fn load_country(
    source: &dyn TradeSource,
    aggregator: &RecordAggregator,
    builder: &ConnectionBuilder,
    code: &str,
    year: i32,
) -> Result<CountryOutcome> {
    let payload = source.fetch(code).await?;
    let rows = parse_trade_csv(code, &payload)?;

    let record = aggregator.aggregate(code, year, &rows);
    let candidates = builder.candidates(code, year, &rows);

    Ok(CountryOutcome { record, candidates })
}
