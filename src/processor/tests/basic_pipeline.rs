//! Basic pipeline tests

use super::{ExtractBuilder, cache_over};
use crate::config::PipelineConfig;
use crate::coordinates::CoordinateTable;
use crate::models::ConnectionType;
use crate::processor::PipelineCache;
use crate::registry::CodeRegistry;
use crate::source::MemorySource;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_two_country_scenario() {
    let usa = ExtractBuilder::new("United States")
        .totals(2019, 100.0, 40.0)
        .export_partner(2019, "China", 2e8)
        .build();
    let chn = ExtractBuilder::new("China")
        .totals(2019, 10.0, 5.0)
        // Exactly at the threshold, must not be retained
        .import_partner(2019, "United States", 1e8)
        .build();

    let source = Arc::new(
        MemorySource::new()
            .with_payload("USA", usa)
            .with_payload("CHN", chn),
    );
    let config = PipelineConfig::default()
        .with_country_codes(["USA", "CHN"])
        .with_value_scale(1.0);
    let cache = PipelineCache::new(
        config,
        source,
        Arc::new(CodeRegistry::builtin().unwrap()),
        Arc::new(CoordinateTable::builtin()),
    )
    .unwrap();

    let records = cache.get_records(2019).await.unwrap();
    assert_eq!(records.len(), 2);

    let usa = records.iter().find(|r| r.country_code() == "USA").unwrap();
    let chn = records.iter().find(|r| r.country_code() == "CHN").unwrap();
    assert_eq!(usa.trade_balance(), 60.0);
    assert_eq!(chn.trade_balance(), 5.0);
    assert_eq!(usa.country(), "United States");
    assert_eq!(usa.top_export_partners()[0].partner, "China");

    let connections = cache.get_connections(2019).await.unwrap();
    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0].source, "USA");
    assert_eq!(connections[0].target, "CHN");
    assert_eq!(connections[0].value, 2e8);
    assert_eq!(connections[0].connection_type, ConnectionType::Export);
    assert!(connections[0].weight(1e8) > 0.0);
}

#[tokio::test]
async fn test_repeated_requests_fetch_once() {
    let source = Arc::new(
        MemorySource::new()
            .with_payload("DEU", ExtractBuilder::new("Germany").totals(2019, 1500.0, 1200.0).build())
            .with_payload("FRA", ExtractBuilder::new("France").totals(2019, 570.0, 650.0).build())
            .with_payload("ITA", ExtractBuilder::new("Italy").totals(2019, 530.0, 470.0).build()),
    );
    let cache = cache_over(source.clone(), &["DEU", "FRA", "ITA"]);

    let first = cache.get_records(2019).await.unwrap();
    assert_eq!(source.fetch_count(), 3);

    let second = cache.get_records(2019).await.unwrap();
    assert_eq!(source.fetch_count(), 3);
    assert_eq!(first, second);
    assert!(Arc::ptr_eq(&first, &second));

    // Connections come from the same load
    cache.get_connections(2019).await.unwrap();
    assert_eq!(source.fetch_count(), 3);
}

#[tokio::test]
async fn test_records_sorted_and_balance_derived() {
    let source = Arc::new(
        MemorySource::new()
            .with_payload("JPN", ExtractBuilder::new("Japan").totals(2019, 705.6, 720.9).build())
            .with_payload("BRA", ExtractBuilder::new("Brazil").totals(2019, 225.4, 177.3).build()),
    );
    let cache = cache_over(source, &["JPN", "BRA"]);

    let records = cache.get_records(2019).await.unwrap();
    let codes: Vec<&str> = records.iter().map(|r| r.country_code()).collect();
    assert_eq!(codes, vec!["BRA", "JPN"]);

    for record in records.iter() {
        assert_eq!(record.trade_balance(), record.exports() - record.imports());
    }
    assert!(records[1].trade_balance() < 0.0);
}

#[tokio::test]
async fn test_load_from_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("en_DEU_At-a-Glance.csv"),
        ExtractBuilder::new("Germany")
            .totals(2018, 1560.0, 1290.0)
            .export_partner(2018, "United States", 135.0)
            .export_partner(2018, "France", 120.0)
            .build(),
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("en_FRA_At-a-Glance.csv"),
        ExtractBuilder::new("France")
            .totals(2018, 580.0, 670.0)
            .import_partner(2018, "Germany", 110.0)
            .build(),
    )
    .unwrap();

    let config = PipelineConfig::default()
        .with_data_dir(temp_dir.path())
        .with_file_pattern("en_{code}_At-a-Glance.csv")
        .with_country_codes(["DEU", "FRA"]);
    let cache = PipelineCache::from_config(config).unwrap();

    let records = cache.get_records(2018).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].exports(), 1560e6);

    // DEU -> United States has no record for the partner; DEU -> FRA and
    // FRA -> DEU both resolve by name
    let connections = cache.get_connections(2018).await.unwrap();
    assert_eq!(connections.len(), 2);
    assert_eq!(connections[0].source, "DEU");
    assert_eq!(connections[0].target, "FRA");
    assert_eq!(connections[1].source, "FRA");
    assert_eq!(connections[1].target, "DEU");
    assert_eq!(connections[1].connection_type, ConnectionType::Import);
}

#[tokio::test]
async fn test_stats_and_cached_years() {
    let source = Arc::new(
        MemorySource::new()
            .with_payload("CAN", ExtractBuilder::new("Canada").totals(2017, 420.0, 433.0).build())
            .with_payload("MEX", ExtractBuilder::new("Mexico").totals(2016, 374.0, 387.0).build()),
    );
    let cache = cache_over(source, &["CAN", "MEX", "AUS"]);

    assert!(!cache.is_cached(2017));
    assert!(cache.stats(2017).is_none());

    cache.get_records(2017).await.unwrap();

    assert!(cache.is_cached(2017));
    assert_eq!(cache.cached_years(), vec![2017]);

    let stats = cache.stats(2017).unwrap();
    assert_eq!(stats.year, 2017);
    assert_eq!(stats.countries_requested, 3);
    assert_eq!(stats.countries_loaded, 1);
    assert_eq!(stats.countries_without_totals, 1);
    assert_eq!(stats.countries_failed, 1);
}
