use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::process;
use tracing::debug;
use wits_processor::cli::{Args, Command};
use wits_processor::processor::writer::ParquetExporter;
use wits_processor::source::discover_country_codes;
use wits_processor::{CodeRegistry, Connection, PipelineCache, TradeRecord};

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command.clone() else {
        show_help_and_commands();
        process::exit(0);
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = run(&args, command) => result,
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(anyhow::anyhow!("Processing interrupted by user"))
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

async fn run(args: &Args, command: Command) -> Result<()> {
    setup_logging(args);

    if let Command::Lookup { code } = &command {
        let registry = CodeRegistry::builtin().context("Built-in code registry is inconsistent")?;
        print_lookup(&registry, code);
        return Ok(());
    }

    let codes = if args.discover {
        let codes = discover_country_codes(&args.data_dir, &args.pattern)
            .await
            .context("Failed to discover country extracts")?;
        debug!("Discovered country codes: {:?}", codes);
        Some(codes)
    } else {
        None
    };

    let cache = PipelineCache::from_config(args.pipeline_config(codes))
        .context("Failed to set up trade pipeline")?;

    let year = match &command {
        Command::Records { year, json } => {
            let records = cache.get_records(*year).await?;
            print_records(&cache, &records, *json)?;
            *year
        }
        Command::Connections { year, json } => {
            let connections = cache.get_connections(*year).await?;
            print_connections(&cache, &connections, *json)?;
            *year
        }
        Command::Export { year, output } => {
            let records = cache.get_records(*year).await?;
            let connections = cache.get_connections(*year).await?;

            let exporter = ParquetExporter::new(output.clone());
            let record_rows = exporter.write_records(*year, &records)?;
            let connection_rows = exporter.write_connections(
                *year,
                &connections,
                cache.config().materiality_threshold,
            )?;

            println!(
                "  {} {} records -> {}",
                "Wrote".bright_green(),
                record_rows.to_string().bright_white().bold(),
                exporter.records_path(*year).display()
            );
            println!(
                "  {} {} connections -> {}",
                "Wrote".bright_green(),
                connection_rows.to_string().bright_white().bold(),
                exporter.connections_path(*year).display()
            );
            *year
        }
        Command::Lookup { .. } => return Ok(()),
    };

    if !args.quiet {
        print_summary(&cache, year);
    }

    Ok(())
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wits_processor={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

fn print_lookup(registry: &CodeRegistry, code: &str) {
    let normalized = registry.normalize(code);
    let known = registry.log_unknown(code);

    println!("{}", code.bright_green().bold());
    println!("  {} {}", "Canonical:".bright_cyan(), normalized);
    println!(
        "  {} {}",
        "Geographic:".bright_cyan(),
        registry.to_geographic(&normalized).unwrap_or("-")
    );
    println!(
        "  {} {}",
        "Statistical:".bright_cyan(),
        registry.to_statistical(&normalized).unwrap_or("-")
    );
    println!("  {} {}", "Name:".bright_cyan(), registry.resolve_name(code));
    println!(
        "  {} {}",
        "Known:".bright_cyan(),
        if known { "yes".bright_green() } else { "no".bright_red() }
    );
}

fn print_records(cache: &PipelineCache, records: &[TradeRecord], json: bool) -> Result<()> {
    // Presentation order is by trade balance, largest surplus first
    let mut sorted: Vec<&TradeRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.trade_balance().total_cmp(&a.trade_balance()));

    if json {
        println!("{}", serde_json::to_string_pretty(&sorted)?);
        return Ok(());
    }

    let registry = cache.registry();
    println!(
        "{:<5} {:<5} {:<32} {:>14} {:>14} {:>14}",
        "CODE", "GEO", "COUNTRY", "EXPORTS", "IMPORTS", "BALANCE"
    );
    for record in sorted {
        let geographic = if registry.log_unknown(record.country_code()) {
            registry
                .to_geographic(&registry.normalize(record.country_code()))
                .unwrap_or("-")
        } else {
            "-"
        };

        let balance = format_usd(record.trade_balance());
        let balance = if record.trade_balance() < 0.0 {
            balance.bright_red()
        } else {
            balance.bright_green()
        };

        println!(
            "{:<5} {:<5} {:<32} {:>14} {:>14} {:>14}",
            record.country_code(),
            geographic,
            record.country(),
            format_usd(record.exports()),
            format_usd(record.imports()),
            balance
        );
    }

    Ok(())
}

fn print_connections(cache: &PipelineCache, connections: &[Connection], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(connections)?);
        return Ok(());
    }

    let registry = cache.registry();
    let threshold = cache.config().materiality_threshold;
    println!(
        "{:<24} {:<24} {:<7} {:>14} {:>7}",
        "SOURCE", "TARGET", "TYPE", "VALUE", "WEIGHT"
    );
    for connection in connections {
        println!(
            "{:<24} {:<24} {:<7} {:>14} {:>7.2}",
            registry.resolve_name(&connection.source),
            registry.resolve_name(&connection.target),
            connection.connection_type,
            format_usd(connection.value),
            connection.weight(threshold)
        );
    }

    Ok(())
}

fn print_summary(cache: &PipelineCache, year: i32) {
    let Some(stats) = cache.stats(year) else {
        return;
    };

    eprintln!("\n{}", format!("Summary for {}", year).bright_green().bold());
    eprintln!(
        "  {} {}/{}",
        "Countries loaded:".bright_cyan(),
        stats.countries_loaded.to_string().bright_white().bold(),
        stats.countries_requested
    );
    if stats.countries_failed > 0 {
        eprintln!(
            "  {} {}",
            "Countries failed:".bright_red(),
            stats.countries_failed.to_string().bright_red().bold()
        );
    }
    eprintln!(
        "  {} {}",
        "Without totals:".bright_cyan(),
        stats.countries_without_totals
    );
    eprintln!(
        "  {} {} of {}",
        "Connections retained:".bright_cyan(),
        stats.connections_retained,
        stats.candidate_connections
    );
    eprintln!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.elapsed.as_millis()
    );
}

fn format_usd(value: f64) -> String {
    let magnitude = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if magnitude >= 1e12 {
        format!("{}${:.2}T", sign, magnitude / 1e12)
    } else if magnitude >= 1e9 {
        format!("{}${:.2}B", sign, magnitude / 1e9)
    } else if magnitude >= 1e6 {
        format!("{}${:.2}M", sign, magnitude / 1e6)
    } else {
        format!("{}${:.0}", sign, magnitude)
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("WITS Processor - Trade Data Aggregator");
    println!("======================================");
    println!();
    println!("Aggregate per-country WITS At-a-Glance extracts into yearly trade");
    println!("summaries and a graph of trade connections between countries.");
    println!();
    println!("USAGE:");
    println!("    wits-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    records        Print trade records for a year");
    println!("    connections    Print trade connections for a year");
    println!("    lookup         Show how a country code resolves");
    println!("    export         Write a year's tables to Parquet");
    println!();
    println!("EXAMPLES:");
    println!("    wits-processor records --year 2019 --data-dir ./wits");
    println!(
        "    wits-processor connections --year 2019 --pattern 'en_{{code}}_At-a-Glance.csv'"
    );
    println!("    wits-processor export --year 2019 --output ./parquet --discover");
    println!("    wits-processor lookup ROM");
    println!();
    println!("For detailed help on any command, use:");
    println!("    wits-processor <COMMAND> --help");
}
