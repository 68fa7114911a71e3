//! Command-line front-end over the airport network.
//!
//! Loads a tab-delimited dataset, runs one query, and prints a human
//! table or, with `--json`, a machine-readable report. Diagnostics honor
//! `RUST_LOG`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use airlane::graph::analytics;
use airlane::{export_routes, Dataset, LoadReport, Network, PathResult, Route};

#[derive(Parser)]
#[command(name = "airlane")]
#[command(about = "Airport network routing over tab-delimited datasets", long_about = None)]
struct Cli {
    /// Dataset directory holding name.txt, xy.txt, and weight.txt
    #[arg(long, default_value = "data")]
    data: PathBuf,

    /// Route file name inside the dataset directory
    #[arg(long, default_value = "routes_1.txt")]
    routes: String,

    /// Emit a JSON report instead of text
    #[arg(long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the network
    Stats,
    /// Shortest path between two airports
    Path {
        /// Name or code of the starting airport
        from: String,
        /// Name or code of the destination airport
        to: String,
    },
    /// Most costly shortest path in the whole network
    Farthest,
    /// Best-connected airports
    Top {
        /// How many airports to list
        #[arg(default_value_t = 10)]
        k: usize,
    },
    /// Airports with no routes
    Isolated,
    /// Export every route as origin<TAB>distance<TAB>destination
    Export {
        /// Output file
        file: PathBuf,
    },
}

#[derive(Serialize)]
struct RouteLine {
    origin: String,
    destination: String,
    distance: u32,
}

impl From<&Route> for RouteLine {
    fn from(route: &Route) -> Self {
        Self {
            origin: route.origin.clone(),
            destination: route.destination.clone(),
            distance: route.distance,
        }
    }
}

#[derive(Serialize)]
struct DegreeLine {
    min: usize,
    median: usize,
    max: usize,
    average: f64,
}

#[derive(Serialize)]
struct StatsReport {
    airports: usize,
    routes: usize,
    skipped_records: usize,
    average_distance: Option<f64>,
    isolated_airports: usize,
    hub_percentage: f64,
    degrees: DegreeLine,
    longest_route: Option<RouteLine>,
    shortest_route: Option<RouteLine>,
}

#[derive(Serialize)]
struct PathReport {
    reachable: bool,
    distance: Option<u32>,
    hops: Vec<String>,
}

#[derive(Serialize)]
struct TopRow {
    code: String,
    name: String,
    routes: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let dataset = Dataset::read(&cli.data, &cli.routes)
        .with_context(|| format!("loading dataset from `{}`", cli.data.display()))?;
    let mut network = Network::new();
    let report = dataset.populate(&mut network);

    match cli.command {
        Commands::Stats => stats(&network, report, cli.json),
        Commands::Path { from, to } => path(&network, &from, &to, cli.json),
        Commands::Farthest => farthest(&network, cli.json),
        Commands::Top { k } => top(&network, k, cli.json),
        Commands::Isolated => isolated(&network, cli.json),
        Commands::Export { file } => export(&network, &file),
    }
}

fn stats(network: &Network, load: LoadReport, json: bool) -> Result<()> {
    let degrees = analytics::summary(network.graph());
    let report = StatsReport {
        airports: network.airport_count(),
        routes: network.route_count(),
        skipped_records: load.skipped,
        average_distance: network.average_route_distance(),
        isolated_airports: network.isolated_airports().len(),
        hub_percentage: network.connection_percentage(3, usize::MAX),
        degrees: DegreeLine {
            min: degrees.min_degree,
            median: degrees.median_degree,
            max: degrees.max_degree,
            average: degrees.average_degree,
        },
        longest_route: network.longest_route().map(|(_, route)| route.into()),
        shortest_route: network.shortest_route().map(|(_, route)| route.into()),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Airports:          {}", report.airports);
    println!(
        "Routes:            {} ({} records skipped)",
        report.routes, report.skipped_records
    );
    match report.average_distance {
        Some(average) => println!("Average distance:  {average:.1}"),
        None => println!("Average distance:  n/a"),
    }
    println!("Isolated airports: {}", report.isolated_airports);
    println!("Hubs (3+ routes):  {:.1}%", report.hub_percentage);
    println!(
        "Degrees:           min {} / median {} / max {} (avg {:.1})",
        report.degrees.min, report.degrees.median, report.degrees.max, report.degrees.average
    );
    if let Some((_, route)) = network.longest_route() {
        println!("Longest route:     {route}");
    }
    if let Some((_, route)) = network.shortest_route() {
        println!("Shortest route:    {route}");
    }
    Ok(())
}

fn path_report(network: &Network, result: &PathResult<u32>) -> PathReport {
    PathReport {
        reachable: !result.is_unreachable(),
        distance: result.cost(),
        hops: network.path_codes(result),
    }
}

fn print_path(label: &str, report: &PathReport) {
    match report.distance {
        Some(distance) => {
            println!("{label}: {distance}");
            println!("  {}", report.hops.join(" -> "));
        }
        None => println!("{label}: unreachable"),
    }
}

fn path(network: &Network, from: &str, to: &str, json: bool) -> Result<()> {
    let result = network
        .shortest_path(from, to)
        .with_context(|| format!("routing `{from}` to `{to}`"))?;
    let report = path_report(network, &result);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_path(&format!("{from} -> {to}"), &report);
    }
    Ok(())
}

fn farthest(network: &Network, json: bool) -> Result<()> {
    let result = network.farthest_airports();
    let report = path_report(network, &result);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.reachable {
        let ends = (report.hops.first(), report.hops.last());
        if let (Some(from), Some(to)) = ends {
            print_path(&format!("Farthest pair {from} -> {to}"), &report);
        }
    } else {
        println!("The network has no connected pair of airports.");
    }
    Ok(())
}

fn top(network: &Network, k: usize, json: bool) -> Result<()> {
    let rows: Vec<TopRow> = network
        .most_connected(k)
        .into_iter()
        .map(|(airport, routes)| TopRow {
            code: airport.code.clone(),
            name: airport.name.clone(),
            routes,
        })
        .collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("The network has no airports.");
    }
    for (rank, row) in rows.iter().enumerate() {
        println!(
            "{:>3}. {:<5} {:<24} {} routes",
            rank + 1,
            row.code,
            row.name,
            row.routes
        );
    }
    Ok(())
}

fn isolated(network: &Network, json: bool) -> Result<()> {
    let codes: Vec<String> = network
        .isolated_airports()
        .into_iter()
        .map(|airport| airport.code.clone())
        .collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&codes)?);
        return Ok(());
    }
    if codes.is_empty() {
        println!("Every airport has at least one route.");
    }
    for code in codes {
        println!("{code}");
    }
    Ok(())
}

fn export(network: &Network, file: &Path) -> Result<()> {
    let written = export_routes(network, file)
        .with_context(|| format!("exporting routes to `{}`", file.display()))?;
    println!("Exported {written} routes to {}", file.display());
    Ok(())
}
