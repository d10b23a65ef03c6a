use std::fmt::Display;
use std::path::PathBuf;

use airroute::model::{AirportIndex, GraphStats, GraphView, NodeId};
use airroute::route_compute::{
    compare_representations, compute_route_report, RouteAlgorithm, RouteQuery,
};
use airroute::runtime::config::{load_network_config, NetworkConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "airroute")]
#[command(about = "Shortest and K-shortest routes over an airport network")]
struct Args {
    #[arg(long)]
    network: PathBuf,
    #[arg(long, value_enum, default_value_t = Representation::Sparse)]
    representation: Representation,
    #[arg(long, default_value = "INFO")]
    log_level: String,
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Representation {
    Dense,
    Sparse,
}

#[derive(Debug, clap::Args)]
struct Endpoints {
    #[arg(long)]
    from: String,
    #[arg(long)]
    to: String,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Node, edge and density summary
    Stats,
    /// Minimum number of legs
    Bfs(Endpoints),
    /// Depth-first reachability and visiting order
    Dfs(Endpoints),
    /// Shortest distance
    Dijkstra(Endpoints),
    /// Shortest distance, guided by straight-line distance to the destination
    Astar(Endpoints),
    /// Fewest legs within a stop limit, then shortest distance
    Constrained {
        #[command(flatten)]
        endpoints: Endpoints,
        #[arg(long)]
        max_stops: usize,
    },
    /// K shortest loopless routes
    Ksp {
        #[command(flatten)]
        endpoints: Endpoints,
        #[arg(short, long, default_value_t = 3)]
        k: usize,
    },
    /// Run Dijkstra on both the matrix and list forms and check they agree
    Compare(Endpoints),
}

impl Command {
    fn query(&self, index: &AirportIndex) -> Result<Option<RouteQuery>> {
        let (endpoints, algorithm) = match self {
            Command::Stats | Command::Compare(_) => return Ok(None),
            Command::Bfs(e) => (e, RouteAlgorithm::Bfs),
            Command::Dfs(e) => (e, RouteAlgorithm::Dfs),
            Command::Dijkstra(e) => (e, RouteAlgorithm::Dijkstra),
            Command::Astar(e) => (e, RouteAlgorithm::AStar),
            Command::Constrained {
                endpoints,
                max_stops,
            } => (
                endpoints,
                RouteAlgorithm::Constrained {
                    max_stops: *max_stops,
                },
            ),
            Command::Ksp { endpoints, k } => (endpoints, RouteAlgorithm::KShortest { k_paths: *k }),
        };
        Ok(Some(RouteQuery {
            source: resolve_airport(index, &endpoints.from)?,
            destination: resolve_airport(index, &endpoints.to)?,
            algorithm,
        }))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let cfg = load_network_config(&args.network)?;
    info!(
        airports = cfg.airports.len(),
        routes = cfg.routes.len(),
        representation = ?args.representation,
        "network loaded"
    );

    if let Command::Compare(endpoints) = &args.command {
        let (dense, index) = cfg.build_dense()?;
        let (sparse, _) = cfg.build_sparse()?;
        let src = resolve_airport(&index, &endpoints.from)?;
        let dst = resolve_airport(&index, &endpoints.to)?;
        return emit(
            args.json,
            &compare_representations(&dense, &sparse, &index, src, dst),
        );
    }

    match args.representation {
        Representation::Dense => {
            let (graph, index) = cfg.build_dense()?;
            run(&args, &cfg, &graph, &index)
        }
        Representation::Sparse => {
            let (graph, index) = cfg.build_sparse()?;
            run(&args, &cfg, &graph, &index)
        }
    }
}

fn run<G: GraphView>(
    args: &Args,
    cfg: &NetworkConfig,
    graph: &G,
    index: &AirportIndex,
) -> Result<()> {
    let Some(query) = args.command.query(index)? else {
        return emit(args.json, &GraphStats::of(graph));
    };

    let coords = match query.algorithm {
        RouteAlgorithm::AStar => cfg.coordinates(index)?,
        _ => None,
    };
    let report = compute_route_report(graph, index, coords.as_ref(), &query)?;
    emit(args.json, &report)
}

fn resolve_airport(index: &AirportIndex, code: &str) -> Result<NodeId> {
    let code = code.trim().to_uppercase();
    index
        .index_of(&code)
        .with_context(|| format!("unknown airport {code}"))
}

fn emit<T: Serialize + Display>(json: bool, value: &T) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{value}");
    }
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let level = level.parse::<Level>()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact()
        .init();
    Ok(())
}
