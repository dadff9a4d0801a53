//! campus — walk followers along the shortest route between two campus
//! markers and record every step to CSV.
//!
//! ```text
//! campus [FROM] [TO] [--graph FILE] [--config FILE] [--out DIR]
//! ```
//!
//! Without `--graph` a built-in seven-marker campus is used; without
//! `--config` followers walk at 2 units/s, one spawned per second, for
//! `DEFAULT_RUN_SECS` simulated seconds.  `RUST_LOG` controls log output.

mod graph_file;
mod trace;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use wp_core::NavConfig;
use wp_graph::{DijkstraPathFinder, Graph};
use wp_sim::NavSimBuilder;

use graph_file::{SAMPLE_CAMPUS, load_graph, parse_graph};
use trace::CsvTrace;

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_FROM:     &str = "Gate";
const DEFAULT_TO:       &str = "Lab";
const DEFAULT_OUT_DIR:  &str = "output/campus";
const DEFAULT_RUN_SECS: f32  = 30.0;

// ── Arguments ─────────────────────────────────────────────────────────────────

struct Args {
    from:    String,
    to:      String,
    graph:   Option<PathBuf>,
    config:  Option<PathBuf>,
    out_dir: PathBuf,
}

fn parse_args() -> Result<Args> {
    let mut positional = Vec::new();
    let mut graph = None;
    let mut config = None;
    let mut out_dir = PathBuf::from(DEFAULT_OUT_DIR);

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--graph" => graph = Some(PathBuf::from(it.next().context("--graph needs a path")?)),
            "--config" => config = Some(PathBuf::from(it.next().context("--config needs a path")?)),
            "--out" => out_dir = PathBuf::from(it.next().context("--out needs a directory")?),
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            _ => positional.push(arg),
        }
    }
    if positional.len() > 2 {
        bail!("expected at most two marker labels, got {}", positional.len());
    }
    let mut positional = positional.into_iter();
    Ok(Args {
        from: positional.next().unwrap_or_else(|| DEFAULT_FROM.to_owned()),
        to: positional.next().unwrap_or_else(|| DEFAULT_TO.to_owned()),
        graph,
        config,
        out_dir,
    })
}

fn load_config(path: Option<&Path>) -> Result<NavConfig> {
    let mut config = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .with_context(|| format!("reading config file {}", p.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config file {}", p.display()))?
        }
        None => NavConfig::default(),
    };
    if config.total_ticks == 0 {
        config.total_ticks = config.make_clock().ticks_for_secs(DEFAULT_RUN_SECS);
    }
    Ok(config)
}

fn load_campus(path: Option<&Path>) -> Result<Graph> {
    match path {
        Some(p) => load_graph(p),
        None => parse_graph(SAMPLE_CAMPUS).context("parsing built-in campus"),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("campus=info".parse()?)
                .add_directive("wp_sim=info".parse()?),
        )
        .init();

    let args = parse_args()?;

    // 1. Graph and configuration.
    let graph = load_campus(args.graph.as_deref())?;
    let config = load_config(args.config.as_deref())?;
    info!(
        markers = graph.marker_count(),
        links = graph.link_count(),
        symmetric = graph.is_symmetric(),
        "graph loaded"
    );

    // 2. Build the sim and compute the route.
    let mut sim = NavSimBuilder::new(config.clone(), graph, DijkstraPathFinder).build()?;
    let route = sim
        .request_route_by_label(&args.from, &args.to)
        .with_context(|| format!("routing {} -> {}", args.from, args.to))?;

    let labels: Vec<&str> = route
        .markers()
        .iter()
        .filter_map(|&m| sim.graph.marker(m).map(|marker| marker.label.as_str()))
        .collect();
    info!(
        route = %labels.join(" -> "),
        distance = route.total_distance(),
        walk_secs = route.travel_secs(config.follower_speed),
        "route computed"
    );

    // 3. Output.
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let route_path = args.out_dir.join("route.json");
    serde_json::to_writer_pretty(std::fs::File::create(&route_path)?, route.as_ref())?;
    let mut trace = CsvTrace::new(&args.out_dir.join("trace.csv"), config.tick_duration_secs)?;

    // 4. Run.
    let t0 = Instant::now();
    sim.run(&mut trace);
    let elapsed = t0.elapsed();

    if let Some(e) = trace.take_error() {
        warn!(error = %e, "trace output error");
    }
    trace.finish()?;

    // 5. Summary.
    info!(
        ticks = config.total_ticks,
        sim_secs = sim.clock.elapsed_secs(),
        wall_ms = elapsed.as_millis() as u64,
        spawned = sim.spawner.spawned_count(),
        arrived = trace.arrivals(),
        still_walking = sim.follower_count(),
        rows = trace.rows(),
        "run complete"
    );
    println!("wrote {} and {}", route_path.display(), args.out_dir.join("trace.csv").display());

    Ok(())
}
