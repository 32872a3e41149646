use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::anyhow;
use clap::{Args, ValueEnum};
use comfy_table::Table;
use courier_optimizer::{
    problem::stop::StopKind,
    solver::{
        solver::TspSolver,
        solver_params::{BoundStrategy, SolverParams, VisitOrderStrategy},
    },
    stop_graph::StopGraph,
    tour::{Tour, TourParams},
};
use courier_routing::dijkstra::Dijkstra;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{info, warn};

use crate::{generate, parsers};

#[derive(Args)]
pub struct SolveArgs {
    /// Number of intersections from west to east
    #[arg(long, default_value_t = 20)]
    width: u64,

    /// Number of intersections from south to north
    #[arg(long, default_value_t = 20)]
    height: u64,

    /// Number of pickup and delivery requests
    #[arg(short, long, default_value_t = 5)]
    requests: usize,

    /// Seed of the generated city, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Search time limit (e.g., "30s", "PT1M", "10")
    #[arg(short, long, value_parser = parsers::parse_duration, default_value = "10s")]
    duration: jiff::SignedDuration,

    #[arg(long, value_enum, default_value_t = BoundArg::MinOutgoingEdge)]
    bound: BoundArg,

    #[arg(long, value_enum, default_value_t = OrderArg::NearestFirst)]
    order: OrderArg,

    /// Courier speed in km/h
    #[arg(long, default_value_t = 15.0)]
    speed: f64,

    /// Departure time from the warehouse, today
    #[arg(long, default_value = "08:00")]
    departure: jiff::civil::Time,

    /// Writes the tour as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, ValueEnum)]
enum BoundArg {
    Zero,
    MinOutgoingEdge,
}

impl From<BoundArg> for BoundStrategy {
    fn from(value: BoundArg) -> Self {
        match value {
            BoundArg::Zero => BoundStrategy::Zero,
            BoundArg::MinOutgoingEdge => BoundStrategy::MinOutgoingEdge,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum OrderArg {
    Ascending,
    NearestFirst,
}

impl From<OrderArg> for VisitOrderStrategy {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Ascending => VisitOrderStrategy::Ascending,
            OrderArg::NearestFirst => VisitOrderStrategy::NearestFirst,
        }
    }
}

pub fn run(args: SolveArgs) -> Result<(), anyhow::Error> {
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    info!(seed, width = args.width, height = args.height, "Generating city");

    let mut rng = SmallRng::seed_from_u64(seed);
    let road_graph = generate::road_graph(args.width, args.height, &mut rng)?;
    let problem = generate::problem(&road_graph, args.requests, &mut rng)?;

    let index = Dijkstra::new(&road_graph);
    let stop_graph = Arc::new(StopGraph::build(&problem, &index)?);

    let params = SolverParams {
        time_limit: args.duration,
        bound: args.bound.into(),
        visit_order: args.order.into(),
    };

    let spinner = Arc::new(ProgressBar::new_spinner());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_style(ProgressStyle::with_template("{spinner} [{elapsed}] {msg}")?);
    spinner.set_message("searching...");

    let mut solver = TspSolver::from_params(&params);
    let progress = Arc::clone(&spinner);
    solver.on_best_solution(move |solution| {
        progress.set_message(format!("best tour so far: {:.0} m", solution.cost()));
    });

    let solver = Arc::new(solver);
    let status = match solver.start(params.time_limit, Arc::clone(&stop_graph))? {
        Some(handle) => handle
            .join()
            .map_err(|_| anyhow!("Solver thread panicked"))?,
        None => solver.status(),
    };
    spinner.finish_and_clear();

    let Some(best) = solver.current_best() else {
        warn!(?status, "No tour found");
        return Ok(());
    };

    let tour = Tour::assemble(
        &stop_graph,
        &best,
        &TourParams {
            departure_time: jiff::Zoned::now().date().to_datetime(args.departure),
            speed_kmh: args.speed,
        },
    )?;
    info!(?status, cost = tour.total_cost(), "Tour ready");

    println!("{}", tour_table(&stop_graph, &tour));

    if let Some(output) = args.output {
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&output, serde_json::to_string_pretty(&tour)?)?;
        info!("Tour written to {:?}", output);
    }

    Ok(())
}

fn tour_table(graph: &StopGraph, tour: &Tour) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "#",
        "Stop",
        "Intersection",
        "Arrival",
        "Departure",
        "Leg (m)",
    ]);

    for (position, visit) in tour.visits().iter().enumerate() {
        let stop = match graph.stop(visit.stop).kind() {
            StopKind::Warehouse => String::from("warehouse"),
            StopKind::Pickup { request, .. } => format!("pickup {request}"),
            StopKind::Delivery { request, .. } => format!("delivery {request}"),
        };
        let leg = position
            .checked_sub(1)
            .map(|leg| format!("{:.0}", tour.legs()[leg].cost))
            .unwrap_or_default();

        table.add_row(vec![
            position.to_string(),
            stop,
            visit.intersection.to_string(),
            visit.arrival.strftime("%a %H:%M").to_string(),
            visit.departure.strftime("%a %H:%M").to_string(),
            leg,
        ]);
    }

    if let Some(last) = tour.legs().last() {
        table.add_row(vec![
            String::new(),
            String::from("warehouse"),
            graph.stop(last.to).intersection().to_string(),
            tour.return_time().strftime("%a %H:%M").to_string(),
            String::new(),
            format!("{:.0}", last.cost),
        ]);
    }

    table.add_row(vec![
        String::new(),
        String::from("total"),
        String::new(),
        String::new(),
        String::new(),
        format!("{:.0}", tour.total_cost()),
    ]);

    table
}
