use courier_optimizer::problem::{
    delivery_problem::DeliveryProblem,
    request::{Request, RequestId},
};
use courier_routing::{
    intersection::{Intersection, IntersectionId},
    road_graph::RoadGraph,
    segment::Segment,
};
use jiff::SignedDuration;
use rand::{Rng, seq::index::sample};
use tracing::info;

const ORIGIN: (f64, f64) = (45.75, 4.85);
/// Roughly 110 meters of latitude
const BLOCK_DEGREES: f64 = 0.001;

/// Grid city with slightly jittered intersections. Every fifth street is one
/// way, alternating direction, so that some stop pairs are not symmetric.
pub fn road_graph(width: u64, height: u64, rng: &mut impl Rng) -> anyhow::Result<RoadGraph> {
    let mut intersections = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let jitter = BLOCK_DEGREES / 5.0;
            intersections.push(Intersection::new(
                IntersectionId::new(y * width + x),
                ORIGIN.0 + y as f64 * BLOCK_DEGREES + rng.random_range(-jitter..jitter),
                ORIGIN.1 + x as f64 * BLOCK_DEGREES + rng.random_range(-jitter..jitter),
            ));
        }
    }

    let mut segments = Vec::new();
    let mut connect = |from: u64, to: u64, name: String, one_way: bool| {
        let length = intersections[from as usize].haversine_distance(&intersections[to as usize]);
        segments.push(Segment::new(
            IntersectionId::new(from),
            IntersectionId::new(to),
            length,
            name.clone(),
        ));
        if !one_way {
            segments.push(Segment::new(
                IntersectionId::new(to),
                IntersectionId::new(from),
                length,
                name,
            ));
        }
    };

    for y in 0..height {
        for x in 0..width {
            let id = y * width + x;
            if x + 1 < width {
                // One way streets never sit on the border so the grid stays connected
                let one_way = y % 5 == 2 && y + 1 < height;
                if one_way && y % 10 == 7 {
                    connect(id + 1, id, format!("Street {y}"), true);
                } else {
                    connect(id, id + 1, format!("Street {y}"), one_way);
                }
            }
            if y + 1 < height {
                connect(id, id + width, format!("Avenue {x}"), false);
            }
        }
    }

    let graph = RoadGraph::new(intersections, segments)?;
    info!(
        intersections = graph.node_count(),
        segments = graph.segment_count(),
        "Generated road network"
    );

    Ok(graph)
}

/// Random requests on distinct intersections, the warehouse included.
pub fn problem(
    graph: &RoadGraph,
    num_requests: usize,
    rng: &mut impl Rng,
) -> anyhow::Result<DeliveryProblem> {
    let num_stops = 2 * num_requests + 1;
    anyhow::ensure!(
        num_stops <= graph.node_count(),
        "{num_requests} requests need {num_stops} intersections, the city only has {}",
        graph.node_count()
    );

    let picked: Vec<IntersectionId> = sample(rng, graph.node_count(), num_stops)
        .into_iter()
        .map(|node| graph.intersection(node).id())
        .collect();

    let requests = picked[1..]
        .chunks_exact(2)
        .enumerate()
        .map(|(index, pair)| {
            Request::new(RequestId::new(index), pair[0], pair[1]).with_durations(
                SignedDuration::from_mins(rng.random_range(2..=8)),
                SignedDuration::from_mins(rng.random_range(1..=5)),
            )
        })
        .collect();

    Ok(DeliveryProblem::new(picked[0], requests))
}
