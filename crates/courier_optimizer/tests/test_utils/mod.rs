#![allow(dead_code)]

use courier_optimizer::{
    problem::{
        delivery_problem::DeliveryProblem,
        request::{Request, RequestId},
        stop::StopVertex,
    },
    stop_graph::StopGraph,
};
use courier_routing::{
    intersection::{Intersection, IntersectionId},
    road_graph::RoadGraph,
    segment::Segment,
};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Problem whose stop `v` sits on intersection `v`: warehouse 0, request `k`
/// picks up at `2k + 1` and delivers at `2k + 2`.
pub fn create_problem(num_requests: usize) -> DeliveryProblem {
    let requests = (0..num_requests)
        .map(|k| {
            Request::new(
                RequestId::new(k),
                IntersectionId::new(2 * k as u64 + 1),
                IntersectionId::new(2 * k as u64 + 2),
            )
        })
        .collect();

    DeliveryProblem::new(IntersectionId::new(0), requests)
}

/// Stop graph with euclidean costs, `points[v]` being the position of vertex `v`.
/// The number of points must be odd.
pub fn create_euclidean_graph(points: &[(f64, f64)]) -> StopGraph {
    assert_eq!(points.len() % 2, 1, "warehouse plus pairs of stops");
    let problem = create_problem(points.len() / 2);

    let costs = points
        .iter()
        .map(|&(x1, y1)| {
            points
                .iter()
                .map(|&(x2, y2)| ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt())
                .collect()
        })
        .collect();

    StopGraph::from_costs(problem.stops(), costs)
}

pub fn create_random_graph(num_requests: usize, seed: u64) -> StopGraph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let points: Vec<(f64, f64)> = (0..2 * num_requests + 1)
        .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
        .collect();

    create_euclidean_graph(&points)
}

/// Random one-way costs, roughly one arc in five missing.
pub fn create_random_asymmetric_graph(num_requests: usize, seed: u64) -> StopGraph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let num_vertices = 2 * num_requests + 1;
    let problem = create_problem(num_requests);

    let costs = (0..num_vertices)
        .map(|_| {
            (0..num_vertices)
                .map(|_| {
                    if rng.random_bool(0.2) {
                        f64::INFINITY
                    } else {
                        rng.random_range(1.0..100.0)
                    }
                })
                .collect()
        })
        .collect();

    StopGraph::from_costs(problem.stops(), costs)
}

pub fn tour_cost(graph: &StopGraph, stops: &[StopVertex]) -> f64 {
    let mut cost = 0.0;
    for window in stops.windows(2) {
        cost += graph.cost(window[0], window[1]);
    }

    if let Some(&last) = stops.last()
        && !last.is_warehouse()
    {
        cost += graph.cost(last, StopVertex::WAREHOUSE);
    }

    cost
}

/// Every vertex once, warehouse first, each delivery after its pickup.
pub fn is_valid_tour(graph: &StopGraph, stops: &[StopVertex]) -> bool {
    if stops.len() != graph.num_vertices() || stops.first() != Some(&StopVertex::WAREHOUSE) {
        return false;
    }

    let mut seen = vec![false; graph.num_vertices()];
    for &vertex in stops {
        if vertex.get() >= seen.len() || seen[vertex.get()] {
            return false;
        }

        if let Some(pickup) = graph.stop(vertex).required_pickup()
            && !seen[pickup.get()]
        {
            return false;
        }

        seen[vertex.get()] = true;
    }

    true
}

/// Cheapest valid tour by enumerating every permutation, without pruning.
pub fn brute_force_optimum(graph: &StopGraph) -> Option<f64> {
    fn enumerate(
        graph: &StopGraph,
        tour: &mut Vec<StopVertex>,
        visited: &mut Vec<bool>,
        best: &mut Option<f64>,
    ) {
        if tour.len() == graph.num_vertices() {
            let cost = tour_cost(graph, tour);
            if cost.is_finite() && best.is_none_or(|best| cost < best) {
                *best = Some(cost);
            }
            return;
        }

        for vertex in graph.vertices().skip(1) {
            if visited[vertex.get()] {
                continue;
            }

            if let Some(pickup) = graph.stop(vertex).required_pickup()
                && !visited[pickup.get()]
            {
                continue;
            }

            visited[vertex.get()] = true;
            tour.push(vertex);
            enumerate(graph, tour, visited, best);
            tour.pop();
            visited[vertex.get()] = false;
        }
    }

    let mut best = None;
    let mut visited = vec![false; graph.num_vertices()];
    visited[0] = true;
    enumerate(graph, &mut vec![StopVertex::WAREHOUSE], &mut visited, &mut best);
    best
}

//
//  Intersection ids of a 3x2 grid:
//
//  3 -- 4 -- 5
//  |    |    |
//  0 -- 1 -- 2
//
/// Grid of two-way streets, every block `spacing` meters long.
pub fn create_grid_road_graph(width: u64, height: u64, spacing: f64) -> RoadGraph {
    let mut intersections = Vec::new();
    let mut segments = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let id = y * width + x;
            intersections.push(Intersection::new(
                IntersectionId::new(id),
                45.75 + y as f64 * 0.001,
                4.85 + x as f64 * 0.001,
            ));

            let mut neighbors = Vec::new();
            if x + 1 < width {
                neighbors.push(id + 1);
            }
            if y + 1 < height {
                neighbors.push(id + width);
            }

            for neighbor in neighbors {
                let name = format!("{id}-{neighbor}");
                segments.push(Segment::new(
                    IntersectionId::new(id),
                    IntersectionId::new(neighbor),
                    spacing,
                    name.clone(),
                ));
                segments.push(Segment::new(
                    IntersectionId::new(neighbor),
                    IntersectionId::new(id),
                    spacing,
                    name,
                ));
            }
        }
    }

    RoadGraph::new(intersections, segments).unwrap()
}
