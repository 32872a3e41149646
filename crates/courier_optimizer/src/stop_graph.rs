use courier_routing::{
    error::RoutingError, intersection::IntersectionId, shortest_path_index::ShortestPathIndex,
};
use fixedbitset::FixedBitSet;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    error::TourError,
    problem::{
        delivery_problem::DeliveryProblem,
        stop::{Stop, StopVertex},
    },
    timer_debug,
};

/// Complete directed graph over the stops of one tour computation. Costs are
/// shortest road distances between the stops, and the road path realizing
/// each cost is kept for tour expansion.
///
/// Costs and paths are stored in flat `n * n` vectors,
/// `index = from * num_vertices + to`. A missing arc has an infinite cost.
#[derive(Debug, Clone)]
pub struct StopGraph {
    stops: Vec<Stop>,
    costs: Vec<f64>,
    paths: Vec<Vec<IntersectionId>>,
}

impl StopGraph {
    /// Runs one shortest path search per stop and keeps the stop to stop
    /// results. Fails before any search when the problem references unknown
    /// intersections, and fails as a whole when any pair of stops is not
    /// connected.
    pub fn build(
        problem: &DeliveryProblem,
        index: &impl ShortestPathIndex,
    ) -> Result<StopGraph, TourError> {
        problem.validate(index.road_graph())?;

        let stops = problem.stops();
        let targets: Vec<IntersectionId> = stops.iter().map(Stop::intersection).collect();

        let trees = timer_debug!(
            "Shortest path trees",
            stops
                .par_iter()
                .map(|stop| index.shortest_path_tree(stop.intersection(), &targets))
                .collect::<Result<Vec<_>, RoutingError>>()?
        );

        let num_vertices = stops.len();
        let mut costs = vec![f64::INFINITY; num_vertices * num_vertices];
        let mut paths = vec![Vec::new(); num_vertices * num_vertices];
        let mut unreachable = Vec::new();

        for (from, tree) in trees.iter().enumerate() {
            for (to, stop) in stops.iter().enumerate() {
                if from == to {
                    continue;
                }

                match tree.path_to(stop.intersection()) {
                    Some(path) => {
                        costs[from * num_vertices + to] =
                            tree.distance(stop.intersection()).unwrap_or(f64::INFINITY);
                        paths[from * num_vertices + to] = path;
                    }
                    None => {
                        unreachable.push(RoutingError::UnreachableTarget {
                            origin: tree.source(),
                            target: stop.intersection(),
                        });
                    }
                }
            }
        }

        if !unreachable.is_empty() {
            warn!(
                "{} pair(s) of stops are not connected, first: {}",
                unreachable.len(),
                unreachable[0]
            );
            return Err(TourError::DisconnectedStops { unreachable });
        }

        debug!(
            "Built stop graph with {} vertices for {} requests",
            num_vertices,
            problem.requests().len()
        );

        Ok(StopGraph {
            stops,
            costs,
            paths,
        })
    }

    /// Builds a graph from a precomputed cost matrix, without road paths.
    /// `costs[i][j]` is the cost of the arc `i -> j`; diagonal entries are
    /// ignored and an infinite or NaN cost means there is no arc.
    pub fn from_costs(stops: Vec<Stop>, costs: Vec<Vec<f64>>) -> StopGraph {
        let num_vertices = stops.len();
        assert_eq!(costs.len(), num_vertices, "cost matrix must be square");

        let costs = costs
            .into_iter()
            .enumerate()
            .flat_map(|(from, row)| {
                assert_eq!(row.len(), num_vertices, "cost matrix must be square");
                row.into_iter().enumerate().map(move |(to, cost)| {
                    if from == to || cost.is_nan() {
                        f64::INFINITY
                    } else {
                        cost
                    }
                })
            })
            .collect();

        StopGraph {
            stops,
            costs,
            paths: vec![Vec::new(); num_vertices * num_vertices],
        }
    }

    #[inline(always)]
    fn index(&self, from: StopVertex, to: StopVertex) -> usize {
        from.get() * self.stops.len() + to.get()
    }

    pub fn num_vertices(&self) -> usize {
        self.stops.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = StopVertex> + '_ {
        (0..self.stops.len()).map(StopVertex::new)
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn stop(&self, vertex: StopVertex) -> &Stop {
        &self.stops[vertex]
    }

    /// Cost of the arc `from -> to`, infinite when there is none.
    #[inline(always)]
    pub fn cost(&self, from: StopVertex, to: StopVertex) -> f64 {
        self.costs[self.index(from, to)]
    }

    #[inline(always)]
    pub fn is_arc(&self, from: StopVertex, to: StopVertex) -> bool {
        from != to && self.cost(from, to).is_finite()
    }

    /// Intersections from the stop `from` to the stop `to`, both included.
    /// Empty for graphs built with [`StopGraph::from_costs`].
    pub fn path(&self, from: StopVertex, to: StopVertex) -> &[IntersectionId] {
        &self.paths[self.index(from, to)]
    }

    /// Every vertex except the warehouse.
    pub fn free_vertices(&self) -> FixedBitSet {
        let mut vertices = FixedBitSet::with_capacity(self.num_vertices());
        vertices.insert_range(1..self.num_vertices());
        vertices
    }

    /// A delivery can only be placed once its pickup left `unvisited`.
    #[inline(always)]
    pub fn respects_precedence(&self, candidate: StopVertex, unvisited: &FixedBitSet) -> bool {
        match self.stop(candidate).required_pickup() {
            Some(pickup) => !unvisited.contains(pickup.get()),
            None => true,
        }
    }
}
