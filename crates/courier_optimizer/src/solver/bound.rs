use fixedbitset::FixedBitSet;

use crate::{problem::stop::StopVertex, stop_graph::StopGraph};

/// Lower bound on the cost of completing a partial tour: leaving `current`,
/// visiting every vertex of `unvisited` and returning to the warehouse.
///
/// A bound must never overestimate, otherwise the search prunes branches that
/// contain the optimum. Returning `f64::INFINITY` means no completion exists.
pub trait Bound: Send + Sync {
    fn lower_bound(&self, graph: &StopGraph, current: StopVertex, unvisited: &FixedBitSet) -> f64;
}

/// Never prunes, the search enumerates every valid tour.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZeroBound;

impl Bound for ZeroBound {
    #[inline(always)]
    fn lower_bound(&self, _graph: &StopGraph, _current: StopVertex, _unvisited: &FixedBitSet) -> f64 {
        0.0
    }
}

/// Every vertex still to place has to be left exactly once, towards another
/// unvisited vertex or the warehouse, and `current` has to be left towards an
/// unvisited vertex. Summing the cheapest such arcs never exceeds the real
/// completion cost.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinOutgoingEdgeBound;

impl MinOutgoingEdgeBound {
    fn cheapest_arc(
        graph: &StopGraph,
        from: StopVertex,
        unvisited: &FixedBitSet,
        include_warehouse: bool,
    ) -> f64 {
        let cheapest = unvisited
            .ones()
            .map(StopVertex::new)
            .filter(|&to| to != from)
            .map(|to| graph.cost(from, to))
            .fold(f64::INFINITY, f64::min);

        if include_warehouse {
            cheapest.min(graph.cost(from, StopVertex::WAREHOUSE))
        } else {
            cheapest
        }
    }
}

impl Bound for MinOutgoingEdgeBound {
    fn lower_bound(&self, graph: &StopGraph, current: StopVertex, unvisited: &FixedBitSet) -> f64 {
        if unvisited.is_clear() {
            return graph.cost(current, StopVertex::WAREHOUSE);
        }

        let mut bound = Self::cheapest_arc(graph, current, unvisited, false);

        for vertex in unvisited.ones().map(StopVertex::new) {
            if bound == f64::INFINITY {
                break;
            }
            bound += Self::cheapest_arc(graph, vertex, unvisited, true);
        }

        bound
    }
}
