use fixedbitset::FixedBitSet;

use crate::{problem::stop::StopVertex, stop_graph::StopGraph};

/// Decides in which order the children of a search node are explored.
///
/// Candidates are the vertices of `unvisited` reachable from `current`. The
/// returned list is a snapshot: the search mutates `unvisited` while it walks
/// through it. Precedence between pickups and deliveries is enforced by the
/// search itself, on top of whatever an order yields.
pub trait VisitOrder: Send + Sync {
    fn candidates(
        &self,
        graph: &StopGraph,
        current: StopVertex,
        unvisited: &FixedBitSet,
    ) -> Vec<StopVertex>;
}

/// Ascending vertex index.
#[derive(Debug, Default, Clone, Copy)]
pub struct AscendingOrder;

impl VisitOrder for AscendingOrder {
    fn candidates(
        &self,
        graph: &StopGraph,
        current: StopVertex,
        unvisited: &FixedBitSet,
    ) -> Vec<StopVertex> {
        unvisited
            .ones()
            .map(StopVertex::new)
            .filter(|&next| graph.is_arc(current, next))
            .collect()
    }
}

/// Cheapest arc first, ties broken by vertex index. Good tours are found
/// early, which makes the bound prune more.
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestFirstOrder;

impl VisitOrder for NearestFirstOrder {
    fn candidates(
        &self,
        graph: &StopGraph,
        current: StopVertex,
        unvisited: &FixedBitSet,
    ) -> Vec<StopVertex> {
        let mut candidates = AscendingOrder.candidates(graph, current, unvisited);
        candidates.sort_by(|&a, &b| {
            graph
                .cost(current, a)
                .total_cmp(&graph.cost(current, b))
                .then_with(|| a.cmp(&b))
        });
        candidates
    }
}
