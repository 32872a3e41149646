use fxhash::FxHashMap;

use crate::{
    error::RoutingError, intersection::IntersectionId, road_graph::RoadGraph, weighting::Weight,
};

/// Result of a single-source search. Only intersections reached by the search
/// appear in the maps, there is no "infinite distance" entry.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: IntersectionId,
    distances: FxHashMap<IntersectionId, Weight>,
    predecessors: FxHashMap<IntersectionId, IntersectionId>,
}

impl ShortestPathTree {
    pub fn new(
        source: IntersectionId,
        distances: FxHashMap<IntersectionId, Weight>,
        predecessors: FxHashMap<IntersectionId, IntersectionId>,
    ) -> Self {
        ShortestPathTree {
            source,
            distances,
            predecessors,
        }
    }

    pub fn source(&self) -> IntersectionId {
        self.source
    }

    pub fn distance(&self, target: IntersectionId) -> Option<Weight> {
        self.distances.get(&target).copied()
    }

    pub fn predecessor(&self, target: IntersectionId) -> Option<IntersectionId> {
        self.predecessors.get(&target).copied()
    }

    pub fn distances(&self) -> &FxHashMap<IntersectionId, Weight> {
        &self.distances
    }

    pub fn predecessors(&self) -> &FxHashMap<IntersectionId, IntersectionId> {
        &self.predecessors
    }

    pub fn is_reachable(&self, target: IntersectionId) -> bool {
        self.distances.contains_key(&target)
    }

    /// Intersections from the source to `target`, both included.
    pub fn path_to(&self, target: IntersectionId) -> Option<Vec<IntersectionId>> {
        if !self.is_reachable(target) {
            return None;
        }

        let mut path = vec![target];
        let mut node = target;
        while let Some(parent) = self.predecessor(node) {
            path.push(parent);
            node = parent;
        }

        path.reverse();
        Some(path)
    }

    pub fn unreachable<'a>(
        &'a self,
        targets: &'a [IntersectionId],
    ) -> impl Iterator<Item = IntersectionId> + 'a {
        targets
            .iter()
            .copied()
            .filter(|&target| !self.is_reachable(target))
    }
}

pub trait ShortestPathIndex: Sync {
    fn road_graph(&self) -> &RoadGraph;

    /// Runs a search from `source`. The search may stop as soon as every
    /// intersection in `targets` is settled; with no targets it explores the
    /// whole reachable graph.
    fn shortest_path_tree(
        &self,
        source: IntersectionId,
        targets: &[IntersectionId],
    ) -> Result<ShortestPathTree, RoutingError>;

    /// Same as [`ShortestPathIndex::shortest_path_tree`] but fails when one of
    /// the `targets` cannot be reached.
    fn compute_from(
        &self,
        source: IntersectionId,
        targets: &[IntersectionId],
    ) -> Result<ShortestPathTree, RoutingError> {
        let tree = self.shortest_path_tree(source, targets)?;

        if let Some(target) = tree.unreachable(targets).next() {
            return Err(RoutingError::UnreachableTarget {
                origin: source,
                target,
            });
        }

        Ok(tree)
    }
}
