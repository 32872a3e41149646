use std::{cmp::Ordering, collections::BinaryHeap};

use fxhash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::{
    error::RoutingError,
    intersection::IntersectionId,
    road_graph::{NodeIndex, RoadGraph},
    shortest_path_index::{ShortestPathIndex, ShortestPathTree},
    weighting::{DistanceWeighting, MAX_WEIGHT, Weight, Weighting},
};

#[derive(Copy, Clone, Debug)]
struct HeapItem {
    node: NodeIndex,
    weight: Weight,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &HeapItem) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &HeapItem) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip weight to make this a min-heap
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| self.node.cmp(&other.node))
    }
}

struct NodeData {
    weight: Weight,
    settled: bool,
    parent: Option<NodeIndex>,
}

/// Plain Dijkstra over the [`RoadGraph`]. Every call to
/// [`ShortestPathIndex::shortest_path_tree`] owns its own search state, so a
/// single instance can serve several threads at once.
pub struct Dijkstra<'a, W = DistanceWeighting>
where
    W: Weighting,
{
    graph: &'a RoadGraph,
    weighting: W,
}

impl<'a> Dijkstra<'a, DistanceWeighting> {
    pub fn new(graph: &'a RoadGraph) -> Self {
        Dijkstra::with_weighting(graph, DistanceWeighting)
    }
}

impl<'a, W> Dijkstra<'a, W>
where
    W: Weighting,
{
    pub fn with_weighting(graph: &'a RoadGraph, weighting: W) -> Self {
        Dijkstra { graph, weighting }
    }

    pub fn weighting(&self) -> &W {
        &self.weighting
    }

    fn run(&self, start: NodeIndex, targets: &[NodeIndex]) -> FxHashMap<NodeIndex, NodeData> {
        // Use a map instead of a vector, most searches only touch a small part of the graph
        let mut data: FxHashMap<NodeIndex, NodeData> = FxHashMap::default();
        let mut heap: BinaryHeap<HeapItem> = BinaryHeap::with_capacity(1024);

        let mut remaining_targets: FxHashSet<NodeIndex> = targets.iter().copied().collect();
        let stop_early = !remaining_targets.is_empty();

        data.insert(
            start,
            NodeData {
                weight: 0.0,
                settled: false,
                parent: None,
            },
        );
        heap.push(HeapItem {
            node: start,
            weight: 0.0,
        });

        let mut iterations = 0;

        while let Some(HeapItem { node, weight }) = heap.pop() {
            match data.get_mut(&node) {
                // Stale heap entry, the node was already settled with a lower weight
                Some(node_data) if node_data.settled || weight > node_data.weight => continue,
                Some(node_data) => node_data.settled = true,
                None => continue,
            }

            iterations += 1;

            for (segment_index, segment) in self.graph.outgoing_segments_iter(node) {
                if !self.weighting.can_access_segment(segment) {
                    continue;
                }
                let segment_weight = self.weighting.calc_segment_weight(segment);

                let adj_node = self.graph.segment_target(segment_index);
                let next_weight = weight + segment_weight;

                let adj_data = data.entry(adj_node).or_insert(NodeData {
                    weight: MAX_WEIGHT,
                    settled: false,
                    parent: None,
                });

                if adj_data.settled || next_weight >= adj_data.weight {
                    continue;
                }

                adj_data.weight = next_weight;
                adj_data.parent = Some(node);
                heap.push(HeapItem {
                    node: adj_node,
                    weight: next_weight,
                });
            }

            remaining_targets.remove(&node);
            if stop_early && remaining_targets.is_empty() {
                break;
            }
        }

        debug!(
            source = %self.graph.intersection(start).id(),
            iterations,
            "Dijkstra settled {} nodes",
            iterations
        );

        data
    }
}

impl<W> ShortestPathIndex for Dijkstra<'_, W>
where
    W: Weighting + Sync,
{
    fn road_graph(&self) -> &RoadGraph {
        self.graph
    }

    fn shortest_path_tree(
        &self,
        source: IntersectionId,
        targets: &[IntersectionId],
    ) -> Result<ShortestPathTree, RoutingError> {
        let start = self
            .graph
            .node_index(source)
            .ok_or(RoutingError::UnknownIntersection(source))?;

        // Unknown targets can never be settled, they are reported as unreachable by the tree
        let target_nodes: Vec<NodeIndex> = targets
            .iter()
            .filter_map(|&target| self.graph.node_index(target))
            .collect();
        let early_exit = target_nodes.len() == targets.len();

        let data = self.run(start, if early_exit { &target_nodes } else { &[] });

        let mut distances = FxHashMap::default();
        let mut predecessors = FxHashMap::default();

        // Only settled nodes carry final distances. Tentative ones left in the
        // frontier after an early exit are dropped.
        for (node, node_data) in data.iter().filter(|(_, node_data)| node_data.settled) {
            let id = self.graph.intersection(*node).id();
            distances.insert(id, node_data.weight);
            if let Some(parent) = node_data.parent {
                predecessors.insert(id, self.graph.intersection(parent).id());
            }
        }

        Ok(ShortestPathTree::new(source, distances, predecessors))
    }
}
