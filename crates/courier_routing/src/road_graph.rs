use fxhash::FxHashMap;

use crate::{
    error::RoutingError,
    intersection::{Intersection, IntersectionId},
    segment::Segment,
};

pub type NodeIndex = usize;
pub type SegmentIndex = usize;

/// The full road network. Intersections are stored densely and addressed by a
/// [`NodeIndex`]; the mapping from [`IntersectionId`] is kept alongside.
///
/// The graph is immutable once built and can be shared between threads.
#[derive(Debug, Default)]
pub struct RoadGraph {
    intersections: Vec<Intersection>,
    segments: Vec<Segment>,
    node_indices: FxHashMap<IntersectionId, NodeIndex>,
    /// Outgoing segments for every node
    adjacency_list: Vec<Vec<SegmentIndex>>,
    /// Destination node of every segment, resolved once at build time
    segment_targets: Vec<NodeIndex>,
}

impl RoadGraph {
    pub fn new(
        intersections: Vec<Intersection>,
        segments: Vec<Segment>,
    ) -> Result<Self, RoutingError> {
        let node_indices: FxHashMap<IntersectionId, NodeIndex> = intersections
            .iter()
            .enumerate()
            .map(|(index, intersection)| (intersection.id(), index))
            .collect();

        let mut adjacency_list = vec![vec![]; intersections.len()];
        let mut segment_targets = Vec::with_capacity(segments.len());

        for (segment_index, segment) in segments.iter().enumerate() {
            let origin = *node_indices
                .get(&segment.origin())
                .ok_or(RoutingError::UnknownIntersection(segment.origin()))?;
            let destination = *node_indices
                .get(&segment.destination())
                .ok_or(RoutingError::UnknownIntersection(segment.destination()))?;

            adjacency_list[origin].push(segment_index);
            segment_targets.push(destination);
        }

        Ok(RoadGraph {
            intersections,
            segments,
            node_indices,
            adjacency_list,
            segment_targets,
        })
    }

    pub fn node_count(&self) -> usize {
        self.intersections.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn contains(&self, id: IntersectionId) -> bool {
        self.node_indices.contains_key(&id)
    }

    pub fn node_index(&self, id: IntersectionId) -> Option<NodeIndex> {
        self.node_indices.get(&id).copied()
    }

    pub fn intersection(&self, node: NodeIndex) -> &Intersection {
        &self.intersections[node]
    }

    pub fn intersection_by_id(&self, id: IntersectionId) -> Option<&Intersection> {
        self.node_index(id).map(|node| &self.intersections[node])
    }

    pub fn intersections(&self) -> &[Intersection] {
        &self.intersections
    }

    pub fn segment(&self, segment: SegmentIndex) -> &Segment {
        &self.segments[segment]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_target(&self, segment: SegmentIndex) -> NodeIndex {
        self.segment_targets[segment]
    }

    pub fn outgoing_segments(&self, node: NodeIndex) -> &[SegmentIndex] {
        &self.adjacency_list[node]
    }

    pub fn outgoing_segments_iter(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (SegmentIndex, &Segment)> + '_ {
        self.adjacency_list[node]
            .iter()
            .map(|&segment| (segment, &self.segments[segment]))
    }
}
