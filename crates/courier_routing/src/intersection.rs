use geo::{Distance, Haversine};
use serde::{Deserialize, Serialize};

/// Identifier of an intersection as given by the map provider. Ids are sparse and
/// not usable as vector indices, see [`crate::road_graph::RoadGraph::node_index`].
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct IntersectionId(u64);

impl IntersectionId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for IntersectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for IntersectionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Intersection {
    id: IntersectionId,
    point: geo::Point,
}

impl Intersection {
    pub fn new(id: IntersectionId, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            point: geo::Point::new(longitude, latitude),
        }
    }

    pub fn id(&self) -> IntersectionId {
        self.id
    }

    pub fn latitude(&self) -> f64 {
        self.point.y()
    }

    pub fn longitude(&self) -> f64 {
        self.point.x()
    }

    /// Great-circle distance in meters.
    pub fn haversine_distance(&self, to: &Intersection) -> f64 {
        Haversine.distance(self.point, to.point)
    }
}
