use thiserror::Error;

use crate::intersection::IntersectionId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    #[error("Intersection {0} does not exist in the road graph")]
    UnknownIntersection(IntersectionId),

    #[error("Intersection {target} is not reachable from intersection {origin}")]
    UnreachableTarget {
        origin: IntersectionId,
        target: IntersectionId,
    },
}
