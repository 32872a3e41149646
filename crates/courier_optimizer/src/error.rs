use courier_routing::{error::RoutingError, intersection::IntersectionId};
use thiserror::Error;

use crate::problem::request::RequestId;

#[derive(Error, Debug)]
pub enum TourError {
    #[error("Warehouse intersection {0} does not exist in the road graph")]
    InvalidWarehouse(IntersectionId),

    #[error("Request {request} references intersection {intersection} which does not exist in the road graph")]
    InvalidRequest {
        request: RequestId,
        intersection: IntersectionId,
    },

    #[error("Cannot compute tour, {} pair(s) of stops are not connected", .unreachable.len())]
    DisconnectedStops { unreachable: Vec<RoutingError> },

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error("Courier speed must be a positive number of km/h, got {0}")]
    InvalidSpeed(f64),

    #[error("Solution does not visit every stop exactly once starting from the warehouse")]
    InvalidSolution,

    #[error("Failed to spawn solver thread: {0}")]
    SolverThread(#[from] std::io::Error),
}
