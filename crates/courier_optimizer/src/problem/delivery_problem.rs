use courier_routing::{intersection::IntersectionId, road_graph::RoadGraph};
use serde::{Deserialize, Serialize};

use crate::error::TourError;

use super::{
    request::Request,
    stop::{Stop, StopVertex},
};

/// The input of one tour computation: where the courier starts and which
/// parcels must be moved.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DeliveryProblem {
    warehouse: IntersectionId,
    requests: Vec<Request>,
}

impl DeliveryProblem {
    pub fn new(warehouse: IntersectionId, requests: Vec<Request>) -> Self {
        DeliveryProblem {
            warehouse,
            requests,
        }
    }

    pub fn warehouse(&self) -> IntersectionId {
        self.warehouse
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn num_stops(&self) -> usize {
        1 + 2 * self.requests.len()
    }

    /// Checks that every referenced intersection exists. The first offending
    /// request is reported.
    pub fn validate(&self, road_graph: &RoadGraph) -> Result<(), TourError> {
        if !road_graph.contains(self.warehouse) {
            return Err(TourError::InvalidWarehouse(self.warehouse));
        }

        for request in &self.requests {
            for intersection in [request.pickup(), request.delivery()] {
                if !road_graph.contains(intersection) {
                    return Err(TourError::InvalidRequest {
                        request: request.id(),
                        intersection,
                    });
                }
            }
        }

        Ok(())
    }

    /// Vertex 0 is the warehouse, request `k` gets its pickup at `2k + 1` and
    /// its delivery at `2k + 2`.
    pub fn stops(&self) -> Vec<Stop> {
        let mut stops = Vec::with_capacity(self.num_stops());
        stops.push(Stop::warehouse(self.warehouse));

        for (index, request) in self.requests.iter().enumerate() {
            let pickup = StopVertex::new(2 * index + 1);
            let delivery = StopVertex::new(2 * index + 2);

            stops.push(Stop::pickup(
                request.pickup(),
                request.id(),
                delivery,
                request.pickup_duration(),
            ));
            stops.push(Stop::delivery(
                request.delivery(),
                request.id(),
                pickup,
                request.delivery_duration(),
            ));
        }

        stops
    }
}
