use courier_routing::intersection::IntersectionId;
use jiff::SignedDuration;
use serde::Serialize;

use super::request::RequestId;

/// Index of a vertex in a [`crate::stop_graph::StopGraph`].
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StopVertex(usize);

impl StopVertex {
    /// The tour always starts and ends at vertex 0.
    pub const WAREHOUSE: StopVertex = StopVertex(0);

    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn get(&self) -> usize {
        self.0
    }

    pub fn is_warehouse(&self) -> bool {
        *self == Self::WAREHOUSE
    }
}

impl std::fmt::Display for StopVertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for StopVertex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::ops::Index<StopVertex> for [Stop] {
    type Output = Stop;
    fn index(&self, index: StopVertex) -> &Self::Output {
        &self[index.0]
    }
}

impl std::ops::Index<StopVertex> for Vec<Stop> {
    type Output = Stop;
    fn index(&self, index: StopVertex) -> &Self::Output {
        &self[index.0]
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopKind {
    Warehouse,
    Pickup {
        request: RequestId,
        delivery: StopVertex,
    },
    Delivery {
        request: RequestId,
        pickup: StopVertex,
    },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Stop {
    intersection: IntersectionId,
    kind: StopKind,
    service_duration: SignedDuration,
}

impl Stop {
    pub fn warehouse(intersection: IntersectionId) -> Self {
        Stop {
            intersection,
            kind: StopKind::Warehouse,
            service_duration: SignedDuration::ZERO,
        }
    }

    pub fn pickup(
        intersection: IntersectionId,
        request: RequestId,
        delivery: StopVertex,
        service_duration: SignedDuration,
    ) -> Self {
        Stop {
            intersection,
            kind: StopKind::Pickup { request, delivery },
            service_duration,
        }
    }

    pub fn delivery(
        intersection: IntersectionId,
        request: RequestId,
        pickup: StopVertex,
        service_duration: SignedDuration,
    ) -> Self {
        Stop {
            intersection,
            kind: StopKind::Delivery { request, pickup },
            service_duration,
        }
    }

    pub fn intersection(&self) -> IntersectionId {
        self.intersection
    }

    pub fn kind(&self) -> StopKind {
        self.kind
    }

    pub fn service_duration(&self) -> SignedDuration {
        self.service_duration
    }

    pub fn request(&self) -> Option<RequestId> {
        match self.kind {
            StopKind::Warehouse => None,
            StopKind::Pickup { request, .. } | StopKind::Delivery { request, .. } => Some(request),
        }
    }

    /// The vertex this stop is paired with: the delivery of a pickup, or the pickup of a delivery.
    pub fn partner(&self) -> Option<StopVertex> {
        match self.kind {
            StopKind::Warehouse => None,
            StopKind::Pickup { delivery, .. } => Some(delivery),
            StopKind::Delivery { pickup, .. } => Some(pickup),
        }
    }

    /// For a delivery, the pickup that must be visited first.
    pub fn required_pickup(&self) -> Option<StopVertex> {
        match self.kind {
            StopKind::Delivery { pickup, .. } => Some(pickup),
            _ => None,
        }
    }
}
