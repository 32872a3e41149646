use courier_routing::intersection::IntersectionId;
use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct RequestId(usize);

impl RequestId {
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A parcel to collect at `pickup` and drop at `delivery`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Request {
    id: RequestId,
    pickup: IntersectionId,
    delivery: IntersectionId,
    pickup_duration: SignedDuration,
    delivery_duration: SignedDuration,
}

impl Request {
    pub fn new(id: RequestId, pickup: IntersectionId, delivery: IntersectionId) -> Self {
        Request {
            id,
            pickup,
            delivery,
            pickup_duration: SignedDuration::ZERO,
            delivery_duration: SignedDuration::ZERO,
        }
    }

    pub fn with_durations(
        mut self,
        pickup_duration: SignedDuration,
        delivery_duration: SignedDuration,
    ) -> Self {
        self.pickup_duration = pickup_duration;
        self.delivery_duration = delivery_duration;
        self
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn pickup(&self) -> IntersectionId {
        self.pickup
    }

    pub fn delivery(&self) -> IntersectionId {
        self.delivery
    }

    pub fn pickup_duration(&self) -> SignedDuration {
        self.pickup_duration
    }

    pub fn delivery_duration(&self) -> SignedDuration {
        self.delivery_duration
    }
}
