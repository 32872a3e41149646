use serde::{Deserialize, Serialize};

use crate::intersection::IntersectionId;

/// A one-way road section between two intersections. Two-way streets are
/// represented as two segments.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Segment {
    origin: IntersectionId,
    destination: IntersectionId,
    /// Length in meters
    length: f64,
    name: String,
}

impl Segment {
    pub fn new(
        origin: IntersectionId,
        destination: IntersectionId,
        length: f64,
        name: impl Into<String>,
    ) -> Self {
        Segment {
            origin,
            destination,
            length,
            name: name.into(),
        }
    }

    pub fn origin(&self) -> IntersectionId {
        self.origin
    }

    pub fn destination(&self) -> IntersectionId {
        self.destination
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
