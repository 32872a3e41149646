use serde::Serialize;

use crate::problem::stop::StopVertex;

/// A complete tour over the stop graph. The sequence starts at the warehouse
/// and the return to the warehouse is implied; `cost` includes that last arc.
///
/// Published solutions are immutable and shared behind an `Arc`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TourSolution {
    stops: Vec<StopVertex>,
    cost: f64,
}

impl TourSolution {
    pub fn new(stops: Vec<StopVertex>, cost: f64) -> Self {
        TourSolution { stops, cost }
    }

    pub fn stops(&self) -> &[StopVertex] {
        &self.stops
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn position(&self, vertex: StopVertex) -> Option<usize> {
        self.stops.iter().position(|&stop| stop == vertex)
    }
}
