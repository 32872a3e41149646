use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use super::{
    bound::{Bound, MinOutgoingEdgeBound, ZeroBound},
    visit_order::{AscendingOrder, NearestFirstOrder, VisitOrder},
};

#[derive(Clone, Debug)]
pub struct SolverParams {
    /// Wall-clock budget of one search. A non-positive limit means the solver never starts.
    pub time_limit: SignedDuration,
    pub bound: BoundStrategy,
    pub visit_order: VisitOrderStrategy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundStrategy {
    Zero,
    MinOutgoingEdge,
}

impl BoundStrategy {
    pub fn create(&self) -> Box<dyn Bound> {
        match self {
            BoundStrategy::Zero => Box::new(ZeroBound),
            BoundStrategy::MinOutgoingEdge => Box::new(MinOutgoingEdgeBound),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitOrderStrategy {
    Ascending,
    NearestFirst,
}

impl VisitOrderStrategy {
    pub fn create(&self) -> Box<dyn VisitOrder> {
        match self {
            VisitOrderStrategy::Ascending => Box::new(AscendingOrder),
            VisitOrderStrategy::NearestFirst => Box::new(NearestFirstOrder),
        }
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            time_limit: SignedDuration::from_secs(10),
            bound: BoundStrategy::MinOutgoingEdge,
            visit_order: VisitOrderStrategy::NearestFirst,
        }
    }
}
