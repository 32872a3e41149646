use std::{
    ops::ControlFlow,
    sync::atomic::{AtomicBool, Ordering},
    time::Instant,
};

use fixedbitset::FixedBitSet;
use jiff::SignedDuration;

use crate::{problem::stop::StopVertex, stop_graph::StopGraph};

use super::{bound::Bound, tour_solution::TourSolution, visit_order::VisitOrder};

/// Wall-clock limit of a search. A budget too large to be represented as an
/// [`Instant`] never expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Deadline(Option<Instant>);

impl Deadline {
    pub(crate) fn after(time_limit: SignedDuration) -> Self {
        Deadline(Instant::now().checked_add(time_limit.unsigned_abs()))
    }

    #[cfg(test)]
    pub(crate) fn at(instant: Instant) -> Self {
        Deadline(Some(instant))
    }

    #[inline(always)]
    fn is_passed(&self) -> bool {
        self.0.is_some_and(|deadline| Instant::now() > deadline)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interrupt {
    Cancelled,
    TimedOut,
}

/// Depth-first branch and bound over a [`StopGraph`]. Owns the mutable search
/// state; the graph and the strategies are only read.
pub(crate) struct BranchAndBound<'a, F>
where
    F: FnMut(TourSolution),
{
    graph: &'a StopGraph,
    bound: &'a dyn Bound,
    visit_order: &'a dyn VisitOrder,
    deadline: Deadline,
    is_stopped: &'a AtomicBool,
    publish: F,

    visited: Vec<StopVertex>,
    unvisited: FixedBitSet,
    best_cost: f64,
    explored_nodes: usize,
}

impl<'a, F> BranchAndBound<'a, F>
where
    F: FnMut(TourSolution),
{
    pub(crate) fn new(
        graph: &'a StopGraph,
        bound: &'a dyn Bound,
        visit_order: &'a dyn VisitOrder,
        deadline: Deadline,
        is_stopped: &'a AtomicBool,
        publish: F,
    ) -> Self {
        let mut visited = Vec::with_capacity(graph.num_vertices());
        visited.push(StopVertex::WAREHOUSE);

        BranchAndBound {
            graph,
            bound,
            visit_order,
            deadline,
            is_stopped,
            publish,
            visited,
            unvisited: graph.free_vertices(),
            best_cost: f64::INFINITY,
            explored_nodes: 0,
        }
    }

    pub(crate) fn explored_nodes(&self) -> usize {
        self.explored_nodes
    }

    /// Explores the whole tree unless interrupted. Whatever was published
    /// before an interruption stays valid.
    pub(crate) fn run(&mut self) -> ControlFlow<Interrupt> {
        self.branch(StopVertex::WAREHOUSE, 0.0)
    }

    #[inline(always)]
    fn check_interrupt(&self) -> ControlFlow<Interrupt> {
        if self.is_stopped.load(Ordering::Relaxed) {
            return ControlFlow::Break(Interrupt::Cancelled);
        }

        if self.deadline.is_passed() {
            return ControlFlow::Break(Interrupt::TimedOut);
        }

        ControlFlow::Continue(())
    }

    fn branch(&mut self, current: StopVertex, current_cost: f64) -> ControlFlow<Interrupt> {
        self.explored_nodes += 1;
        self.check_interrupt()?;

        if self.unvisited.is_clear() {
            if self.graph.is_arc(current, StopVertex::WAREHOUSE) {
                let total_cost = current_cost + self.graph.cost(current, StopVertex::WAREHOUSE);
                if total_cost < self.best_cost {
                    self.best_cost = total_cost;
                    (self.publish)(TourSolution::new(self.visited.clone(), total_cost));
                }
            }

            return ControlFlow::Continue(());
        }

        let bound = self
            .bound
            .lower_bound(self.graph, current, &self.unvisited);
        if current_cost + bound >= self.best_cost {
            return ControlFlow::Continue(());
        }

        let candidates = self
            .visit_order
            .candidates(self.graph, current, &self.unvisited);

        for next in candidates {
            if !self.unvisited.contains(next.get())
                || !self.graph.is_arc(current, next)
                || !self.graph.respects_precedence(next, &self.unvisited)
            {
                continue;
            }

            let next_cost = current_cost + self.graph.cost(current, next);

            self.visited.push(next);
            self.unvisited.set(next.get(), false);

            let flow = self.branch(next, next_cost);

            // Undo before propagating an interruption so the state is never left half-mutated
            self.visited.pop();
            self.unvisited.insert(next.get());

            flow?;
        }

        ControlFlow::Continue(())
    }
}
