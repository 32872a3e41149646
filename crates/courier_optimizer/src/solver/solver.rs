use std::{
    ops::ControlFlow,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
};

use jiff::{SignedDuration, Timestamp};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{error::TourError, problem::stop::StopVertex, stop_graph::StopGraph};

use super::{
    bound::Bound,
    branch_and_bound::{BranchAndBound, Deadline, Interrupt},
    solver_params::SolverParams,
    tour_solution::TourSolution,
    visit_order::VisitOrder,
};

type BestSolutionHandler = Arc<Mutex<dyn FnMut(&TourSolution) + Send + 'static>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SolverStatus {
    Ready,
    Running,
    Completed,
    Cancelled,
    TimedOut,
}

impl SolverStatus {
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            SolverStatus::Completed | SolverStatus::Cancelled | SolverStatus::TimedOut
        )
    }
}

/// Branch and bound TSP solver with pickup before delivery precedence.
///
/// A solver runs a single search in its lifetime: `Ready -> Running`, then one
/// of `Completed`, `Cancelled` or `TimedOut`. The best tour found so far can
/// be read at any time with [`TspSolver::current_best`], from any thread.
pub struct TspSolver {
    bound: Box<dyn Bound>,
    visit_order: Box<dyn VisitOrder>,
    status: RwLock<SolverStatus>,
    best_solution: RwLock<Option<Arc<TourSolution>>>,
    is_stopped: AtomicBool,
    on_best_solution_handler: Option<BestSolutionHandler>,
}

impl TspSolver {
    pub fn new(bound: impl Bound + 'static, visit_order: impl VisitOrder + 'static) -> Self {
        Self::with_strategies(Box::new(bound), Box::new(visit_order))
    }

    pub fn from_params(params: &SolverParams) -> Self {
        Self::with_strategies(params.bound.create(), params.visit_order.create())
    }

    fn with_strategies(bound: Box<dyn Bound>, visit_order: Box<dyn VisitOrder>) -> Self {
        TspSolver {
            bound,
            visit_order,
            status: RwLock::new(SolverStatus::Ready),
            best_solution: RwLock::new(None),
            is_stopped: AtomicBool::new(false),
            on_best_solution_handler: None,
        }
    }

    /// Called on the search thread every time a strictly cheaper tour is
    /// published, after it became visible through [`TspSolver::current_best`].
    pub fn on_best_solution<F>(&mut self, callback: F)
    where
        F: FnMut(&TourSolution) + Send + 'static,
    {
        self.on_best_solution_handler = Some(Arc::new(Mutex::new(callback)));
    }

    pub fn status(&self) -> SolverStatus {
        *self.status.read()
    }

    pub fn current_best(&self) -> Option<Arc<TourSolution>> {
        self.best_solution.read().clone()
    }

    /// Asks a running search to stop. The search notices it at its next node
    /// and ends as `Cancelled`. Has no effect on a solver that is not running.
    pub fn cancel(&self) {
        self.is_stopped.store(true, Ordering::Relaxed);
    }

    /// Runs the search on the calling thread and returns the final status.
    pub fn solve(&self, time_limit: SignedDuration, graph: &StopGraph) -> SolverStatus {
        match self.begin(time_limit) {
            Some(deadline) => self.search(graph, deadline),
            None => self.status(),
        }
    }

    /// Runs the search on a dedicated thread. Returns `None` without doing
    /// anything when the time limit is not positive or the solver already ran.
    pub fn start(
        self: &Arc<Self>,
        time_limit: SignedDuration,
        graph: Arc<StopGraph>,
    ) -> Result<Option<JoinHandle<SolverStatus>>, TourError> {
        let Some(deadline) = self.begin(time_limit) else {
            return Ok(None);
        };

        let solver = Arc::clone(self);
        let spawned = thread::Builder::new()
            .name(String::from("tsp-solver"))
            .spawn(move || solver.search(&graph, deadline));

        match spawned {
            Ok(handle) => Ok(Some(handle)),
            Err(error) => {
                *self.status.write() = SolverStatus::Ready;
                Err(error.into())
            }
        }
    }

    fn begin(&self, time_limit: SignedDuration) -> Option<Deadline> {
        if !time_limit.is_positive() {
            warn!("Ignoring search with non-positive time limit {}", time_limit);
            return None;
        }

        let deadline = Deadline::after(time_limit);
        let mut status = self.status.write();
        if *status != SolverStatus::Ready {
            warn!("Ignoring search on a solver in state {:?}", *status);
            return None;
        }

        *status = SolverStatus::Running;
        self.is_stopped.store(false, Ordering::Relaxed);

        Some(deadline)
    }

    fn search(&self, graph: &StopGraph, deadline: Deadline) -> SolverStatus {
        let started_at = Timestamp::now();
        info!(vertices = graph.num_vertices(), "Starting branch and bound search");

        let (status, explored_nodes) = if graph.num_vertices() <= 1 {
            // Nothing to visit, the tour never leaves the warehouse
            self.publish(TourSolution::new(vec![StopVertex::WAREHOUSE], 0.0));
            (SolverStatus::Completed, 0)
        } else {
            let mut search = BranchAndBound::new(
                graph,
                self.bound.as_ref(),
                self.visit_order.as_ref(),
                deadline,
                &self.is_stopped,
                |solution| self.publish(solution),
            );

            let status = match search.run() {
                ControlFlow::Continue(()) => SolverStatus::Completed,
                ControlFlow::Break(Interrupt::Cancelled) => SolverStatus::Cancelled,
                ControlFlow::Break(Interrupt::TimedOut) => SolverStatus::TimedOut,
            };

            (status, search.explored_nodes())
        };

        *self.status.write() = status;

        info!(
            ?status,
            explored_nodes,
            elapsed = ?Timestamp::now().duration_since(started_at),
            best_cost = ?self.current_best().map(|solution| solution.cost()),
            "Search finished"
        );

        status
    }

    fn publish(&self, solution: TourSolution) {
        let solution = Arc::new(solution);
        debug!(cost = solution.cost(), "Found a better tour");

        *self.best_solution.write() = Some(Arc::clone(&solution));

        if let Some(callback) = &self.on_best_solution_handler {
            callback.lock()(&solution);
        }
    }
}
