use std::{
    sync::Arc,
    thread::JoinHandle,
};

use courier_routing::shortest_path_index::ShortestPathIndex;
use fxhash::FxHashMap;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{error::TourError, problem::delivery_problem::DeliveryProblem, stop_graph::StopGraph};

use super::{
    solver::{SolverStatus, TspSolver},
    solver_params::SolverParams,
    tour_solution::TourSolution,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct JobId(Uuid);

impl JobId {
    fn generate() -> Self {
        JobId(Uuid::new_v4())
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Job {
    solver: Arc<TspSolver>,
    graph: Arc<StopGraph>,
    handle: Mutex<Option<JoinHandle<SolverStatus>>>,
}

/// Keeps track of background solvers. Restarting a search after the problem
/// changed is `stop` on the old job followed by a new `submit`.
///
/// Jobs stay registered after their search ends so that results can still be
/// read. Callers drop them with `stop`, or in bulk with `remove_finished`.
#[derive(Default)]
pub struct SolverManager {
    jobs: RwLock<FxHashMap<JobId, Job>>,
}

impl SolverManager {
    pub fn submit(
        &self,
        problem: &DeliveryProblem,
        index: &impl ShortestPathIndex,
        params: &SolverParams,
    ) -> Result<JobId, TourError> {
        self.submit_with(problem, index, params, |_| {})
    }

    /// Same as [`SolverManager::submit`], `callback` receives every improved
    /// tour on the solver thread.
    pub fn submit_with<F>(
        &self,
        problem: &DeliveryProblem,
        index: &impl ShortestPathIndex,
        params: &SolverParams,
        callback: F,
    ) -> Result<JobId, TourError>
    where
        F: FnMut(&TourSolution) + Send + 'static,
    {
        let graph = Arc::new(StopGraph::build(problem, index)?);

        let mut solver = TspSolver::from_params(params);
        solver.on_best_solution(callback);
        let solver = Arc::new(solver);

        let handle = solver.start(params.time_limit, Arc::clone(&graph))?;
        if handle.is_none() {
            warn!("Solver was not started, time limit is {}", params.time_limit);
        }

        let job_id = JobId::generate();
        info!(%job_id, stops = graph.num_vertices(), "Submitted job");

        self.jobs.write().insert(
            job_id,
            Job {
                solver,
                graph,
                handle: Mutex::new(handle),
            },
        );

        Ok(job_id)
    }

    pub fn status(&self, job_id: &JobId) -> Option<SolverStatus> {
        self.jobs.read().get(job_id).map(|job| job.solver.status())
    }

    pub fn best_solution(&self, job_id: &JobId) -> Option<Arc<TourSolution>> {
        self.jobs
            .read()
            .get(job_id)
            .and_then(|job| job.solver.current_best())
    }

    pub fn stop_graph(&self, job_id: &JobId) -> Option<Arc<StopGraph>> {
        self.jobs
            .read()
            .get(job_id)
            .map(|job| Arc::clone(&job.graph))
    }

    /// Blocks until the job's search ends. Returns `None` for unknown jobs.
    pub fn join(&self, job_id: &JobId) -> Option<SolverStatus> {
        let (solver, handle) = {
            let jobs = self.jobs.read();
            let job = jobs.get(job_id)?;
            (Arc::clone(&job.solver), job.handle.lock().take())
        };

        if let Some(handle) = handle
            && handle.join().is_err()
        {
            warn!(%job_id, "Solver thread panicked");
        }

        Some(solver.status())
    }

    /// Forgets every job whose search is over, or that never started.
    /// Returns how many jobs were removed.
    pub fn remove_finished(&self) -> usize {
        let mut jobs = self.jobs.write();
        let before = jobs.len();

        jobs.retain(|_, job| job.solver.status() == SolverStatus::Running);

        let removed = before - jobs.len();
        if removed > 0 {
            info!(removed, remaining = jobs.len(), "Removed finished jobs");
        }

        removed
    }

    /// Cancels the job and forgets it. Returns the best tour it had found.
    pub fn stop(&self, job_id: &JobId) -> Option<Arc<TourSolution>> {
        let job = self.jobs.write().remove(job_id)?;
        job.solver.cancel();

        if let Some(handle) = job.handle.lock().take()
            && handle.join().is_err()
        {
            warn!(%job_id, "Solver thread panicked");
        }

        info!(%job_id, status = ?job.solver.status(), "Stopped job");
        job.solver.current_best()
    }
}
