use std::{sync::Arc, thread, time::Duration};

use courier_optimizer::{
    problem::stop::StopVertex,
    solver::{
        bound::{MinOutgoingEdgeBound, ZeroBound},
        solver::{SolverStatus, TspSolver},
        solver_params::{BoundStrategy, SolverParams, VisitOrderStrategy},
        tour_solution::TourSolution,
        visit_order::AscendingOrder,
    },
    stop_graph::StopGraph,
};
use jiff::SignedDuration;
use parking_lot::Mutex;

mod test_utils;

fn solve(graph: &StopGraph, params: &SolverParams) -> (SolverStatus, Option<Arc<TourSolution>>) {
    let solver = TspSolver::from_params(params);
    let status = solver.solve(params.time_limit, graph);
    (status, solver.current_best())
}

#[test]
fn test_matches_brute_force() {
    for seed in 0..6 {
        for num_requests in 1..=3 {
            let graph = test_utils::create_random_graph(num_requests, seed);
            let optimum = test_utils::brute_force_optimum(&graph).unwrap();

            for bound in [BoundStrategy::Zero, BoundStrategy::MinOutgoingEdge] {
                for visit_order in [VisitOrderStrategy::Ascending, VisitOrderStrategy::NearestFirst] {
                    let params = SolverParams {
                        time_limit: SignedDuration::from_secs(30),
                        bound,
                        visit_order,
                    };

                    let (status, best) = solve(&graph, &params);
                    let best = best.unwrap();

                    assert_eq!(status, SolverStatus::Completed);
                    assert!(test_utils::is_valid_tour(&graph, best.stops()));
                    assert!(
                        (best.cost() - optimum).abs() < 1e-9,
                        "seed {seed}, {num_requests} request(s), {bound:?}/{visit_order:?}: {} != {optimum}",
                        best.cost()
                    );
                }
            }
        }
    }
}

#[test]
fn test_matches_brute_force_with_missing_arcs() {
    let mut feasible = 0;

    for seed in 0..20 {
        let graph = test_utils::create_random_asymmetric_graph(3, seed);
        let optimum = test_utils::brute_force_optimum(&graph);

        for bound in [BoundStrategy::Zero, BoundStrategy::MinOutgoingEdge] {
            for visit_order in [VisitOrderStrategy::Ascending, VisitOrderStrategy::NearestFirst] {
                let params = SolverParams {
                    time_limit: SignedDuration::from_secs(30),
                    bound,
                    visit_order,
                };

                let (status, best) = solve(&graph, &params);
                assert_eq!(status, SolverStatus::Completed);

                match (optimum, best) {
                    (Some(optimum), Some(best)) => {
                        assert!(test_utils::is_valid_tour(&graph, best.stops()));
                        assert!(
                            (best.cost() - optimum).abs() < 1e-9,
                            "seed {seed}, {bound:?}/{visit_order:?}: {} != {optimum}",
                            best.cost()
                        );
                    }
                    (None, None) => {}
                    (optimum, best) => {
                        panic!("seed {seed}, {bound:?}/{visit_order:?}: {optimum:?} vs {best:?}")
                    }
                }
            }
        }

        feasible += usize::from(optimum.is_some());
    }

    assert!(feasible > 0, "every instance was infeasible");
}

#[test]
fn test_unbounded_time_limit_completes() {
    let graph = test_utils::create_random_graph(2, 3);
    let solver = TspSolver::new(MinOutgoingEdgeBound, AscendingOrder);

    assert_eq!(
        solver.solve(SignedDuration::MAX, &graph),
        SolverStatus::Completed
    );
    assert_eq!(solver.status(), SolverStatus::Completed);
    let optimum = test_utils::brute_force_optimum(&graph).unwrap();
    assert!((solver.current_best().unwrap().cost() - optimum).abs() < 1e-9);
}

#[test]
fn test_five_stops_scenario() {
    //
    //  Y
    //  ^
    //  | D1(0,2)  P2(1,2)
    //  | P1(0,1)
    //  | W (0,0)  D2(1,0)
    //  +-------------------> X
    //
    let graph =
        test_utils::create_euclidean_graph(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0), (1.0, 2.0), (1.0, 0.0)]);

    let (status, best) = solve(&graph, &SolverParams::default());
    let best = best.unwrap();

    assert_eq!(status, SolverStatus::Completed);
    assert_eq!(best.cost(), 6.0);
    assert_eq!(
        best.stops(),
        (0..5).map(StopVertex::new).collect::<Vec<_>>().as_slice()
    );
}

#[test]
fn test_published_solutions_strictly_improve() {
    let graph = Arc::new(test_utils::create_random_graph(4, 42));
    let published = Arc::new(Mutex::new(Vec::new()));

    let mut solver = TspSolver::new(ZeroBound, AscendingOrder);
    let sink = Arc::clone(&published);
    solver.on_best_solution(move |solution| sink.lock().push(solution.clone()));

    assert_eq!(
        solver.solve(SignedDuration::from_secs(30), &graph),
        SolverStatus::Completed
    );

    let published = published.lock();
    assert!(!published.is_empty());
    assert!(published.windows(2).all(|w| w[1].cost() < w[0].cost()));
    assert!(
        published
            .iter()
            .all(|solution| test_utils::is_valid_tour(&graph, solution.stops()))
    );
    assert!(published.iter().all(|solution| {
        (test_utils::tour_cost(&graph, solution.stops()) - solution.cost()).abs() < 1e-9
    }));
    assert_eq!(
        published.last(),
        solver.current_best().as_deref()
    );
}

#[test]
fn test_zero_requests() {
    let graph = test_utils::create_euclidean_graph(&[(3.0, 4.0)]);

    let (status, best) = solve(&graph, &SolverParams::default());
    let best = best.unwrap();

    assert_eq!(status, SolverStatus::Completed);
    assert_eq!(best.stops(), &[StopVertex::WAREHOUSE]);
    assert_eq!(best.cost(), 0.0);
}

#[test]
fn test_times_out_on_large_instance() {
    let graph = test_utils::create_random_graph(10, 7);
    let solver = TspSolver::new(ZeroBound, AscendingOrder);

    let status = solver.solve(SignedDuration::from_millis(200), &graph);
    assert_eq!(status, SolverStatus::TimedOut);
    assert_eq!(solver.status(), SolverStatus::TimedOut);

    // The first complete tour is reached long before the deadline
    let best = solver.current_best().unwrap();
    assert!(test_utils::is_valid_tour(&graph, best.stops()));
}

#[test]
fn test_cancel_is_idempotent() {
    let graph = Arc::new(test_utils::create_random_graph(10, 11));
    let solver = Arc::new(TspSolver::new(ZeroBound, AscendingOrder));

    let handle = solver
        .start(SignedDuration::from_secs(60), Arc::clone(&graph))
        .unwrap()
        .unwrap();

    thread::sleep(Duration::from_millis(50));
    solver.cancel();
    solver.cancel();

    assert_eq!(handle.join().unwrap(), SolverStatus::Cancelled);

    solver.cancel();
    assert_eq!(solver.status(), SolverStatus::Cancelled);

    let best = solver.current_best().unwrap();
    assert!(test_utils::is_valid_tour(&graph, best.stops()));
}

#[test]
fn test_cancel_before_start_is_ignored() {
    let graph = test_utils::create_random_graph(2, 3);
    let solver = TspSolver::new(MinOutgoingEdgeBound, AscendingOrder);

    solver.cancel();
    assert_eq!(solver.status(), SolverStatus::Ready);

    assert_eq!(
        solver.solve(SignedDuration::from_secs(10), &graph),
        SolverStatus::Completed
    );
}

#[test]
fn test_non_positive_time_limit() {
    let graph = Arc::new(test_utils::create_random_graph(2, 3));
    let solver = Arc::new(TspSolver::new(ZeroBound, AscendingOrder));

    assert!(
        solver
            .start(SignedDuration::ZERO, Arc::clone(&graph))
            .unwrap()
            .is_none()
    );
    assert!(
        solver
            .start(SignedDuration::from_secs(-1), graph)
            .unwrap()
            .is_none()
    );
    assert_eq!(solver.status(), SolverStatus::Ready);
    assert!(solver.current_best().is_none());
}

#[test]
fn test_second_start_is_ignored() {
    let graph = Arc::new(test_utils::create_random_graph(10, 5));
    let solver = Arc::new(TspSolver::new(ZeroBound, AscendingOrder));

    let handle = solver
        .start(SignedDuration::from_secs(60), Arc::clone(&graph))
        .unwrap()
        .unwrap();

    assert!(
        solver
            .start(SignedDuration::from_secs(60), graph)
            .unwrap()
            .is_none()
    );

    solver.cancel();
    assert_eq!(handle.join().unwrap(), SolverStatus::Cancelled);
}
