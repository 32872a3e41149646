pub mod bound;
mod branch_and_bound;
pub mod solver;
pub mod solver_manager;
pub mod solver_params;
pub mod tour_solution;
pub mod visit_order;
