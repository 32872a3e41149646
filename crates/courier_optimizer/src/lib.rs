pub mod error;
pub mod problem;
pub mod solver;
pub mod stop_graph;
pub mod tour;
mod utils;
