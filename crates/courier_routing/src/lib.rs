pub mod dijkstra;
pub mod error;
pub mod intersection;
pub mod road_graph;
pub mod segment;
pub mod shortest_path_index;
pub mod weighting;

#[cfg(test)]
pub(crate) mod test_graph_utils;
