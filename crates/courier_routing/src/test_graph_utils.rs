#[cfg(test)]
pub mod test_graph {
    use crate::{
        intersection::{Intersection, IntersectionId},
        road_graph::RoadGraph,
        segment::Segment,
    };

    #[derive(Debug, Clone, Copy)]
    pub enum RomaniaGraphCity {
        Arad = 1,
        Bucharest = 2,
        Craiova = 3,
        Dobreta = 4,
        Eforie = 5,
        Fagaras = 6,
        Giurgiu = 7,
        Hirsova = 8,
        Iasi = 9,
        Lugoj = 10,
        Mehadia = 11,
        Neamt = 12,
        Oradea = 13,
        Pitesti = 14,
        RimnicuVilcea = 15,
        Sibiu = 16,
        Timisoara = 17,
        Urziceni = 18,
        Vaslui = 19,
        Zerind = 20,
    }

    impl From<RomaniaGraphCity> for IntersectionId {
        fn from(value: RomaniaGraphCity) -> Self {
            IntersectionId::new(value as u64)
        }
    }

    // https://user-images.githubusercontent.com/43790152/97784960-1a142580-1bc4-11eb-9070-39c03eb16df2.png
    fn get_romania_graph_edges() -> Vec<(RomaniaGraphCity, RomaniaGraphCity, f64)> {
        use RomaniaGraphCity::*;

        vec![
            (Oradea, Zerind, 71.0),
            (Oradea, Sibiu, 151.0),
            (Zerind, Arad, 75.0),
            (Arad, Sibiu, 140.0),
            (Arad, Timisoara, 118.0),
            (Timisoara, Lugoj, 111.0),
            (Lugoj, Mehadia, 70.0),
            (Mehadia, Dobreta, 75.0),
            (Dobreta, Craiova, 120.0),
            (Craiova, RimnicuVilcea, 146.0),
            (Craiova, Pitesti, 138.0),
            (RimnicuVilcea, Pitesti, 97.0),
            (RimnicuVilcea, Sibiu, 80.0),
            (Sibiu, Fagaras, 99.0),
            (Fagaras, Bucharest, 211.0),
            (Pitesti, Bucharest, 101.0),
            (Bucharest, Giurgiu, 90.0),
            (Bucharest, Urziceni, 85.0),
            (Urziceni, Hirsova, 98.0),
            (Hirsova, Eforie, 86.0),
            (Urziceni, Vaslui, 142.0),
            (Vaslui, Iasi, 92.0),
            (Iasi, Neamt, 87.0),
        ]
    }

    /// Every road of the map as two one-way segments.
    pub fn create_romania_graph() -> RoadGraph {
        let intersections = (1..=20)
            .map(|id| Intersection::new(IntersectionId::new(id), 0.0, 0.0))
            .collect();

        let segments = get_romania_graph_edges()
            .into_iter()
            .flat_map(|(start, end, length)| {
                [
                    Segment::new(start.into(), end.into(), length, ""),
                    Segment::new(end.into(), start.into(), length, ""),
                ]
            })
            .collect();

        RoadGraph::new(intersections, segments).unwrap()
    }
}
