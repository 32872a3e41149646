use courier_routing::intersection::IntersectionId;
use jiff::{SignedDuration, Zoned, civil::DateTime};
use serde::Serialize;

use crate::{
    error::TourError,
    problem::stop::StopVertex,
    solver::tour_solution::TourSolution,
    stop_graph::StopGraph,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TourParams {
    /// Tours longer than a day carry on into the following dates.
    pub departure_time: DateTime,
    /// Average courier speed in km/h
    pub speed_kmh: f64,
}

impl Default for TourParams {
    fn default() -> Self {
        TourParams {
            departure_time: Zoned::now().date().at(8, 0, 0, 0),
            speed_kmh: 15.0,
        }
    }
}

impl TourParams {
    fn travel_duration(&self, meters: f64) -> SignedDuration {
        SignedDuration::try_from_secs_f64(meters * 3.6 / self.speed_kmh)
            .unwrap_or(SignedDuration::MAX)
    }
}

/// One stop to stop move of the tour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourLeg {
    pub from: StopVertex,
    pub to: StopVertex,
    pub path: Vec<IntersectionId>,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopVisit {
    pub stop: StopVertex,
    pub intersection: IntersectionId,
    pub arrival: DateTime,
    pub departure: DateTime,
}

/// A solved tour expanded back to the road network, with time estimates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    legs: Vec<TourLeg>,
    visits: Vec<StopVisit>,
    total_cost: f64,
    return_time: DateTime,
}

impl Tour {
    pub fn assemble(
        graph: &StopGraph,
        solution: &TourSolution,
        params: &TourParams,
    ) -> Result<Tour, TourError> {
        if !(params.speed_kmh.is_finite() && params.speed_kmh > 0.0) {
            return Err(TourError::InvalidSpeed(params.speed_kmh));
        }

        Self::validate(graph, solution)?;

        let stops = solution.stops();
        let warehouse = graph.stop(StopVertex::WAREHOUSE);

        let mut legs = Vec::with_capacity(stops.len());
        let mut visits = Vec::with_capacity(stops.len());
        visits.push(StopVisit {
            stop: StopVertex::WAREHOUSE,
            intersection: warehouse.intersection(),
            arrival: params.departure_time,
            departure: params.departure_time,
        });

        let mut clock = params.departure_time;
        let mut total_cost = 0.0;

        // A tour with a single stop never leaves the warehouse
        let closing = (stops.len() > 1).then_some(StopVertex::WAREHOUSE);
        for (index, &to) in stops.iter().skip(1).chain(closing.iter()).enumerate() {
            let from = stops[index];
            let cost = graph.cost(from, to);
            total_cost += cost;

            legs.push(TourLeg {
                from,
                to,
                path: graph.path(from, to).to_vec(),
                cost,
            });

            clock = clock.saturating_add(params.travel_duration(cost));
            if to.is_warehouse() {
                continue;
            }

            let stop = graph.stop(to);
            let arrival = clock;
            clock = clock.saturating_add(stop.service_duration());

            visits.push(StopVisit {
                stop: to,
                intersection: stop.intersection(),
                arrival,
                departure: clock,
            });
        }

        Ok(Tour {
            legs,
            visits,
            total_cost,
            return_time: clock,
        })
    }

    fn validate(graph: &StopGraph, solution: &TourSolution) -> Result<(), TourError> {
        let stops = solution.stops();
        if stops.len() != graph.num_vertices() || stops.first() != Some(&StopVertex::WAREHOUSE) {
            return Err(TourError::InvalidSolution);
        }

        let mut unvisited = graph.free_vertices();
        for (index, &vertex) in stops.iter().enumerate().skip(1) {
            if vertex.get() >= graph.num_vertices()
                || !unvisited.contains(vertex.get())
                || !graph.respects_precedence(vertex, &unvisited)
                || !graph.is_arc(stops[index - 1], vertex)
            {
                return Err(TourError::InvalidSolution);
            }
            unvisited.set(vertex.get(), false);
        }

        let last = stops[stops.len() - 1];
        if !last.is_warehouse() && !graph.is_arc(last, StopVertex::WAREHOUSE) {
            return Err(TourError::InvalidSolution);
        }

        debug_assert!(unvisited.is_clear());
        Ok(())
    }

    pub fn legs(&self) -> &[TourLeg] {
        &self.legs
    }

    pub fn visits(&self) -> &[StopVisit] {
        &self.visits
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn return_time(&self) -> DateTime {
        self.return_time
    }
}
