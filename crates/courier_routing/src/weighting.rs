use crate::segment::Segment;

pub type Weight = f64;

/// Weight of a segment that cannot be traversed.
pub const MAX_WEIGHT: Weight = f64::INFINITY;

/// Turns a segment into the scalar cost minimized by shortest path searches.
/// Implementations must never return a negative weight.
pub trait Weighting {
    fn calc_segment_weight(&self, segment: &Segment) -> Weight;

    fn can_access_segment(&self, segment: &Segment) -> bool {
        self.calc_segment_weight(segment) != MAX_WEIGHT
    }
}

/// Weight is the segment length in meters.
#[derive(Default, Debug, Clone, Copy)]
pub struct DistanceWeighting;

impl Weighting for DistanceWeighting {
    #[inline(always)]
    fn calc_segment_weight(&self, segment: &Segment) -> Weight {
        segment.length()
    }
}

/// Weight is the travel time in seconds at a constant speed.
#[derive(Debug, Clone, Copy)]
pub struct TravelTimeWeighting {
    speed_kmh: f64,
}

impl TravelTimeWeighting {
    pub fn new(speed_kmh: f64) -> Self {
        TravelTimeWeighting { speed_kmh }
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }
}

impl Weighting for TravelTimeWeighting {
    fn calc_segment_weight(&self, segment: &Segment) -> Weight {
        if self.speed_kmh <= 0.0 {
            return MAX_WEIGHT;
        }

        let speed_meters_per_second = self.speed_kmh / 3.6;
        segment.length() / speed_meters_per_second
    }
}
