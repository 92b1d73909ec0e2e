//! Spatial-index entries for observations, for nearest-neighbour search with `rstar`.

use crate::types::observation::Observation;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// An observation's position paired with its index in the input batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ObservationPoint {
    pub index: usize,
    pub position: [f64; 2],
}

impl ObservationPoint {
    /// Euclidean distance in raw degree space.
    pub fn distance_to(&self, point: &[f64; 2]) -> f64 {
        self.distance_2(point).sqrt()
    }
}

impl RTreeObject for ObservationPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// Squared Euclidean distance treating (latitude, longitude) as planar coordinates.
///
/// No projection or haversine correction is applied; nearest-neighbour ordering and the
/// distances fed into gradient estimates are both in degrees.
impl PointDistance for ObservationPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let d_lat = self.position[0] - point[0];
        let d_lon = self.position[1] - point[1];
        d_lat * d_lat + d_lon * d_lon
    }
}

pub(crate) fn build_index(observations: &[Observation]) -> RTree<ObservationPoint> {
    let points = observations
        .iter()
        .enumerate()
        .map(|(index, obs)| ObservationPoint {
            index,
            position: obs.position(),
        })
        .collect();
    RTree::bulk_load(points)
}
