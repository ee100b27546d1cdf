//! Route geometry: great-circle distance and nearest-neighbor sequencing.

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between two points in kilometers.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let radius_km = 6371.0_f64;
    let (lat1_rad, lon1_rad) = (a.latitude.to_radians(), a.longitude.to_radians());
    let (lat2_rad, lon2_rad) = (b.latitude.to_radians(), b.longitude.to_radians());
    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;
    let h = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();
    radius_km * c
}

/// Orders `stops` by repeatedly visiting the nearest unvisited one, starting
/// from `start`. Greedy, not optimal, but deterministic and good enough for
/// a handful of same-city deliveries.
pub fn sequence_nearest_neighbor<T, F>(start: GeoPoint, mut stops: Vec<T>, point_of: F) -> Vec<T>
where
    F: Fn(&T) -> GeoPoint,
{
    let mut ordered = Vec::with_capacity(stops.len());
    let mut current = start;

    while !stops.is_empty() {
        let mut best_idx = 0;
        let mut best_distance = f64::INFINITY;
        for (idx, stop) in stops.iter().enumerate() {
            let distance = haversine_km(current, point_of(stop));
            if distance < best_distance {
                best_distance = distance;
                best_idx = idx;
            }
        }
        let next = stops.swap_remove(best_idx);
        current = point_of(&next);
        ordered.push(next);
    }

    ordered
}
