//! Stop spacing and interpolation along a polyline.

use crate::domain::{DomainError, GeoPoint, haversine_meters};

/// Stop distances from the start, in miles.
///
/// Every positive multiple of `interval_miles` strictly below
/// `distance_miles`. A trip no longer than one interval gets no stops; a
/// trip of exactly 1000 miles at 500-mile intervals gets one stop at 500.
pub fn stop_targets(distance_miles: f64, interval_miles: f64) -> Vec<f64> {
    let mut targets = Vec::new();
    if interval_miles.is_nan() || interval_miles <= 0.0 || distance_miles <= interval_miles {
        return targets;
    }

    let mut mult = 1u32;
    while f64::from(mult) * interval_miles < distance_miles {
        targets.push(f64::from(mult) * interval_miles);
        mult += 1;
    }
    targets
}

/// The point `target_meters` along `points`, measured by great-circle
/// segment length.
///
/// A non-positive target gives the first point; a target beyond the end
/// gives the last point. Within a segment the position is interpolated
/// linearly in latitude and longitude.
pub fn point_along(points: &[GeoPoint], target_meters: f64) -> Result<GeoPoint, DomainError> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(DomainError::EmptyPolyline),
    };

    if target_meters <= 0.0 {
        return Ok(first);
    }

    let mut cumulative = 0.0;
    for pair in points.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let segment = haversine_meters(a, b);
        if cumulative + segment >= target_meters {
            let fraction = if segment > 0.0 {
                (target_meters - cumulative) / segment
            } else {
                0.0
            };
            return Ok(a.lerp(b, fraction));
        }
        cumulative += segment;
    }

    Ok(last)
}
