use serde::Serialize;
use strum_macros::Display;
use utoipa::ToSchema;

pub const HEADING_UNKNOWN: &str = "heading unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, ToSchema)]
pub enum CompassPoint {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

const POINTS: [CompassPoint; 8] = [
    CompassPoint::N,
    CompassPoint::NE,
    CompassPoint::E,
    CompassPoint::SE,
    CompassPoint::S,
    CompassPoint::SW,
    CompassPoint::W,
    CompassPoint::NW,
];

/// Nearest of the 8 compass points, `None` for non-finite input.
pub fn compass_point(degrees: f64) -> Option<CompassPoint> {
    if !degrees.is_finite() {
        return None;
    }
    let normalized = degrees.rem_euclid(360.0);
    let index = ((normalized / 45.0).round() as i64).rem_euclid(8);
    Some(POINTS[index as usize])
}

/// Renders a heading as `"NE (47°)"`.
pub fn heading_label(degrees: Option<f64>) -> String {
    match degrees.and_then(|d| compass_point(d).map(|point| (d, point))) {
        Some((d, point)) => {
            let rounded = (d.rem_euclid(360.0).round() as i64).rem_euclid(360);
            format!("{} ({}°)", point, rounded)
        }
        None => HEADING_UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_nearest_point() {
        assert_eq!(compass_point(0.0), Some(CompassPoint::N));
        assert_eq!(compass_point(22.0), Some(CompassPoint::N));
        assert_eq!(compass_point(23.0), Some(CompassPoint::NE));
        assert_eq!(compass_point(90.0), Some(CompassPoint::E));
        assert_eq!(compass_point(200.0), Some(CompassPoint::S));
        assert_eq!(compass_point(315.0), Some(CompassPoint::NW));
        assert_eq!(compass_point(350.0), Some(CompassPoint::N));
    }

    #[test]
    fn label_is_periodic() {
        assert_eq!(heading_label(Some(0.0)), heading_label(Some(360.0)));
        assert_eq!(heading_label(Some(0.0)), "N (0°)");
        assert_eq!(heading_label(Some(359.7)), "N (0°)");
        assert_eq!(heading_label(Some(-90.0)), "W (270°)");
        assert_eq!(heading_label(Some(47.4)), "NE (47°)");
    }

    #[test]
    fn missing_or_nan_heading_is_unknown() {
        assert_eq!(heading_label(None), HEADING_UNKNOWN);
        assert_eq!(heading_label(Some(f64::NAN)), HEADING_UNKNOWN);
        assert_eq!(heading_label(Some(f64::INFINITY)), HEADING_UNKNOWN);
    }
}
