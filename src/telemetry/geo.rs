use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl Coordinate {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }

    /// Parses a `"lat, lng"` pair as written in the config file.
    pub fn from_coordinates(coordinates: &str) -> Option<Self> {
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return None;
        }
        let lat: f64 = parts[0].parse().ok()?;
        let lon: f64 = parts[1].parse().ok()?;
        let coordinate = Self::new(lat, lon);
        coordinate.is_valid().then_some(coordinate)
    }

    /// Finite and inside the WGS-84 latitude/longitude ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude_deg.is_finite()
            && self.longitude_deg.is_finite()
            && (-90.0..=90.0).contains(&self.latitude_deg)
            && (-180.0..=180.0).contains(&self.longitude_deg)
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }
}

/// Great-circle distance on a spherical Earth.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let dlat = to.lat_rad() - from.lat_rad();
    let dlon = to.lon_rad() - from.lon_rad();
    let a = (dlat / 2.0).sin().powi(2)
        + from.lat_rad().cos() * to.lat_rad().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_degree_of_longitude_on_the_equator() {
        let dist = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!((dist - 111.195).abs() < 0.01);
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_same_point() {
        let a = Coordinate::new(40.978, 27.5153);
        let b = Coordinate::new(41.015, 28.979);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
        assert_eq!(haversine_km(a, a), 0.0);
    }

    #[test]
    fn parses_config_coordinates() {
        let c = Coordinate::from_coordinates(" 40.978 , 27.5153 ").unwrap();
        assert_eq!(c, Coordinate::new(40.978, 27.5153));

        assert!(Coordinate::from_coordinates("40.978").is_none());
        assert!(Coordinate::from_coordinates("north, east").is_none());
        assert!(Coordinate::from_coordinates("91.0, 0.0").is_none());
        assert!(Coordinate::from_coordinates("1, 2, 3").is_none());
    }
}
