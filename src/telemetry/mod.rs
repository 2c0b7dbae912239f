mod error;
mod estimator;
mod geo;
mod heading;
mod sample;
mod track;

pub use error::TrackError;
pub use estimator::{estimate_speed_kmh, update, BaselinePolicy, Estimator};
pub use geo::{haversine_km, Coordinate, EARTH_RADIUS_KM};
pub use heading::{compass_point, heading_label, CompassPoint, HEADING_UNKNOWN};
pub use sample::{DerivedVelocity, PositionSample};
pub use track::load_track;
