mod earthquake;
mod error;
mod road_condition;
mod weather;
mod wind_chill;

pub use earthquake::{
    nearby, DepremApiResponse, EarthquakeEvent, EventId, Magnitude, NearbyEarthquake,
};
pub use error::WeatherError;
pub use road_condition::{classify, RoadCondition, RoadLabel, Tone};
pub use weather::{assess, HazardAssessment, OpenMeteoCurrent, OpenMeteoResponse, WeatherSnapshot};
pub use wind_chill::wind_chill;
