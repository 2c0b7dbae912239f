use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("temperature must be finite, got {0}")]
    InvalidTemperature(f64),
    #[error("precipitation must be a finite non-negative amount, got {0} mm")]
    InvalidPrecipitation(f64),
    #[error("wind speed must be a finite non-negative value, got {0} km/h")]
    InvalidWindSpeed(f64),
}
