const MAX_TEMPERATURE_C: f64 = 10.0;
const MIN_WIND_KMH: f64 = 5.0;

/// Perceived temperature from air temperature (°C) and wind speed (km/h).
///
/// Outside the range where the empirical formula applies (warm air or
/// near-calm wind) the air temperature is returned unchanged.
pub fn wind_chill(temp_c: f64, wind_kmh: f64) -> f64 {
    if temp_c > MAX_TEMPERATURE_C || wind_kmh < MIN_WIND_KMH {
        return temp_c;
    }
    let w = wind_kmh.powf(0.16);
    13.12 + 0.6215 * temp_c - 11.37 * w + 0.3965 * temp_c * w
}
