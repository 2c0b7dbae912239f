use serde::Serialize;
use strum_macros::Display;
use utoipa::ToSchema;

const WET_PRECIPITATION_MM: f64 = 0.2;
const ICE_TEMPERATURE_C: f64 = 1.0;
const CROSSWIND_KMH: f64 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoadLabel {
    #[strum(serialize = "Dry")]
    Dry,
    #[strum(serialize = "Ice risk")]
    IceRisk,
    #[strum(serialize = "Crosswind")]
    Crosswind,
    #[strum(serialize = "Wet / slippery")]
    WetSlippery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Tone {
    Good,
    Warning,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RoadCondition {
    pub label: RoadLabel,
    pub detail: String,
    pub tone: Tone,
}

impl RoadCondition {
    fn new(label: RoadLabel, detail: &str, tone: Tone) -> Self {
        Self {
            label,
            detail: detail.to_string(),
            tone,
        }
    }
}

/// Road hazard from current weather. Rules are checked in order and the
/// first match wins: precipitation, then ice, then wind.
pub fn classify(temp_c: f64, precipitation_mm: f64, wind_kmh: f64) -> RoadCondition {
    if precipitation_mm > WET_PRECIPITATION_MM {
        RoadCondition::new(
            RoadLabel::WetSlippery,
            "Precipitation detected, allow for longer braking distances.",
            Tone::Alert,
        )
    } else if temp_c <= ICE_TEMPERATURE_C {
        RoadCondition::new(
            RoadLabel::IceRisk,
            "Cold surfaces and low temperature, ride carefully.",
            Tone::Warning,
        )
    } else if wind_kmh > CROSSWIND_KMH {
        RoadCondition::new(
            RoadLabel::Crosswind,
            "Strong wind may unsettle the motorcycle.",
            Tone::Warning,
        )
    } else {
        RoadCondition::new(
            RoadLabel::Dry,
            "Road surface conditions are normal.",
            Tone::Good,
        )
    }
}
