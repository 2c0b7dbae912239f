use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::geo::haversine_km;
use super::heading::heading_label;
use super::sample::{DerivedVelocity, PositionSample};

const MPS_TO_KMH: f64 = 3.6;
const MS_PER_HOUR: f64 = 3_600_000.0;
// Elapsed time is floored at one second.
const MIN_ELAPSED_HOURS: f64 = 1.0 / 3600.0;

/// Decides whether a sample may become the baseline for the next
/// displacement-derived speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BaselinePolicy {
    /// Every sample replaces the previous one.
    #[default]
    Always,
    /// Samples with non-finite or out-of-range coordinates are dropped as
    /// baseline candidates.
    ValidFix,
}

impl BaselinePolicy {
    pub fn accepts(&self, sample: &PositionSample) -> bool {
        match self {
            BaselinePolicy::Always => true,
            BaselinePolicy::ValidFix => sample.has_valid_fix(),
        }
    }
}

/// Derives speed and heading for `sample` given the previously retained
/// sample.
pub fn update(sample: &PositionSample, previous: Option<&PositionSample>) -> DerivedVelocity {
    DerivedVelocity {
        speed_kmh: estimate_speed_kmh(sample, previous),
        heading_label: heading_label(sample.heading_degrees),
    }
}

/// Instantaneous speed when the platform reports one, displacement over
/// elapsed time otherwise. Always finite and non-negative.
pub fn estimate_speed_kmh(sample: &PositionSample, previous: Option<&PositionSample>) -> f64 {
    let speed = match sample.instantaneous_speed_mps.filter(|s| s.is_finite()) {
        Some(mps) => mps * MPS_TO_KMH,
        None => match previous {
            Some(prev) => displacement_speed_kmh(prev, sample),
            None => 0.0,
        },
    };

    if speed.is_finite() && speed > 0.0 {
        speed
    } else {
        0.0
    }
}

fn displacement_speed_kmh(previous: &PositionSample, current: &PositionSample) -> f64 {
    let distance_km = haversine_km(previous.coordinate(), current.coordinate());
    let elapsed_ms = current.timestamp_ms.saturating_sub(previous.timestamp_ms);
    let elapsed_hours = (elapsed_ms as f64 / MS_PER_HOUR).max(MIN_ELAPSED_HOURS);
    distance_km / elapsed_hours
}

/// Holds the single most recent sample of one logical session.
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    previous: Option<PositionSample>,
    policy: BaselinePolicy,
}

impl Estimator {
    pub fn new(policy: BaselinePolicy) -> Self {
        Self {
            previous: None,
            policy,
        }
    }

    pub fn previous(&self) -> Option<&PositionSample> {
        self.previous.as_ref()
    }

    pub fn push(&mut self, sample: PositionSample) -> DerivedVelocity {
        let velocity = update(&sample, self.previous.as_ref());

        if self.policy.accepts(&sample) {
            self.previous = Some(sample);
        } else {
            log::warn!(
                "Rejected sample at {} ms as baseline: invalid fix ({}, {})",
                sample.timestamp_ms,
                sample.latitude,
                sample.longitude
            );
        }

        velocity
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}
