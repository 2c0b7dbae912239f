pub mod earthquake;
pub mod error;
pub mod hazard;
pub mod hud;
pub mod telemetry;
