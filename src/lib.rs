pub mod hazard;
pub mod hud;
pub mod telemetry;
pub mod web;
