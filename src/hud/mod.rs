mod feed;
mod session;

pub use feed::{replay_track, subscribe, PositionEvent, Subscription};
pub use session::{EarthquakeReport, Hud, HudReport, HudSettings, PositionFix, DEFAULT_LOCATION};
