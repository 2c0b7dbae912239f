use std::sync::Arc;
use tokio::sync::Mutex;

use crate::hud::Hud;

#[derive(Clone)]
pub struct AppState {
    pub hud: Arc<Mutex<Hud>>,
}

impl AppState {
    pub fn new(hud: Hud) -> Self {
        Self {
            hud: Arc::new(Mutex::new(hud)),
        }
    }
}
