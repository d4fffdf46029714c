use std::sync::Arc;

use usher_upstream::SeatsClient;

#[derive(Clone)]
pub struct AppState {
    pub seats: Arc<SeatsClient>,
    pub webhook_secret: String,
}
