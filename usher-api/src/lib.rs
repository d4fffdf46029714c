use axum::Router;
use tower_http::trace::TraceLayer;

pub mod broker;
pub mod cors;
pub mod error;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(broker::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
