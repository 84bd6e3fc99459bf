// Export route modules
pub mod ask;
pub mod status;

use crate::state::AppState;
use axum::Router;

// Function to configure all routes
pub fn configure(state: AppState) -> Router {
    Router::new()
        .merge(ask::routes(state))
        .merge(status::routes())
}
