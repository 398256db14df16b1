//! Route table and middleware stack.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS; the deployment fronts this with a reverse proxy.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/programs", get(handlers::list_programs))
        .route("/program", post(handlers::create_program))
        // Static segment must be registered alongside the {program_id} routes
        .route("/program/setDetails", post(handlers::set_program_details))
        .route(
            "/program/{program_id}",
            get(handlers::get_program)
                .post(handlers::update_program)
                .delete(handlers::delete_program),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::FullRepository;
    use crate::http::auth::AuthConfig;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo: Arc<dyn FullRepository> = Arc::new(crate::db::LocalRepository::new());
        let _router = create_router(AppState::new(repo, AuthConfig::new("test-secret")));
    }
}
