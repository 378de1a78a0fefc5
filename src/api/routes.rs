use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::api::handlers::{self, AppState};
use crate::upstream::DataService;

pub fn create_router<U: DataService + 'static>() -> Router<AppState<U>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Login form
        .route("/", get(handlers::login_page))
        // Step 1: sign in and list tables
        .route("/list_of_tables", post(handlers::list_tables::<U>))
        // Step 2: columns of the chosen tables
        .route("/columns", post(handlers::list_columns::<U>))
        // Step 3: run the query over the chosen columns
        .route("/data", post(handlers::run_query::<U>))
}

/// Router with the stylesheet directory mounted under `/static`
pub fn create_router_with_assets<U: DataService + 'static>(
    static_dir: &str,
) -> Router<AppState<U>> {
    create_router::<U>().nest_service("/static", ServeDir::new(static_dir))
}
