use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::handlers;
use crate::repository::EmployeeRepository;
use crate::static_files;
use crate::storage::StorageProvider;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub employees: Arc<dyn EmployeeRepository>,
    pub photos: Arc<dyn StorageProvider>,
    pub config: Arc<Config>,
}

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = match state.config.storage.max_upload_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    let employee_routes = Router::new()
        .route(
            "/",
            get(handlers::employee::list_employees).post(handlers::employee::create_employee),
        )
        .route(
            "/:id",
            put(handlers::employee::update_employee).delete(handlers::employee::delete_employee),
        )
        .layer(body_limit);

    // Photos are served from the server root
    let photos = static_files::photo_service(&state.config.storage.content_dir);

    Router::new()
        .nest("/api/employees", employee_routes)
        .fallback_service(photos)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
