//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the REST surface the floor-plan clients talk to, plus static
//! serving of uploaded plan images. Handlers translate service errors to
//! status codes and nothing else; all real work lives in `services`.

pub mod floors;
pub mod images;
pub mod rooms;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let uploads = ServeDir::new(&state.uploads_dir);

    Router::new()
        .route("/api/plan", get(floors::plan_snapshot))
        .route("/api/floors", get(floors::list_floors).post(floors::create_floor))
        .route("/api/floors/{id}", axum::routing::delete(floors::delete_floor))
        .route("/api/floors/{id}/duplicate", post(floors::duplicate_floor))
        .route("/api/rooms", get(rooms::list_rooms).post(rooms::create_room))
        .route(
            "/api/rooms/{id}",
            get(rooms::get_room)
                .patch(rooms::update_room)
                .delete(rooms::delete_room),
        )
        .route("/api/images", post(images::upload_image))
        .route("/healthz", get(healthz))
        .nest_service("/uploads", uploads)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
