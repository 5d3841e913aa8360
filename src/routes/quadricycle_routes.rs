use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::quadricycle_controller::QuadricycleController;
use crate::dto::quadricycle_dto::{CreateQuadricycleRequest, StatusResponse, UpdateStatusRequest};
use crate::models::{Quadricycle, ReviewUpdate};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas bajo `/api/quadricycles`. HEAD sobre la colección lo responde el
/// handler GET y sirve de sonda de disponibilidad para el panel.
pub fn create_quadricycle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_quadricycles).post(create_quadricycle))
        .route("/:id", put(update_status).delete(delete_quadricycle))
        .route("/:quad_id/reviews/:review_number", put(update_review))
}

async fn list_quadricycles(
    State(state): State<AppState>,
) -> Result<Json<Vec<Quadricycle>>, AppError> {
    let controller = QuadricycleController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn create_quadricycle(
    State(state): State<AppState>,
    Json(request): Json<CreateQuadricycleRequest>,
) -> Result<(StatusCode, Json<StatusResponse>), AppError> {
    let controller = QuadricycleController::new(state.pool.clone());
    controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(StatusResponse::ok())))
}

async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let controller = QuadricycleController::new(state.pool.clone());
    controller.update_status(&id, request.status).await?;
    Ok(Json(StatusResponse::ok()))
}

async fn delete_quadricycle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    let controller = QuadricycleController::new(state.pool.clone());
    controller.delete(&id).await?;
    Ok(Json(StatusResponse::ok()))
}

async fn update_review(
    State(state): State<AppState>,
    Path((quad_id, review_number)): Path<(String, u32)>,
    Json(update): Json<ReviewUpdate>,
) -> Result<Json<StatusResponse>, AppError> {
    let controller = QuadricycleController::new(state.pool.clone());
    controller.update_review(&quad_id, review_number, update).await?;
    Ok(Json(StatusResponse::ok()))
}
