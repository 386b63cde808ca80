use actix_web::{get, web, HttpResponse};
use chrono::Utc;

use crate::{app_state::AppState, errors::AppError, models::dto::response::HealthResponse};

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    state.db.health_check().await?;

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    }))
}
