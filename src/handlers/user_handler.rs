use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::response::UserResponse};

/// Lists all registered users, with password hashes stripped.
#[get("/api/users")]
pub async fn get_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = state.user_service.list_users().await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(HttpResponse::Ok().json(users))
}
