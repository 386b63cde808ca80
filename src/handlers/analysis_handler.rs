use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{AnalyzeRequest, GenerateRequest},
};

#[post("/analyze")]
pub async fn analyze(
    state: web::Data<AppState>,
    request: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("Received analysis request");

    let request = request.into_inner();
    request.validate()?;

    let provider = request
        .ai_model
        .unwrap_or_else(|| state.config.default_provider.clone());

    let result = state
        .analysis_service
        .analyze(
            &request.syllabus_text,
            &request.objectives,
            &request.question_text,
            &provider,
        )
        .await?;

    Ok(HttpResponse::Ok().json(result))
}

#[post("/generate")]
pub async fn generate(
    state: web::Data<AppState>,
    request: web::Json<GenerateRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("Received question generation request");

    let request = request.into_inner();
    request.validate()?;

    let provider = request
        .ai_model
        .unwrap_or_else(|| state.config.default_provider.clone());

    log::info!(
        "Processing generation: type={}, difficulty={}, model={}",
        request.question_type,
        request.difficulty_level,
        provider
    );

    let result = state
        .analysis_service
        .generate(
            &request.syllabus_text,
            &request.objectives,
            &request.question_type,
            &provider,
            &request.difficulty_level,
            &request.syllabus_topics,
        )
        .await?;

    Ok(HttpResponse::Ok().json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::assert_error_status;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_analyze_rejects_malformed_body() {
        let app = test::init_service(App::new().service(analyze)).await;

        let req = test::TestRequest::post()
            .uri("/analyze")
            .set_json(serde_json::json!({ "syllabus_text": "only one field" }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_error_status(resp.status());
    }

    #[actix_web::test]
    async fn test_generate_rejects_malformed_body() {
        let app = test::init_service(App::new().service(generate)).await;

        let req = test::TestRequest::post()
            .uri("/generate")
            .set_json(serde_json::json!({}))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_error_status(resp.status());
    }
}
