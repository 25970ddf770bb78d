use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::{
    app_state::AppState,
    auth::{require_staff, AuthenticatedUser},
    errors::AppError,
    models::dto::request::SubmitRequest,
};

const SUBMISSIONS_PAGE: i64 = 0;
const SUBMISSIONS_PAGE_SIZE: i64 = 50;

/// Forwards a code submission to the grading service. The body is checked
/// before any access control runs.
#[get("/exams/{exam_id}/assignments/{assignment_id}/submit")]
pub async fn submit(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
    request: web::Json<SubmitRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (exam_id, assignment_id) = path.into_inner();
    let request = request.into_inner();

    let (environment, content) = match (request.environment, request.content) {
        (Some(environment), Some(content)) if !environment.is_empty() && !content.is_empty() => {
            (environment, content)
        }
        _ => return Err(AppError::BadRequest("Code submission is invalid.".to_string())),
    };

    let assignment = state
        .exam_service
        .resolve_assignment(exam_id, assignment_id, &auth.0)
        .await?;

    let submission = state
        .grading_client
        .submit(
            assignment.id,
            &assignment.name,
            &environment,
            exam_id,
            &content,
            auth.0.id,
        )
        .await?;

    Ok(HttpResponse::Accepted().json(json!({ "data": submission })))
}

#[get("/exams/{exam_id}/submissions")]
pub async fn list_submissions(
    state: web::Data<AppState>,
    exam_id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .exam_service
        .check_exam_access_by_id(*exam_id, &auth.0)
        .await?;

    let submissions = state
        .grading_client
        .list_my_submissions(*exam_id, SUBMISSIONS_PAGE, SUBMISSIONS_PAGE_SIZE, auth.0.id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "data": submissions })))
}

#[get("/exams/{exam_id}/results")]
pub async fn get_exam_results(
    state: web::Data<AppState>,
    exam_id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .exam_service
        .check_exam_access_by_id(*exam_id, &auth.0)
        .await?;

    let results = state
        .grading_client
        .list_my_submissions(*exam_id, SUBMISSIONS_PAGE, SUBMISSIONS_PAGE_SIZE, auth.0.id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "data": results })))
}

#[get("/submissions")]
pub async fn list_all_submissions(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_staff(&auth.0)?;

    let submissions = state
        .grading_client
        .list_all_submissions(SUBMISSIONS_PAGE, SUBMISSIONS_PAGE_SIZE, auth.0.id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "data": submissions })))
}

#[get("/exams/{exam_id}/submissions/{submission_id}")]
pub async fn get_submission(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (exam_id, submission_id) = path.into_inner();

    state
        .exam_service
        .check_exam_access_by_id(exam_id, &auth.0)
        .await?;

    let submission = state
        .grading_client
        .get_submission(submission_id, auth.0.id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "data": submission })))
}
