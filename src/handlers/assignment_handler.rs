use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::response::AssignmentView,
};

#[get("/exams/{exam_id}/assignments/{assignment_id}")]
pub async fn get_assignment(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (exam_id, assignment_id) = path.into_inner();

    let assignment = state
        .exam_service
        .resolve_assignment(exam_id, assignment_id, &auth.0)
        .await?;

    Ok(HttpResponse::Ok().json(AssignmentView::from(&assignment)))
}

#[get("/assignments/{assignment_id}/allowance")]
pub async fn get_submission_allowance(
    state: web::Data<AppState>,
    assignment_id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let assignment = state
        .exam_service
        .resolve_assignment_for_allowance(*assignment_id, &auth.0)
        .await?;

    let allowance = state
        .grading_client
        .get_allowance(assignment.id, auth.0.id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "data": allowance })))
}
