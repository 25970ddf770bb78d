use actix_web::{get, post, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{require_staff, require_student, AuthenticatedUser},
    errors::AppError,
    models::dto::{
        request::ViolationRequest,
        response::{to_list_response, ViolationView},
    },
    services::ExamListing,
};

#[get("/courses/{course_id}/exams")]
pub async fn list_exams(
    state: web::Data<AppState>,
    course_id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let listing = state
        .exam_service
        .list_exams_for_course(*course_id, &auth.0)
        .await?;

    let body = match listing {
        ExamListing::Staff(views) => to_list_response("exams", views),
        ExamListing::Student(views) => json!({ "data": views }),
    };

    Ok(HttpResponse::Ok().json(body))
}

#[get("/exams/{exam_id}")]
pub async fn get_exam(
    state: web::Data<AppState>,
    exam_id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let exam = state.exam_service.get_exam(*exam_id, &auth.0).await?;
    Ok(HttpResponse::Ok().json(exam))
}

#[post("/staff/exams/{exam_id}/start")]
pub async fn start_exam(
    state: web::Data<AppState>,
    exam_id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_staff(&auth.0)?;

    let exam = state.exam_service.start_exam(*exam_id).await?;
    Ok(HttpResponse::Ok().json(exam))
}

#[post("/staff/exams/{exam_id}/complete")]
pub async fn complete_exam(
    state: web::Data<AppState>,
    exam_id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_staff(&auth.0)?;

    let exam = state.exam_service.complete_exam(*exam_id).await?;
    Ok(HttpResponse::Ok().json(exam))
}

#[post("/exams/{exam_id}/start")]
pub async fn start_exam_as_student(
    state: web::Data<AppState>,
    exam_id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_student(&auth.0)?;

    let exam = state
        .exam_service
        .start_exam_as_student(*exam_id, auth.0.id)
        .await?;
    Ok(HttpResponse::Ok().json(exam))
}

#[post("/exams/{exam_id}/complete")]
pub async fn complete_exam_as_student(
    state: web::Data<AppState>,
    exam_id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_student(&auth.0)?;

    let exam = state
        .exam_service
        .complete_exam_as_student(*exam_id, auth.0.id)
        .await?;
    Ok(HttpResponse::Ok().json(exam))
}

#[post("/exams/{exam_id}/violation")]
pub async fn report_exam_violation(
    state: web::Data<AppState>,
    exam_id: web::Path<i64>,
    request: web::Json<ViolationRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_student(&auth.0)?;
    request.validate()?;

    let violation = state
        .exam_service
        .report_violation(
            *exam_id,
            auth.0.id,
            request.assignment_id,
            &request.violation_type,
        )
        .await?;

    Ok(HttpResponse::Ok().json(ViolationView::from(&violation)))
}
