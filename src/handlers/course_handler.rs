use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::response::{to_list_response, CourseView},
    repositories::CourseRepository,
};

#[get("/courses")]
pub async fn list_courses(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    log::info!("Received a request to list all courses");

    let courses = state.course_repository.find_all().await?;
    let views: Vec<CourseView> = courses.iter().map(CourseView::from).collect();

    Ok(HttpResponse::Ok().json(to_list_response("courses", views)))
}
