use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::response::{to_list_response, EnvironmentView},
    repositories::EnvironmentRepository,
};

#[get("/environments")]
pub async fn list_environments(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    log::info!("Received a request to list all environments");

    let environments = state.environment_repository.find_all().await?;
    let views: Vec<EnvironmentView> = environments.iter().map(EnvironmentView::from).collect();

    Ok(HttpResponse::Ok().json(to_list_response("environments", views)))
}
