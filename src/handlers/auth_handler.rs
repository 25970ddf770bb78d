use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::identity::{Identity, Role},
    auth::password::password_matches,
    errors::AppError,
    models::dto::{request::LoginRequest, response::AuthResponse},
    repositories::{StaffRepository, StudentRepository},
};

/// Authentication endpoint; the only route outside the auth-guarded scope.
/// Lookup order: active student by identifier, then staff by email.
#[post("/api/v1/auth")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();

    let (identifier, password) = match (request.identifier, request.password) {
        (Some(identifier), Some(password)) if !identifier.is_empty() && !password.is_empty() => {
            (identifier, password)
        }
        _ => return Err(AppError::BadRequest("Bad credentials.".to_string())),
    };

    let (identity, password_digest) = match state
        .student_repository
        .find_active_by_identifier(&identifier)
        .await?
    {
        Some(student) => (
            Identity::new(student.id, &student.email, Role::Student),
            student.password,
        ),
        None => match state.staff_repository.find_by_identifier(&identifier).await? {
            Some(staff) => (
                Identity::new(staff.id, &staff.email, Role::Staff),
                staff.password,
            ),
            None => return Err(AppError::Unauthorized("Bad credentials".to_string())),
        },
    };

    if !password_matches(&password, &password_digest) {
        return Err(AppError::Unauthorized("Bad credentials".to_string()));
    }

    let role = identity.role;
    let access_token = state.auth_manager.create_token(identity).await;

    Ok(HttpResponse::Ok().json(AuthResponse { access_token, role }))
}
