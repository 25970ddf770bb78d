use crate::{
    auth::identity::{Identity, Role},
    errors::{AppError, AppResult},
};

pub fn require_staff(identity: &Identity) -> AppResult<()> {
    if identity.role != Role::Staff {
        return Err(AppError::Forbidden("Staff access required".to_string()));
    }
    Ok(())
}

pub fn require_student(identity: &Identity) -> AppResult<()> {
    if identity.role != Role::Student {
        return Err(AppError::Forbidden("Student access required".to_string()));
    }
    Ok(())
}
