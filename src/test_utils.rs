use crate::auth::identity::{Identity, Role};
use crate::models::domain::{Exam, ExamStatus};
