use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    auth::identity::Role,
    models::domain::{Assignment, Course, Environment, Exam, ExamCompletion, ExamViolation},
};

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseView {
    pub id: i64,
    pub name: String,
}

impl From<&Course> for CourseView {
    fn from(course: &Course) -> Self {
        CourseView {
            id: course.id,
            name: course.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentView {
    pub id: i64,
    pub name: String,
    pub docker_image: String,
}

impl From<&Environment> for EnvironmentView {
    fn from(environment: &Environment) -> Self {
        EnvironmentView {
            id: environment.id,
            name: environment.name.clone(),
            docker_image: environment.docker_image.clone(),
        }
    }
}

/// Wire representation of an exam. `status` is a plain string because the
/// student-facing listing overrides it with the display-only `COMPLETED`
/// marker, which is not a stored lifecycle state.
#[derive(Debug, Clone, Serialize)]
pub struct ExamView {
    pub id: i64,
    pub description: String,
    pub status: String,
}

impl ExamView {
    pub fn completed(exam: &Exam) -> Self {
        ExamView {
            status: "COMPLETED".to_string(),
            ..ExamView::from(exam)
        }
    }
}

impl From<&Exam> for ExamView {
    fn from(exam: &Exam) -> Self {
        ExamView {
            id: exam.id,
            description: exam.description.clone(),
            status: exam.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentView {
    pub id: i64,
    pub index: i32,
    pub name: String,
    pub text: String,
}

impl From<&Assignment> for AssignmentView {
    fn from(assignment: &Assignment) -> Self {
        AssignmentView {
            id: assignment.id,
            index: assignment.index,
            name: assignment.name.clone(),
            text: assignment.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ViolationView {
    pub exam_id: i64,
    pub student_id: i64,
    pub assignment_id: i64,
}

impl From<&ExamViolation> for ViolationView {
    fn from(violation: &ExamViolation) -> Self {
        ViolationView {
            exam_id: violation.exam_id,
            student_id: violation.student_id,
            assignment_id: violation.assignment_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionView {
    pub completed: bool,
}

impl From<&ExamCompletion> for CompletionView {
    fn from(completion: &ExamCompletion) -> Self {
        CompletionView {
            completed: completion.completed,
        }
    }
}

/// `{"data": {"<resource>": [...]}}` list envelope.
pub fn to_list_response<T: Serialize>(resource: &str, items: Vec<T>) -> Value {
    json!({ "data": { resource: items } })
}
