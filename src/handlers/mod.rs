pub mod assignment_handler;
pub mod auth_handler;
pub mod course_handler;
pub mod environment_handler;
pub mod exam_handler;
pub mod submission_handler;

pub use assignment_handler::{get_assignment, get_submission_allowance};
pub use auth_handler::login;
pub use course_handler::list_courses;
pub use environment_handler::list_environments;
pub use exam_handler::{
    complete_exam, complete_exam_as_student, get_exam, list_exams, report_exam_violation,
    start_exam, start_exam_as_student,
};
pub use submission_handler::{
    get_exam_results, get_submission, list_all_submissions, list_submissions, submit,
};
