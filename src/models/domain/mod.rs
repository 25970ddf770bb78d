pub mod assignment;
pub mod course;
pub mod environment;
pub mod exam;
pub mod exam_completion;
pub mod exam_violation;
pub mod staff;
pub mod student;

pub use assignment::Assignment;
pub use course::Course;
pub use environment::Environment;
pub use exam::{Exam, ExamStatus};
pub use exam_completion::ExamCompletion;
pub use exam_violation::ExamViolation;
pub use staff::Staff;
pub use student::Student;
