pub mod assignment_repository;
pub mod course_repository;
pub mod environment_repository;
pub mod exam_completion_repository;
pub mod exam_repository;
pub mod exam_violation_repository;
pub mod staff_repository;
pub mod student_repository;

pub use assignment_repository::{AssignmentRepository, MongoAssignmentRepository};
pub use course_repository::{CourseRepository, MongoCourseRepository};
pub use environment_repository::{EnvironmentRepository, MongoEnvironmentRepository};
pub use exam_completion_repository::{ExamCompletionRepository, MongoExamCompletionRepository};
pub use exam_repository::{ExamRepository, MongoExamRepository};
pub use exam_violation_repository::{ExamViolationRepository, MongoExamViolationRepository};
pub use staff_repository::{MongoStaffRepository, StaffRepository};
pub use student_repository::{MongoStudentRepository, StudentRepository};
