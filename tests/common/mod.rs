#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use albus_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{
        Assignment, Course, Environment, Exam, ExamCompletion, ExamViolation, Staff, Student,
    },
    repositories::{
        AssignmentRepository, CourseRepository, EnvironmentRepository, ExamCompletionRepository,
        ExamRepository, ExamViolationRepository, StaffRepository, StudentRepository,
    },
};

// In-memory stand-ins for the Mongo repositories, with the same uniqueness
// semantics the unique indexes provide.

#[derive(Default)]
pub struct InMemoryStudentRepository {
    students: RwLock<HashMap<i64, Student>>,
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Student>> {
        let students = self.students.read().await;
        Ok(students.get(&id).cloned())
    }

    async fn find_active_by_identifier(&self, identifier: &str) -> AppResult<Option<Student>> {
        let students = self.students.read().await;
        Ok(students
            .values()
            .find(|s| s.identifier == identifier && s.active)
            .cloned())
    }

    async fn insert(&self, student: Student) -> AppResult<Student> {
        let mut students = self.students.write().await;
        students.insert(student.id, student.clone());
        Ok(student)
    }
}

#[derive(Default)]
pub struct InMemoryStaffRepository {
    staff: RwLock<HashMap<i64, Staff>>,
}

#[async_trait]
impl StaffRepository for InMemoryStaffRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Staff>> {
        let staff = self.staff.read().await;
        Ok(staff.get(&id).cloned())
    }

    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<Staff>> {
        let staff = self.staff.read().await;
        Ok(staff.values().find(|s| s.email == identifier).cloned())
    }

    async fn insert(&self, member: Staff) -> AppResult<Staff> {
        let mut staff = self.staff.write().await;
        staff.insert(member.id, member.clone());
        Ok(member)
    }
}

#[derive(Default)]
pub struct InMemoryCourseRepository {
    courses: RwLock<HashMap<i64, Course>>,
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Course>> {
        let courses = self.courses.read().await;
        Ok(courses.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Course>> {
        let courses = self.courses.read().await;
        Ok(courses.values().find(|c| c.name == name).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Course>> {
        let courses = self.courses.read().await;
        let mut items: Vec<_> = courses.values().cloned().collect();
        items.sort_by_key(|c| c.id);
        Ok(items)
    }

    async fn insert(&self, course: Course) -> AppResult<Course> {
        let mut courses = self.courses.write().await;
        courses.insert(course.id, course.clone());
        Ok(course)
    }
}

#[derive(Default)]
pub struct InMemoryEnvironmentRepository {
    environments: RwLock<HashMap<i64, Environment>>,
}

#[async_trait]
impl EnvironmentRepository for InMemoryEnvironmentRepository {
    async fn find_all(&self) -> AppResult<Vec<Environment>> {
        let environments = self.environments.read().await;
        let mut items: Vec<_> = environments.values().cloned().collect();
        items.sort_by_key(|e| e.id);
        Ok(items)
    }

    async fn insert(&self, environment: Environment) -> AppResult<Environment> {
        let mut environments = self.environments.write().await;
        environments.insert(environment.id, environment.clone());
        Ok(environment)
    }
}

#[derive(Default)]
pub struct InMemoryExamRepository {
    exams: RwLock<HashMap<i64, Exam>>,
}

#[async_trait]
impl ExamRepository for InMemoryExamRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Exam>> {
        let exams = self.exams.read().await;
        Ok(exams.get(&id).cloned())
    }

    async fn find_by_course_id(&self, course_id: i64) -> AppResult<Vec<Exam>> {
        let exams = self.exams.read().await;
        let mut items: Vec<_> = exams
            .values()
            .filter(|e| e.course_id == course_id)
            .cloned()
            .collect();
        items.sort_by_key(|e| e.id);
        Ok(items)
    }

    async fn insert(&self, exam: Exam) -> AppResult<Exam> {
        let mut exams = self.exams.write().await;
        exams.insert(exam.id, exam.clone());
        Ok(exam)
    }

    async fn update(&self, exam: Exam) -> AppResult<Exam> {
        let mut exams = self.exams.write().await;
        if !exams.contains_key(&exam.id) {
            return Err(AppError::NotFound("Exam not found".to_string()));
        }
        exams.insert(exam.id, exam.clone());
        Ok(exam)
    }
}

#[derive(Default)]
pub struct InMemoryExamCompletionRepository {
    completions: RwLock<HashMap<(i64, i64), ExamCompletion>>,
}

#[async_trait]
impl ExamCompletionRepository for InMemoryExamCompletionRepository {
    async fn find_by_exam_and_student(
        &self,
        exam_id: i64,
        student_id: i64,
    ) -> AppResult<Option<ExamCompletion>> {
        let completions = self.completions.read().await;
        Ok(completions.get(&(exam_id, student_id)).cloned())
    }

    async fn find_completed_by_exams_and_student(
        &self,
        exam_ids: &[i64],
        student_id: i64,
    ) -> AppResult<Vec<ExamCompletion>> {
        let completions = self.completions.read().await;
        Ok(completions
            .values()
            .filter(|c| c.student_id == student_id && c.completed && exam_ids.contains(&c.exam_id))
            .cloned()
            .collect())
    }

    async fn insert(&self, completion: ExamCompletion) -> AppResult<ExamCompletion> {
        let mut completions = self.completions.write().await;
        let key = (completion.exam_id, completion.student_id);

        // Same backstop the unique compound index gives the Mongo version.
        if completions.contains_key(&key) {
            return Err(AppError::Conflict("Exam already started".to_string()));
        }

        completions.insert(key, completion.clone());
        Ok(completion)
    }

    async fn update(&self, completion: ExamCompletion) -> AppResult<ExamCompletion> {
        let mut completions = self.completions.write().await;
        completions.insert(
            (completion.exam_id, completion.student_id),
            completion.clone(),
        );
        Ok(completion)
    }

    async fn force_complete(&self, completion: ExamCompletion) -> AppResult<()> {
        let mut completions = self.completions.write().await;
        completions.insert((completion.exam_id, completion.student_id), completion);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryExamViolationRepository {
    violations: RwLock<Vec<ExamViolation>>,
}

#[async_trait]
impl ExamViolationRepository for InMemoryExamViolationRepository {
    async fn insert(&self, violation: ExamViolation) -> AppResult<ExamViolation> {
        let mut violations = self.violations.write().await;
        violations.push(violation.clone());
        Ok(violation)
    }

    async fn count_by_student_and_exam(&self, student_id: i64, exam_id: i64) -> AppResult<i64> {
        let violations = self.violations.read().await;
        Ok(violations
            .iter()
            .filter(|v| v.student_id == student_id && v.exam_id == exam_id)
            .count() as i64)
    }
}

/// Everything a test needs to drive the application against in-memory
/// storage: the assembled state plus concrete repository handles for
/// seeding and inspection.
pub struct TestHarness {
    pub state: AppState,
    pub students: Arc<InMemoryStudentRepository>,
    pub staff: Arc<InMemoryStaffRepository>,
    pub courses: Arc<InMemoryCourseRepository>,
    pub environments: Arc<InMemoryEnvironmentRepository>,
    pub exams: Arc<InMemoryExamRepository>,
    pub completions: Arc<InMemoryExamCompletionRepository>,
    pub violations: Arc<InMemoryExamViolationRepository>,
    pub assignments: Arc<InMemoryAssignmentRepository>,
}

#[derive(Default)]
pub struct InMemoryAssignmentRepository {
    assignments: RwLock<HashMap<i64, Assignment>>,
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Assignment>> {
        let assignments = self.assignments.read().await;
        Ok(assignments.get(&id).cloned())
    }

    async fn insert(&self, assignment: Assignment) -> AppResult<Assignment> {
        let mut assignments = self.assignments.write().await;
        assignments.insert(assignment.id, assignment.clone());
        Ok(assignment)
    }
}

pub fn test_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "albus-test".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        violations_limit_per_exam: 3,
        grading_base_url: "http://localhost:9091".to_string(),
        grading_user_header: "X-albus-user-id".to_string(),
        grading_max_retry: 3,
        token_expiration_minutes: 180,
    }
}

pub fn test_harness() -> TestHarness {
    test_harness_with_config(test_config())
}

pub fn test_harness_with_config(config: Config) -> TestHarness {
    let students = Arc::new(InMemoryStudentRepository::default());
    let staff = Arc::new(InMemoryStaffRepository::default());
    let courses = Arc::new(InMemoryCourseRepository::default());
    let environments = Arc::new(InMemoryEnvironmentRepository::default());
    let exams = Arc::new(InMemoryExamRepository::default());
    let completions = Arc::new(InMemoryExamCompletionRepository::default());
    let violations = Arc::new(InMemoryExamViolationRepository::default());
    let assignments = Arc::new(InMemoryAssignmentRepository::default());

    let state = AppState::with_components(
        config,
        students.clone(),
        staff.clone(),
        courses.clone(),
        environments.clone(),
        exams.clone(),
        completions.clone(),
        violations.clone(),
        assignments.clone(),
    );

    TestHarness {
        state,
        students,
        staff,
        courses,
        environments,
        exams,
        completions,
        violations,
        assignments,
    }
}
