use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    auth::identity::Identity,
    errors::{AppError, AppResult},
    models::domain::{Assignment, Exam, ExamCompletion, ExamStatus, ExamViolation},
    models::dto::response::ExamView,
    repositories::{
        AssignmentRepository, CourseRepository, ExamCompletionRepository, ExamRepository,
        ExamViolationRepository,
    },
};

/// Exam listing, shaped by the caller's role: staff see stored state,
/// students see their completed exams annotated with the display-only
/// `COMPLETED` status.
pub enum ExamListing {
    Staff(Vec<ExamView>),
    Student(Vec<ExamView>),
}

pub struct ExamService {
    course_repository: Arc<dyn CourseRepository>,
    exam_repository: Arc<dyn ExamRepository>,
    completion_repository: Arc<dyn ExamCompletionRepository>,
    violation_repository: Arc<dyn ExamViolationRepository>,
    assignment_repository: Arc<dyn AssignmentRepository>,
    violations_limit_per_exam: i64,
}

impl ExamService {
    pub fn new(
        course_repository: Arc<dyn CourseRepository>,
        exam_repository: Arc<dyn ExamRepository>,
        completion_repository: Arc<dyn ExamCompletionRepository>,
        violation_repository: Arc<dyn ExamViolationRepository>,
        assignment_repository: Arc<dyn AssignmentRepository>,
        violations_limit_per_exam: i64,
    ) -> Self {
        Self {
            course_repository,
            exam_repository,
            completion_repository,
            violation_repository,
            assignment_repository,
            violations_limit_per_exam,
        }
    }

    async fn find_exam(&self, exam_id: i64) -> AppResult<Exam> {
        self.exam_repository
            .find_by_id(exam_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Exam not found".to_string()))
    }

    /// Gate for acting on an exam's assignments and submissions. Staff pass
    /// whenever the exam is active; students additionally need an attempt
    /// record that is not yet completed.
    pub async fn check_exam_access(&self, exam: &Exam, identity: &Identity) -> AppResult<()> {
        if exam.status != ExamStatus::Active {
            return Err(AppError::Forbidden("Exam is not active".to_string()));
        }

        if !identity.is_staff() {
            let completion = self
                .completion_repository
                .find_by_exam_and_student(exam.id, identity.id)
                .await?;

            match completion {
                Some(completion) if !completion.completed => {}
                _ => {
                    return Err(AppError::Forbidden(
                        "Exam not active, no permission to access.".to_string(),
                    ))
                }
            }
        }

        Ok(())
    }

    pub async fn check_exam_access_by_id(
        &self,
        exam_id: i64,
        identity: &Identity,
    ) -> AppResult<()> {
        let exam = self.find_exam(exam_id).await?;
        self.check_exam_access(&exam, identity).await
    }

    pub async fn list_exams_for_course(
        &self,
        course_id: i64,
        identity: &Identity,
    ) -> AppResult<ExamListing> {
        let course = self.course_repository.find_by_id(course_id).await?;
        if course.is_none() {
            return Err(AppError::NotFound("Course not found.".to_string()));
        }

        let exams = self.exam_repository.find_by_course_id(course_id).await?;

        if identity.is_staff() {
            return Ok(ExamListing::Staff(
                exams.iter().map(ExamView::from).collect(),
            ));
        }

        let exam_ids: Vec<i64> = exams.iter().map(|exam| exam.id).collect();
        let completed_exam_ids: HashSet<i64> = self
            .completion_repository
            .find_completed_by_exams_and_student(&exam_ids, identity.id)
            .await?
            .iter()
            .map(|completion| completion.exam_id)
            .collect();

        let views = exams
            .iter()
            .map(|exam| {
                if completed_exam_ids.contains(&exam.id) {
                    ExamView::completed(exam)
                } else {
                    ExamView::from(exam)
                }
            })
            .collect();

        Ok(ExamListing::Student(views))
    }

    /// Unlike the generic access gate, this call site reports state
    /// mismatches as `Conflict`.
    pub async fn get_exam(&self, exam_id: i64, identity: &Identity) -> AppResult<ExamView> {
        let exam = self.find_exam(exam_id).await?;

        if exam.status != ExamStatus::Active {
            return Err(AppError::Conflict("Exam is not active".to_string()));
        }

        if !identity.is_staff() {
            let completion = self
                .completion_repository
                .find_by_exam_and_student(exam_id, identity.id)
                .await?;

            match completion {
                Some(completion) if !completion.completed => {}
                _ => {
                    return Err(AppError::Conflict(
                        "Exam not active, no permission to access.".to_string(),
                    ))
                }
            }
        }

        Ok(ExamView::from(&exam))
    }

    pub async fn start_exam(&self, exam_id: i64) -> AppResult<ExamView> {
        let mut exam = self.find_exam(exam_id).await?;

        if exam.status != ExamStatus::Inactive {
            return Err(AppError::Conflict(
                "Exam is already active or completed".to_string(),
            ));
        }

        exam.status = ExamStatus::Active;
        exam.updated_at = Some(chrono::Utc::now());
        let exam = self.exam_repository.update(exam).await?;

        Ok(ExamView::from(&exam))
    }

    pub async fn complete_exam(&self, exam_id: i64) -> AppResult<ExamView> {
        let mut exam = self.find_exam(exam_id).await?;

        if exam.status != ExamStatus::Active {
            return Err(AppError::Forbidden("Exam is not active".to_string()));
        }

        exam.status = ExamStatus::Complete;
        exam.updated_at = Some(chrono::Utc::now());
        let exam = self.exam_repository.update(exam).await?;

        Ok(ExamView::from(&exam))
    }

    pub async fn start_exam_as_student(
        &self,
        exam_id: i64,
        student_id: i64,
    ) -> AppResult<ExamView> {
        let exam = self.find_exam(exam_id).await?;

        if exam.status != ExamStatus::Active {
            return Err(AppError::Conflict("Exam is not active".to_string()));
        }

        let existing = self
            .completion_repository
            .find_by_exam_and_student(exam_id, student_id)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict("Exam already started".to_string()));
        }

        // The unique index backstops concurrent starts; a losing insert
        // comes back as the same Conflict as the pre-check above.
        self.completion_repository
            .insert(ExamCompletion::new(exam_id, student_id))
            .await?;

        Ok(ExamView::from(&exam))
    }

    pub async fn complete_exam_as_student(
        &self,
        exam_id: i64,
        student_id: i64,
    ) -> AppResult<ExamView> {
        let exam = self.find_exam(exam_id).await?;

        if exam.status != ExamStatus::Active {
            return Err(AppError::Forbidden("Exam is not active".to_string()));
        }

        let completion = self
            .completion_repository
            .find_by_exam_and_student(exam_id, student_id)
            .await?;

        let mut completion = completion.ok_or_else(|| {
            AppError::BadRequest("Exam not started by the student".to_string())
        })?;

        if completion.completed {
            return Err(AppError::Conflict("Exam already completed".to_string()));
        }

        completion.completed = true;
        completion.updated_at = Some(chrono::Utc::now());
        self.completion_repository.update(completion).await?;

        Ok(ExamView::from(&exam))
    }

    /// Appends the violation unconditionally, then force-completes the exam
    /// for the student once the per-exam limit is reached. The forced
    /// completion is an upsert so it tolerates an existing attempt record.
    pub async fn report_violation(
        &self,
        exam_id: i64,
        student_id: i64,
        assignment_id: i64,
        violation_type: &str,
    ) -> AppResult<ExamViolation> {
        self.find_exam(exam_id).await?;

        let violation = self
            .violation_repository
            .insert(ExamViolation::new(
                exam_id,
                student_id,
                assignment_id,
                violation_type,
            ))
            .await?;

        let violation_count = self
            .violation_repository
            .count_by_student_and_exam(student_id, exam_id)
            .await?;

        if violation_count >= self.violations_limit_per_exam {
            let mut completion = ExamCompletion::new(exam_id, student_id);
            completion.completed = true;
            completion.completion_reason = Some("Course policy violated".to_string());

            self.completion_repository.force_complete(completion).await?;
        }

        Ok(violation)
    }

    /// Resolves an assignment in the context of an exam, running the access
    /// gate first and verifying the assignment belongs to that exam.
    pub async fn resolve_assignment(
        &self,
        exam_id: i64,
        assignment_id: i64,
        identity: &Identity,
    ) -> AppResult<Assignment> {
        self.check_exam_access_by_id(exam_id, identity).await?;

        let assignment = self
            .assignment_repository
            .find_by_id(assignment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Assignment not found.".to_string()))?;

        if assignment.exam_id != exam_id {
            return Err(AppError::Forbidden(
                "Assignment is not associated to target exam.".to_string(),
            ));
        }

        Ok(assignment)
    }

    /// Allowance lookups come in by assignment id alone; the exam context is
    /// derived from the assignment itself.
    pub async fn resolve_assignment_for_allowance(
        &self,
        assignment_id: i64,
        identity: &Identity,
    ) -> AppResult<Assignment> {
        let assignment = self
            .assignment_repository
            .find_by_id(assignment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Assignment not found.".to_string()))?;

        self.check_exam_access_by_id(assignment.exam_id, identity)
            .await?;

        Ok(assignment)
    }
}
