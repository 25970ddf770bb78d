use std::sync::Arc;

use crate::{
    auth::AuthManager,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        AssignmentRepository, CourseRepository, EnvironmentRepository, ExamCompletionRepository,
        ExamRepository, ExamViolationRepository, MongoAssignmentRepository, MongoCourseRepository,
        MongoEnvironmentRepository, MongoExamCompletionRepository, MongoExamRepository,
        MongoExamViolationRepository, MongoStaffRepository, MongoStudentRepository,
        StaffRepository, StudentRepository,
    },
    services::{ExamService, GradingClient},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth_manager: Arc<AuthManager>,
    pub grading_client: Arc<GradingClient>,
    pub exam_service: Arc<ExamService>,
    pub student_repository: Arc<dyn StudentRepository>,
    pub staff_repository: Arc<dyn StaffRepository>,
    pub course_repository: Arc<dyn CourseRepository>,
    pub environment_repository: Arc<dyn EnvironmentRepository>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let student_repository = Arc::new(MongoStudentRepository::new(&db));
        student_repository.ensure_indexes().await?;
        let staff_repository = Arc::new(MongoStaffRepository::new(&db));
        staff_repository.ensure_indexes().await?;
        let course_repository = Arc::new(MongoCourseRepository::new(&db));
        course_repository.ensure_indexes().await?;
        let environment_repository = Arc::new(MongoEnvironmentRepository::new(&db));
        environment_repository.ensure_indexes().await?;
        let exam_repository = Arc::new(MongoExamRepository::new(&db));
        exam_repository.ensure_indexes().await?;
        let completion_repository = Arc::new(MongoExamCompletionRepository::new(&db));
        completion_repository.ensure_indexes().await?;
        let violation_repository = Arc::new(MongoExamViolationRepository::new(&db));
        violation_repository.ensure_indexes().await?;
        let assignment_repository = Arc::new(MongoAssignmentRepository::new(&db));
        assignment_repository.ensure_indexes().await?;

        Ok(Self::with_components(
            config,
            student_repository,
            staff_repository,
            course_repository,
            environment_repository,
            exam_repository,
            completion_repository,
            violation_repository,
            assignment_repository,
        ))
    }

    /// Assembles the state from already-built parts; `new` wires the Mongo
    /// repositories through here, tests bring their own implementations.
    #[allow(clippy::too_many_arguments)]
    pub fn with_components(
        config: Config,
        student_repository: Arc<dyn StudentRepository>,
        staff_repository: Arc<dyn StaffRepository>,
        course_repository: Arc<dyn CourseRepository>,
        environment_repository: Arc<dyn EnvironmentRepository>,
        exam_repository: Arc<dyn ExamRepository>,
        completion_repository: Arc<dyn ExamCompletionRepository>,
        violation_repository: Arc<dyn ExamViolationRepository>,
        assignment_repository: Arc<dyn AssignmentRepository>,
    ) -> Self {
        let auth_manager = Arc::new(AuthManager::new(config.token_expiration_minutes));
        let grading_client = Arc::new(GradingClient::new(
            &config.grading_base_url,
            &config.grading_user_header,
            config.grading_max_retry,
        ));
        let exam_service = Arc::new(ExamService::new(
            course_repository.clone(),
            exam_repository,
            completion_repository,
            violation_repository,
            assignment_repository,
            config.violations_limit_per_exam,
        ));

        Self {
            config: Arc::new(config),
            auth_manager,
            grading_client,
            exam_service,
            student_repository,
            staff_repository,
            course_repository,
            environment_repository,
        }
    }
}
