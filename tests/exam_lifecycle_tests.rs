mod common;

use futures::future::join_all;

use albus_server::{
    auth::{Identity, Role},
    errors::AppError,
    models::domain::{Assignment, Course, Exam, ExamCompletion, ExamStatus},
    repositories::{
        AssignmentRepository, CourseRepository, ExamCompletionRepository, ExamRepository,
    },
    services::ExamListing,
};

use common::{test_harness, TestHarness};

fn student(id: i64) -> Identity {
    Identity::new(id, &format!("student-{}@hogwarts.example", id), Role::Student)
}

fn staff(id: i64) -> Identity {
    Identity::new(id, &format!("staff-{}@hogwarts.example", id), Role::Staff)
}

async fn seed_exam(harness: &TestHarness, exam_id: i64, status: ExamStatus) {
    harness
        .courses
        .insert(Course::new(1, "Potions", 100))
        .await
        .expect("seed course");
    harness
        .exams
        .insert(Exam::new(exam_id, "Potions final", status, 1))
        .await
        .expect("seed exam");
}

#[tokio::test]
async fn staff_start_succeeds_exactly_once() {
    let harness = test_harness();
    seed_exam(&harness, 5, ExamStatus::Inactive).await;

    let view = harness.state.exam_service.start_exam(5).await.expect("first start");
    assert_eq!(view.status, "ACTIVE");

    let second = harness.state.exam_service.start_exam(5).await;
    assert!(matches!(second, Err(AppError::Conflict(_))));

    let stored = harness.exams.find_by_id(5).await.unwrap().unwrap();
    assert_eq!(stored.status, ExamStatus::Active);
}

#[tokio::test]
async fn start_missing_exam_is_not_found() {
    let harness = test_harness();

    let result = harness.state.exam_service.start_exam(99).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn staff_complete_requires_active_exam() {
    let harness = test_harness();
    seed_exam(&harness, 5, ExamStatus::Inactive).await;

    let early = harness.state.exam_service.complete_exam(5).await;
    assert!(matches!(early, Err(AppError::Forbidden(_))));

    harness.state.exam_service.start_exam(5).await.expect("start");
    let view = harness.state.exam_service.complete_exam(5).await.expect("complete");
    assert_eq!(view.status, "COMPLETE");

    // No backward transition: a completed exam cannot be started again.
    let restart = harness.state.exam_service.start_exam(5).await;
    assert!(matches!(restart, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn student_start_requires_active_exam() {
    let harness = test_harness();
    seed_exam(&harness, 5, ExamStatus::Inactive).await;

    let result = harness.state.exam_service.start_exam_as_student(5, 42).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn student_start_creates_one_attempt_record() {
    let harness = test_harness();
    seed_exam(&harness, 5, ExamStatus::Active).await;

    harness
        .state
        .exam_service
        .start_exam_as_student(5, 42)
        .await
        .expect("first start");

    let completion = harness
        .completions
        .find_by_exam_and_student(5, 42)
        .await
        .unwrap()
        .expect("attempt record exists");
    assert!(!completion.completed);

    let again = harness.state.exam_service.start_exam_as_student(5, 42).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn concurrent_student_starts_yield_one_success() {
    let harness = test_harness();
    seed_exam(&harness, 5, ExamStatus::Active).await;

    let service = &harness.state.exam_service;
    let attempts = join_all((0..8).map(|_| service.start_exam_as_student(5, 42))).await;

    let successes = attempts.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    for failed in attempts.iter().filter(|r| r.is_err()) {
        assert!(matches!(failed, Err(AppError::Conflict(_))));
    }
}

#[tokio::test]
async fn student_complete_flips_the_record_once() {
    let harness = test_harness();
    seed_exam(&harness, 5, ExamStatus::Active).await;

    let unstarted = harness.state.exam_service.complete_exam_as_student(5, 42).await;
    assert!(matches!(unstarted, Err(AppError::BadRequest(_))));

    harness
        .state
        .exam_service
        .start_exam_as_student(5, 42)
        .await
        .expect("start");
    harness
        .state
        .exam_service
        .complete_exam_as_student(5, 42)
        .await
        .expect("complete");

    let completion = harness
        .completions
        .find_by_exam_and_student(5, 42)
        .await
        .unwrap()
        .unwrap();
    assert!(completion.completed);

    let again = harness.state.exam_service.complete_exam_as_student(5, 42).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn violation_limit_forces_completion() {
    let harness = test_harness();
    seed_exam(&harness, 5, ExamStatus::Active).await;

    harness
        .state
        .exam_service
        .start_exam_as_student(5, 42)
        .await
        .expect("start");

    for _ in 0..2 {
        harness
            .state
            .exam_service
            .report_violation(5, 42, 7, "TAB_VIOLATION")
            .await
            .expect("violation below the limit");

        let completion = harness
            .completions
            .find_by_exam_and_student(5, 42)
            .await
            .unwrap()
            .unwrap();
        assert!(!completion.completed);
    }

    harness
        .state
        .exam_service
        .report_violation(5, 42, 7, "COPY_PASTE_VIOLATION")
        .await
        .expect("violation at the limit");

    let completion = harness
        .completions
        .find_by_exam_and_student(5, 42)
        .await
        .unwrap()
        .unwrap();
    assert!(completion.completed);
    assert_eq!(
        completion.completion_reason.as_deref(),
        Some("Course policy violated")
    );

    // The student never called complete, yet access is now gone.
    let access = harness.state.exam_service.get_exam(5, &student(42)).await;
    assert!(matches!(access, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn violation_limit_tolerates_missing_attempt_record() {
    // The forced completion is an upsert: it must work even when the
    // student never started the exam.
    let harness = test_harness();
    seed_exam(&harness, 5, ExamStatus::Active).await;

    for violation_type in ["TAB_VIOLATION", "TAB_VIOLATION", "TAB_VIOLATION"] {
        harness
            .state
            .exam_service
            .report_violation(5, 42, 7, violation_type)
            .await
            .expect("violation");
    }

    let completion = harness
        .completions
        .find_by_exam_and_student(5, 42)
        .await
        .unwrap()
        .expect("record created by the forced completion");
    assert!(completion.completed);
}

#[tokio::test]
async fn violations_count_per_exam_not_per_assignment() {
    let harness = test_harness();
    seed_exam(&harness, 5, ExamStatus::Active).await;
    harness
        .exams
        .insert(Exam::new(6, "Herbology final", ExamStatus::Active, 1))
        .await
        .expect("seed second exam");

    harness
        .state
        .exam_service
        .start_exam_as_student(5, 42)
        .await
        .expect("start");

    // Two violations on different assignments of exam 5, one on exam 6.
    harness
        .state
        .exam_service
        .report_violation(5, 42, 7, "TAB_VIOLATION")
        .await
        .expect("violation");
    harness
        .state
        .exam_service
        .report_violation(5, 42, 8, "TAB_VIOLATION")
        .await
        .expect("violation");
    harness
        .state
        .exam_service
        .report_violation(6, 42, 9, "TAB_VIOLATION")
        .await
        .expect("violation");

    let completion = harness
        .completions
        .find_by_exam_and_student(5, 42)
        .await
        .unwrap()
        .unwrap();
    assert!(!completion.completed, "two violations on exam 5 stay below the limit");

    harness
        .state
        .exam_service
        .report_violation(5, 42, 7, "TAB_VIOLATION")
        .await
        .expect("third violation on exam 5");

    let completion = harness
        .completions
        .find_by_exam_and_student(5, 42)
        .await
        .unwrap()
        .unwrap();
    assert!(completion.completed);
}

#[tokio::test]
async fn report_violation_on_missing_exam_is_not_found() {
    let harness = test_harness();

    let result = harness
        .state
        .exam_service
        .report_violation(99, 42, 7, "TAB_VIOLATION")
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn get_exam_requires_attempt_record_for_students() {
    let harness = test_harness();
    seed_exam(&harness, 5, ExamStatus::Active).await;

    let before = harness.state.exam_service.get_exam(5, &student(42)).await;
    assert!(matches!(before, Err(AppError::Conflict(_))));

    harness
        .state
        .exam_service
        .start_exam_as_student(5, 42)
        .await
        .expect("start");

    let after = harness.state.exam_service.get_exam(5, &student(42)).await.expect("get");
    assert_eq!(after.id, 5);
    assert_eq!(after.status, "ACTIVE");

    // Staff never need an attempt record.
    let staff_view = harness.state.exam_service.get_exam(5, &staff(1)).await;
    assert!(staff_view.is_ok());
}

#[tokio::test]
async fn get_inactive_exam_is_a_conflict_even_for_staff() {
    let harness = test_harness();
    seed_exam(&harness, 5, ExamStatus::Inactive).await;

    let result = harness.state.exam_service.get_exam(5, &staff(1)).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn listing_annotates_completed_exams_for_students_only() {
    let harness = test_harness();
    seed_exam(&harness, 5, ExamStatus::Active).await;
    harness
        .exams
        .insert(Exam::new(6, "Herbology final", ExamStatus::Active, 1))
        .await
        .expect("seed second exam");

    harness
        .state
        .exam_service
        .start_exam_as_student(5, 42)
        .await
        .expect("start");
    harness
        .state
        .exam_service
        .complete_exam_as_student(5, 42)
        .await
        .expect("complete");

    let listing = harness
        .state
        .exam_service
        .list_exams_for_course(1, &student(42))
        .await
        .expect("student listing");

    let views = match listing {
        ExamListing::Student(views) => views,
        ExamListing::Staff(_) => panic!("expected the student-shaped listing"),
    };
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].id, 5);
    assert_eq!(views[0].status, "COMPLETED");
    assert_eq!(views[1].status, "ACTIVE");

    // Annotation is display-only; stored status is untouched.
    let stored = harness.exams.find_by_id(5).await.unwrap().unwrap();
    assert_eq!(stored.status, ExamStatus::Active);

    let staff_listing = harness
        .state
        .exam_service
        .list_exams_for_course(1, &staff(1))
        .await
        .expect("staff listing");
    let staff_views = match staff_listing {
        ExamListing::Staff(views) => views,
        ExamListing::Student(_) => panic!("expected the staff-shaped listing"),
    };
    assert_eq!(staff_views[0].status, "ACTIVE");
}

#[tokio::test]
async fn listing_for_missing_course_is_not_found() {
    let harness = test_harness();

    let result = harness
        .state
        .exam_service
        .list_exams_for_course(1, &staff(1))
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn resolve_assignment_enforces_exam_membership() {
    let harness = test_harness();
    seed_exam(&harness, 5, ExamStatus::Active).await;
    harness
        .exams
        .insert(Exam::new(6, "Herbology final", ExamStatus::Active, 1))
        .await
        .expect("seed second exam");
    harness
        .assignments
        .insert(Assignment::new(7, 1, "Brew a draught", "Instructions", 5))
        .await
        .expect("seed assignment");

    harness
        .state
        .exam_service
        .start_exam_as_student(5, 42)
        .await
        .expect("start exam 5");
    harness
        .state
        .exam_service
        .start_exam_as_student(6, 42)
        .await
        .expect("start exam 6");

    let found = harness
        .state
        .exam_service
        .resolve_assignment(5, 7, &student(42))
        .await
        .expect("assignment of its own exam");
    assert_eq!(found.id, 7);

    let wrong_exam = harness
        .state
        .exam_service
        .resolve_assignment(6, 7, &student(42))
        .await;
    assert!(matches!(wrong_exam, Err(AppError::Forbidden(_))));

    let missing = harness
        .state
        .exam_service
        .resolve_assignment(5, 99, &student(42))
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn access_gate_blocks_students_without_attempt_record() {
    let harness = test_harness();
    seed_exam(&harness, 5, ExamStatus::Active).await;
    harness
        .assignments
        .insert(Assignment::new(7, 1, "Brew a draught", "Instructions", 5))
        .await
        .expect("seed assignment");

    let blocked = harness
        .state
        .exam_service
        .resolve_assignment(5, 7, &student(42))
        .await;
    assert!(matches!(blocked, Err(AppError::Forbidden(_))));

    // A completed attempt is just as locked out as a missing one.
    let mut completion = ExamCompletion::new(5, 42);
    completion.completed = true;
    harness.completions.force_complete(completion).await.expect("seed completion");

    let still_blocked = harness
        .state
        .exam_service
        .resolve_assignment(5, 7, &student(42))
        .await;
    assert!(matches!(still_blocked, Err(AppError::Forbidden(_))));
}
