use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{is_duplicate_key_error, AppError, AppResult},
    models::domain::ExamCompletion,
};

#[async_trait]
pub trait ExamCompletionRepository: Send + Sync {
    async fn find_by_exam_and_student(
        &self,
        exam_id: i64,
        student_id: i64,
    ) -> AppResult<Option<ExamCompletion>>;
    async fn find_completed_by_exams_and_student(
        &self,
        exam_ids: &[i64],
        student_id: i64,
    ) -> AppResult<Vec<ExamCompletion>>;
    /// Inserts a fresh attempt record. A concurrent insert for the same
    /// (exam, student) pair loses against the unique compound index and
    /// surfaces as `Conflict`, same as the pre-check.
    async fn insert(&self, completion: ExamCompletion) -> AppResult<ExamCompletion>;
    async fn update(&self, completion: ExamCompletion) -> AppResult<ExamCompletion>;
    /// Creates or overwrites the record as completed, regardless of any
    /// prior state. Used by the violation-limit path.
    async fn force_complete(&self, completion: ExamCompletion) -> AppResult<()>;
}

pub struct MongoExamCompletionRepository {
    collection: Collection<ExamCompletion>,
}

impl MongoExamCompletionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("exam_completions");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for exam_completions collection");

        // Composite primary key of the attempt record.
        let pair_index = IndexModel::builder()
            .keys(doc! { "exam_id": 1, "student_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("exam_student_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(pair_index).await?;

        Ok(())
    }
}

#[async_trait]
impl ExamCompletionRepository for MongoExamCompletionRepository {
    async fn find_by_exam_and_student(
        &self,
        exam_id: i64,
        student_id: i64,
    ) -> AppResult<Option<ExamCompletion>> {
        let completion = self
            .collection
            .find_one(doc! { "exam_id": exam_id, "student_id": student_id })
            .await?;
        Ok(completion)
    }

    async fn find_completed_by_exams_and_student(
        &self,
        exam_ids: &[i64],
        student_id: i64,
    ) -> AppResult<Vec<ExamCompletion>> {
        let cursor = self
            .collection
            .find(doc! {
                "exam_id": { "$in": exam_ids.to_vec() },
                "student_id": student_id,
                "completed": true,
            })
            .await?;
        let completions: Vec<ExamCompletion> = cursor.try_collect().await?;
        Ok(completions)
    }

    async fn insert(&self, completion: ExamCompletion) -> AppResult<ExamCompletion> {
        self.collection
            .insert_one(&completion)
            .await
            .map_err(|err| {
                if is_duplicate_key_error(&err) {
                    AppError::Conflict("Exam already started".to_string())
                } else {
                    err.into()
                }
            })?;
        Ok(completion)
    }

    async fn update(&self, completion: ExamCompletion) -> AppResult<ExamCompletion> {
        self.collection
            .replace_one(
                doc! { "exam_id": completion.exam_id, "student_id": completion.student_id },
                &completion,
            )
            .await?;
        Ok(completion)
    }

    async fn force_complete(&self, completion: ExamCompletion) -> AppResult<()> {
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(
                doc! { "exam_id": completion.exam_id, "student_id": completion.student_id },
                &completion,
            )
            .with_options(options)
            .await?;
        Ok(())
    }
}
