use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::ExamViolation};

#[async_trait]
pub trait ExamViolationRepository: Send + Sync {
    /// Violations are append-only; there is no update or delete.
    async fn insert(&self, violation: ExamViolation) -> AppResult<ExamViolation>;
    async fn count_by_student_and_exam(&self, student_id: i64, exam_id: i64) -> AppResult<i64>;
}

pub struct MongoExamViolationRepository {
    collection: Collection<ExamViolation>,
}

impl MongoExamViolationRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("exam_violations");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for exam_violations collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let count_index = IndexModel::builder()
            .keys(doc! { "student_id": 1, "exam_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("student_exam".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(count_index).await?;

        Ok(())
    }
}

#[async_trait]
impl ExamViolationRepository for MongoExamViolationRepository {
    async fn insert(&self, violation: ExamViolation) -> AppResult<ExamViolation> {
        self.collection.insert_one(&violation).await?;
        Ok(violation)
    }

    async fn count_by_student_and_exam(&self, student_id: i64, exam_id: i64) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! { "student_id": student_id, "exam_id": exam_id })
            .await?;
        Ok(count as i64)
    }
}
