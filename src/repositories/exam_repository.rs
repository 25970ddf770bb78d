use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Exam};

#[async_trait]
pub trait ExamRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Exam>>;
    async fn find_by_course_id(&self, course_id: i64) -> AppResult<Vec<Exam>>;
    async fn insert(&self, exam: Exam) -> AppResult<Exam>;
    async fn update(&self, exam: Exam) -> AppResult<Exam>;
}

pub struct MongoExamRepository {
    collection: Collection<Exam>,
}

impl MongoExamRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("exams");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for exams collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let course_index = IndexModel::builder()
            .keys(doc! { "course_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("course_id".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(course_index).await?;

        Ok(())
    }
}

#[async_trait]
impl ExamRepository for MongoExamRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Exam>> {
        let exam = self.collection.find_one(doc! { "id": id }).await?;
        Ok(exam)
    }

    async fn find_by_course_id(&self, course_id: i64) -> AppResult<Vec<Exam>> {
        let cursor = self.collection.find(doc! { "course_id": course_id }).await?;
        let exams: Vec<Exam> = cursor.try_collect().await?;
        Ok(exams)
    }

    async fn insert(&self, exam: Exam) -> AppResult<Exam> {
        self.collection.insert_one(&exam).await?;
        Ok(exam)
    }

    async fn update(&self, exam: Exam) -> AppResult<Exam> {
        self.collection
            .replace_one(doc! { "id": exam.id }, &exam)
            .await?;
        Ok(exam)
    }
}
