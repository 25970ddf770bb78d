use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Student};

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Student>>;
    async fn find_active_by_identifier(&self, identifier: &str) -> AppResult<Option<Student>>;
    async fn insert(&self, student: Student) -> AppResult<Student>;
}

pub struct MongoStudentRepository {
    collection: Collection<Student>,
}

impl MongoStudentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("students");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for students collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let identifier_index = IndexModel::builder()
            .keys(doc! { "identifier": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("identifier_unique".to_string())
                    .build(),
            )
            .build();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(identifier_index).await?;
        self.collection.create_index(email_index).await?;

        Ok(())
    }
}

#[async_trait]
impl StudentRepository for MongoStudentRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Student>> {
        let student = self.collection.find_one(doc! { "id": id }).await?;
        Ok(student)
    }

    async fn find_active_by_identifier(&self, identifier: &str) -> AppResult<Option<Student>> {
        let student = self
            .collection
            .find_one(doc! { "identifier": identifier, "active": true })
            .await?;
        Ok(student)
    }

    async fn insert(&self, student: Student) -> AppResult<Student> {
        self.collection.insert_one(&student).await?;
        Ok(student)
    }
}
