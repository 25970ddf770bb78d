use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Assignment};

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Assignment>>;
    async fn insert(&self, assignment: Assignment) -> AppResult<Assignment>;
}

pub struct MongoAssignmentRepository {
    collection: Collection<Assignment>,
}

impl MongoAssignmentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("assignments");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for assignments collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let position_index = IndexModel::builder()
            .keys(doc! { "index": 1, "exam_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("exam_assignment_index_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(position_index).await?;

        Ok(())
    }
}

#[async_trait]
impl AssignmentRepository for MongoAssignmentRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Assignment>> {
        let assignment = self.collection.find_one(doc! { "id": id }).await?;
        Ok(assignment)
    }

    async fn insert(&self, assignment: Assignment) -> AppResult<Assignment> {
        self.collection.insert_one(&assignment).await?;
        Ok(assignment)
    }
}
