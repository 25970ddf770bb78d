use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Staff};

#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Staff>>;
    /// Staff log in with their email address.
    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<Staff>>;
    async fn insert(&self, staff: Staff) -> AppResult<Staff>;
}

pub struct MongoStaffRepository {
    collection: Collection<Staff>,
}

impl MongoStaffRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("staff");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for staff collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
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
        self.collection.create_index(email_index).await?;

        Ok(())
    }
}

#[async_trait]
impl StaffRepository for MongoStaffRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Staff>> {
        let staff = self.collection.find_one(doc! { "id": id }).await?;
        Ok(staff)
    }

    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<Staff>> {
        let staff = self.collection.find_one(doc! { "email": identifier }).await?;
        Ok(staff)
    }

    async fn insert(&self, staff: Staff) -> AppResult<Staff> {
        self.collection.insert_one(&staff).await?;
        Ok(staff)
    }
}
