use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Environment};

#[async_trait]
pub trait EnvironmentRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Environment>>;
    async fn insert(&self, environment: Environment) -> AppResult<Environment>;
}

pub struct MongoEnvironmentRepository {
    collection: Collection<Environment>,
}

impl MongoEnvironmentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("environments");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for environments collection");

        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("name_unique".to_string())
                    .build(),
            )
            .build();

        let image_index = IndexModel::builder()
            .keys(doc! { "docker_image": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("docker_image_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(name_index).await?;
        self.collection.create_index(image_index).await?;

        Ok(())
    }
}

#[async_trait]
impl EnvironmentRepository for MongoEnvironmentRepository {
    async fn find_all(&self) -> AppResult<Vec<Environment>> {
        let cursor = self.collection.find(doc! {}).await?;
        let environments: Vec<Environment> = cursor.try_collect().await?;
        Ok(environments)
    }

    async fn insert(&self, environment: Environment) -> AppResult<Environment> {
        self.collection.insert_one(&environment).await?;
        Ok(environment)
    }
}
