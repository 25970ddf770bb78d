use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Course};

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Course>>;
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Course>>;
    async fn find_all(&self) -> AppResult<Vec<Course>>;
    async fn insert(&self, course: Course) -> AppResult<Course>;
}

pub struct MongoCourseRepository {
    collection: Collection<Course>,
}

impl MongoCourseRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("courses");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for courses collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("name_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(name_index).await?;

        Ok(())
    }
}

#[async_trait]
impl CourseRepository for MongoCourseRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Course>> {
        let course = self.collection.find_one(doc! { "id": id }).await?;
        Ok(course)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Course>> {
        let course = self.collection.find_one(doc! { "name": name }).await?;
        Ok(course)
    }

    async fn find_all(&self) -> AppResult<Vec<Course>> {
        let cursor = self.collection.find(doc! {}).await?;
        let courses: Vec<Course> = cursor.try_collect().await?;
        Ok(courses)
    }

    async fn insert(&self, course: Course) -> AppResult<Course> {
        self.collection.insert_one(&course).await?;
        Ok(course)
    }
}
