use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{
    CreatePostRequest, CreateTopicRequest, Post, Topic, UpdatePostRequest, UpdateTopicRequest,
};

/// ForumRepository
///
/// The abstract contract for all persistence operations, symmetric over the
/// two entity kinds. Handlers interact with the data layer only through this
/// trait, so tests can substitute an in-memory implementation.
///
/// **Send + Sync + async_trait** make the trait object
/// (`Arc<dyn ForumRepository>`) shareable across axum's task boundaries.
///
/// All methods return `Result<_, sqlx::Error>`; a database failure propagates
/// up to the error boundary rather than masquerading as an empty result.
#[async_trait]
pub trait ForumRepository: Send + Sync {
    // --- Topics ---

    /// All topics, ordered by `created_on` descending.
    async fn get_topics(&self) -> Result<Vec<Topic>, sqlx::Error>;
    async fn get_topic(&self, id: i64) -> Result<Option<Topic>, sqlx::Error>;
    /// Inserts and commits immediately. `created_by` is the requester's name.
    async fn create_topic(
        &self,
        req: CreateTopicRequest,
        created_by: &str,
    ) -> Result<Topic, sqlx::Error>;
    /// Applies only the provided fields; `None` means keep the stored value.
    /// Returns `None` when no topic has this id.
    async fn update_topic(
        &self,
        id: i64,
        req: UpdateTopicRequest,
    ) -> Result<Option<Topic>, sqlx::Error>;
    /// Returns true if a row was deleted. Posts of the topic go with it
    /// (`ON DELETE CASCADE`).
    async fn delete_topic(&self, id: i64) -> Result<bool, sqlx::Error>;

    // --- Posts ---

    /// Posts of one topic, ordered by `posted_on` descending.
    async fn get_topic_posts(&self, topic_id: i64) -> Result<Vec<Post>, sqlx::Error>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, sqlx::Error>;
    /// Inserts and commits immediately. `author` is the requester's name.
    async fn create_post(
        &self,
        topic_id: i64,
        req: CreatePostRequest,
        author: &str,
    ) -> Result<Post, sqlx::Error>;
    async fn update_post(
        &self,
        id: i64,
        req: UpdatePostRequest,
    ) -> Result<Option<Post>, sqlx::Error>;
    async fn delete_post(&self, id: i64) -> Result<bool, sqlx::Error>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the
/// application state.
pub type RepositoryState = Arc<dyn ForumRepository>;

/// PostgresRepository
///
/// The Postgres-backed implementation of `ForumRepository`, using the shared
/// connection pool. Queries are runtime-checked; partial updates use
/// `COALESCE` so unspecified fields keep their stored values.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const TOPIC_COLUMNS: &str = "id, title, description, category, created_by, created_on";
const POST_COLUMNS: &str = "id, content, author, posted_on, topic_id";

#[async_trait]
impl ForumRepository for PostgresRepository {
    async fn get_topics(&self) -> Result<Vec<Topic>, sqlx::Error> {
        sqlx::query_as::<_, Topic>(&format!(
            "SELECT {TOPIC_COLUMNS} FROM topics ORDER BY created_on DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn get_topic(&self, id: i64) -> Result<Option<Topic>, sqlx::Error> {
        sqlx::query_as::<_, Topic>(&format!("SELECT {TOPIC_COLUMNS} FROM topics WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create_topic(
        &self,
        req: CreateTopicRequest,
        created_by: &str,
    ) -> Result<Topic, sqlx::Error> {
        sqlx::query_as::<_, Topic>(&format!(
            "INSERT INTO topics (title, description, category, created_by) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {TOPIC_COLUMNS}"
        ))
        .bind(req.title)
        .bind(req.description)
        .bind(req.category)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_topic(
        &self,
        id: i64,
        req: UpdateTopicRequest,
    ) -> Result<Option<Topic>, sqlx::Error> {
        sqlx::query_as::<_, Topic>(&format!(
            "UPDATE topics \
             SET title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 category = COALESCE($4, category) \
             WHERE id = $1 \
             RETURNING {TOPIC_COLUMNS}"
        ))
        .bind(id)
        .bind(req.title)
        .bind(req.description)
        .bind(req.category)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_topic(&self, id: i64) -> Result<bool, sqlx::Error> {
        // Posts referencing the topic are removed by the FK cascade.
        let result = sqlx::query("DELETE FROM topics WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_topic_posts(&self, topic_id: i64) -> Result<Vec<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE topic_id = $1 ORDER BY posted_on DESC"
        ))
        .bind(topic_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create_post(
        &self,
        topic_id: i64,
        req: CreatePostRequest,
        author: &str,
    ) -> Result<Post, sqlx::Error> {
        sqlx::query_as::<_, Post>(&format!(
            "INSERT INTO posts (content, author, topic_id) \
             VALUES ($1, $2, $3) \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(req.content)
        .bind(author)
        .bind(topic_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_post(
        &self,
        id: i64,
        req: UpdatePostRequest,
    ) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts SET content = COALESCE($2, content) \
             WHERE id = $1 \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(id)
        .bind(req.content)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_post(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
