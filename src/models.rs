use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Core Application Schemas (Mapped to Database) ---

/// Topic
///
/// A discussion topic from the `topics` table. Owns zero or more posts;
/// deleting a topic cascades to its posts at the database level.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow, Default)]
pub struct Topic {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    // Username of the creator, taken from the requester identity.
    pub created_by: String,
    pub created_on: DateTime<Utc>,
}

/// Post
///
/// A single post inside a topic, from the `posts` table. `topic_id` is a
/// required foreign key; a post never outlives its topic.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow, Default)]
pub struct Post {
    pub id: i64,
    pub content: String,
    // Username of the author, taken from the requester identity.
    pub author: String,
    pub posted_on: DateTime<Utc>,
    pub topic_id: i64,
}

// --- Request Payloads (Input Schemas) ---

/// CreateTopicRequest
///
/// Input payload for POST /topics/. `created_by` is never part of the
/// payload; it comes from the authenticated requester.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct CreateTopicRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
}

/// UpdateTopicRequest
///
/// Partial update payload for PATCH /topics/{id}/. All fields are
/// `Option<T>`; only provided fields are applied, the rest keep their
/// stored values.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateTopicRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// CreatePostRequest
///
/// Input payload for POST /topics/{id}/posts/. The author and topic id come
/// from the request context, not the body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct CreatePostRequest {
    pub content: String,
}

/// UpdatePostRequest
///
/// Partial update payload for PATCH /posts/{id}/. An absent `content` leaves
/// the post unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdatePostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
