#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use forum_api::{
    AppState,
    auth::{Claims, Requester},
    config::AppConfig,
    models::{
        CreatePostRequest, CreateTopicRequest, Post, Topic, UpdatePostRequest, UpdateTopicRequest,
    },
    repository::ForumRepository,
};
use jsonwebtoken::{EncodingKey, Header, encode};

// --- Test Users ---

pub const BASIC_USER: &str = "test_basic_user";
pub const ANOTHER_BASIC_USER: &str = "test_another_basic_user";
pub const MODERATOR: &str = "test_moderator";

pub fn basic_requester(name: &str) -> Requester {
    Requester {
        name: name.to_string(),
        groups: vec!["basic".to_string()],
    }
}

pub fn moderator_requester(name: &str) -> Requester {
    Requester {
        name: name.to_string(),
        groups: vec!["moderator".to_string()],
    }
}

// --- Token Minting ---

/// Signs a token the way the (out-of-scope) issuer would, using the test
/// config's secret and default algorithm.
pub fn bearer_token(name: &str, groups: &[&str]) -> String {
    let claims = Claims {
        name: name.to_string(),
        groups: groups.iter().map(|g| g.to_string()).collect(),
    };
    let key = EncodingKey::from_secret(AppConfig::default().jwt_secret.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

// --- In-Memory Repository ---

struct Inner {
    topics: Vec<Topic>,
    posts: Vec<Post>,
    next_topic_id: i64,
    next_post_id: i64,
    // Monotonic fake clock: every create advances it one second, so ordering
    // assertions are deterministic.
    clock: DateTime<Utc>,
}

/// InMemoryRepo
///
/// A full `ForumRepository` implementation over plain vectors. Handlers are
/// tested against this instead of Postgres; it reproduces the repository
/// contract including ordering, partial updates, and the delete cascade.
pub struct InMemoryRepo {
    inner: Mutex<Inner>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                topics: Vec::new(),
                posts: Vec::new(),
                next_topic_id: 1,
                next_post_id: 1,
                clock: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            }),
        }
    }
}

impl Inner {
    fn tick(&mut self) -> DateTime<Utc> {
        self.clock = self.clock + Duration::seconds(1);
        self.clock
    }
}

#[async_trait]
impl ForumRepository for InMemoryRepo {
    async fn get_topics(&self) -> Result<Vec<Topic>, sqlx::Error> {
        let inner = self.inner.lock().unwrap();
        let mut topics = inner.topics.clone();
        topics.sort_by(|a, b| b.created_on.cmp(&a.created_on));
        Ok(topics)
    }

    async fn get_topic(&self, id: i64) -> Result<Option<Topic>, sqlx::Error> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.topics.iter().find(|t| t.id == id).cloned())
    }

    async fn create_topic(
        &self,
        req: CreateTopicRequest,
        created_by: &str,
    ) -> Result<Topic, sqlx::Error> {
        let mut inner = self.inner.lock().unwrap();
        let created_on = inner.tick();
        let topic = Topic {
            id: inner.next_topic_id,
            title: req.title,
            description: req.description,
            category: req.category,
            created_by: created_by.to_string(),
            created_on,
        };
        inner.next_topic_id += 1;
        inner.topics.push(topic.clone());
        Ok(topic)
    }

    async fn update_topic(
        &self,
        id: i64,
        req: UpdateTopicRequest,
    ) -> Result<Option<Topic>, sqlx::Error> {
        let mut inner = self.inner.lock().unwrap();
        let Some(topic) = inner.topics.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(title) = req.title {
            topic.title = title;
        }
        if let Some(description) = req.description {
            topic.description = Some(description);
        }
        if let Some(category) = req.category {
            topic.category = category;
        }
        Ok(Some(topic.clone()))
    }

    async fn delete_topic(&self, id: i64) -> Result<bool, sqlx::Error> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.topics.len();
        inner.topics.retain(|t| t.id != id);
        let deleted = inner.topics.len() < before;
        if deleted {
            // The FK cascade of the real schema.
            inner.posts.retain(|p| p.topic_id != id);
        }
        Ok(deleted)
    }

    async fn get_topic_posts(&self, topic_id: i64) -> Result<Vec<Post>, sqlx::Error> {
        let inner = self.inner.lock().unwrap();
        let mut posts: Vec<Post> = inner
            .posts
            .iter()
            .filter(|p| p.topic_id == topic_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.posted_on.cmp(&a.posted_on));
        Ok(posts)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, sqlx::Error> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn create_post(
        &self,
        topic_id: i64,
        req: CreatePostRequest,
        author: &str,
    ) -> Result<Post, sqlx::Error> {
        let mut inner = self.inner.lock().unwrap();
        let posted_on = inner.tick();
        let post = Post {
            id: inner.next_post_id,
            content: req.content,
            author: author.to_string(),
            posted_on,
            topic_id,
        };
        inner.next_post_id += 1;
        inner.posts.push(post.clone());
        Ok(post)
    }

    async fn update_post(
        &self,
        id: i64,
        req: UpdatePostRequest,
    ) -> Result<Option<Post>, sqlx::Error> {
        let mut inner = self.inner.lock().unwrap();
        let Some(post) = inner.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(content) = req.content {
            post.content = content;
        }
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: i64) -> Result<bool, sqlx::Error> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.posts.len();
        inner.posts.retain(|p| p.id != id);
        Ok(inner.posts.len() < before)
    }
}

// --- State Assembly ---

pub fn test_state() -> AppState {
    AppState {
        repo: Arc::new(InMemoryRepo::new()),
        config: AppConfig::default(),
    }
}

/// Seeds `n` topics created by `created_by`, one second apart.
pub async fn seed_topics(state: &AppState, n: usize, created_by: &str) -> Vec<Topic> {
    let mut topics = Vec::with_capacity(n);
    for i in 0..n {
        let topic = state
            .repo
            .create_topic(
                CreateTopicRequest {
                    title: format!("Topic {i}"),
                    description: None,
                    category: "general".to_string(),
                },
                created_by,
            )
            .await
            .unwrap();
        topics.push(topic);
    }
    topics
}

/// Seeds `n` posts under one topic authored by `author`, one second apart.
pub async fn seed_posts(state: &AppState, topic_id: i64, n: usize, author: &str) -> Vec<Post> {
    let mut posts = Vec::with_capacity(n);
    for i in 0..n {
        let post = state
            .repo
            .create_post(
                topic_id,
                CreatePostRequest {
                    content: format!("Post {i}"),
                },
                author,
            )
            .await
            .unwrap();
        posts.push(post);
    }
    posts
}
