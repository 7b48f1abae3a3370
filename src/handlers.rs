use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{
    AppState,
    auth::Requester,
    error::ApiError,
    models::{
        CreatePostRequest, CreateTopicRequest, Post, Topic, UpdatePostRequest, UpdateTopicRequest,
    },
    pagination::{Page, PageParams, paginate},
    policy,
};

// --- Topic Handlers ---

/// list_topics
///
/// Paginated listing of all topics, newest first. Any authenticated
/// requester may read; identity is still required, so the extractor runs
/// even though the name is unused here.
#[utoipa::path(
    get,
    path = "/api/forum/topics/",
    params(PageParams),
    responses(
        (status = 200, description = "Paginated topics", body = Page<Topic>),
        (status = 422, description = "Invalid credential or page params")
    )
)]
pub async fn list_topics(
    _requester: Requester,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Topic>>, ApiError> {
    params.validate()?;
    let topics = state.repo.get_topics().await?;
    Ok(Json(paginate(&params, topics)))
}

/// get_topic_details
///
/// Single topic by id.
#[utoipa::path(
    get,
    path = "/api/forum/topics/{id}/",
    params(("id" = i64, Path, description = "Topic ID")),
    responses(
        (status = 200, description = "Found", body = Topic),
        (status = 404, description = "No such topic")
    )
)]
pub async fn get_topic_details(
    _requester: Requester,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Topic>, ApiError> {
    let topic = state
        .repo
        .get_topic(id)
        .await?
        .ok_or(ApiError::NotFound("topic"))?;
    Ok(Json(topic))
}

/// create_topic
///
/// Creates a topic. No group restriction; `created_by` is always the
/// requester's name, never taken from the payload.
#[utoipa::path(
    post,
    path = "/api/forum/topics/",
    request_body = CreateTopicRequest,
    responses((status = 200, description = "Created", body = Topic))
)]
pub async fn create_topic(
    requester: Requester,
    State(state): State<AppState>,
    Json(payload): Json<CreateTopicRequest>,
) -> Result<Json<Topic>, ApiError> {
    let topic = state.repo.create_topic(payload, &requester.name).await?;
    Ok(Json(topic))
}

/// update_topic
///
/// Moderator-only partial update. The permission check runs before the
/// lookup, so a non-moderator gets 403 even for a missing topic.
#[utoipa::path(
    patch,
    path = "/api/forum/topics/{id}/",
    params(("id" = i64, Path, description = "Topic ID")),
    request_body = UpdateTopicRequest,
    responses(
        (status = 200, description = "Updated", body = Topic),
        (status = 403, description = "Requester is not a moderator"),
        (status = 404, description = "No such topic")
    )
)]
pub async fn update_topic(
    requester: Requester,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTopicRequest>,
) -> Result<Json<Topic>, ApiError> {
    policy::ensure_topic_write(&requester)?;
    let topic = state
        .repo
        .update_topic(id, payload)
        .await?
        .ok_or(ApiError::NotFound("topic"))?;
    Ok(Json(topic))
}

/// delete_topic
///
/// Moderator-only. Cascades to the topic's posts. Returns `true` on success.
#[utoipa::path(
    delete,
    path = "/api/forum/topics/{id}/",
    params(("id" = i64, Path, description = "Topic ID")),
    responses(
        (status = 200, description = "Deleted", body = bool),
        (status = 403, description = "Requester is not a moderator"),
        (status = 404, description = "No such topic")
    )
)]
pub async fn delete_topic(
    requester: Requester,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<bool>, ApiError> {
    policy::ensure_topic_write(&requester)?;
    if state.repo.delete_topic(id).await? {
        Ok(Json(true))
    } else {
        Err(ApiError::NotFound("topic"))
    }
}

// --- Post Handlers ---

/// list_topic_posts
///
/// Paginated posts of one topic, newest first. 404 when the topic itself
/// does not exist, distinguishing it from a topic with no posts.
#[utoipa::path(
    get,
    path = "/api/forum/topics/{id}/posts/",
    params(("id" = i64, Path, description = "Topic ID"), PageParams),
    responses(
        (status = 200, description = "Paginated posts", body = Page<Post>),
        (status = 404, description = "No such topic")
    )
)]
pub async fn list_topic_posts(
    _requester: Requester,
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Post>>, ApiError> {
    params.validate()?;
    state
        .repo
        .get_topic(topic_id)
        .await?
        .ok_or(ApiError::NotFound("topic"))?;
    let posts = state.repo.get_topic_posts(topic_id).await?;
    Ok(Json(paginate(&params, posts)))
}

/// create_post
///
/// Creates a post under a topic. No group restriction; `author` is the
/// requester's name. The parent topic must exist.
#[utoipa::path(
    post,
    path = "/api/forum/topics/{id}/posts/",
    params(("id" = i64, Path, description = "Topic ID")),
    request_body = CreatePostRequest,
    responses(
        (status = 200, description = "Created", body = Post),
        (status = 404, description = "No such topic")
    )
)]
pub async fn create_post(
    requester: Requester,
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<Json<Post>, ApiError> {
    state
        .repo
        .get_topic(topic_id)
        .await?
        .ok_or(ApiError::NotFound("topic"))?;
    let post = state
        .repo
        .create_post(topic_id, payload, &requester.name)
        .await?;
    Ok(Json(post))
}

/// update_post
///
/// Author-or-moderator partial update. The post is fetched first to compare
/// authors, so a missing post is 404 before any permission decision.
#[utoipa::path(
    patch,
    path = "/api/forum/posts/{id}/",
    params(("id" = i64, Path, description = "Post ID")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Updated", body = Post),
        (status = 403, description = "Requester is neither author nor moderator"),
        (status = 404, description = "No such post")
    )
)]
pub async fn update_post(
    requester: Requester,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<Post>, ApiError> {
    let post = state
        .repo
        .get_post(id)
        .await?
        .ok_or(ApiError::NotFound("post"))?;
    policy::ensure_post_write(&requester, &post)?;
    let post = state
        .repo
        .update_post(id, payload)
        .await?
        .ok_or(ApiError::NotFound("post"))?;
    Ok(Json(post))
}

/// delete_post
///
/// Author-or-moderator. Returns `true` on success.
#[utoipa::path(
    delete,
    path = "/api/forum/posts/{id}/",
    params(("id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Deleted", body = bool),
        (status = 403, description = "Requester is neither author nor moderator"),
        (status = 404, description = "No such post")
    )
)]
pub async fn delete_post(
    requester: Requester,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<bool>, ApiError> {
    let post = state
        .repo
        .get_post(id)
        .await?
        .ok_or(ApiError::NotFound("post"))?;
    policy::ensure_post_write(&requester, &post)?;
    if state.repo.delete_post(id).await? {
        Ok(Json(true))
    } else {
        Err(ApiError::NotFound("post"))
    }
}
