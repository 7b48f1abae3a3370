use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Topic Router Module
///
/// Collection and detail routes for topics, and the post collection nested
/// under a topic. Trailing slashes are part of the public surface and are
/// registered literally.
pub fn topic_routes() -> Router<AppState> {
    Router::new()
        // GET /topics/
        // Paginated listing, created_on descending.
        // POST /topics/
        // Open to any authenticated requester; created_by is the requester.
        .route(
            "/topics/",
            get(handlers::list_topics).post(handlers::create_topic),
        )
        // GET/PATCH/DELETE /topics/{id}/
        // Detail plus the moderator-only write operations. Delete cascades
        // to the topic's posts.
        .route(
            "/topics/{id}/",
            get(handlers::get_topic_details)
                .patch(handlers::update_topic)
                .delete(handlers::delete_topic),
        )
        // GET /topics/{id}/posts/
        // Paginated posts of the topic, posted_on descending.
        // POST /topics/{id}/posts/
        // Open to any authenticated requester; author is the requester.
        .route(
            "/topics/{id}/posts/",
            get(handlers::list_topic_posts).post(handlers::create_post),
        )
}
