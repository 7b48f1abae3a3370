use crate::{AppState, handlers};
use axum::{Router, routing::patch};

/// Post Router Module
///
/// Routes addressing a post by id, independent of its topic. Both operations
/// enforce the author-or-moderator rule inside the handler.
pub fn post_routes() -> Router<AppState> {
    Router::new()
        // PATCH/DELETE /posts/{id}/
        .route(
            "/posts/{id}/",
            patch(handlers::update_post).delete(handlers::delete_post),
        )
}
