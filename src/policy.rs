use crate::{auth::Requester, error::ApiError, models::Post};

/// Group membership granting elevated write permissions.
pub const MODERATOR_GROUP: &str = "moderator";

/// Whether the requester carries the moderator group.
pub fn is_moderator(requester: &Requester) -> bool {
    requester.groups.iter().any(|g| g == MODERATOR_GROUP)
}

/// Topic write rule: update and delete are moderator-only, regardless of who
/// created the topic.
pub fn ensure_topic_write(requester: &Requester) -> Result<(), ApiError> {
    if is_moderator(requester) {
        Ok(())
    } else {
        Err(ApiError::PermissionDenied(requester.name.clone()))
    }
}

/// Post write rule: the post's author may update or delete it, and so may any
/// moderator.
pub fn ensure_post_write(requester: &Requester, post: &Post) -> Result<(), ApiError> {
    if post.author == requester.name || is_moderator(requester) {
        Ok(())
    } else {
        Err(ApiError::PermissionDenied(requester.name.clone()))
    }
}
