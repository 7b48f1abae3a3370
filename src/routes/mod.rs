/// Router Module Index
///
/// Splits the forum surface by resource. Both modules sit behind the same
/// authentication layer applied in `create_router`; authorization beyond
/// identity (moderator / author rules) lives in the handlers via the policy
/// module.

/// Topic collection and detail routes, plus the nested post collection.
pub mod topics;

/// Routes addressing individual posts directly.
pub mod posts;
