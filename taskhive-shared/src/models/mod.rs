/// Database models for TaskHive
///
/// # Models
///
/// - `user`: User accounts created at signup
/// - `task`: Tasks owned by a single user, with status and filter queries
///
/// Every task query is scoped by the owning `user_id`, so a task belonging
/// to another user is indistinguishable from one that does not exist.

pub mod task;
pub mod user;
