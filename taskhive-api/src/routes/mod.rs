/// API route handlers
///
/// # Modules
///
/// - `health`: Health check endpoint (public)
/// - `auth`: Signup and signin endpoints (public)
/// - `tasks`: Task CRUD endpoints (authenticated)

pub mod auth;
pub mod health;
pub mod tasks;
