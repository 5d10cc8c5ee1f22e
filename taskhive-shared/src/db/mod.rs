/// Database layer for TaskHive
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with a startup health check
/// - `migrations`: Migration runner backed by `sqlx::migrate!`
///
/// Models live in the `models` module at the crate root.

pub mod migrations;
pub mod pool;
