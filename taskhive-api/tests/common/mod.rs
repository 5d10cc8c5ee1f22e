/// Common test utilities for integration tests
///
/// Provides shared infrastructure for driving the router end-to-end:
/// - Test database setup (migrations + a fresh user per context)
/// - JWT token generation
/// - Request/response helpers

use axum::body::Body;
use axum::http::{Request, Response};
use serde_json::Value;
use sqlx::PgPool;
use taskhive_api::app::{build_router, AppState};
use taskhive_api::config::Config;
use taskhive_shared::auth::jwt::{create_token, Claims};
use taskhive_shared::auth::password::{generate_salt, hash_password};
use taskhive_shared::models::user::{CreateUser, User};
use uuid::Uuid;

/// Password used for every test account
pub const TEST_PASSWORD: &str = "TestPass123!";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub user: User,
    pub token: String,
}

impl TestContext {
    /// Creates a new test context against the database in `DATABASE_URL`
    ///
    /// Runs migrations and creates a unique test user with a valid token.
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Migrations path is relative to this crate's Cargo.toml
        sqlx::migrate!("../taskhive-shared/migrations").run(&db).await?;

        let user = create_user(&db, &unique_username()).await?;
        let token = token_for(&user, &config)?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(Self {
            db,
            app,
            config,
            user,
            token,
        })
    }

    /// Authorization header value for the context's user
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Removes the context's user; owned tasks go with it via cascade
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(self.user.id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

/// Generates a username that is unique across test runs
pub fn unique_username() -> String {
    format!("user_{}", &Uuid::new_v4().simple().to_string()[..12])
}

/// Creates a user directly through the model layer
pub async fn create_user(db: &PgPool, username: &str) -> anyhow::Result<User> {
    let salt = generate_salt();
    let password_hash = hash_password(TEST_PASSWORD, &salt)?;

    let user = User::create(
        db,
        CreateUser {
            username: username.to_string(),
            password_hash,
            salt,
        },
    )
    .await?;

    Ok(user)
}

/// Issues a valid access token for a user
pub fn token_for(user: &User, config: &Config) -> anyhow::Result<String> {
    Ok(create_token(&Claims::new(user.id), &config.jwt.secret)?)
}

/// Builds a JSON request, optionally authenticated
pub fn json_request(
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Reads a response body as JSON
pub async fn response_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
