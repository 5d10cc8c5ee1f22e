/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id hashing with an explicit per-user salt
/// - [`jwt`]: Access token generation and validation (HS256)
/// - [`middleware`]: The `AuthContext` injected into authenticated requests
///
/// # Example
///
/// ```
/// use taskhive_shared::auth::password::{generate_salt, hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let salt = generate_salt();
/// let hash = hash_password("user_password", &salt)?;
/// assert!(verify_password("user_password", &hash)?);
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
