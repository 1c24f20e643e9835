/// Password hashing using Argon2id
///
/// Signup stores the output of [`hash_password`] in `users.password`; login
/// checks a submitted password with [`verify_password`].
///
/// # Parameters
///
/// - **Memory**: 19 MiB (19456 KiB)
/// - **Iterations**: 2 passes
/// - **Parallelism**: 1 lane
/// - **Output**: 32-byte hash
///
/// # Example
///
/// ```
/// use lightbnb_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("password")?;
/// assert!(verify_password("password", &hash)?);
/// assert!(!verify_password("wrong", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Stored value is not a PHC hash string
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// A well-formed hash that no known password matches
///
/// Login verifies against it when the email is unknown, so a miss costs one
/// Argon2 run just like a wrong password. Uses the same parameters as
/// [`hash_password`].
pub const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ggvkJLd3uU5HhPcdW5/jTg$i1Doyy/0qEESqbo3ax9UkwQeMAbxYfA3j1fj4G4tpQ0";

/// Hashes a password with Argon2id and a random salt
///
/// Returns a PHC string, e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(19456)
        .t_cost(2)
        .p_cost(1)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored hash
///
/// Returns `Ok(false)` on a mismatch. Parameters are read from the hash
/// itself, so hashes made with older settings still verify.
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if `hash` is not a PHC string. Rows
/// written before hashing was introduced (plain text) fail here rather than
/// comparing equal.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
    }
}
