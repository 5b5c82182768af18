//! # Password rules and Argon2id hashing
//!
//! - [`validate_new_password`]: the length rule shared by signup, password
//!   change and the client-side forms (at least [`MIN_PASSWORD_LEN`] characters).
//! - [`hash_password`]: salts with [`OsRng`] and returns a PHC string
//!   (`$argon2id$v=19$...`) for the `users.password_hash` column.
//! - [`verify_password`]: `Ok(false)` on mismatch, `Err` only when the stored
//!   hash is malformed.

#[cfg(feature = "server")]
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Shortest password accepted anywhere in the app.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Check a new password against the length rule.
pub fn validate_new_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    Ok(())
}

/// Hash a password using Argon2id. Returns a PHC-format string.
#[cfg(feature = "server")]
pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| format!("Failed to hash password: {}", e))
}

/// Verify a password against a PHC-format hash string.
#[cfg(feature = "server")]
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| format!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_rule() {
        assert_eq!(
            validate_new_password("12345").unwrap_err(),
            "Password must be at least 6 characters"
        );
        assert!(validate_new_password("123456").is_ok());
    }

    #[cfg(feature = "server")]
    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter22").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("hunter22", &hash).unwrap());
        assert!(!verify_password("hunter23", &hash).unwrap());
        assert!(verify_password("hunter22", "not-a-hash").is_err());
    }
}
