use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use crate::error::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let result = Argon2::default().verify_password(password.as_bytes(), &parsed_hash);

    Ok(result.is_ok())
}

/// Checks a login attempt against a stored teacher password.
///
/// `teachers.json` files maintained by hand carry plaintext passwords, seeded
/// accounts carry Argon2 PHC strings. Anything starting with `$argon2` is
/// verified as a hash, everything else is compared verbatim.
pub fn password_matches(password: &str, stored: &str) -> Result<bool, AppError> {
    if stored.starts_with("$argon2") {
        verify_password(password, stored)
    } else {
        Ok(password == stored)
    }
}
