use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::config::Config;
use crate::database::Database;
use crate::error::Error;
use crate::user::{User, OAUTH_SENTINEL};
use crate::violations::Violation;

use super::{token, GoogleTokenVerifier};

const MINIMUM_PASSWORD_LENGTH: usize = 6;

pub fn validate_registration(email: &str, password: &str) -> Result<(), Vec<Violation>> {
    let mut violations = vec![];
    if email.trim().is_empty() || password.is_empty() {
        violations.push(Violation::CredentialsMissing);
    } else if password.chars().count() < MINIMUM_PASSWORD_LENGTH {
        violations.push(Violation::PasswordTooShort {
            minimum: MINIMUM_PASSWORD_LENGTH,
        });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

#[tracing::instrument(skip(db, config, password))]
pub async fn register(
    db: &dyn Database,
    config: &Config,
    email: String,
    password: String,
) -> Result<(String, User), Error> {
    validate_registration(&email, &password)
        .map_err(|violations| Error::RequestViolatesRules { violations })?;

    let password_hash = hash_password(&password)?;
    let user = db.users().insert_user(&email, &password_hash).await?;
    let token = token::issue(&config.jwt_secret, &user)?;

    Ok((token, user))
}

#[tracing::instrument(skip(db, config, password))]
pub async fn login(
    db: &dyn Database,
    config: &Config,
    email: String,
    password: String,
) -> Result<(String, User), Error> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(Error::RequestViolatesRules {
            violations: vec![Violation::CredentialsMissing],
        });
    }

    let user = db
        .users()
        .fetch_user_by_email(&email)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    if user.password_hash == OAUTH_SENTINEL {
        return Err(Error::PasswordLoginUnavailable);
    }
    if !verify_password(&password, &user.password_hash)? {
        return Err(Error::InvalidCredentials);
    }

    let token = token::issue(&config.jwt_secret, &user)?;

    Ok((token, user))
}

/// First Google sign-in auto-creates the user with the OAuth sentinel in
/// place of a password hash.
#[tracing::instrument(skip(db, verifier, config, credential))]
pub async fn google_login(
    db: &dyn Database,
    verifier: &dyn GoogleTokenVerifier,
    config: &Config,
    credential: String,
) -> Result<(String, User), Error> {
    if credential.trim().is_empty() {
        return Err(Error::RequestViolatesRules {
            violations: vec![Violation::GoogleCredentialMissing],
        });
    }

    let email = verifier.verify(&credential).await?;

    let user = match db.users().fetch_user_by_email(&email).await? {
        Some(user) => user,
        None => db.users().insert_user(&email, OAUTH_SENTINEL).await?,
    };

    let token = token::issue(&config.jwt_secret, &user)?;

    Ok((token, user))
}

fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| Error::FailedPasswordHashing(err.to_string()))?;

    Ok(hash.to_string())
}

fn verify_password(password: &str, password_hash: &str) -> Result<bool, Error> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|err| Error::FailedPasswordHashing(err.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
