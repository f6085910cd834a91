use std::fmt::{Debug, Display};
use std::io::Error as IoError;

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derivative::Derivative;
use serde::{Serialize, Serializer};
use sqlx::Error as DatabaseError;
use tracing::error;

use crate::googleads::Entity;
use crate::violations::Violation;

#[derive(Debug, Serialize, Derivative)]
#[derivative(PartialEq)]
#[serde(untagged)]
pub enum Error {
    // 400
    #[serde(serialize_with = "display")]
    InvalidJson(#[derivative(PartialEq = "ignore")] JsonPayloadError),
    #[serde(serialize_with = "display")]
    InvalidPath(#[derivative(PartialEq = "ignore")] PathError),
    #[serde(serialize_with = "display")]
    InvalidQuery(#[derivative(PartialEq = "ignore")] QueryPayloadError),
    RequestViolatesRules {
        violations: Vec<Violation>,
    },
    PlatformRejected {
        message: String,
    },
    CannotDeleteSelf,

    // 401
    MissingAuthToken,
    InvalidAuthToken,
    InvalidCredentials,
    PasswordLoginUnavailable,
    InvalidGoogleToken,

    // 403
    AccessDenied,
    AdminRequired,

    // 404
    PathDoesNotExist,

    // 409
    EmailAlreadyRegistered,

    // 500
    MissingConfiguration {
        key: String,
    },
    InvalidConfiguration {
        key: String,
    },
    MutationResultMissing {
        entity: Entity,
    },
    ExistentialState(String),
    #[serde(serialize_with = "redact")]
    FailedDatabaseCall(#[derivative(PartialEq = "ignore")] DatabaseError),
    #[serde(serialize_with = "redact")]
    FailedPasswordHashing(#[derivative(PartialEq = "ignore")] String),
    #[serde(serialize_with = "redact")]
    FailedTokenSigning(#[derivative(PartialEq = "ignore")] jsonwebtoken::errors::Error),
    #[serde(serialize_with = "redact")]
    FailedJsonConversion(#[derivative(PartialEq = "ignore")] serde_json::Error),
    #[serde(serialize_with = "redact")]
    IoError(#[derivative(PartialEq = "ignore")] IoError),
    GenerationNotConfigured,

    // 502
    GenerationFailed,
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "E4001000",
            Error::InvalidPath(_) => "E4001001",
            Error::InvalidQuery(_) => "E4001002",
            Error::RequestViolatesRules { .. } => "E4001003",
            Error::PlatformRejected { .. } => "E4001004",
            Error::CannotDeleteSelf => "E4001005",
            Error::MissingAuthToken => "E4011000",
            Error::InvalidAuthToken => "E4011001",
            Error::InvalidCredentials => "E4011002",
            Error::PasswordLoginUnavailable => "E4011003",
            Error::InvalidGoogleToken => "E4011004",
            Error::AccessDenied => "E4031000",
            Error::AdminRequired => "E4031001",
            Error::PathDoesNotExist => "E4041000",
            Error::EmailAlreadyRegistered => "E4091000",
            Error::MissingConfiguration { .. } => "E5001000",
            Error::InvalidConfiguration { .. } => "E5001001",
            Error::MutationResultMissing { .. } => "E5001002",
            Error::ExistentialState(_) => "E5001003",
            Error::FailedDatabaseCall(_) => "E5001004",
            Error::FailedPasswordHashing(_) => "E5001005",
            Error::FailedTokenSigning(_) => "E5001006",
            Error::FailedJsonConversion(_) => "E5001007",
            Error::IoError(_) => "E5001008",
            Error::GenerationNotConfigured => "E5001009",
            Error::GenerationFailed => "E5021000",
        }
    }

    pub fn error_message(&self) -> String {
        match self {
            Error::InvalidJson(_) => "The given json could not be parsed".into(),
            Error::InvalidPath(_) => "The given path could not be parsed".into(),
            Error::InvalidQuery(_) => "The given query could not be parsed".into(),
            Error::RequestViolatesRules { .. } => {
                "The request violates one or more validation rules".into()
            }
            Error::PlatformRejected { message } => message.clone(),
            Error::CannotDeleteSelf => "The acting user cannot delete their own account".into(),
            Error::MissingAuthToken => "An authorization bearer token is required".into(),
            Error::InvalidAuthToken => {
                "The given authorization token is invalid or expired".into()
            }
            Error::InvalidCredentials => "Invalid email or password".into(),
            Error::PasswordLoginUnavailable => "This account signs in with Google".into(),
            Error::InvalidGoogleToken => {
                "The given Google identity token could not be verified".into()
            }
            Error::AccessDenied => "You do not have access to this resource".into(),
            Error::AdminRequired => "This operation requires an administrator".into(),
            Error::PathDoesNotExist => "The requested path does not exist".into(),
            Error::EmailAlreadyRegistered => "The given email is already registered".into(),
            Error::MissingConfiguration { key } => {
                format!("Missing required configuration value: {}", key)
            }
            Error::InvalidConfiguration { key } => {
                format!("Malformed configuration value: {}", key)
            }
            Error::MutationResultMissing { .. } => {
                "The mutation was accepted but the created identifier could not be recovered"
                    .into()
            }
            Error::ExistentialState(_) => "The server detected an invalid state".into(),
            Error::FailedDatabaseCall(_) => {
                "An error occurred when communicating with the database".into()
            }
            Error::FailedPasswordHashing(_) => {
                "An error occurred when processing credentials".into()
            }
            Error::FailedTokenSigning(_) => {
                "An error occurred when issuing the auth token".into()
            }
            Error::FailedJsonConversion(_) => {
                "An error occurred when converting a JSON payload".into()
            }
            Error::IoError(_) => "An error occurred during an I/O operation".into(),
            Error::GenerationNotConfigured => "The generation service is not configured".into(),
            Error::GenerationFailed => {
                "The generation service returned an unusable response".into()
            }
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Error::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Error::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Error::RequestViolatesRules { .. } => StatusCode::BAD_REQUEST,
            Error::PlatformRejected { .. } => StatusCode::BAD_REQUEST,
            Error::CannotDeleteSelf => StatusCode::BAD_REQUEST,
            Error::MissingAuthToken => StatusCode::UNAUTHORIZED,
            Error::InvalidAuthToken => StatusCode::UNAUTHORIZED,
            Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::PasswordLoginUnavailable => StatusCode::UNAUTHORIZED,
            Error::InvalidGoogleToken => StatusCode::UNAUTHORIZED,
            Error::AccessDenied => StatusCode::FORBIDDEN,
            Error::AdminRequired => StatusCode::FORBIDDEN,
            Error::PathDoesNotExist => StatusCode::NOT_FOUND,
            Error::EmailAlreadyRegistered => StatusCode::CONFLICT,
            Error::MissingConfiguration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InvalidConfiguration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::MutationResultMissing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::ExistentialState(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FailedDatabaseCall(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FailedPasswordHashing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FailedTokenSigning(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FailedJsonConversion(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::GenerationNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            Error::GenerationFailed => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // full detail stays server-side; the body only carries the envelope
        if self.status_code().is_server_error() {
            error!(error = ?self, "request failed");
        }

        #[derive(Serialize)]
        struct Envelope<'a> {
            error_code: &'static str,
            error_message: String,
            error_meta: &'a Error,
        }

        HttpResponse::build(self.status_code()).json(&Envelope {
            error_code: self.error_code(),
            error_message: self.error_message(),
            error_meta: self,
        })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Debug::fmt(self, f)
    }
}

impl From<DatabaseError> for Error {
    fn from(error: DatabaseError) -> Error {
        Error::FailedDatabaseCall(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::FailedJsonConversion(error)
    }
}

impl From<IoError> for Error {
    fn from(error: IoError) -> Error {
        Error::IoError(error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidJson(err) => Some(err),
            Error::InvalidPath(err) => Some(err),
            Error::InvalidQuery(err) => Some(err),
            Error::FailedDatabaseCall(err) => Some(err),
            Error::FailedTokenSigning(err) => Some(err),
            Error::FailedJsonConversion(err) => Some(err),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

fn display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

fn redact<T, S>(_value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_none()
}
