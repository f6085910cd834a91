use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::web::Data;
use actix_web::{FromRequest, HttpRequest};

use crate::config::Config;
use crate::error::Error;
use crate::user::{Role, UserId};

pub mod endpoints;
pub mod google;
pub mod manager;
pub mod token;

pub use endpoints::*;
pub use google::{GoogleTokenVerifier, HttpGoogleTokenVerifier};

/// The verified caller. Orchestrator logic trusts this identity without
/// re-verification.
#[derive(Clone, Debug)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub role: Role,
}

impl FromRequest for Identity {
    type Error = Error;
    type Future = Ready<Result<Identity, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req))
    }
}

/// An identity additionally required to hold the admin role.
#[derive(Clone, Debug)]
pub struct Admin(pub Identity);

impl FromRequest for Admin {
    type Error = Error;
    type Future = Ready<Result<Admin, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req).and_then(|identity| match identity.role {
            Role::Admin => Ok(Admin(identity)),
            Role::User => Err(Error::AdminRequired),
        }))
    }
}

fn identity_from_request(req: &HttpRequest) -> Result<Identity, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| Error::ExistentialState("configuration missing from app data".to_string()))?;

    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(Error::MissingAuthToken)?;
    let token = header.strip_prefix("Bearer ").ok_or(Error::MissingAuthToken)?;

    let claims = token::verify(&config.jwt_secret, token)?;

    Ok(Identity {
        id: claims.id,
        email: claims.email,
        role: claims.role,
    })
}
