use actix_web::web::{Data, Json};
use actix_web::{post, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::database::Database;
use crate::error::Error;
use crate::user::{Role, User, UserId};

use super::{manager, GoogleTokenVerifier};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GoogleLoginBody {
    #[serde(default)]
    pub credential: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthBody {
    pub token: String,
    pub user: UserBody,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserBody {
    pub id: UserId,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserBody {
    fn from(user: User) -> UserBody {
        UserBody {
            id: user.id,
            email: user.email,
            role: user.role,
        }
    }
}

#[post("/api/auth/register")]
#[tracing::instrument(skip(db, config, body))]
async fn register(
    db: Data<Box<dyn Database>>,
    config: Data<Config>,
    body: Json<RegisterBody>,
) -> Result<HttpResponse, Error> {
    let body = body.into_inner();

    let (token, user) = manager::register(&***db, &config, body.email, body.password).await?;

    Ok(HttpResponse::Created().json(AuthBody {
        token,
        user: user.into(),
    }))
}

#[post("/api/auth/login")]
#[tracing::instrument(skip(db, config, body))]
async fn login(
    db: Data<Box<dyn Database>>,
    config: Data<Config>,
    body: Json<LoginBody>,
) -> Result<Json<AuthBody>, Error> {
    let body = body.into_inner();

    let (token, user) = manager::login(&***db, &config, body.email, body.password).await?;

    Ok(Json(AuthBody {
        token,
        user: user.into(),
    }))
}

#[post("/api/auth/google")]
#[tracing::instrument(skip(db, verifier, config, body))]
async fn google(
    db: Data<Box<dyn Database>>,
    verifier: Data<Box<dyn GoogleTokenVerifier>>,
    config: Data<Config>,
    body: Json<GoogleLoginBody>,
) -> Result<Json<AuthBody>, Error> {
    let body = body.into_inner();

    let (token, user) =
        manager::google_login(&***db, &***verifier, &config, body.credential).await?;

    Ok(Json(AuthBody {
        token,
        user: user.into(),
    }))
}
