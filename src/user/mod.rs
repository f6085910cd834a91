use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub mod db;

pub use db::UserStore;

pub type UserId = i64;

/// Sentinel password hash marking accounts that only sign in with Google.
pub const OAUTH_SENTINEL: &str = "GOOGLE_OAUTH";

#[derive(Clone, Debug, FromRow, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// A user row joined with how many campaigns they own, for the admin
/// listing.
#[derive(Clone, Debug, FromRow, Serialize)]
pub struct AdminUserRow {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
    pub campaign_count: i64,
}
