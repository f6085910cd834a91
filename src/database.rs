use sqlx::SqlitePool;

use crate::campaign::db::OwnershipStore;
use crate::error::Error;
use crate::user::db::UserStore;

/// Seam the managers work against; one implementation per backing store
/// plus a mock for tests.
pub trait Database: Send + Sync {
    fn users(&self) -> &dyn UserStore;

    fn ownerships(&self) -> &dyn OwnershipStore;
}

#[derive(Clone, Debug)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Creates the schema if it is not there yet and wraps the pool.
    pub async fn initialize(pool: SqlitePool) -> Result<SqliteDatabase, Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users ( \
               id INTEGER PRIMARY KEY AUTOINCREMENT, \
               email TEXT NOT NULL UNIQUE, \
               password_hash TEXT NOT NULL, \
               role TEXT NOT NULL DEFAULT 'user', \
               created_at TEXT DEFAULT (datetime('now')) \
             )",
        )
        .execute(&pool)
        .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS user_campaigns ( \
               user_id INTEGER NOT NULL, \
               campaign_id TEXT NOT NULL, \
               created_at TEXT DEFAULT (datetime('now')), \
               PRIMARY KEY (user_id, campaign_id), \
               FOREIGN KEY (user_id) REFERENCES users(id) \
             )",
        )
        .execute(&pool)
        .await?;

        Ok(SqliteDatabase { pool })
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    fn users(&self) -> &dyn UserStore {
        self
    }

    fn ownerships(&self) -> &dyn OwnershipStore {
        self
    }
}

#[cfg(test)]
pub mod test {
    use async_trait::async_trait;
    use chrono::NaiveDate;

    use crate::user::{AdminUserRow, Role, User, UserId};

    use super::*;

    pub struct MockDatabase {
        pub users: MockUserStore,
        pub ownerships: MockOwnershipStore,
    }

    impl MockDatabase {
        pub fn new() -> MockDatabase {
            MockDatabase {
                users: MockUserStore::new(),
                ownerships: MockOwnershipStore::new(),
            }
        }
    }

    impl Database for MockDatabase {
        fn users(&self) -> &dyn UserStore {
            &self.users
        }

        fn ownerships(&self) -> &dyn OwnershipStore {
            &self.ownerships
        }
    }

    pub struct MockUserStore {
        pub on_insert_user: Box<dyn Fn(&str, &str) -> Result<User, Error> + Send + Sync>,
        pub on_fetch_user_by_email: Box<dyn Fn(&str) -> Result<Option<User>, Error> + Send + Sync>,
        pub on_fetch_users_with_campaign_counts:
            Box<dyn Fn() -> Result<Vec<AdminUserRow>, Error> + Send + Sync>,
        pub on_delete_user: Box<dyn Fn(UserId) -> Result<(), Error> + Send + Sync>,
        pub on_promote_user_to_admin: Box<dyn Fn(&str) -> Result<bool, Error> + Send + Sync>,
    }

    impl MockUserStore {
        pub fn new() -> MockUserStore {
            MockUserStore {
                on_insert_user: Box::new(|email, _| panic!("unexpected insert_user: {}", email)),
                on_fetch_user_by_email: Box::new(|email| {
                    panic!("unexpected fetch_user_by_email: {}", email)
                }),
                on_fetch_users_with_campaign_counts: Box::new(|| {
                    panic!("unexpected fetch_users_with_campaign_counts")
                }),
                on_delete_user: Box::new(|user_id| panic!("unexpected delete_user: {}", user_id)),
                on_promote_user_to_admin: Box::new(|email| {
                    panic!("unexpected promote_user_to_admin: {}", email)
                }),
            }
        }
    }

    #[async_trait]
    impl UserStore for MockUserStore {
        async fn insert_user(&self, email: &str, password_hash: &str) -> Result<User, Error> {
            (self.on_insert_user)(email, password_hash)
        }

        async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, Error> {
            (self.on_fetch_user_by_email)(email)
        }

        async fn fetch_users_with_campaign_counts(&self) -> Result<Vec<AdminUserRow>, Error> {
            (self.on_fetch_users_with_campaign_counts)()
        }

        async fn delete_user(&self, user_id: UserId) -> Result<(), Error> {
            (self.on_delete_user)(user_id)
        }

        async fn promote_user_to_admin(&self, email: &str) -> Result<bool, Error> {
            (self.on_promote_user_to_admin)(email)
        }
    }

    pub struct MockOwnershipStore {
        pub on_fetch_campaign_ids_by_user:
            Box<dyn Fn(UserId) -> Result<Vec<String>, Error> + Send + Sync>,
        pub on_ownership_exists: Box<dyn Fn(UserId, &str) -> Result<bool, Error> + Send + Sync>,
        pub on_insert_ownership: Box<dyn Fn(UserId, &str) -> Result<(), Error> + Send + Sync>,
        pub on_delete_ownership: Box<dyn Fn(UserId, &str) -> Result<(), Error> + Send + Sync>,
        pub on_delete_ownerships_by_user:
            Box<dyn Fn(UserId) -> Result<(), Error> + Send + Sync>,
    }

    impl MockOwnershipStore {
        pub fn new() -> MockOwnershipStore {
            MockOwnershipStore {
                on_fetch_campaign_ids_by_user: Box::new(|user_id| {
                    panic!("unexpected fetch_campaign_ids_by_user: {}", user_id)
                }),
                on_ownership_exists: Box::new(|user_id, campaign_id| {
                    panic!("unexpected ownership_exists: {} {}", user_id, campaign_id)
                }),
                on_insert_ownership: Box::new(|user_id, campaign_id| {
                    panic!("unexpected insert_ownership: {} {}", user_id, campaign_id)
                }),
                on_delete_ownership: Box::new(|user_id, campaign_id| {
                    panic!("unexpected delete_ownership: {} {}", user_id, campaign_id)
                }),
                on_delete_ownerships_by_user: Box::new(|user_id| {
                    panic!("unexpected delete_ownerships_by_user: {}", user_id)
                }),
            }
        }
    }

    #[async_trait]
    impl OwnershipStore for MockOwnershipStore {
        async fn fetch_campaign_ids_by_user(&self, user_id: UserId) -> Result<Vec<String>, Error> {
            (self.on_fetch_campaign_ids_by_user)(user_id)
        }

        async fn ownership_exists(
            &self,
            user_id: UserId,
            campaign_id: &str,
        ) -> Result<bool, Error> {
            (self.on_ownership_exists)(user_id, campaign_id)
        }

        async fn insert_ownership(&self, user_id: UserId, campaign_id: &str) -> Result<(), Error> {
            (self.on_insert_ownership)(user_id, campaign_id)
        }

        async fn delete_ownership(&self, user_id: UserId, campaign_id: &str) -> Result<(), Error> {
            (self.on_delete_ownership)(user_id, campaign_id)
        }

        async fn delete_ownerships_by_user(&self, user_id: UserId) -> Result<(), Error> {
            (self.on_delete_ownerships_by_user)(user_id)
        }
    }

    pub fn user(id: UserId, email: &str, role: Role) -> User {
        User {
            id,
            email: email.to_string(),
            password_hash: String::new(),
            role,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }
}
