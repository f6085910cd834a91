use std::process::exit;

use sqlx::sqlite::SqlitePoolOptions;

use wiseads_server::database::{Database, SqliteDatabase};
use wiseads_server::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let email = match std::env::args().nth(1) {
        Some(email) => email,
        None => {
            eprintln!("Usage: make_admin <email>");
            exit(1);
        }
    };
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Missing required env var: DATABASE_URL");
            exit(1);
        }
    };

    let pool = SqlitePoolOptions::new().connect(&database_url).await?;
    let db = SqliteDatabase::initialize(pool).await?;

    if db.users().promote_user_to_admin(&email).await? {
        println!("User \"{}\" is now admin", email);
        Ok(())
    } else {
        eprintln!("User \"{}\" not found", email);
        exit(1);
    }
}
