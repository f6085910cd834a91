use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

use wiseads_server::{run, Config, Error};

#[actix_web::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_span_events(FmtSpan::NEW)
        .compact()
        .init();

    let config = Config::from_env()?;

    run(config).await
}
