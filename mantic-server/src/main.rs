use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use mantic_api::Store;
use mantic_server::{analytics::Analytics, comments::Comments, db::PgStore, AppState};

#[derive(structopt::StructOpt)]
struct Opt {
    /// Address to listen on
    #[structopt(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// PostgreSQL connection string
    #[structopt(long, env = "DATABASE_URL")]
    database_url: String,

    /// Endpoint analytics events are POSTed to; events are logged and
    /// dropped if unset
    #[structopt(long, env = "ANALYTICS_URL")]
    analytics_url: Option<String>,

    /// Emit the comment-creation analytics event only after the write
    /// succeeded, instead of before it is attempted
    #[structopt(long)]
    track_after_write: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let opt = <Opt as structopt::StructOpt>::from_args();

    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect(&opt.database_url)
        .await
        .with_context(|| format!("error opening database {:?}", opt.database_url))?;
    let store = PgStore::new(pool);
    store
        .init_schema()
        .await
        .context("initializing database schema")?;

    let store: Arc<dyn Store> = Arc::new(store);
    let comments = Comments::new(
        store.clone(),
        Analytics::new(opt.analytics_url),
        opt.track_after_write,
    );
    let app = mantic_server::app(AppState { store, comments });

    tracing::info!("listening on {}", opt.bind);
    axum::Server::bind(&opt.bind)
        .serve(app.into_make_service())
        .await
        .context("serving axum webserver")
}
