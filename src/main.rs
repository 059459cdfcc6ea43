use sea_orm::ConnectionTrait;
use suncoast_movies::{config::Config, db, repository::MovieRepository, shell::Shell};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter(rust_log.as_deref())?)
        .with_writer(std::io::stderr)
        .init();

    let db = db::connect(&config).await?;
    tracing::info!(backend = ?db.get_database_backend(), "connected to database");

    let repo = MovieRepository::new(db);
    let mut shell = Shell::new(repo, BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    shell.run().await?;

    Ok(())
}
