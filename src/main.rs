use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courseinfo::catalog::{CatalogConfig, HttpCatalogClient};
use courseinfo::repository::{CourseRepository, SqliteCourseRepository};
use courseinfo::services::CourseStorageService;

#[derive(Debug, Parser)]
#[command(name = "courseinfo")]
#[command(about = "Fetch an author's course catalog and store it locally", long_about = None)]
struct Cli {
    /// Author identifier to fetch courses for
    author_id: String,

    /// Path to the sqlite database file
    #[arg(long, default_value = "courses.db")]
    database: PathBuf,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "courseinfo=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        error!("course retrieval failed: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CatalogConfig::new_from_env();
    let client = HttpCatalogClient::new(&config)?;
    let repository = Arc::new(SqliteCourseRepository::open(&cli.database).await?);
    let service = CourseStorageService::new(repository.clone(), config.base_url.clone());

    let stored = courseinfo::retrieve_and_store(&client, &service, &cli.author_id).await?;

    let total = repository.get_all_courses().await?.len();
    info!(
        "stored {} courses for author {}, {} total in {}",
        stored,
        cli.author_id,
        total,
        cli.database.display()
    );
    Ok(())
}
