pub mod catalog;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

use tracing::info;

use crate::catalog::CatalogClient;
use crate::catalog::dto::RemoteCourse;
use crate::error::AppError;
use crate::services::CourseStorageService;

/// Runs one fetch → filter → store pass for an author and returns the
/// number of courses stored. Retired catalog entries are dropped before
/// mapping.
pub async fn retrieve_and_store(
    client: &dyn CatalogClient,
    service: &CourseStorageService,
    author_id: &str,
) -> Result<usize, AppError> {
    info!("retrieving courses for author {}", author_id);
    let remote_courses = client.get_courses_for(author_id).await?;

    let active: Vec<RemoteCourse> = remote_courses
        .into_iter()
        .filter(|course| !course.is_retired)
        .collect();
    info!("{} active courses found for author {}", active.len(), author_id);

    service.store_remote_courses(&active).await?;
    Ok(active.len())
}
