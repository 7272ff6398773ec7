use std::sync::Arc;

use tracing::debug;

use crate::catalog::dto::RemoteCourse;
use crate::error::AppError;
use crate::models::Course;
use crate::repository::CourseRepository;

pub struct CourseStorageService {
    repository: Arc<dyn CourseRepository>,
    base_url: String,
}

impl CourseStorageService {
    pub fn new(repository: Arc<dyn CourseRepository>, base_url: String) -> Self {
        Self {
            repository,
            base_url,
        }
    }

    /// Maps each remote record into a domain course and saves it. Writes
    /// are not transactional as a batch: a failure part-way through leaves
    /// prior writes committed and aborts the rest.
    pub async fn store_remote_courses(
        &self,
        remote_courses: &[RemoteCourse],
    ) -> Result<(), AppError> {
        for remote in remote_courses {
            let length = remote.duration_in_minutes()?;
            let url = format!("{}{}", self.base_url, remote.content_url);
            let course = Course::new(
                remote.id.clone(),
                remote.title.clone(),
                length,
                url,
                None,
            )?;

            debug!("storing course {}", course.id());
            self.repository.save_course(&course).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::{InvalidCourse, MalformedDuration, RepositoryError};

    #[derive(Default)]
    struct InMemoryRepository {
        courses: Mutex<HashMap<String, Course>>,
    }

    #[async_trait]
    impl CourseRepository for InMemoryRepository {
        async fn save_course(&self, course: &Course) -> Result<(), RepositoryError> {
            self.courses
                .lock()
                .unwrap()
                .insert(course.id().to_string(), course.clone());
            Ok(())
        }

        async fn get_all_courses(&self) -> Result<Vec<Course>, RepositoryError> {
            let mut courses: Vec<Course> =
                self.courses.lock().unwrap().values().cloned().collect();
            courses.sort_by(|a, b| a.id().cmp(b.id()));
            Ok(courses)
        }

        async fn add_notes(&self, id: &str, notes: &str) -> Result<(), RepositoryError> {
            let mut courses = self.courses.lock().unwrap();
            if let Some(existing) = courses.get(id) {
                let annotated = Course::new(
                    existing.id().to_string(),
                    existing.name().to_string(),
                    existing.length(),
                    existing.url().to_string(),
                    Some(notes.to_string()),
                )
                .map_err(|e| RepositoryError::new("failed to annotate course", e))?;
                courses.insert(id.to_string(), annotated);
            }
            Ok(())
        }
    }

    fn remote(id: &str, duration: &str) -> RemoteCourse {
        RemoteCourse {
            id: id.to_string(),
            title: format!("Title of {id}"),
            duration: duration.to_string(),
            content_url: format!("/library/courses/{id}"),
            is_retired: false,
        }
    }

    fn service(repository: Arc<InMemoryRepository>) -> CourseStorageService {
        CourseStorageService::new(repository, "https://courses.example.com".to_string())
    }

    #[tokio::test]
    async fn maps_remote_fields_into_domain_courses() {
        let repository = Arc::new(InMemoryRepository::default());
        let service = service(repository.clone());

        service
            .store_remote_courses(&[remote("course-a", "01:08:54.9613330")])
            .await
            .unwrap();

        let courses = repository.get_all_courses().await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].id(), "course-a");
        assert_eq!(courses[0].name(), "Title of course-a");
        assert_eq!(courses[0].length(), 68);
        assert_eq!(
            courses[0].url(),
            "https://courses.example.com/library/courses/course-a"
        );
        assert_eq!(courses[0].notes(), None);
    }

    #[tokio::test]
    async fn malformed_duration_aborts_but_keeps_prior_writes() {
        let repository = Arc::new(InMemoryRepository::default());
        let service = service(repository.clone());

        let err = service
            .store_remote_courses(&[
                remote("course-a", "00:45:00"),
                remote("course-b", "not-a-duration"),
                remote("course-c", "01:00:00"),
            ])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::MalformedDuration(MalformedDuration(ref d)) if d == "not-a-duration"
        ));

        let courses = repository.get_all_courses().await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].id(), "course-a");
    }

    #[tokio::test]
    async fn sub_minute_course_fails_domain_validation() {
        let repository = Arc::new(InMemoryRepository::default());
        let service = service(repository.clone());

        let err = service
            .store_remote_courses(&[remote("course-a", "00:00:30")])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::InvalidCourse(InvalidCourse::NonPositiveLength(0))
        ));
        assert!(repository.get_all_courses().await.unwrap().is_empty());
    }
}
