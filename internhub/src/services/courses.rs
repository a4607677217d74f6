//! Courses service
//!
//! Video courses hosted on YouTube. When no thumbnail is supplied one is
//! derived from the video id in the course URL.

use crate::database::{
    Collection, Course, CourseStatus, CreateCourseRequest, Store, UpdateCourseRequest,
};
use crate::error::Result;
use crate::ids::CourseId;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref YOUTUBE_ID_RE: Regex =
        Regex::new(r"(?:[?&]v=|youtu\.be/|/embed/|/shorts/)([A-Za-z0-9_-]{11})").unwrap();
}

/// Video id of a YouTube watch, short-link, embed or shorts URL
pub fn youtube_video_id(url: &str) -> Option<&str> {
    YOUTUBE_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// High-quality thumbnail URL for a YouTube video URL
pub fn youtube_thumbnail(url: &str) -> Option<String> {
    youtube_video_id(url).map(|id| format!("https://img.youtube.com/vi/{}/hqdefault.jpg", id))
}

#[derive(Clone)]
pub struct CoursesService {
    courses: Collection<Course>,
}

impl CoursesService {
    pub fn new(store: Store) -> Self {
        Self {
            courses: store.collection(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Course>> {
        self.courses.list().await
    }

    pub async fn get(&self, id: &CourseId) -> Result<Course> {
        self.courses.get(id).await
    }

    /// Courses visible to students
    pub async fn list_published(&self) -> Result<Vec<Course>> {
        let courses = self.list().await?;
        Ok(courses
            .into_iter()
            .filter(|c| c.status == CourseStatus::Active)
            .collect())
    }

    pub async fn create(&self, req: CreateCourseRequest) -> Result<Course> {
        tracing::info!("Creating course: {}", req.title);

        let thumbnail = req
            .thumbnail
            .filter(|t| !t.trim().is_empty())
            .or_else(|| youtube_thumbnail(&req.youtube_url))
            .unwrap_or_default();

        let course = Course {
            id: CourseId::generate(),
            title: req.title,
            description: req.description,
            instructor: req.instructor,
            duration: req.duration,
            lessons: req.lessons,
            level: req.level,
            category: req.category,
            thumbnail,
            youtube_url: req.youtube_url,
            youtube_playlist: req.youtube_playlist,
            rating: 0.0,
            students: 0,
            is_free: req.is_free,
            tags: req.tags,
            status: req.status,
        };

        self.courses.prepend(course).await
    }

    pub async fn update(&self, id: &CourseId, patch: &UpdateCourseRequest) -> Result<Course> {
        tracing::debug!("Updating course: {}", id);
        self.courses.merge(id, patch).await
    }

    pub async fn remove(&self, id: &CourseId) -> Result<()> {
        tracing::info!("Deleting course: {}", id);
        self.courses.remove(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::initialize_database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_service() -> CoursesService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        CoursesService::new(Store::new(pool))
    }

    #[test]
    fn test_youtube_video_id() {
        assert_eq!(
            youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            youtube_video_id("https://www.youtube.com/watch?list=PL1&v=dQw4w9WgXcQ&t=4"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(youtube_video_id("https://youtu.be/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
        assert_eq!(
            youtube_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(youtube_video_id("https://vimeo.com/123456"), None);
    }

    #[tokio::test]
    async fn test_create_derives_thumbnail() {
        let service = create_test_service().await;

        let course = service
            .create(CreateCourseRequest {
                title: "Rust Basics".to_string(),
                youtube_url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(
            course.thumbnail,
            "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );

        let explicit = service
            .create(CreateCourseRequest {
                title: "Custom".to_string(),
                thumbnail: Some("https://cdn.example.com/t.png".to_string()),
                youtube_url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(explicit.thumbnail, "https://cdn.example.com/t.png");
    }

    #[tokio::test]
    async fn test_published_and_update() {
        let service = create_test_service().await;

        let draft = service
            .create(CreateCourseRequest {
                title: "Draft".to_string(),
                status: CourseStatus::Draft,
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(service.list_published().await.unwrap().is_empty());

        let patch = UpdateCourseRequest {
            status: Some(CourseStatus::Active),
            ..Default::default()
        };
        let published = service.update(&draft.id, &patch).await.unwrap();
        assert_eq!(published.title, "Draft");
        assert_eq!(service.list_published().await.unwrap(), vec![published]);

        service.remove(&draft.id).await.unwrap();
        service.remove(&draft.id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }
}
