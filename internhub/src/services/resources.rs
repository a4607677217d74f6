//! Resources service
//!
//! Preparation material: videos, PDFs, articles and links.

use crate::database::{
    Collection, CreateResourceRequest, Resource, ResourceKind, Store, UpdateResourceRequest,
};
use crate::error::Result;
use crate::ids::ResourceId;

#[derive(Clone)]
pub struct ResourcesService {
    resources: Collection<Resource>,
}

impl ResourcesService {
    pub fn new(store: Store) -> Self {
        Self {
            resources: store.collection(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Resource>> {
        self.resources.list().await
    }

    pub async fn list_by_kind(&self, kind: ResourceKind) -> Result<Vec<Resource>> {
        let resources = self.list().await?;
        Ok(resources.into_iter().filter(|r| r.kind == kind).collect())
    }

    pub async fn create(&self, req: CreateResourceRequest) -> Result<Resource> {
        tracing::info!("Adding {:?} resource: {}", req.kind, req.title);

        let resource = Resource {
            id: ResourceId::generate(),
            title: req.title,
            kind: req.kind,
            category: req.category,
            duration: req.duration,
            url: req.url,
            is_new: req.is_new,
        };

        self.resources.prepend(resource).await
    }

    pub async fn update(&self, id: &ResourceId, patch: &UpdateResourceRequest) -> Result<Resource> {
        self.resources.merge(id, patch).await
    }

    pub async fn remove(&self, id: &ResourceId) -> Result<()> {
        tracing::info!("Deleting resource: {}", id);
        self.resources.remove(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::initialize_database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_service() -> ResourcesService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        ResourcesService::new(Store::new(pool))
    }

    #[tokio::test]
    async fn test_resource_crud() {
        let service = create_test_service().await;

        let guide = service
            .create(CreateResourceRequest {
                title: "Resume Guide".to_string(),
                kind: ResourceKind::Pdf,
                category: "Resume".to_string(),
                duration: None,
                url: "https://example.com/guide.pdf".to_string(),
                is_new: true,
            })
            .await
            .unwrap();

        let patch = UpdateResourceRequest {
            is_new: Some(false),
            ..Default::default()
        };
        let updated = service.update(&guide.id, &patch).await.unwrap();
        assert!(!updated.is_new);
        assert_eq!(updated.url, guide.url);

        assert_eq!(service.list_by_kind(ResourceKind::Pdf).await.unwrap().len(), 1);
        assert!(service.list_by_kind(ResourceKind::Video).await.unwrap().is_empty());

        service.remove(&guide.id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }
}
