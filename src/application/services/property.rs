//! Properties with their amenity set and image gallery

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::amenity::Amenity;
use crate::domain::property::{
    NewProperty, NewPropertyImage, Property, PropertyChanges, PropertyFilter, PropertyImage,
};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::uploads::{ImageStore, UploadPolicy};
use crate::shared::{require_non_empty, PaginatedResult, PaginationParams};

use super::AuthenticatedUser;

/// One file received from a multipart upload
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

pub struct PropertyService {
    repos: Arc<dyn RepositoryProvider>,
    images: ImageStore,
    policy: UploadPolicy,
}

fn check_counts(total_shares: Option<i32>, guest_capacity: Option<i32>) -> DomainResult<()> {
    if matches!(total_shares, Some(n) if n < 1) {
        return Err(DomainError::Validation("total_shares must be at least 1".into()));
    }
    if matches!(guest_capacity, Some(n) if n < 1) {
        return Err(DomainError::Validation("guest_capacity must be at least 1".into()));
    }
    Ok(())
}

impl PropertyService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, images: ImageStore, policy: UploadPolicy) -> Self {
        Self {
            repos,
            images,
            policy,
        }
    }

    async fn ensure_name_free(&self, name: &str, except: Option<i32>) -> DomainResult<()> {
        if let Some(existing) = self.repos.properties().find_by_name(name).await? {
            if Some(existing.id) != except {
                return Err(DomainError::Conflict(format!(
                    "Property '{}' already exists",
                    name
                )));
            }
        }
        Ok(())
    }

    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        mut property: NewProperty,
    ) -> DomainResult<Property> {
        caller.require_admin()?;
        property.property_name = require_non_empty("property_name", &property.property_name)
            .map_err(DomainError::Validation)?;
        check_counts(Some(property.total_shares), Some(property.guest_capacity))?;
        self.ensure_name_free(&property.property_name, None).await?;

        property.created_by = Some(caller.user_id);
        let property = self.repos.properties().create(property).await?;
        info!(property_id = property.id, name = %property.property_name, "Property created");
        Ok(property)
    }

    pub async fn list(
        &self,
        filter: PropertyFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Property>> {
        self.repos.properties().list(filter, page).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Property> {
        self.repos
            .properties()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Property", "id", id))
    }

    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        id: i32,
        mut changes: PropertyChanges,
    ) -> DomainResult<Property> {
        caller.require_admin()?;
        self.get(id).await?;
        check_counts(changes.total_shares, changes.guest_capacity)?;

        if let Some(name) = changes.property_name.take() {
            let name = require_non_empty("property_name", &name).map_err(DomainError::Validation)?;
            self.ensure_name_free(&name, Some(id)).await?;
            changes.property_name = Some(name);
        }
        changes.updated_by = Some(caller.user_id);

        self.repos.properties().update(id, changes).await
    }

    /// Removes the property with its bookings, codes and images.
    pub async fn delete(&self, caller: &AuthenticatedUser, id: i32) -> DomainResult<()> {
        caller.require_admin()?;
        let images = self.repos.properties().list_images(id).await?;
        self.repos.properties().delete(id).await?;
        for image in images {
            self.images.remove(id, &image.file_name).await;
        }
        Ok(())
    }

    // ── Amenities ──────────────────────────────────────────────

    pub async fn amenities(&self, property_id: i32) -> DomainResult<Vec<Amenity>> {
        self.repos.properties().amenities_of(property_id).await
    }

    /// Replace the amenity set. Duplicate ids collapse; unknown ids are 404.
    pub async fn set_amenities(
        &self,
        caller: &AuthenticatedUser,
        property_id: i32,
        amenity_ids: &[i32],
    ) -> DomainResult<Vec<Amenity>> {
        caller.require_admin()?;
        self.get(property_id).await?;

        let ids: Vec<i32> = amenity_ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        let found = self.repos.amenities().find_by_ids(&ids).await?;
        if found.len() != ids.len() {
            let missing = ids
                .iter()
                .find(|id| !found.iter().any(|a| a.id == **id))
                .copied()
                .unwrap_or_default();
            return Err(DomainError::not_found("Amenity", "id", missing));
        }

        self.repos.properties().set_amenities(property_id, &ids).await?;
        self.amenities(property_id).await
    }

    // ── Images ─────────────────────────────────────────────────

    pub async fn images(&self, property_id: i32) -> DomainResult<Vec<PropertyImage>> {
        self.get(property_id).await?;
        self.repos.properties().list_images(property_id).await
    }

    /// Store a batch of images. The whole batch is validated before any
    /// file is written.
    pub async fn upload_images(
        &self,
        caller: &AuthenticatedUser,
        property_id: i32,
        uploads: Vec<ImageUpload>,
    ) -> DomainResult<Vec<PropertyImage>> {
        caller.require_admin()?;
        self.get(property_id).await?;

        if uploads.is_empty() {
            return Err(DomainError::Validation("No files were uploaded".into()));
        }
        let existing = self.repos.properties().list_images(property_id).await?.len();
        if existing + uploads.len() > self.policy.max_files {
            return Err(DomainError::Validation(format!(
                "A property may hold at most {} images ({} already stored)",
                self.policy.max_files, existing
            )));
        }

        let mut checked = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let extension = self.policy.check(&upload.original_name, upload.bytes.len())?;
            checked.push((upload, extension));
        }

        let mut stored = Vec::with_capacity(checked.len());
        for (upload, extension) in checked {
            let file_name = self.images.save(property_id, &extension, &upload.bytes).await?;
            let added = self
                .repos
                .properties()
                .add_image(NewPropertyImage {
                    property_id,
                    file_name: file_name.clone(),
                    original_name: upload.original_name,
                    size_bytes: upload.bytes.len() as i64,
                    created_by: Some(caller.user_id),
                })
                .await;
            match added {
                Ok(image) => stored.push(image),
                Err(e) => {
                    warn!(property_id, file_name = %file_name, error = %e, "Image row not saved, removing file");
                    self.images.remove(property_id, &file_name).await;
                    return Err(e);
                }
            }
        }

        info!(property_id, count = stored.len(), "Property images uploaded");
        Ok(stored)
    }

    pub async fn delete_image(
        &self,
        caller: &AuthenticatedUser,
        property_id: i32,
        image_id: i32,
    ) -> DomainResult<()> {
        caller.require_admin()?;
        let image = self
            .repos
            .properties()
            .find_image(property_id, image_id)
            .await?
            .ok_or_else(|| DomainError::not_found("PropertyImage", "id", image_id))?;

        self.repos.properties().delete_image(image.id).await?;
        self.images.remove(property_id, &image.file_name).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::fixture;
    use crate::config::UploadConfig;
    use crate::domain::amenity::NewAmenity;

    fn service(repos: Arc<dyn RepositoryProvider>) -> PropertyService {
        let dir = std::env::temp_dir().join(format!("propshare-test-{}", uuid::Uuid::new_v4()));
        service_at(repos, dir)
    }

    fn service_at(repos: Arc<dyn RepositoryProvider>, dir: std::path::PathBuf) -> PropertyService {
        let config = UploadConfig {
            dir: dir.clone(),
            max_file_size: 1024,
            allowed_extensions: vec!["png".into()],
            max_files: 2,
        };
        PropertyService::new(repos, ImageStore::new(dir), UploadPolicy::from(&config))
    }

    fn new_property(name: &str) -> NewProperty {
        NewProperty {
            property_name: name.into(),
            address: "2 Hill St".into(),
            city: "Aspen".into(),
            state: None,
            country: "US".into(),
            zipcode: None,
            description: None,
            total_shares: 4,
            guest_capacity: 6,
            created_by: None,
        }
    }

    #[tokio::test]
    async fn duplicate_name_conflicts() {
        let fx = fixture().await;
        let properties = service(fx.repos.clone());
        let err = properties
            .create(&fx.admin_caller(), new_property("Lake House"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn zero_shares_is_rejected() {
        let fx = fixture().await;
        let properties = service(fx.repos.clone());
        let mut p = new_property("Ski Lodge");
        p.total_shares = 0;
        let err = properties.create(&fx.admin_caller(), p).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn owners_cannot_create_properties() {
        let fx = fixture().await;
        let properties = service(fx.repos.clone());
        let err = properties
            .create(&fx.owner_caller(), new_property("Ski Lodge"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn unknown_amenity_is_not_found() {
        let fx = fixture().await;
        let properties = service(fx.repos.clone());
        let pool = fx
            .repos
            .amenities()
            .create(NewAmenity {
                amenity_name: "Pool".into(),
                amenity_type: None,
                description: None,
                created_by: None,
            })
            .await
            .unwrap();

        let err = properties
            .set_amenities(&fx.admin_caller(), fx.property.id, &[pool.id, 404])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Amenity", .. }));

        let set = properties
            .set_amenities(&fx.admin_caller(), fx.property.id, &[pool.id, pool.id])
            .await
            .unwrap();
        assert_eq!(set.len(), 1);
    }

    #[tokio::test]
    async fn image_limit_is_enforced() {
        let fx = fixture().await;
        let properties = service(fx.repos.clone());
        let upload = |name: &str| ImageUpload {
            original_name: name.into(),
            bytes: vec![1, 2, 3],
        };

        let stored = properties
            .upload_images(&fx.admin_caller(), fx.property.id, vec![upload("a.png"), upload("b.png")])
            .await
            .unwrap();
        assert_eq!(stored.len(), 2);

        let err = properties
            .upload_images(&fx.admin_caller(), fx.property.id, vec![upload("c.png")])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        properties
            .delete_image(&fx.admin_caller(), fx.property.id, stored[0].id)
            .await
            .unwrap();
        assert_eq!(properties.images(fx.property.id).await.unwrap().len(), 1);

        let _ = std::fs::remove_dir_all(properties.images.root());
    }

    #[tokio::test]
    async fn bad_extension_stores_nothing() {
        let fx = fixture().await;
        let properties = service(fx.repos.clone());
        let err = properties
            .upload_images(
                &fx.admin_caller(),
                fx.property.id,
                vec![
                    ImageUpload {
                        original_name: "ok.png".into(),
                        bytes: vec![1],
                    },
                    ImageUpload {
                        original_name: "bad.exe".into(),
                        bytes: vec![1],
                    },
                ],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(properties.images(fx.property.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_image_row_removes_stored_file() {
        use crate::application::services::test_support::fixture_on;
        use crate::infrastructure::database::memory_db;
        use sea_orm::ConnectionTrait;

        let db = memory_db().await;
        let fx = fixture_on(db.clone()).await;
        db.execute_unprepared(
            "CREATE TRIGGER reject_images BEFORE INSERT ON property_images \
             BEGIN SELECT RAISE(ABORT, 'image rows disabled'); END;",
        )
        .await
        .unwrap();

        let dir = std::env::temp_dir().join(format!("propshare-test-{}", uuid::Uuid::new_v4()));
        let properties = service_at(fx.repos.clone(), dir.clone());
        let err = properties
            .upload_images(
                &fx.admin_caller(),
                fx.property.id,
                vec![ImageUpload {
                    original_name: "front.png".into(),
                    bytes: vec![1, 2, 3],
                }],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Database(_)));

        let property_dir = dir.join("properties").join(fx.property.id.to_string());
        let leftovers = std::fs::read_dir(&property_dir).unwrap().count();
        assert_eq!(leftovers, 0);
    }
}
