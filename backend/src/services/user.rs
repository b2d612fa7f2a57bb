//! User service

use crate::error::ApiError;
use crate::repositories::{Entity, EntityId, Repository, UserFields, UserRecord};
use tracing::debug;

/// User service for CRUD operations
pub struct UserService;

impl UserService {
    /// Every user, ordered by id
    pub async fn find_all(users: &dyn Repository<UserRecord>) -> Result<Vec<UserRecord>, ApiError> {
        users.list_all().await.map_err(ApiError::Internal)
    }

    /// Look up one user
    pub async fn find_by_id(
        users: &dyn Repository<UserRecord>,
        user_id: EntityId,
    ) -> Result<UserRecord, ApiError> {
        users
            .get_by_id(user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::not_found(UserRecord::KIND, user_id))
    }

    /// Persist a new user; the store assigns the id
    pub async fn create(
        users: &dyn Repository<UserRecord>,
        fields: UserFields,
    ) -> Result<UserRecord, ApiError> {
        let user = users.save(fields).await.map_err(ApiError::Internal)?;
        debug!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Replace the name and email of an existing user
    ///
    /// A missing user is reported as `NotFound`; nothing is created.
    pub async fn update_by_id(
        users: &dyn Repository<UserRecord>,
        user_id: EntityId,
        patch: UserFields,
    ) -> Result<UserRecord, ApiError> {
        // Every user field is editable, so the patch is the new state.
        let existing = Self::find_by_id(users, user_id).await?;

        let user = users
            .update(existing.id, patch)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::not_found(UserRecord::KIND, user_id))?;
        debug!(user_id, "User updated");
        Ok(user)
    }

    /// Hard-delete a user. Deleting an unknown id is a no-op.
    pub async fn delete(users: &dyn Repository<UserRecord>, user_id: EntityId) -> Result<(), ApiError> {
        let removed = users.delete_by_id(user_id).await.map_err(ApiError::Internal)?;
        debug!(user_id, removed, "User delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryRepository;
    use async_trait::async_trait;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    /// Store where a user disappears right after it is read, like a
    /// concurrent delete landing between the load and the write
    struct DeletedAfterRead(MemoryRepository<UserRecord>);

    #[async_trait]
    impl Repository<UserRecord> for DeletedAfterRead {
        async fn list_all(&self) -> anyhow::Result<Vec<UserRecord>> {
            self.0.list_all().await
        }

        async fn get_by_id(&self, id: EntityId) -> anyhow::Result<Option<UserRecord>> {
            let found = self.0.get_by_id(id).await?;
            self.0.delete_by_id(id).await?;
            Ok(found)
        }

        async fn save(&self, fields: UserFields) -> anyhow::Result<UserRecord> {
            self.0.save(fields).await
        }

        async fn update(
            &self,
            id: EntityId,
            fields: UserFields,
        ) -> anyhow::Result<Option<UserRecord>> {
            self.0.update(id, fields).await
        }

        async fn delete_by_id(&self, id: EntityId) -> anyhow::Result<bool> {
            self.0.delete_by_id(id).await
        }
    }

    fn random_user() -> UserFields {
        UserFields {
            name: Name().fake(),
            email: SafeEmail().fake(),
        }
    }

    #[tokio::test]
    async fn test_find_after_create_returns_same_fields() {
        let users = MemoryRepository::<UserRecord>::new();
        let fields = random_user();

        let created = UserService::create(&users, fields.clone()).await.unwrap();
        let found = UserService::find_by_id(&users, created.id).await.unwrap();

        assert_eq!(found, created);
        assert_eq!(found.name, fields.name);
        assert_eq!(found.email, fields.email);
    }

    #[tokio::test]
    async fn test_find_all_contains_every_created_user() {
        let users = MemoryRepository::<UserRecord>::new();
        let mut created = Vec::new();
        for _ in 0..5 {
            created.push(UserService::create(&users, random_user()).await.unwrap());
        }

        let all = UserService::find_all(&users).await.unwrap();

        assert!(created.iter().all(|user| all.contains(user)));
    }

    #[tokio::test]
    async fn test_find_missing_is_not_found() {
        let users = MemoryRepository::<UserRecord>::new();

        let err = UserService::find_by_id(&users, 12).await.unwrap_err();

        assert!(matches!(err, ApiError::NotFound(msg) if msg == "User 12 not found"));
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_id() {
        let users = MemoryRepository::<UserRecord>::new();
        let created = UserService::create(
            &users,
            UserFields {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
        )
        .await
        .unwrap();

        let patch = UserFields {
            name: "Ada L.".to_string(),
            email: "ada@example.com".to_string(),
        };
        let updated = UserService::update_by_id(&users, created.id, patch)
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Ada L.");
        assert_eq!(
            UserService::find_by_id(&users, created.id).await.unwrap(),
            updated
        );
    }

    #[tokio::test]
    async fn test_update_missing_does_not_create() {
        let users = MemoryRepository::<UserRecord>::new();

        let err = UserService::update_by_id(&users, 3, random_user())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
        assert!(UserService::find_all(&users).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_of_concurrently_deleted_user_is_not_found() {
        let users = DeletedAfterRead(MemoryRepository::new());
        let created = users.save(random_user()).await.unwrap();

        let err = UserService::update_by_id(&users, created.id, random_user())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(msg) if msg == "User 1 not found"));
        assert!(users.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_then_find_is_not_found() {
        let users = MemoryRepository::<UserRecord>::new();
        let created = UserService::create(&users, random_user()).await.unwrap();

        UserService::delete(&users, created.id).await.unwrap();

        assert!(matches!(
            UserService::find_by_id(&users, created.id).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_is_silent() {
        let users = MemoryRepository::<UserRecord>::new();
        assert!(UserService::delete(&users, 99).await.is_ok());
    }
}
