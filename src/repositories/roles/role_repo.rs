//! # 역할 리포지토리
//!
//! MongoDB `roles` 컬렉션의 [`RoleStore`] 구현입니다.
//! 역할은 거의 바뀌지 않고 조회 빈도도 낮아 캐싱하지 않습니다.

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, IndexModel};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::roles::Role,
    repositories::{
        sequences::{map_write_error, next_sequence},
        traits::RoleStore,
    },
};

#[repository(name = "role", collection = "roles")]
pub struct RoleRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl RoleRepository {
    /// `name` 유니크 인덱스 (`role_name_unique`)
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("role_name_unique".to_string())
                .build())
            .build();

        self.collection::<Role>()
            .create_index(name_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl RoleStore for RoleRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AppError> {
        self.collection::<Role>()
            .find_one(doc! { "name": name })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Role>, AppError> {
        self.collection::<Role>()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn insert(&self, name: &str) -> Result<Role, AppError> {
        let id = next_sequence(&self.db.get_database(), "roles").await?;
        let role = Role { id, name: name.to_string() };

        self.collection::<Role>()
            .insert_one(&role)
            .await
            .map_err(|e| map_write_error(e, &format!("이미 존재하는 역할입니다: {}", name)))?;

        log::info!("🏷️ 역할 생성: {} (id={})", name, id);

        Ok(role)
    }
}
