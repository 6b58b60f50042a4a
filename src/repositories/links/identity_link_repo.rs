//! # 외부 신원 연결 리포지토리
//!
//! MongoDB `identity_links` 컬렉션의 [`IdentityLinkStore`] 구현입니다.
//!
//! `(provider, open_id)` 유니크 인덱스와 upsert 저장으로, 같은 외부 신원이
//! 동시에 처음 로그인해도 레코드는 하나로 수렴합니다.

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::{bson::doc, options::{IndexOptions, ReplaceOptions}, IndexModel};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::links::IdentityLink,
    repositories::{sequences::map_write_error, traits::IdentityLinkStore},
};

#[repository(name = "identitylink", collection = "identity_links")]
pub struct IdentityLinkRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl IdentityLinkRepository {
    /// 1. `(provider, open_id)` 유니크 인덱스
    /// 2. `user_id` 인덱스 (계정별 연결 목록 조회)
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let natural_key_index = IndexModel::builder()
            .keys(doc! { "provider": 1, "open_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("provider_open_id_unique".to_string())
                .build())
            .build();

        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder()
                .name("user_id".to_string())
                .build())
            .build();

        self.collection::<IdentityLink>()
            .create_indexes([natural_key_index, user_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl IdentityLinkStore for IdentityLinkRepository {
    async fn find(&self, provider: &str, open_id: &str) -> Result<Option<IdentityLink>, AppError> {
        self.collection::<IdentityLink>()
            .find_one(doc! { "provider": provider, "open_id": open_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 자연 키로 upsert 합니다.
    ///
    /// 새 레코드의 `_id`는 직렬화에서 빠지므로 MongoDB가 발급합니다.
    /// 기존 레코드를 교체할 때는 저장된 `_id`가 유지됩니다.
    async fn save(&self, link: &IdentityLink) -> Result<(), AppError> {
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection::<IdentityLink>()
            .replace_one(doc! { "provider": &link.provider, "open_id": &link.open_id }, link)
            .with_options(options)
            .await
            .map_err(|e| map_write_error(e, &format!("외부 신원 연결 저장 충돌: {}/{}", link.provider, link.open_id)))?;

        Ok(())
    }
}
