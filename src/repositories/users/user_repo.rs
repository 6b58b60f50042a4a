//! # 계정 리포지토리
//!
//! MongoDB `users` 컬렉션과 Redis 캐시를 사용하는 [`AccountProvider`] 구현입니다.
//!
//! ## 캐싱 전략
//!
//! - **키 패턴**: `user:{id}` (리포지토리 매크로의 `cache_key()`)
//! - **TTL**: 600초
//! - 저장(`save`) 후 해당 계정의 캐시를 무효화합니다.
//!
//! ## 유일성
//!
//! `name` 유니크 인덱스가 중복 가입을 막습니다. 가입 전에 이름을 조회하지 않고
//! 바로 삽입한 뒤, 중복 키 에러를 `ConflictError`로 돌려줍니다.

use std::sync::Arc;
use async_trait::async_trait;
use bcrypt::hash;
use mongodb::{bson::doc, options::IndexOptions, IndexModel};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    config::PasswordConfig,
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::users::LocalUser,
    repositories::{
        sequences::{map_write_error, next_sequence},
        traits::AccountProvider,
    },
};

const USER_CACHE_TTL: usize = 600;

/// 계정 데이터 액세스 리포지토리
///
/// ```rust,ignore
/// let repo = UserRepository::instance();
///
/// let user = repo.register("alice", "random-password", 3, true).await?;
/// let found = repo.find_by_name("alice").await?;
/// ```
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl UserRepository {
    /// `users` 컬렉션 인덱스 생성
    ///
    /// 1. `name` 유니크 인덱스 (`user_name_unique`)
    /// 2. `logins.last_login` 내림차순 인덱스
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_name_unique".to_string())
                .build())
            .build();

        let last_login_index = IndexModel::builder()
            .keys(doc! { "logins.last_login": -1 })
            .options(IndexOptions::builder()
                .name("last_login_desc".to_string())
                .build())
            .build();

        self.collection::<LocalUser>()
            .create_indexes([name_index, last_login_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl AccountProvider for UserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<LocalUser>, AppError> {
        let cache_key = self.cache_key(&id.to_string());

        if let Ok(Some(cached)) = self.redis.get::<LocalUser>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<LocalUser>()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, USER_CACHE_TTL)
                .await;
        }

        Ok(user)
    }

    /// 이름 조회는 캐싱하지 않습니다. 가입 직후 충돌 재조회가 항상 DB를 보도록 합니다.
    async fn find_by_name(&self, name: &str) -> Result<Option<LocalUser>, AppError> {
        self.collection::<LocalUser>()
            .find_one(doc! { "name": name })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn register(&self, name: &str, password: &str, role_id: i64, enable: bool) -> Result<LocalUser, AppError> {
        let password_hash = hash(password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        let id = next_sequence(&self.db.get_database(), "users").await?;
        let user = LocalUser::new_extended(id, name.to_string(), password_hash, role_id, enable);

        self.collection::<LocalUser>()
            .insert_one(&user)
            .await
            .map_err(|e| map_write_error(e, &format!("이미 사용 중인 계정 이름입니다: {}", name)))?;

        log::info!("👤 계정 생성: {} (id={}, role={})", name, id, role_id);

        Ok(user)
    }

    async fn save(&self, user: &LocalUser) -> Result<(), AppError> {
        self.collection::<LocalUser>()
            .replace_one(doc! { "_id": user.id() }, user)
            .await
            .map_err(|e| map_write_error(e, &format!("이미 사용 중인 계정 이름입니다: {}", user.name())))?;

        let _ = self.invalidate_cache(&user.id().to_string()).await;

        Ok(())
    }
}
