//! 영속성 경계 trait
//!
//! SSO 서비스들은 구체 리포지토리 대신 이 trait들에 의존합니다.
//! 운영에서는 MongoDB/Redis 구현이, 테스트에서는 메모리 구현이 주입됩니다.
//!
//! | trait | 운영 구현 |
//! |-------|-----------|
//! | [`AccountProvider`] | [`UserRepository`](super::users::user_repo::UserRepository) |
//! | [`RoleStore`] | [`RoleRepository`](super::roles::role_repo::RoleRepository) |
//! | [`IdentityLinkStore`] | [`IdentityLinkRepository`](super::links::identity_link_repo::IdentityLinkRepository) |
//! | [`SessionStore`] | [`RedisClient`](crate::caching::redis::RedisClient) |
//!
//! 이름 중복처럼 유니크 제약을 어기는 쓰기는 모두 `AppError::ConflictError`로
//! 보고됩니다. 호출하는 쪽은 이 에러를 받으면 다시 조회해서 먼저 쓴 쪽을 사용합니다.

use async_trait::async_trait;

use crate::core::errors::AppError;
use crate::domain::entities::{links::IdentityLink, roles::Role, users::LocalUser};

/// 로컬 계정 저장소
#[async_trait]
pub trait AccountProvider: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<LocalUser>, AppError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<LocalUser>, AppError>;

    /// 새 계정을 만듭니다. 평문 비밀번호는 저장 전에 해싱됩니다.
    ///
    /// 이름이 이미 있으면 `ConflictError`.
    async fn register(&self, name: &str, password: &str, role_id: i64, enable: bool) -> Result<LocalUser, AppError>;

    async fn save(&self, user: &LocalUser) -> Result<(), AppError>;
}

/// 역할 저장소
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Role>, AppError>;

    /// 이름이 이미 있으면 `ConflictError`.
    async fn insert(&self, name: &str) -> Result<Role, AppError>;
}

/// 외부 신원 연결 저장소
#[async_trait]
pub trait IdentityLinkStore: Send + Sync {
    async fn find(&self, provider: &str, open_id: &str) -> Result<Option<IdentityLink>, AppError>;

    /// `(provider, open_id)` 기준 upsert
    async fn save(&self, link: &IdentityLink) -> Result<(), AppError>;
}

/// TTL 기반 키-값 저장소 (세션, 인가 코드, 액세스 토큰)
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), AppError>;

    /// 읽고 삭제합니다. 동시에 호출되어도 값은 한 번만 반환됩니다.
    async fn take(&self, key: &str) -> Result<Option<String>, AppError>;

    async fn remove(&self, key: &str) -> Result<(), AppError>;
}
