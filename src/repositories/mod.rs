//! 데이터 액세스 계층
//!
//! `#[repository]` 매크로로 싱글톤 관리되는 MongoDB 리포지토리들과,
//! 서비스가 의존하는 영속성 trait을 제공합니다.
//!
//! ```text
//! services ──▶ traits (AccountProvider, RoleStore, IdentityLinkStore, SessionStore)
//!                 ▲
//!                 ├── users::UserRepository           (users)
//!                 ├── roles::RoleRepository           (roles)
//!                 ├── links::IdentityLinkRepository   (identity_links)
//!                 └── caching::redis::RedisClient     (sso:* 키)
//! ```
//!
//! ```rust,ignore
//! use crate::repositories::users::user_repo::UserRepository;
//!
//! let accounts: Arc<dyn AccountProvider> = UserRepository::instance();
//! ```

pub mod traits;
pub mod sequences;
pub mod users;
pub mod roles;
pub mod links;

#[cfg(test)]
pub mod memory;
