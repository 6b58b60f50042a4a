//! 캐싱 계층 모듈
//!
//! Redis 기반 리포지토리 캐시와 SSO 세션 저장소를 제공합니다.
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set_with_expiry("sso:session:abc", &session, 86400).await?;
//! ```
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
