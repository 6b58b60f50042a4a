//! # Core Framework Module
//!
//! 서비스 전역에서 사용하는 핵심 기능을 제공하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 타입 기반 싱글톤 컨테이너
//! - **자동 레지스트리**: `inventory` 기반 `#[repository]` 등록 수집
//! - **수동 등록**: `Database`, `RedisClient`, SSO 서비스 등은 `ServiceLocator::set()`으로 등록
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현
//!
//! ## 초기화 순서
//!
//! ```rust,ignore
//! ServiceLocator::set(database);
//! ServiceLocator::set(redis_client);
//! ServiceLocator::initialize_all().await?;
//!
//! // 리포지토리 싱글톤 위에 SSO 서비스 조립
//! let users: Arc<dyn AccountProvider> = UserRepository::instance();
//! ServiceLocator::set(Arc::new(LoginReconciler::new(/* ... */)));
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
