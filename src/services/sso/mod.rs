//! # SSO 서비스
//!
//! | 모듈 | 역할 |
//! |------|------|
//! | [`login_reconciler`] | 로그인 전체 흐름 조정 |
//! | [`account_linker`] | 외부 신원을 연결할 로컬 계정 선택/생성 |
//! | [`profile_merger`] | 외부 클레임을 로컬 프로필에 반영 |
//! | [`role_resolver`] | 클레임 → 역할 ID |
//! | [`avatar_fetcher`] | 원격 아바타 로컬 캐시 |
//! | [`session_service`] | 세션 쿠키 ↔ 로그인 사용자 |
//! | [`sso_server`] | 하위 애플리케이션용 코드/토큰/사용자 정보 |
//!
//! 모두 `Arc<dyn Trait>` 저장소 위에 만들어지는 일반 구조체이며,
//! `main`에서 조립한 뒤 `ServiceLocator::set`으로 등록합니다.
//!
//! ```rust,ignore
//! let reconciler = ServiceLocator::get::<LoginReconciler>();
//! let target = reconciler.reconcile(&identity, &mut session).await?;
//! ```

pub mod account_linker;
pub mod avatar_fetcher;
pub mod login_reconciler;
pub mod profile_merger;
pub mod role_resolver;
pub mod session_service;
pub mod sso_server;

pub use account_linker::AccountLinker;
pub use avatar_fetcher::AvatarFetcher;
pub use login_reconciler::LoginReconciler;
pub use profile_merger::ProfileMerger;
pub use role_resolver::RoleResolver;
pub use session_service::{SessionService, SESSION_COOKIE_NAME};
pub use sso_server::SsoServer;
