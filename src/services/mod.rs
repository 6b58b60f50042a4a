//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! SSO 로그인 조정과, 이 서비스가 신원 제공자로 동작할 때의
//! 코드/토큰 발급을 담당합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::sso::{LoginReconciler, SsoServer};
//!
//! let reconciler = ServiceLocator::get::<LoginReconciler>();
//! let sso_server = ServiceLocator::get::<SsoServer>();
//! ```

pub mod sso;
