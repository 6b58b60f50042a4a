//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 중앙에서 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버 바인딩, 비밀번호 해싱 설정
//! - [`sso_config`] - SSO 계정 연동 정책 (자동 가입, 기본 역할, 아바타, 만료 시간)
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{ServerConfig, SsoSettings};
//!
//! let settings = SsoSettings::from_env();
//! log::info!("SSO auto register: {}", settings.auto_register);
//! log::info!("Server will bind to {}", ServerConfig::bind_address());
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! export ENVIRONMENT="production"  # development, test, staging, production
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export BCRYPT_COST="12"          # 4-15 범위
//!
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="sso_account"
//! export REDIS_URL="redis://localhost:6379"
//!
//! export SSO_AUTO_REGISTER="true"
//! export SSO_DEFAULT_ROLE="0"
//! export SSO_AVATAR_PATH="/var/lib/sso/avatars"
//! export SSO_LOGIN_SECRET="change-me"
//! ```

pub mod data_config;
pub mod sso_config;

pub use data_config::*;
pub use sso_config::*;
