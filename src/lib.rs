//! SSO 계정 조정 서비스
//!
//! 외부 신원 제공자(OAuth/OIDC)가 검증을 마친 신원 정보를 받아
//! 로컬 계정과 연결하고, 필요하면 계정을 만들고, 프로필을 병합한 뒤 세션을 활성화합니다.
//!
//! # Features
//!
//! - **신원 연결**: `(provider, open_id)` 당 연결 레코드 하나, 강제 재연결 지원
//! - **자동 가입**: 이름 충돌 회피, 사용자명이 없으면 체크섬 이름
//! - **프로필 병합**: 비어있는 필드만 채움, 역할은 정책에 따름
//! - **아바타 캐시**: 원격 아바타를 한 번만 내려받음 (5초 제한)
//! - **SSO 서버**: 하위 애플리케이션용 인가 코드 / 액세스 토큰 / 사용자 정보
//! - **싱글톤 DI**: 매크로 기반 리포지토리 등록과 `ServiceLocator`
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /api/v1/sso
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 쿠키 세션, 요청 검증
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  services::sso  │ ← 조정 / 연결 / 병합 / 역할 / 아바타
//! └─────────────────┘
//!          │ Arc<dyn Trait>
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 계정, 역할, 연결, 세션 저장소
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use sso_account_service::core::registry::ServiceLocator;
//! use sso_account_service::domain::models::sso::SessionContext;
//! use sso_account_service::services::sso::LoginReconciler;
//!
//! let reconciler = ServiceLocator::get::<LoginReconciler>();
//! let mut session = SessionContext::anonymous("203.0.113.7");
//! let target = reconciler.reconcile(&identity, &mut session).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
