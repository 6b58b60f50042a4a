//! # Domain Layer Module
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB에 저장되는 계정, 역할, 외부 신원 연결
//! ├── models    - 요청 단위 모델 (외부 신원, 클레임, 세션 컨텍스트)
//! └── dto       - HTTP 요청/응답
//!      │
//!      ▼
//! Services (SSO 계정 조정)
//!      │
//!      ▼
//! Repositories (MongoDB, Redis)
//! ```
//!
//! ## 로그인 한 번의 데이터 흐름
//!
//! ```text
//! SsoLoginRequest ──into_identity()──▶ ExternalIdentity
//!                                           │
//!                  IdentityLink ◀──find/new─┤
//!                                           ▼
//!                                      LocalUser (기존 / 신규 가입)
//!                                           │ 프로필 병합, 로그인 통계
//!                                           ▼
//!                                     SessionContext::activate
//! ```

pub mod entities;
pub mod dto;
pub mod models;
