//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 요청을 DTO로 받아 검증하고, 서비스에 위임한 뒤 결과를 응답으로 바꾸는 일만 합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   외부 프로바이더 콜백 / 하위 애플리케이션
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈)                    ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   services::sso                         ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories (MongoDB, Redis)         ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환합니다.
//! `AppError`가 `ResponseError`를 구현하므로 `?`로 전파된 에러는
//! `{"error": "..."}` 본문과 알맞은 상태 코드로 변환됩니다.
//!
//! | 에러 | 상태 |
//! |------|------|
//! | `ValidationError`, `MalformedInput` | 400 |
//! | `LoginRequired`, `AuthenticationError` | 401 |
//! | `AccountDisabled` | 403 |
//!
//! ## 모듈 구성
//!
//! - **`sso`**: SSO 엔드포인트 (`/api/v1/sso`)
//!   - 외부 신원 로그인 (`POST /{provider}/login`)
//!   - 로그아웃 (`POST /logout`)
//!   - 인가 코드 발급 (`POST /authorize`)
//!   - 토큰 교환 (`POST /token`)
//!   - 사용자 정보 (`GET /userinfo`)

pub mod sso;
