//! # Data Transfer Objects (DTO) Module
//!
//! HTTP 경계에서 주고받는 요청/응답 구조입니다. 요청 DTO는 `validator`로
//! 형식을 검증한 뒤 도메인 모델로 변환합니다.
//!
//! | 방향 | 타입 |
//! |------|------|
//! | 요청 | [`SsoLoginRequest`](sso::SsoLoginRequest), [`AccessTokenRequest`](sso::AccessTokenRequest), [`SsoActionQuery`](sso::SsoActionQuery) |
//! | 응답 | [`AccessTokenResponse`](sso::AccessTokenResponse), [`UserInfoResponse`](sso::UserInfoResponse), [`AuthorizeResponse`](sso::AuthorizeResponse) |

pub mod sso;
