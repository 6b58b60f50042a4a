//! # Application Error Handling System
//!
//! SSO 계정 연동 서비스 전역에서 사용하는 에러 타입입니다.
//! `thiserror`로 `Error` trait을 구현하고, `actix_web::ResponseError`를 구현하여
//! 핸들러에서 `?`로 전파된 에러가 그대로 HTTP 응답으로 변환됩니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 요청 본문 검증 실패 |
//! | `MalformedInput` | 400 Bad Request | 아바타 참조 없음, 식별자 없는 외부 신원 |
//! | `NotFound` | 404 Not Found | 리소스 없음 |
//! | `ConflictError` | 409 Conflict | 유니크 제약 위반 (이름 중복 등) |
//! | `AuthenticationError` | 401 Unauthorized | 잘못된 인가 코드/토큰 |
//! | `LoginRequired` | 401 Unauthorized | 자동 가입 비활성 + 세션 없음 |
//! | `AuthorizationError` | 403 Forbidden | 권한 부족 |
//! | `AccountDisabled` | 403 Forbidden | 비활성화된 로컬 계정 |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 오류 |
//! | `RedisError` | 500 Internal Server Error | 세션 저장소 오류 |
//! | `ExternalServiceError` | 500 Internal Server Error | 외부 API 오류 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! ## 전파 정책
//!
//! - 정책 위반(`AccountDisabled`, `LoginRequired`)은 호출자에게 명시적으로 전달됩니다.
//! - 아바타 캐싱 같은 부가 작업의 실패는 로그만 남기고 로그인 흐름을 실패시키지 않습니다.
//! - 이 계층에는 자동 재시도가 없습니다. 영속 계층의 충돌 재조회만 예외입니다.
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! if !user.is_enabled() {
//!     return Err(AppError::AccountDisabled(format!("사용자 {} 는 비활성화되었습니다", user.name())));
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// ## 에러 카테고리
///
/// ### 1. 인프라 계층 에러
/// - `DatabaseError`, `RedisError`, `ExternalServiceError`
///
/// ### 2. 비즈니스 계층 에러
/// - `ValidationError`, `MalformedInput`, `ConflictError`, `NotFound`
///
/// ### 3. 로그인 정책 에러
/// - `AccountDisabled`: 연결된 로컬 계정이 비활성 상태
/// - `LoginRequired`: 바인딩에 로컬 로그인이 필요함
///
/// ### 4. 보안 계층 에러
/// - `AuthenticationError`, `AuthorizationError`
///
/// ### 5. 시스템 계층 에러
/// - `InternalError`
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러
    ///
    /// MongoDB 연산 중 발생하는 오류입니다. 중복 키(11000) 오류는
    /// 이 변형이 아니라 `ConflictError`로 변환됩니다.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 세션/토큰 저장소 에러
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 데이터 무결성 에러 (400)
    ///
    /// 호출자가 채워야 할 값이 아예 없는 경우입니다.
    /// 일시적인 오류가 아니므로 삼키지 않고 그대로 전파합니다.
    ///
    /// # 발생 시나리오
    /// - 아바타 참조가 비어있는 사용자에 대해 아바타 수집 호출
    /// - 프로바이더 이름이 없거나 식별자가 전혀 없는 외부 신원
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// 리소스 찾을 수 없음 에러 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409)
    ///
    /// 영속 계층의 유니크 제약 위반을 나타냅니다. 계정 등록과 역할 생성은
    /// 이 에러를 받으면 이름으로 재조회하여 먼저 생성된 레코드를 사용합니다.
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 로컬 로그인 필요 (401)
    ///
    /// 현재 세션에 로그인한 사용자가 없고 자동 가입이 꺼져 있어
    /// 외부 계정을 바인딩할 대상이 없을 때 발생합니다.
    #[error("Login required: {0}")]
    LoginRequired(String),

    /// 권한 부족 에러 (403)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 비활성 계정 (403)
    ///
    /// 연동/프로필 갱신은 이미 저장된 상태이며, 세션 활성화만 거부됩니다.
    #[error("Account disabled: {0}")]
    AccountDisabled(String),

    /// 외부 서비스 에러 (500)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) | AppError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) | AppError::LoginRequired(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) | AppError::AccountDisabled(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 모든 에러는 `{"error": "<메시지>"}` 형식의 JSON으로 응답합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::RedisError(e.to_string())
    }
}
