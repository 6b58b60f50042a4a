//! API 라우트 설정 모듈
//!
//! SSO 엔드포인트와 헬스체크 엔드포인트를 등록합니다.
//!
//! # Features
//!
//! - 외부 신원 로그인 / 로그아웃
//! - 하위 애플리케이션용 인가 코드, 토큰, 사용자 정보
//! - 헬스체크 엔드포인트
//!
//! 세션은 쿠키로, 토큰과 로그인 공유 비밀값은 `Authorization` 헤더로 전달되므로
//! 라우트 단위의 인증 미들웨어는 없습니다. 각 핸들러가 직접 검사합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use crate::handlers;
use actix_web::web;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    configure_sso_routes(cfg);
}

/// SSO 라우트를 설정합니다
///
/// # Available Routes
///
/// - `POST /api/v1/sso/{provider}/login` - 외부 신원 로그인 (공유 비밀값 필요, `?sso_action=bind`로 강제 재연결)
/// - `POST /api/v1/sso/logout` - 로그아웃
/// - `POST /api/v1/sso/authorize` - 인가 코드 발급 (로그인 세션 필요)
/// - `POST /api/v1/sso/token` - 인가 코드 → 액세스 토큰
/// - `GET /api/v1/sso/userinfo` - 액세스 토큰 → 사용자 정보
///
/// # Examples
///
/// ```bash
/// # 코드 교환
/// curl -X POST http://localhost:8080/api/v1/sso/token \
///   -H "Content-Type: application/json" \
///   -d '{"code":"5f0c..."}'
///
/// # 사용자 정보
/// curl http://localhost:8080/api/v1/sso/userinfo \
///   -H "Authorization: Bearer 9a1e..."
/// ```
fn configure_sso_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/sso")
            .service(handlers::sso::sso_logout)
            .service(handlers::sso::sso_authorize)
            .service(handlers::sso::sso_token)
            .service(handlers::sso::sso_user_info)
            .service(handlers::sso::sso_login)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "sso_account_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "dependency_injection": "Singleton Macro"
        }
    }))
}
