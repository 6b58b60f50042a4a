//! SSO HTTP 핸들러
//!
//! 세션은 `sso_session` 쿠키에 담긴 세션 ID로 식별합니다.
//! 서비스는 `main`에서 `ServiceLocator`에 등록된 인스턴스를 사용합니다.

use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::http::header;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde_json::json;
use subtle::ConstantTimeEq;
use validator::Validate;

use crate::config::SsoSettings;
use crate::core::errors::AppError;
use crate::core::registry::ServiceLocator;
use crate::domain::dto::sso::{AccessTokenRequest, SsoActionQuery, SsoLoginRequest};
use crate::domain::models::sso::SessionContext;
use crate::services::sso::{LoginReconciler, SessionService, SsoServer, SESSION_COOKIE_NAME};

/// 외부 프로바이더가 검증한 신원으로 로그인합니다.
///
/// 호출자는 OAuth 클라이언트이며 `Authorization: Bearer <SSO_LOGIN_SECRET>`로 인증합니다.
/// `?sso_action=bind`이면 현재 세션 계정으로 강제 재연결합니다.
/// 성공하면 새 세션 ID를 발급해 쿠키로 심고 성공 주소로 302 리다이렉트합니다.
///
/// ```bash
/// curl -X POST "http://localhost:8080/api/v1/sso/github/login" \
///   -H "Authorization: Bearer $SSO_LOGIN_SECRET" \
///   -H "Content-Type: application/json" \
///   -d '{"open_id":"1001","user_name":"octocat","items":{"email":"octo@example.com"}}'
/// ```
#[post("/{provider}/login")]
pub async fn sso_login(
    req: HttpRequest,
    provider: web::Path<String>,
    query: web::Query<SsoActionQuery>,
    payload: web::Json<SsoLoginRequest>,
) -> Result<HttpResponse, AppError> {
    authenticate_login_caller(&req, &ServiceLocator::get::<SsoSettings>())?;

    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let sessions = ServiceLocator::get::<SessionService>();
    let reconciler = ServiceLocator::get::<LoginReconciler>();

    let previous_id = session_id(&req);
    let mut session = sessions
        .load(previous_id.as_deref(), &client_ip(&req), query.is_force_bind())
        .await?;

    let identity = payload.into_inner().into_identity(&provider);
    let target = reconciler.reconcile(&identity, &mut session).await?;

    let session_id = sessions.renew(previous_id.as_deref(), &session).await?;

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, target))
        .cookie(session_cookie(&session_id, sessions.session_expire()))
        .finish())
}

#[post("/logout")]
pub async fn sso_logout(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let Some(session_id) = session_id(&req) else {
        return Ok(HttpResponse::Ok().json(json!({ "message": "로그아웃 되었습니다" })));
    };

    let sessions = ServiceLocator::get::<SessionService>();
    let mut session = sessions.load(Some(&session_id), &client_ip(&req), false).await?;
    sessions.logout(&mut session);
    sessions.commit(&session_id, &session).await?;

    let mut removal = Cookie::new(SESSION_COOKIE_NAME, "");
    removal.set_path("/");
    removal.make_removal();

    Ok(HttpResponse::Ok()
        .cookie(removal)
        .json(json!({ "message": "로그아웃 되었습니다" })))
}

/// 현재 세션 사용자에게 인가 코드를 발급합니다.
#[post("/authorize")]
pub async fn sso_authorize(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let session = current_session(&req).await?;
    let response = ServiceLocator::get::<SsoServer>().authorize(&session).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("/token")]
pub async fn sso_token(payload: web::Json<AccessTokenRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = ServiceLocator::get::<SsoServer>()
        .get_access_token(&payload.code)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// `Authorization: Bearer <token>`
#[get("/userinfo")]
pub async fn sso_user_info(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let auth_header = req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = extract_bearer_token(auth_header)?;
    let response = ServiceLocator::get::<SsoServer>().get_user_info(token).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 로그인 호출자가 공유 비밀값을 제시했는지 확인합니다.
///
/// 설정된 비밀값이 비어있으면 모든 호출을 거부합니다.
fn authenticate_login_caller(req: &HttpRequest, settings: &SsoSettings) -> Result<(), AppError> {
    let auth_header = req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let presented = extract_bearer_token(auth_header)?;

    if !secret_matches(presented, &settings.login_secret) {
        log::warn!("🚫 로그인 호출자 인증 실패: {}", client_ip(req));
        return Err(AppError::AuthenticationError("로그인 호출자 인증에 실패했습니다".to_string()));
    }
    Ok(())
}

fn secret_matches(presented: &str, expected: &str) -> bool {
    !expected.is_empty() && bool::from(presented.as_bytes().ct_eq(expected.as_bytes()))
}

async fn current_session(req: &HttpRequest) -> Result<SessionContext, AppError> {
    let id = session_id(req);
    ServiceLocator::get::<SessionService>()
        .load(id.as_deref(), &client_ip(req), false)
        .await
}

fn session_id(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

fn client_ip(req: &HttpRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .unwrap_or_default()
        .to_string()
}

fn session_cookie(session_id: &str, max_age_seconds: u64) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE_NAME, session_id.to_string())
        .path("/")
        .http_only(true)
        .max_age(CookieDuration::seconds(max_age_seconds as i64))
        .finish()
}

fn extract_bearer_token(auth_header: &str) -> Result<&str, AppError> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string()))
}

#[cfg(test)]
pub(crate) const TEST_LOGIN_SECRET: &str = "collaborator-secret";

/// 메모리 저장소 위에 SSO 서비스를 조립해 `ServiceLocator`에 한 번만 등록합니다.
#[cfg(test)]
pub(crate) fn install_test_services() {
    use std::sync::{Arc, Once};

    use crate::repositories::memory::{MemoryAccounts, MemoryLinks, MemoryRoles, MemorySessions};
    use crate::repositories::traits::{AccountProvider, SessionStore};
    use crate::services::sso::{AccountLinker, AvatarFetcher, ProfileMerger, RoleResolver};

    static INSTALL: Once = Once::new();

    INSTALL.call_once(|| {
        let settings = Arc::new(SsoSettings {
            login_secret: TEST_LOGIN_SECRET.to_string(),
            ..SsoSettings::default()
        });
        let accounts: Arc<dyn AccountProvider> = Arc::new(MemoryAccounts::new());
        let store: Arc<dyn SessionStore> = Arc::new(MemorySessions::new());

        let resolver = Arc::new(RoleResolver::new(Arc::new(MemoryRoles::default())));
        let merger = Arc::new(ProfileMerger::new(
            resolver.clone(),
            Arc::new(AvatarFetcher::new(std::env::temp_dir())),
            settings.clone(),
        ));
        let linker = Arc::new(AccountLinker::new(accounts.clone(), resolver.clone(), settings.clone()));

        ServiceLocator::set(settings.clone());
        ServiceLocator::set(Arc::new(LoginReconciler::new(
            Arc::new(MemoryLinks::new()),
            accounts.clone(),
            linker,
            merger,
            settings.clone(),
        )));
        ServiceLocator::set(Arc::new(SessionService::new(store.clone(), accounts.clone(), settings.clone())));
        ServiceLocator::set(Arc::new(SsoServer::new(store, accounts, resolver, settings)));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::{self, TestRequest};
    use actix_web::App;

    fn login_request(authorization: Option<&str>) -> TestRequest {
        let req = TestRequest::post()
            .uri("/github/login")
            .peer_addr("203.0.113.7:40000".parse().unwrap())
            .set_json(json!({ "open_id": "1001", "user_name": "octocat" }));

        match authorization {
            Some(value) => req.insert_header((header::AUTHORIZATION, value)),
            None => req,
        }
    }

    #[test]
    fn test_secret_matches() {
        assert!(secret_matches("s3cret", "s3cret"));
        assert!(!secret_matches("s3cre", "s3cret"));
        assert!(!secret_matches("other!", "s3cret"));
        assert!(!secret_matches("", ""));
        assert!(!secret_matches("anything", ""));
    }

    #[actix_web::test]
    async fn test_login_without_secret_is_unauthorized() {
        install_test_services();
        let app = test::init_service(App::new().service(sso_login)).await;

        let missing = test::call_service(&app, login_request(None).to_request()).await;
        let wrong = test::call_service(&app, login_request(Some("Bearer guessed")).to_request()).await;

        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        assert!(missing.response().cookies().next().is_none());
    }

    #[actix_web::test]
    async fn test_login_issues_fresh_session_id() {
        install_test_services();
        let app = test::init_service(App::new().service(sso_login)).await;
        let authorization = format!("Bearer {}", TEST_LOGIN_SECRET);

        let req = login_request(Some(authorization.as_str()))
            .cookie(Cookie::new(SESSION_COOKIE_NAME, "planted-by-attacker"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).and_then(|value| value.to_str().ok()),
            Some("/admin")
        );

        let issued = resp
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
            .unwrap();
        assert!(!issued.is_empty());
        assert_ne!(issued, "planted-by-attacker");

        let sessions = ServiceLocator::get::<SessionService>();
        let planted = sessions.load(Some("planted-by-attacker"), "ip", false).await.unwrap();
        let renewed = sessions.load(Some(&issued), "ip", false).await.unwrap();
        assert!(!planted.is_authenticated());
        assert_eq!(renewed.current_user.unwrap().name(), "octocat");
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc123").unwrap(), "abc123");
        assert!(extract_bearer_token("Basic abc123").is_err());
        assert!(extract_bearer_token("Bearer ").is_err());
    }

    #[test]
    fn test_session_id_from_cookie() {
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE_NAME, "s-1"))
            .to_http_request();
        assert_eq!(session_id(&req).as_deref(), Some("s-1"));

        let req = TestRequest::default().to_http_request();
        assert_eq!(session_id(&req), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("s-1", 600);

        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(CookieDuration::seconds(600)));
    }

    #[test]
    fn test_client_ip_uses_peer_address() {
        let req = TestRequest::default()
            .peer_addr("198.51.100.4:55000".parse().unwrap())
            .to_http_request();

        assert_eq!(client_ip(&req), "198.51.100.4");
    }
}
