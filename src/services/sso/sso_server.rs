//! # SSO 서버 역할
//!
//! 이 서비스가 다른 애플리케이션의 신원 제공자로 동작할 때의 흐름입니다.
//!
//! ```text
//! 로그인된 세션 ──authorize──▶ 인가 코드 (sso:code:<code>, 1회용)
//! 인가 코드 ──get_access_token──▶ 액세스 토큰 (sso:token:<token>)
//! 액세스 토큰 ──get_user_info──▶ 사용자 정보
//! ```
//!
//! 토큰은 서명 없는 불투명 난수입니다. 저장소에 있는 동안만 유효합니다.

use std::sync::Arc;
use uuid::Uuid;

use crate::config::SsoSettings;
use crate::core::errors::AppError;
use crate::domain::dto::sso::{AccessTokenResponse, AuthorizeResponse, UserInfoResponse};
use crate::domain::entities::users::LocalUser;
use crate::domain::models::sso::SessionContext;
use crate::repositories::traits::{AccountProvider, SessionStore};
use crate::services::sso::role_resolver::RoleResolver;

pub const TOKEN_SCOPE: &str = "basic,UserInfo";

pub struct SsoServer {
    store: Arc<dyn SessionStore>,
    accounts: Arc<dyn AccountProvider>,
    resolver: Arc<RoleResolver>,
    settings: Arc<SsoSettings>,
}

impl SsoServer {
    pub fn new(
        store: Arc<dyn SessionStore>,
        accounts: Arc<dyn AccountProvider>,
        resolver: Arc<RoleResolver>,
        settings: Arc<SsoSettings>,
    ) -> Self {
        Self {
            store,
            accounts,
            resolver,
            settings,
        }
    }

    /// 현재 세션 사용자에게 인가 코드를 발급합니다.
    pub async fn authorize(&self, session: &SessionContext) -> Result<AuthorizeResponse, AppError> {
        let user = session
            .current_user
            .as_ref()
            .ok_or_else(|| AppError::LoginRequired("인가 코드를 받으려면 로그인해야 합니다".to_string()))?;

        let code = Uuid::new_v4().simple().to_string();
        self.store
            .put(&format!("sso:code:{}", code), &user.id().to_string(), self.settings.code_expire)
            .await?;

        log::debug!("인가 코드 발급: user={}", user.id());

        Ok(AuthorizeResponse {
            code,
            expires_in: self.settings.code_expire,
        })
    }

    /// 인가 코드를 소비하고 액세스 토큰을 발급합니다.
    pub async fn get_access_token(&self, code: &str) -> Result<AccessTokenResponse, AppError> {
        let user_id = self
            .store
            .take(&format!("sso:code:{}", code))
            .await?
            .ok_or_else(|| AppError::AuthenticationError("유효하지 않은 인가 코드입니다".to_string()))?;

        let access_token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        self.store
            .put(&format!("sso:token:{}", access_token), &user_id, self.settings.token_expire)
            .await?;

        log::info!("🔑 액세스 토큰 발급: user={}", user_id);

        Ok(AccessTokenResponse {
            access_token,
            expires_in: self.settings.token_expire,
            scope: TOKEN_SCOPE.to_string(),
        })
    }

    pub async fn get_user_info(&self, access_token: &str) -> Result<UserInfoResponse, AppError> {
        let stored = self
            .store
            .get(&format!("sso:token:{}", access_token))
            .await?
            .ok_or_else(|| AppError::AuthenticationError("유효하지 않은 액세스 토큰입니다".to_string()))?;

        let user_id = stored
            .parse::<i64>()
            .map_err(|_| AppError::AuthenticationError("유효하지 않은 액세스 토큰입니다".to_string()))?;

        let user = self
            .accounts
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id)))?;

        self.user_info(&user).await
    }

    /// 확장 계정이면 역할 이름을 찾아 프로필 필드를 함께 채웁니다.
    pub async fn user_info(&self, user: &LocalUser) -> Result<UserInfoResponse, AppError> {
        let role_name = match user.profile() {
            Some(profile) => self.resolver.role_name(profile.role_id).await?,
            None => None,
        };

        Ok(UserInfoResponse::from_user(user, role_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::BasicUser;
    use crate::repositories::memory::{MemoryAccounts, MemoryRoles, MemorySessions};

    struct Fixture {
        store: Arc<MemorySessions>,
        accounts: Arc<MemoryAccounts>,
        server: SsoServer,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemorySessions::new());
        let accounts = Arc::new(MemoryAccounts::new());
        let resolver = Arc::new(RoleResolver::new(Arc::new(MemoryRoles::with_roles(&[(2, "admin")]))));
        let server = SsoServer::new(store.clone(), accounts.clone(), resolver, Arc::new(SsoSettings::default()));
        Fixture { store, accounts, server }
    }

    fn signed_in(f: &Fixture) -> SessionContext {
        let mut user = LocalUser::new_extended(11, "octocat".to_string(), String::new(), 2, true);
        user.profile_mut().unwrap().mail = "octo@example.com".to_string();
        f.accounts.insert(user.clone());
        SessionContext::anonymous("ip").with_user(user)
    }

    #[tokio::test]
    async fn test_authorize_requires_login() {
        let f = fixture();

        let result = f.server.authorize(&SessionContext::anonymous("ip")).await;

        assert!(matches!(result, Err(AppError::LoginRequired(_))));
    }

    #[tokio::test]
    async fn test_code_to_token_to_user_info() {
        let f = fixture();
        let authorized = f.server.authorize(&signed_in(&f)).await.unwrap();
        assert_eq!(f.store.ttl_of(&format!("sso:code:{}", authorized.code)), Some(300));

        let token = f.server.get_access_token(&authorized.code).await.unwrap();
        assert_eq!(token.scope, "basic,UserInfo");
        assert_eq!(token.expires_in, 7200);

        let info = f.server.get_user_info(&token.access_token).await.unwrap();
        assert_eq!(info.userid, 11);
        assert_eq!(info.username, "octocat");
        assert_eq!(info.mail.as_deref(), Some("octo@example.com"));
        assert_eq!(info.roleid, Some(2));
        assert_eq!(info.rolename.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn test_code_is_single_use() {
        let f = fixture();
        let authorized = f.server.authorize(&signed_in(&f)).await.unwrap();

        f.server.get_access_token(&authorized.code).await.unwrap();
        let second = f.server.get_access_token(&authorized.code).await;

        assert!(matches!(second, Err(AppError::AuthenticationError(_))));
    }

    #[tokio::test]
    async fn test_unknown_token_and_missing_user() {
        let f = fixture();
        assert!(matches!(
            f.server.get_user_info("nope").await,
            Err(AppError::AuthenticationError(_))
        ));

        f.store.put("sso:token:orphan", "404", 60).await.unwrap();
        assert!(matches!(
            f.server.get_user_info("orphan").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_basic_user_info_omits_profile() {
        let f = fixture();
        let user = LocalUser::Basic(BasicUser {
            id: 3,
            name: "legacy".to_string(),
            display_name: "Legacy".to_string(),
            enable: true,
            password_hash: String::new(),
        });

        let info = f.server.user_info(&user).await.unwrap();

        assert_eq!(info.nickname, "Legacy");
        assert!(info.mail.is_none());
        assert!(info.rolename.is_none());
    }
}
