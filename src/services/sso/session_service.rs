//! # 로그인 세션
//!
//! 세션 쿠키 값(세션 ID)과 로그인 사용자 ID를 [`SessionStore`]에 보관합니다.
//!
//! | 키 | 값 | TTL |
//! |----|----|-----|
//! | `sso:session:<id>` | 사용자 ID | `SSO_SESSION_EXPIRE_SECONDS` |

use std::sync::Arc;
use uuid::Uuid;

use crate::config::SsoSettings;
use crate::core::errors::AppError;
use crate::domain::models::sso::SessionContext;
use crate::repositories::traits::{AccountProvider, SessionStore};

pub const SESSION_COOKIE_NAME: &str = "sso_session";

pub struct SessionService {
    store: Arc<dyn SessionStore>,
    accounts: Arc<dyn AccountProvider>,
    settings: Arc<SsoSettings>,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>, accounts: Arc<dyn AccountProvider>, settings: Arc<SsoSettings>) -> Self {
        Self {
            store,
            accounts,
            settings,
        }
    }

    pub fn new_session_id() -> String {
        Uuid::new_v4().simple().to_string()
    }

    fn session_key(session_id: &str) -> String {
        format!("sso:session:{}", session_id)
    }

    pub fn session_expire(&self) -> u64 {
        self.settings.session_expire
    }

    /// 세션 ID로 컨텍스트를 복원합니다.
    ///
    /// 세션이 없거나 만료됐거나 사용자가 사라졌으면 익명 컨텍스트입니다.
    pub async fn load(&self, session_id: Option<&str>, client_ip: &str, force_bind: bool) -> Result<SessionContext, AppError> {
        let session = SessionContext::anonymous(client_ip).with_force_bind(force_bind);

        let Some(session_id) = session_id.filter(|id| !id.is_empty()) else {
            return Ok(session);
        };

        let Some(stored) = self.store.get(&Self::session_key(session_id)).await? else {
            return Ok(session);
        };

        let Ok(user_id) = stored.parse::<i64>() else {
            log::warn!("손상된 세션 값 제거: {}", session_id);
            self.store.remove(&Self::session_key(session_id)).await?;
            return Ok(session);
        };

        match self.accounts.find_by_id(user_id).await? {
            Some(user) => Ok(session.with_user(user)),
            None => {
                log::debug!("세션 사용자 없음: user_id={}", user_id);
                Ok(session)
            }
        }
    }

    /// 컨텍스트를 저장합니다. 익명이면 세션 키를 지웁니다.
    pub async fn commit(&self, session_id: &str, session: &SessionContext) -> Result<(), AppError> {
        let key = Self::session_key(session_id);

        match &session.current_user {
            Some(user) => {
                self.store
                    .put(&key, &user.id().to_string(), self.settings.session_expire)
                    .await
            }
            None => self.store.remove(&key).await,
        }
    }

    /// 새 세션 ID로 컨텍스트를 저장하고 이전 세션 키를 지웁니다.
    ///
    /// 로그인 성공 시 호출해 로그인 전 세션 ID가 그대로 인증 세션이 되지 않게 합니다.
    pub async fn renew(&self, previous_id: Option<&str>, session: &SessionContext) -> Result<String, AppError> {
        let session_id = Self::new_session_id();
        self.commit(&session_id, session).await?;

        if let Some(previous_id) = previous_id.filter(|id| !id.is_empty() && *id != session_id) {
            self.store.remove(&Self::session_key(previous_id)).await?;
        }

        Ok(session_id)
    }

    pub fn logout(&self, session: &mut SessionContext) {
        if let Some(user) = &session.current_user {
            log::info!("👋 로그아웃: {}", user.name());
        }
        session.clear();
    }
}
