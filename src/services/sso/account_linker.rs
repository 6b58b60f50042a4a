//! # 계정 연결 (bind)
//!
//! 외부 신원 연결이 유효하지 않거나 강제 재연결이 요청됐을 때,
//! 연결할 로컬 계정을 고르거나 새로 만듭니다.
//!
//! ```text
//! 세션 사용자 있음? ──yes──▶ 그 계정에 연결
//!        │ no
//!        ▼
//! 자동 가입 허용? ──no──▶ LoginRequired
//!        │ yes
//!        ▼
//! 후보 이름
//!   ├─ 외부 사용자명 있음: 같은 이름의 계정이 있으면 "<provider>_<사용자명>"
//!   └─ 외부 사용자명 없음: "<provider>_<CRC-32 8자리 16진수>"
//!        │
//!        ▼
//! 후보 이름 계정 없음 ──▶ 임의 비밀번호로 가입 (이름 충돌 시 먼저 가입한 계정 사용)
//! ```
//!
//! 연결 레코드 저장은 호출자 책임입니다.

use std::sync::Arc;
use uuid::Uuid;

use crate::config::{DefaultRolePolicy, SsoSettings};
use crate::core::errors::AppError;
use crate::domain::entities::{links::IdentityLink, users::LocalUser};
use crate::domain::models::sso::{ExternalIdentity, SessionContext};
use crate::repositories::traits::AccountProvider;
use crate::services::sso::role_resolver::RoleResolver;

const GENERATED_PASSWORD_LENGTH: usize = 16;

pub struct AccountLinker {
    accounts: Arc<dyn AccountProvider>,
    resolver: Arc<RoleResolver>,
    settings: Arc<SsoSettings>,
}

/// `<provider>_<CRC-32 대문자 8자리>`
pub fn checksum_name(provider: &str, source: &str) -> String {
    format!("{}_{:08X}", provider, crc32fast::hash(source.as_bytes()))
}

fn generate_password() -> String {
    let mut password = Uuid::new_v4().simple().to_string();
    password.truncate(GENERATED_PASSWORD_LENGTH);
    password
}

impl AccountLinker {
    pub fn new(accounts: Arc<dyn AccountProvider>, resolver: Arc<RoleResolver>, settings: Arc<SsoSettings>) -> Self {
        Self {
            accounts,
            resolver,
            settings,
        }
    }

    /// 연결할 계정을 정하고 `link`를 그 계정에 묶어 활성화합니다.
    ///
    /// # Errors
    ///
    /// * `LoginRequired` - 세션 사용자가 없고 자동 가입이 꺼져 있음
    /// * `MalformedInput` - 사용자명도 없고 체크섬을 만들 값도 없음
    pub async fn bind(
        &self,
        link: &mut IdentityLink,
        identity: &ExternalIdentity,
        session: &SessionContext,
    ) -> Result<LocalUser, AppError> {
        let user = match &session.current_user {
            Some(current) => {
                log::info!(
                    "🔗 세션 계정에 연결: {}/{} → {}",
                    identity.provider, link.open_id, current.name()
                );
                current.clone()
            }
            None => {
                if !self.settings.auto_register {
                    return Err(AppError::LoginRequired(
                        "외부 계정을 연결하려면 먼저 로그인해야 합니다".to_string(),
                    ));
                }
                self.find_or_register(identity).await?
            }
        };

        link.bind_to(user.id());

        Ok(user)
    }

    async fn find_or_register(&self, identity: &ExternalIdentity) -> Result<LocalUser, AppError> {
        let (name, existing) = self.resolve_candidate(identity).await?;

        if let Some(user) = existing {
            log::info!("🔗 기존 계정에 연결: {}", user.name());
            return Ok(user);
        }

        let role_id = match self.settings.default_role {
            DefaultRolePolicy::Fixed(role_id) => role_id,
            policy => {
                self.resolver
                    .resolve_role(&identity.items, policy.allows_role_creation())
                    .await?
            }
        };

        match self.accounts.register(&name, &generate_password(), role_id, true).await {
            Ok(user) => {
                log::info!("🆕 SSO 자동 가입: {} (provider={}, role={})", name, identity.provider, role_id);
                Ok(user)
            }
            Err(AppError::ConflictError(_)) => {
                log::debug!("가입 경합, 먼저 만들어진 계정 사용: {}", name);
                self.accounts
                    .find_by_name(&name)
                    .await?
                    .ok_or_else(|| AppError::ConflictError(format!("계정을 찾을 수 없습니다: {}", name)))
            }
            Err(e) => Err(e),
        }
    }

    /// 후보 이름과, 그 이름의 기존 계정
    async fn resolve_candidate(&self, identity: &ExternalIdentity) -> Result<(String, Option<LocalUser>), AppError> {
        let name = match identity.user_name() {
            Some(user_name) => {
                if self.accounts.find_by_name(user_name).await?.is_none() {
                    return Ok((user_name.to_string(), None));
                }
                // 이름 충돌: 프로바이더 접두사를 붙여 다시 찾음
                format!("{}_{}", identity.provider, user_name)
            }
            None => {
                let source = identity.checksum_source().ok_or_else(|| {
                    AppError::MalformedInput("open_id와 access_token이 모두 비어있습니다".to_string())
                })?;
                checksum_name(&identity.provider, source)
            }
        };

        let existing = self.accounts.find_by_name(&name).await?;
        Ok((name, existing))
    }
}
