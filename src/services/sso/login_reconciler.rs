//! # SSO 로그인 조정
//!
//! 검증된 외부 신원 하나를 받아 로컬 계정 세션을 활성화하기까지의 전체 흐름입니다.
//!
//! ```text
//!  1. 외부 ID 결정 (open_id → 외부 사용자명 → 액세스 토큰)
//!  2. 연결 레코드 조회, 없으면 메모리에 비활성 레코드 생성
//!  3. 연결 레코드 스냅샷 갱신
//!  4. 연결 계정 조회
//!  5. 강제 재연결 / 계정 없음 / 연결 비활성 → AccountLinker::bind
//!  6. 프로필 병합
//!  7. 확장 계정이면 로그인 통계 기록 후 저장
//!  8. 연결 레코드 저장
//!  9. 비활성 계정 → AccountDisabled (6-8은 이미 반영됨)
//! 10. 세션 활성화
//! 11. 성공 후 이동 주소 반환
//! ```

use std::sync::Arc;
use chrono::Utc;

use crate::config::SsoSettings;
use crate::core::errors::AppError;
use crate::domain::entities::{links::IdentityLink, users::LocalUser};
use crate::domain::models::sso::{ExternalIdentity, SessionContext};
use crate::repositories::traits::{AccountProvider, IdentityLinkStore};
use crate::services::sso::account_linker::AccountLinker;
use crate::services::sso::profile_merger::ProfileMerger;

pub struct LoginReconciler {
    links: Arc<dyn IdentityLinkStore>,
    accounts: Arc<dyn AccountProvider>,
    linker: Arc<AccountLinker>,
    merger: Arc<ProfileMerger>,
    settings: Arc<SsoSettings>,
}

impl LoginReconciler {
    pub fn new(
        links: Arc<dyn IdentityLinkStore>,
        accounts: Arc<dyn AccountProvider>,
        linker: Arc<AccountLinker>,
        merger: Arc<ProfileMerger>,
        settings: Arc<SsoSettings>,
    ) -> Self {
        Self {
            links,
            accounts,
            linker,
            merger,
            settings,
        }
    }

    /// 외부 신원으로 로그인하고 이동할 주소를 돌려줍니다.
    ///
    /// # Errors
    ///
    /// * `MalformedInput` - 프로바이더 이름이 없거나, open_id / 사용자명 / 액세스 토큰이 모두 없음
    /// * `LoginRequired` - 연결이 필요한데 세션 사용자가 없고 자동 가입이 꺼져 있음
    /// * `AccountDisabled` - 계정이 비활성. 연결과 프로필은 이미 저장됨
    pub async fn reconcile(&self, identity: &ExternalIdentity, session: &mut SessionContext) -> Result<String, AppError> {
        if identity.provider.trim().is_empty() {
            return Err(AppError::MalformedInput("프로바이더 이름이 없습니다".to_string()));
        }
        let subject_id = identity.subject_id().ok_or_else(|| {
            AppError::MalformedInput(format!("{}: open_id, user_name, access_token이 모두 비어있습니다", identity.provider))
        })?;

        let mut link = match self.links.find(&identity.provider, subject_id).await? {
            Some(link) => link,
            None => {
                log::debug!("새 외부 신원: {}/{}", identity.provider, subject_id);
                IdentityLink::new(&identity.provider, subject_id)
            }
        };
        link.refresh_snapshot(identity);

        let linked_user = self.linked_user(&link).await?;

        let mut user = match linked_user {
            Some(user) if !session.force_bind && link.enable => user,
            _ => self.linker.bind(&mut link, identity, session).await?,
        };

        self.merger.merge(identity, &mut user).await;

        if user.record_login(Utc::now(), &session.client_ip) {
            self.accounts.save(&user).await?;
        }
        self.links.save(&link).await?;

        if !user.is_enabled() {
            log::warn!("⛔ 비활성 계정 로그인 거부: {} ({}/{})", user.name(), identity.provider, subject_id);
            return Err(AppError::AccountDisabled(format!("비활성화된 계정입니다: {}", user.name())));
        }

        log::info!("✅ SSO 로그인: {} ← {}/{}", user.name(), identity.provider, subject_id);
        session.activate(user);

        Ok(self.settings.success_url.clone())
    }

    async fn linked_user(&self, link: &IdentityLink) -> Result<Option<LocalUser>, AppError> {
        if link.user_id <= 0 {
            return Ok(None);
        }
        self.accounts.find_by_id(link.user_id).await
    }
}
