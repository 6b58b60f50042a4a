//! # 프로필 병합
//!
//! 외부 클레임을 로컬 계정에 반영합니다. 원칙은 "비어있는 필드만 채운다"이며
//! 역할만 별도 정책을 따릅니다.
//!
//! | 필드 | 출처 | 규칙 |
//! |------|------|------|
//! | 표시 이름 | `nick_name` → `user_name` | 비어있을 때만 (모든 계정) |
//! | mail | `email` → `mail` 클레임 | 비어있을 때만 |
//! | mobile, code | 같은 이름의 클레임 | 비어있을 때만 |
//! | sex | `sex` 클레임 (정수 코드) | `Unknown`일 때만 |
//! | role | [`DefaultRolePolicy`] | 아래 표 |
//! | avatar | 외부 아바타 URL | 비어있을 때만, 원격 URL이면 로컬 캐시 시도 |
//!
//! | 정책 | 역할 처리 |
//! |------|-----------|
//! | `Fixed(id)` | 건드리지 않음. 고정 ID는 가입 시에만 적용 |
//! | `ClaimFill` | 역할이 없을 때만 클레임 해석 결과를 그대로 대입 (역할 생성 없음) |
//! | `ClaimOverride` | 매 로그인마다 클레임 해석 결과를 그대로 대입, 0 포함 (역할 생성 허용) |
//!
//! 표시 이름 외의 필드는 확장 계정에만 적용됩니다. 병합은 실패하지 않으며
//! 저장소 오류는 로그만 남깁니다.

use std::sync::Arc;

use crate::config::{DefaultRolePolicy, SsoSettings};
use crate::domain::entities::users::{LocalUser, SexKind, UserProfile};
use crate::domain::models::sso::ExternalIdentity;
use crate::services::sso::avatar_fetcher::AvatarFetcher;
use crate::services::sso::role_resolver::RoleResolver;
use crate::utils::string_utils::{fill_if_empty, is_remote_reference};

pub struct ProfileMerger {
    resolver: Arc<RoleResolver>,
    avatar_fetcher: Arc<AvatarFetcher>,
    settings: Arc<SsoSettings>,
}

impl ProfileMerger {
    pub fn new(resolver: Arc<RoleResolver>, avatar_fetcher: Arc<AvatarFetcher>, settings: Arc<SsoSettings>) -> Self {
        Self {
            resolver,
            avatar_fetcher,
            settings,
        }
    }

    pub async fn merge(&self, identity: &ExternalIdentity, user: &mut LocalUser) {
        let display_name = identity.nick_name().or_else(|| identity.user_name());
        fill_if_empty(user.display_name_mut(), display_name);

        let Some(profile) = user.profile_mut() else {
            return;
        };

        merge_contact_fields(identity, profile);
        self.merge_role(identity, profile).await;

        fill_if_empty(&mut profile.avatar, identity.avatar());
        let fetch_avatar = is_remote_reference(&profile.avatar) && self.settings.avatar_download_enabled();

        if fetch_avatar {
            if let Err(e) = self.avatar_fetcher.fetch_avatar(user).await {
                log::warn!("아바타 캐시 실패 user={}: {}", user.id(), e);
            }
        }
    }

    async fn merge_role(&self, identity: &ExternalIdentity, profile: &mut UserProfile) {
        let policy = self.settings.default_role;

        let should_write = match policy {
            DefaultRolePolicy::Fixed(_) => false,
            DefaultRolePolicy::ClaimFill => profile.role_id <= 0,
            DefaultRolePolicy::ClaimOverride => true,
        };
        if !should_write {
            return;
        }

        // 해석 결과 0도 그대로 대입
        match self.resolver.resolve_role(&identity.items, policy.allows_role_creation()).await {
            Ok(role_id) => profile.role_id = role_id,
            Err(e) => log::warn!("역할 해석 실패 ({}): {}", identity.provider, e),
        }
    }
}

fn merge_contact_fields(identity: &ExternalIdentity, profile: &mut UserProfile) {
    let claims = &identity.items;

    fill_if_empty(&mut profile.mail, claims.first_of(&["email", "mail"]));
    fill_if_empty(&mut profile.mobile, claims.get_non_empty("mobile"));
    fill_if_empty(&mut profile.code, claims.get_non_empty("code"));

    if profile.sex == SexKind::Unknown {
        if let Some(sex) = claims.get_non_empty("sex") {
            profile.sex = SexKind::parse_code(sex);
        }
    }
}
