//! 외부 신원 연결 엔티티
//!
//! 외부 프로바이더의 계정 하나를 로컬 계정 하나에 묶는 레코드입니다.
//! `(provider, open_id)`가 자연 키이며 유니크 인덱스로 보장됩니다.
//! 로그인마다 스냅샷 필드가 갱신되고, 이 서비스는 레코드를 삭제하지 않습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::models::sso::external_identity::ExternalIdentity;

/// 외부 신원 ↔ 로컬 계정 연결
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityLink {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub provider: String,
    pub open_id: String,
    /// 연결된 로컬 계정 ID (`0`이면 미연결)
    pub user_id: i64,
    pub enable: bool,

    /// 마지막 로그인 시점의 외부 신원 스냅샷
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub nick_name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub access_token: String,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl IdentityLink {
    /// 아직 저장되지 않은, 비활성 상태의 연결을 만듭니다.
    pub fn new(provider: &str, open_id: &str) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            provider: provider.to_string(),
            open_id: open_id.to_string(),
            user_id: 0,
            enable: false,
            user_name: String::new(),
            nick_name: String::new(),
            avatar: String::new(),
            access_token: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 외부 신원의 표시용 필드를 복사합니다. 값이 없는 필드는 이전 스냅샷을 유지합니다.
    pub fn refresh_snapshot(&mut self, identity: &ExternalIdentity) {
        if let Some(user_name) = identity.user_name.as_deref() {
            self.user_name = user_name.to_string();
        }
        if let Some(nick_name) = identity.nick_name.as_deref() {
            self.nick_name = nick_name.to_string();
        }
        if let Some(avatar) = identity.avatar.as_deref() {
            self.avatar = avatar.to_string();
        }
        if let Some(access_token) = identity.access_token.as_deref() {
            self.access_token = access_token.to_string();
        }
        self.updated_at = DateTime::now();
    }

    /// 계정에 묶고 활성화합니다.
    pub fn bind_to(&mut self, user_id: i64) {
        self.user_id = user_id;
        self.enable = true;
    }
}
