//! 외부 신원 정보
//!
//! OAuth 클라이언트가 토큰 교환과 서명 검증을 끝낸 뒤 넘겨주는 값입니다.
//! 요청 하나에서 만들어지고 버려지며, 그대로 저장되지 않습니다.

use serde::{Deserialize, Serialize};

use crate::domain::models::sso::claims::Claims;

/// 검증된 외부 신원
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalIdentity {
    /// 발급한 프로바이더 이름 (`github`, `weixin`, ...)
    pub provider: String,
    /// 프로바이더 내 고유 ID. 없는 프로바이더도 있습니다.
    pub open_id: Option<String>,
    pub user_name: Option<String>,
    pub nick_name: Option<String>,
    pub access_token: Option<String>,
    pub avatar: Option<String>,
    #[serde(default)]
    pub items: Claims,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ExternalIdentity {
    /// 연결 레코드의 키로 쓸 외부 ID
    ///
    /// `open_id`가 없으면 외부 사용자명, 그것도 없으면 액세스 토큰으로 대신합니다.
    pub fn subject_id(&self) -> Option<&str> {
        non_empty(&self.open_id)
            .or_else(|| non_empty(&self.user_name))
            .or_else(|| non_empty(&self.access_token))
    }

    /// 사용자명이 없을 때 체크섬 이름을 만들 원본
    ///
    /// `open_id`가 없으면 액세스 토큰을 씁니다. [`subject_id`](Self::subject_id)와
    /// 대체 순서가 다릅니다.
    pub fn checksum_source(&self) -> Option<&str> {
        non_empty(&self.open_id).or_else(|| non_empty(&self.access_token))
    }

    pub fn user_name(&self) -> Option<&str> {
        non_empty(&self.user_name)
    }

    pub fn nick_name(&self) -> Option<&str> {
        non_empty(&self.nick_name)
    }

    pub fn avatar(&self) -> Option<&str> {
        non_empty(&self.avatar)
    }
}
