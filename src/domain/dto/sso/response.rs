//! SSO 응답 DTO

use serde::{Deserialize, Serialize};

use crate::domain::entities::users::LocalUser;

/// 인가 코드 → 액세스 토큰 교환 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    pub scope: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizeResponse {
    pub code: String,
    pub expires_in: u64,
}

/// 사용자 정보
///
/// 기본 계정은 `userid`, `username`, `nickname`만 내려가고
/// 확장 계정이면 프로필 필드가 함께 내려갑니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfoResponse {
    pub userid: i64,
    pub username: String,
    pub nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roleid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserInfoResponse {
    /// `role_name`은 확장 계정의 역할 이름입니다. 역할이 없으면 빈 문자열.
    pub fn from_user(user: &LocalUser, role_name: Option<String>) -> Self {
        let mut info = Self {
            userid: user.id(),
            username: user.name().to_string(),
            nickname: user.display_name().to_string(),
            sex: None,
            mail: None,
            mobile: None,
            code: None,
            roleid: None,
            rolename: None,
            avatar: None,
        };

        if let Some(profile) = user.profile() {
            info.sex = Some(profile.sex.into());
            info.mail = Some(profile.mail.clone());
            info.mobile = Some(profile.mobile.clone());
            info.code = Some(profile.code.clone());
            info.roleid = Some(profile.role_id);
            info.rolename = Some(role_name.unwrap_or_default());
            info.avatar = Some(profile.avatar.clone());
        }

        info
    }
}
