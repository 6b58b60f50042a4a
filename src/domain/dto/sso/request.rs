//! SSO 요청 DTO

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::models::sso::{Claims, ExternalIdentity};
use crate::utils::string_utils::clean_optional_string;

/// 외부 로그인 요청 본문
///
/// OAuth 클라이언트가 검증을 마친 신원 정보를 담습니다. 프로바이더 이름은
/// 경로(`/{provider}/login`)에서 받습니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_has_subject"))]
pub struct SsoLoginRequest {
    #[validate(length(max = 128, message = "open_id는 128자 이하여야 합니다"))]
    pub open_id: Option<String>,

    #[validate(length(max = 64, message = "user_name은 64자 이하여야 합니다"))]
    pub user_name: Option<String>,

    #[validate(length(max = 64, message = "nick_name은 64자 이하여야 합니다"))]
    pub nick_name: Option<String>,

    pub access_token: Option<String>,

    #[validate(length(max = 1024, message = "avatar는 1024자 이하여야 합니다"))]
    pub avatar: Option<String>,

    #[serde(default)]
    pub items: HashMap<String, String>,
}

/// `open_id`, `user_name`, `access_token` 중 하나는 있어야 연결 키를 만들 수 있습니다.
fn validate_has_subject(req: &SsoLoginRequest) -> Result<(), ValidationError> {
    let has = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());

    if !has(&req.open_id) && !has(&req.user_name) && !has(&req.access_token) {
        return Err(ValidationError::new("missing_subject")
            .with_message("open_id, user_name, access_token 중 하나가 필요합니다".into()));
    }
    Ok(())
}

impl SsoLoginRequest {
    pub fn into_identity(self, provider: &str) -> ExternalIdentity {
        ExternalIdentity {
            provider: provider.trim().to_string(),
            open_id: clean_optional_string(self.open_id),
            user_name: clean_optional_string(self.user_name),
            nick_name: clean_optional_string(self.nick_name),
            access_token: clean_optional_string(self.access_token),
            avatar: clean_optional_string(self.avatar),
            items: Claims::from(self.items),
        }
    }
}

/// 로그인 쿼리 (`?sso_action=bind`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SsoActionQuery {
    pub sso_action: Option<String>,
}

impl SsoActionQuery {
    /// 현재 로그인 계정으로 강제 재연결을 요청했는지
    pub fn is_force_bind(&self) -> bool {
        self.sso_action
            .as_deref()
            .is_some_and(|action| action.eq_ignore_ascii_case("bind"))
    }
}

/// 인가 코드 교환 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AccessTokenRequest {
    #[validate(length(min = 1, max = 128, message = "유효한 인가 코드가 필요합니다"))]
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(open_id: Option<&str>, user_name: Option<&str>) -> SsoLoginRequest {
        SsoLoginRequest {
            open_id: open_id.map(str::to_string),
            user_name: user_name.map(str::to_string),
            nick_name: None,
            access_token: None,
            avatar: None,
            items: HashMap::new(),
        }
    }

    #[test]
    fn test_login_request_requires_subject() {
        assert!(request(None, None).validate().is_err());
        assert!(request(Some("  "), None).validate().is_err());
        assert!(request(Some("1001"), None).validate().is_ok());
        assert!(request(None, Some("octocat")).validate().is_ok());

        let mut token_only = request(None, None);
        token_only.access_token = Some("ACCESS-TOKEN".to_string());
        assert!(token_only.validate().is_ok());
    }

    #[test]
    fn test_into_identity_cleans_blank_fields() {
        let mut req = request(Some(" 1001 "), Some(""));
        req.items.insert("RoleName".to_string(), "editor".to_string());

        let identity = req.into_identity("github");

        assert_eq!(identity.open_id.as_deref(), Some("1001"));
        assert_eq!(identity.user_name, None);
        assert_eq!(identity.items.get("rolename"), Some("editor"));
    }

    #[test]
    fn test_force_bind_query() {
        let query = SsoActionQuery { sso_action: Some("BIND".to_string()) };
        assert!(query.is_force_bind());
        assert!(!SsoActionQuery::default().is_force_bind());
    }
}
