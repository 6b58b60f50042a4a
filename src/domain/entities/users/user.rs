//! 로컬 계정 엔티티
//!
//! 계정은 두 가지 형태로 저장됩니다.
//!
//! | 형태 | 기본 필드 (id, name, enable) | 프로필 필드 | 로그인 통계 |
//! |------|:---:|:---:|:---:|
//! | [`BasicUser`] | ✓ | - | - |
//! | [`ExtendedUser`] | ✓ | ✓ | ✓ |
//!
//! 호출하는 쪽은 구체 타입을 검사하지 않고 [`LocalUser::profile_mut`],
//! [`LocalUser::record_login`]처럼 `Option`/`bool`을 돌려주는 능력 접근자로
//! 분기합니다. 기본 계정에서는 프로필·통계 갱신을 건너뛸 뿐 실패하지 않습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 성별 코드
///
/// 외부 클레임의 정수 코드(`0`, `1`, `2`)를 그대로 저장합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum SexKind {
    #[default]
    Unknown,
    Male,
    Female,
}

impl From<i32> for SexKind {
    fn from(code: i32) -> Self {
        match code {
            1 => SexKind::Male,
            2 => SexKind::Female,
            _ => SexKind::Unknown,
        }
    }
}

impl From<SexKind> for i32 {
    fn from(sex: SexKind) -> Self {
        match sex {
            SexKind::Unknown => 0,
            SexKind::Male => 1,
            SexKind::Female => 2,
        }
    }
}

impl SexKind {
    /// 클레임 문자열을 성별 코드로 해석합니다. 숫자가 아니면 `Unknown`.
    pub fn parse_code(value: &str) -> Self {
        value.trim().parse::<i32>().map(SexKind::from).unwrap_or_default()
    }
}

/// 모든 계정이 가지는 기본 필드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicUser {
    #[serde(rename = "_id")]
    pub id: i64,
    /// 로그인 이름 (unique)
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    pub enable: bool,
    /// bcrypt 해시
    #[serde(default)]
    pub password_hash: String,
}

/// 확장 계정의 프로필 필드
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub mail: String,
    pub mobile: String,
    pub code: String,
    pub sex: SexKind,
    /// `0`이면 역할 없음
    pub role_id: i64,
    /// 원격 URL 또는 로컬 참조
    pub avatar: String,
}

/// 로그인 통계
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginStats {
    pub logins: i64,
    pub last_login: Option<DateTime<Utc>>,
    pub last_login_ip: String,
}

/// 프로필과 로그인 통계를 가진 계정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedUser {
    #[serde(flatten)]
    pub account: BasicUser,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub logins: LoginStats,
}

/// 로컬 계정
///
/// MongoDB와 Redis 캐시에는 `kind` 필드로 구분되어 저장됩니다.
///
/// ```json
/// { "kind": "extended", "_id": 42, "name": "alice", "enable": true,
///   "profile": { "mail": "alice@example.com", "role_id": 3 }, "logins": { "logins": 7 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocalUser {
    Basic(BasicUser),
    Extended(ExtendedUser),
}

impl LocalUser {
    /// 새로 가입하는 계정은 항상 확장 형태로 만듭니다.
    pub fn new_extended(id: i64, name: String, password_hash: String, role_id: i64, enable: bool) -> Self {
        LocalUser::Extended(ExtendedUser {
            account: BasicUser {
                id,
                name,
                display_name: String::new(),
                enable,
                password_hash,
            },
            profile: UserProfile {
                role_id,
                ..UserProfile::default()
            },
            logins: LoginStats::default(),
        })
    }

    fn account(&self) -> &BasicUser {
        match self {
            LocalUser::Basic(user) => user,
            LocalUser::Extended(user) => &user.account,
        }
    }

    fn account_mut(&mut self) -> &mut BasicUser {
        match self {
            LocalUser::Basic(user) => user,
            LocalUser::Extended(user) => &mut user.account,
        }
    }

    pub fn id(&self) -> i64 {
        self.account().id
    }

    pub fn name(&self) -> &str {
        &self.account().name
    }

    pub fn display_name(&self) -> &str {
        &self.account().display_name
    }

    pub fn display_name_mut(&mut self) -> &mut String {
        &mut self.account_mut().display_name
    }

    pub fn is_enabled(&self) -> bool {
        self.account().enable
    }

    /// 확장 프로필 (기본 계정이면 `None`)
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            LocalUser::Basic(_) => None,
            LocalUser::Extended(user) => Some(&user.profile),
        }
    }

    pub fn profile_mut(&mut self) -> Option<&mut UserProfile> {
        match self {
            LocalUser::Basic(_) => None,
            LocalUser::Extended(user) => Some(&mut user.profile),
        }
    }

    pub fn login_stats(&self) -> Option<&LoginStats> {
        match self {
            LocalUser::Basic(_) => None,
            LocalUser::Extended(user) => Some(&user.logins),
        }
    }

    /// 로그인 횟수, 시각, 접속 주소를 기록합니다.
    ///
    /// # Returns
    ///
    /// 통계를 가진 계정이라 기록했으면 `true`, 기본 계정이면 `false`
    pub fn record_login(&mut self, now: DateTime<Utc>, client_ip: &str) -> bool {
        match self {
            LocalUser::Basic(_) => false,
            LocalUser::Extended(user) => {
                user.logins.logins += 1;
                user.logins.last_login = Some(now);
                user.logins.last_login_ip = client_ip.to_string();
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic() -> LocalUser {
        LocalUser::Basic(BasicUser {
            id: 1,
            name: "legacy".to_string(),
            display_name: String::new(),
            enable: true,
            password_hash: String::new(),
        })
    }

    #[test]
    fn test_basic_user_has_no_extended_capabilities() {
        let mut user = basic();

        assert!(user.profile().is_none());
        assert!(user.profile_mut().is_none());
        assert!(!user.record_login(Utc::now(), "10.0.0.1"));
        assert!(user.login_stats().is_none());
    }

    #[test]
    fn test_record_login_updates_counters() {
        let mut user = LocalUser::new_extended(2, "alice".to_string(), "hash".to_string(), 3, true);
        let now = Utc::now();

        assert!(user.record_login(now, "10.0.0.2"));
        assert!(user.record_login(now, "10.0.0.3"));

        let stats = user.login_stats().unwrap();
        assert_eq!(stats.logins, 2);
        assert_eq!(stats.last_login, Some(now));
        assert_eq!(stats.last_login_ip, "10.0.0.3");
        assert_eq!(user.profile().unwrap().role_id, 3);
    }

    #[test]
    fn test_sex_code_parsing() {
        assert_eq!(SexKind::parse_code("1"), SexKind::Male);
        assert_eq!(SexKind::parse_code(" 2 "), SexKind::Female);
        assert_eq!(SexKind::parse_code("x"), SexKind::Unknown);
        assert_eq!(i32::from(SexKind::Female), 2);
    }

    #[test]
    fn test_tagged_json_shape() {
        let user = LocalUser::new_extended(5, "bob".to_string(), String::new(), 0, true);
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["kind"], "extended");
        assert_eq!(json["_id"], 5);
        assert_eq!(json["profile"]["sex"], 0);

        let restored: LocalUser = serde_json::from_value(json).unwrap();
        assert_eq!(restored, user);
    }
}
