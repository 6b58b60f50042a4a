//! # SSO 계정 연동 설정
//!
//! 외부 SSO 로그인 시 로컬 계정을 어떻게 찾고 만들고 병합할지 결정하는
//! 설정값들을 환경 변수에서 읽습니다.
//!
//! | 환경 변수 | 기본값 | 설명 |
//! |-----------|--------|------|
//! | `SSO_AUTO_REGISTER` | `true` | 세션 사용자가 없을 때 계정 자동 생성 여부 |
//! | `SSO_DEFAULT_ROLE` | `0` | 기본 역할 정책 (`>0` 고정 ID, `0` 클레임 채우기, `<0` 클레임 덮어쓰기) |
//! | `SSO_AVATAR_PATH` | `""` | 아바타 로컬 저장 경로 (비어있으면 원격 URL 유지) |
//! | `SSO_SUCCESS_URL` | `/admin` | 로그인 성공 후 이동할 기본 주소 |
//! | `SSO_TOKEN_EXPIRE_SECONDS` | `7200` | 액세스 토큰 유효 시간 |
//! | `SSO_CODE_EXPIRE_SECONDS` | `300` | 인가 코드 유효 시간 |
//! | `SSO_SESSION_EXPIRE_SECONDS` | `86400` | 로그인 세션 유효 시간 |
//! | `SSO_LOGIN_SECRET` | `""` | 로그인 엔드포인트를 호출하는 OAuth 클라이언트와 공유하는 비밀값 (비어있으면 로그인 거부) |
//!
//! 서비스는 [`SsoConfig`]를 직접 호출하지 않고, 부팅 시 한 번 만든
//! [`SsoSettings`] 스냅샷을 주입받습니다. 테스트는 스냅샷을 직접 구성합니다.

use std::env;

/// 기본 역할 정책
///
/// 하나의 정수 설정(`SSO_DEFAULT_ROLE`)이 세 가지 동작을 표현합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultRolePolicy {
    /// 고정 역할 ID. 자동 가입 계정에만 적용하고 병합 시에는 역할을 건드리지 않습니다.
    Fixed(i64),
    /// 클레임에서 역할을 해석해 비어있는 경우에만 채웁니다. 역할 생성 없음.
    ClaimFill,
    /// 클레임 해석 결과로 기존 역할을 덮어씁니다 (`0` 포함). 없는 역할은 생성합니다.
    ClaimOverride,
}

impl DefaultRolePolicy {
    pub fn from_role_id(rid: i64) -> Self {
        match rid {
            rid if rid > 0 => DefaultRolePolicy::Fixed(rid),
            0 => DefaultRolePolicy::ClaimFill,
            _ => DefaultRolePolicy::ClaimOverride,
        }
    }

    /// 클레임 해석 시 역할 생성을 허용하는지
    pub fn allows_role_creation(&self) -> bool {
        matches!(self, DefaultRolePolicy::ClaimOverride)
    }
}

/// 환경 변수 기반 SSO 설정 읽기
pub struct SsoConfig;

impl SsoConfig {
    pub fn auto_register() -> bool {
        env::var("SSO_AUTO_REGISTER")
            .map(|value| parse_flag(&value))
            .unwrap_or(true)
    }

    pub fn default_role() -> i64 {
        env::var("SSO_DEFAULT_ROLE")
            .ok()
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn avatar_path() -> String {
        env::var("SSO_AVATAR_PATH").unwrap_or_default()
    }

    pub fn success_url() -> String {
        env::var("SSO_SUCCESS_URL").unwrap_or_else(|_| "/admin".to_string())
    }

    pub fn token_expire_seconds() -> u64 {
        read_seconds("SSO_TOKEN_EXPIRE_SECONDS", 7200)
    }

    pub fn code_expire_seconds() -> u64 {
        read_seconds("SSO_CODE_EXPIRE_SECONDS", 300)
    }

    pub fn session_expire_seconds() -> u64 {
        read_seconds("SSO_SESSION_EXPIRE_SECONDS", 86400)
    }

    pub fn login_secret() -> String {
        env::var("SSO_LOGIN_SECRET")
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn read_seconds(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|seconds| *seconds > 0)
        .unwrap_or(default)
}

/// 부팅 시점에 고정되는 SSO 설정 스냅샷
#[derive(Debug, Clone)]
pub struct SsoSettings {
    pub auto_register: bool,
    pub default_role: DefaultRolePolicy,
    /// 비어있으면 아바타를 내려받지 않습니다.
    pub avatar_path: String,
    pub success_url: String,
    pub token_expire: u64,
    pub code_expire: u64,
    pub session_expire: u64,
    /// 로그인 호출자 인증용 공유 비밀값. 비어있으면 모든 로그인을 거부합니다.
    pub login_secret: String,
}

impl SsoSettings {
    pub fn from_env() -> Self {
        Self {
            auto_register: SsoConfig::auto_register(),
            default_role: DefaultRolePolicy::from_role_id(SsoConfig::default_role()),
            avatar_path: SsoConfig::avatar_path(),
            success_url: SsoConfig::success_url(),
            token_expire: SsoConfig::token_expire_seconds(),
            code_expire: SsoConfig::code_expire_seconds(),
            session_expire: SsoConfig::session_expire_seconds(),
            login_secret: SsoConfig::login_secret(),
        }
    }

    pub fn avatar_download_enabled(&self) -> bool {
        !self.avatar_path.trim().is_empty()
    }
}

impl Default for SsoSettings {
    fn default() -> Self {
        Self {
            auto_register: true,
            default_role: DefaultRolePolicy::ClaimFill,
            avatar_path: String::new(),
            success_url: "/admin".to_string(),
            token_expire: 7200,
            code_expire: 300,
            session_expire: 86400,
            login_secret: String::new(),
        }
    }
}
