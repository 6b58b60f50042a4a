//! 세션 컨텍스트
//!
//! 현재 로그인된 사용자, 강제 재연결 요청 여부, 접속 주소를 담아
//! 조정 흐름의 모든 호출에 명시적으로 전달됩니다.

use crate::domain::entities::users::LocalUser;

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub current_user: Option<LocalUser>,
    /// `sso_action=bind` 요청 여부
    pub force_bind: bool,
    pub client_ip: String,
}

impl SessionContext {
    /// 로그인 사용자가 없는 컨텍스트
    pub fn anonymous(client_ip: impl Into<String>) -> Self {
        Self {
            current_user: None,
            force_bind: false,
            client_ip: client_ip.into(),
        }
    }

    pub fn with_user(mut self, user: LocalUser) -> Self {
        self.current_user = Some(user);
        self
    }

    pub fn with_force_bind(mut self, force_bind: bool) -> Self {
        self.force_bind = force_bind;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// 세션을 해당 사용자로 활성화합니다.
    pub fn activate(&mut self, user: LocalUser) {
        self.current_user = Some(user);
    }

    pub fn clear(&mut self) {
        self.current_user = None;
    }
}
