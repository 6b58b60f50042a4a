//! # 역할 해석기
//!
//! 외부 클레임에서 로컬 역할 ID를 찾습니다.
//!
//! | 순서 | 클레임 | 동작 |
//! |------|--------|------|
//! | 1 | `RoleName` | 같은 이름의 역할이 있으면 그 ID. 없고 생성이 허용되면 만들어서 그 ID |
//! | 2 | `RoleID` | 정수로 해석해 그대로 반환 (존재 여부 확인 없음, 해석 실패 시 `0`) |
//! | 3 | - | `0` (역할 없음) |
//!
//! 생성은 관리자 덮어쓰기 정책(`SSO_DEFAULT_ROLE < 0`)에서만 허용됩니다.

use std::sync::Arc;

use crate::core::errors::AppError;
use crate::domain::models::sso::Claims;
use crate::repositories::traits::RoleStore;

pub struct RoleResolver {
    roles: Arc<dyn RoleStore>,
}

impl RoleResolver {
    pub fn new(roles: Arc<dyn RoleStore>) -> Self {
        Self { roles }
    }

    /// 클레임을 역할 ID로 해석합니다. 해석할 수 없으면 `0`.
    pub async fn resolve_role(&self, claims: &Claims, allow_create: bool) -> Result<i64, AppError> {
        if let Some(name) = claims.get_non_empty("RoleName") {
            if let Some(role) = self.roles.find_by_name(name).await? {
                return Ok(role.id);
            }

            if allow_create {
                return self.create_role(name).await;
            }
        }

        if let Some(role_id) = claims.get("RoleID") {
            return Ok(role_id.trim().parse::<i64>().unwrap_or(0));
        }

        Ok(0)
    }

    /// 다른 요청이 먼저 같은 이름을 만들었으면 그 역할을 사용합니다.
    async fn create_role(&self, name: &str) -> Result<i64, AppError> {
        match self.roles.insert(name).await {
            Ok(role) => Ok(role.id),
            Err(AppError::ConflictError(_)) => {
                log::debug!("역할 생성 경합, 기존 역할 사용: {}", name);
                self.roles
                    .find_by_name(name)
                    .await?
                    .map(|role| role.id)
                    .ok_or_else(|| AppError::ConflictError(format!("역할을 찾을 수 없습니다: {}", name)))
            }
            Err(e) => Err(e),
        }
    }

    /// 사용자 정보 응답에 쓸 역할 이름
    pub async fn role_name(&self, role_id: i64) -> Result<Option<String>, AppError> {
        if role_id <= 0 {
            return Ok(None);
        }
        Ok(self.roles.find_by_id(role_id).await?.map(|role| role.name))
    }
}
