//! 테스트용 메모리 저장소
//!
//! 영속성 trait들을 `Mutex<HashMap>`으로 구현합니다. MongoDB 구현과 같은
//! 유일성 규칙(계정 이름, 역할 이름, 연결 자연 키)을 지키고, 호출 횟수를 세어
//! 테스트가 "새 레코드가 만들어지지 않았다"를 확인할 수 있게 합니다.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;
use crate::domain::entities::{links::IdentityLink, roles::Role, users::LocalUser};
use crate::repositories::traits::{AccountProvider, IdentityLinkStore, RoleStore, SessionStore};

#[derive(Default)]
pub struct MemoryAccounts {
    users: Mutex<HashMap<i64, LocalUser>>,
    next_id: AtomicI64,
    pub register_calls: AtomicUsize,
    pub save_calls: AtomicUsize,
}

impl MemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// 테스트 준비용. ID 시퀀스도 함께 앞당깁니다.
    pub fn insert(&self, user: LocalUser) {
        self.next_id.fetch_max(user.id(), Ordering::SeqCst);
        self.users.lock().unwrap().insert(user.id(), user);
    }

    pub fn get(&self, id: i64) -> Option<LocalUser> {
        self.users.lock().unwrap().get(&id).cloned()
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn names(&self) -> Vec<String> {
        self.users.lock().unwrap().values().map(|u| u.name().to_string()).collect()
    }
}

#[async_trait]
impl AccountProvider for MemoryAccounts {
    async fn find_by_id(&self, id: i64) -> Result<Option<LocalUser>, AppError> {
        Ok(self.get(id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<LocalUser>, AppError> {
        Ok(self.users.lock().unwrap().values().find(|u| u.name() == name).cloned())
    }

    async fn register(&self, name: &str, password: &str, role_id: i64, enable: bool) -> Result<LocalUser, AppError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);

        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.name() == name) {
            return Err(AppError::ConflictError(format!("duplicate name: {}", name)));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = LocalUser::new_extended(id, name.to_string(), format!("plain:{}", password), role_id, enable);
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn save(&self, user: &LocalUser) -> Result<(), AppError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        self.users.lock().unwrap().insert(user.id(), user.clone());
        Ok(())
    }
}

/// 조회 시 한 번 비어있는 척하는 계정 저장소
///
/// "이름 조회 → 없음 → 가입 시도 → 다른 요청이 먼저 가입" 경쟁을 재현합니다.
pub struct RacingAccounts {
    pub inner: MemoryAccounts,
    hide_name_once: Mutex<Option<String>>,
}

impl RacingAccounts {
    pub fn hiding(name: &str) -> Self {
        Self {
            inner: MemoryAccounts::new(),
            hide_name_once: Mutex::new(Some(name.to_string())),
        }
    }
}

#[async_trait]
impl AccountProvider for RacingAccounts {
    async fn find_by_id(&self, id: i64) -> Result<Option<LocalUser>, AppError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<LocalUser>, AppError> {
        {
            let mut hidden = self.hide_name_once.lock().unwrap();
            if hidden.as_deref() == Some(name) {
                *hidden = None;
                return Ok(None);
            }
        }
        self.inner.find_by_name(name).await
    }

    async fn register(&self, name: &str, password: &str, role_id: i64, enable: bool) -> Result<LocalUser, AppError> {
        self.inner.register(name, password, role_id, enable).await
    }

    async fn save(&self, user: &LocalUser) -> Result<(), AppError> {
        self.inner.save(user).await
    }
}

#[derive(Default)]
pub struct MemoryRoles {
    roles: Mutex<Vec<Role>>,
    pub insert_calls: AtomicUsize,
    /// 설정되면 `find_by_name`이 이 이름을 한 번 못 찾은 척합니다.
    pub hide_name_once: Mutex<Option<String>>,
}

impl MemoryRoles {
    pub fn with_roles(roles: &[(i64, &str)]) -> Self {
        let store = Self::default();
        store.roles.lock().unwrap().extend(
            roles.iter().map(|(id, name)| Role { id: *id, name: name.to_string() }),
        );
        store
    }

    pub fn count(&self) -> usize {
        self.roles.lock().unwrap().len()
    }
}

#[async_trait]
impl RoleStore for MemoryRoles {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AppError> {
        {
            let mut hidden = self.hide_name_once.lock().unwrap();
            if hidden.as_deref() == Some(name) {
                *hidden = None;
                return Ok(None);
            }
        }
        Ok(self.roles.lock().unwrap().iter().find(|r| r.name == name).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Role>, AppError> {
        Ok(self.roles.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, name: &str) -> Result<Role, AppError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);

        let mut roles = self.roles.lock().unwrap();
        if roles.iter().any(|r| r.name == name) {
            return Err(AppError::ConflictError(format!("duplicate role: {}", name)));
        }

        let id = roles.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let role = Role { id, name: name.to_string() };
        roles.push(role.clone());
        Ok(role)
    }
}

#[derive(Default)]
pub struct MemoryLinks {
    links: Mutex<HashMap<(String, String), IdentityLink>>,
}

impl MemoryLinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, provider: &str, open_id: &str) -> Option<IdentityLink> {
        self.links
            .lock()
            .unwrap()
            .get(&(provider.to_string(), open_id.to_string()))
            .cloned()
    }

    pub fn count(&self) -> usize {
        self.links.lock().unwrap().len()
    }
}

#[async_trait]
impl IdentityLinkStore for MemoryLinks {
    async fn find(&self, provider: &str, open_id: &str) -> Result<Option<IdentityLink>, AppError> {
        Ok(self.get(provider, open_id))
    }

    async fn save(&self, link: &IdentityLink) -> Result<(), AppError> {
        let mut links = self.links.lock().unwrap();
        let key = (link.provider.clone(), link.open_id.clone());

        let mut stored = link.clone();
        stored.id = links
            .get(&key)
            .and_then(|existing| existing.id)
            .or(link.id)
            .or_else(|| Some(ObjectId::new()));
        links.insert(key, stored);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySessions {
    entries: Mutex<HashMap<String, (String, u64)>>,
}

impl MemorySessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ttl_of(&self, key: &str) -> Option<u64> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl SessionStore for MemorySessions {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.lock().unwrap().get(key).map(|(value, _)| value.clone()))
    }

    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), AppError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl_seconds));
        Ok(())
    }

    async fn take(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.lock().unwrap().remove(key).map(|(value, _)| value))
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
