//! # Service Registry - 싱글톤 의존성 주입 시스템
//!
//! `#[repository]` 매크로와 연동되는 타입 기반 싱글톤 컨테이너입니다.
//! SSO 서비스들은 매크로 없이 `main`에서 조립해 [`ServiceLocator::set`]으로 등록합니다.
//!
//! ## 동작 방식
//!
//! ```text
//! 1. 컴파일 타임
//!    ├─ #[repository] 매크로 → RepositoryRegistration 생성
//!    └─ inventory::collect! → 전역 레지스트리에 등록
//!
//! 2. 런타임 초기화
//!    ├─ Database, RedisClient 직접 등록 (ServiceLocator::set)
//!    ├─ initialize_all() → 모든 리포지토리 인스턴스 생성
//!    └─ SSO 서비스 조립 후 ServiceLocator::set 으로 등록
//!
//! 3. 조회
//!    ├─ 캐시 확인 (TypeId 키)
//!    └─ 없으면 타입 이름으로 레지스트리 검색 → 생성 → 캐싱
//! ```
//!
//! 리포지토리 타입 이름은 `UserRepository` → `user`,
//! `IdentityLinkRepository` → `identitylink` 처럼 접미사를 제거하고 소문자로
//! 정규화하여 매크로의 `name` 인자와 매칭합니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete, print_step_start, print_sub_task};

/// 데이터 액세스 리포지토리를 위한 공통 인터페이스
///
/// `#[repository]` 매크로가 적용된 구조체가 이 trait을 자동 구현합니다.
#[async_trait]
pub trait Repository: Send + Sync {
    /// 리포지토리의 고유 이름을 반환합니다.
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션의 이름을 반환합니다.
    fn collection_name(&self) -> &str;

    /// 리포지토리 초기화 로직을 수행합니다.
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 리포지토리 등록 정보 (`#[repository]` 매크로가 생성)
pub struct RepositoryRegistration {
    /// 리포지토리의 고유 이름 (검색 키로 사용)
    pub name: &'static str,
    /// 인스턴스 생성 함수 (지연 초기화에 사용)
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(RepositoryRegistration);

/// 리포지토리 이름 → 등록정보 매핑 캐시
static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();

    print_cache_initialized("Repository", cache.len());
    cache
});

/// 등록 이름에서 `_repository` 접미사를 제거합니다.
fn normalize_registration_name(name: &str) -> String {
    name.strip_suffix("_repository")
        .unwrap_or(name)
        .to_string()
}

/// `UserRepository` → `user`
fn repository_entity_name(clean_type_name: &str) -> Option<String> {
    clean_type_name
        .strip_suffix("Repository")
        .map(str::to_lowercase)
}

/// 싱글톤 의존성 주입 컨테이너
///
/// - **싱글톤 보장**: 각 타입당 정확히 하나의 인스턴스만 생성
/// - **지연 초기화**: 첫 요청 시점에 인스턴스 생성
/// - **순환 참조 감지**: 초기화 중인 타입을 추적하여 조기에 패닉
pub struct ServiceLocator {
    /// `TypeId`를 키로 한 인스턴스 캐시
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    /// 현재 초기화 중인 타입들 (순환 참조 방지용)
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// 지정된 타입의 싱글톤 인스턴스를 가져옵니다.
    ///
    /// 1. 캐시 확인 → 있으면 반환
    /// 2. 순환 참조 검사
    /// 3. 타입 이름(`XxxRepository`)으로 레지스트리 검색
    /// 4. 생성자 호출 후 캐싱
    ///
    /// # Panics
    ///
    /// - 순환 참조가 감지된 경우
    /// - `set`으로 등록되지 않았고 리포지토리도 아닌 타입을 요청한 경우
    /// - 등록된 타입과 요청 타입이 다른 경우
    ///
    /// 애플리케이션 조립 단계의 설정 오류이므로 조기에 실패시킵니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = Self::cached::<T>(type_id) {
            return instance;
        }

        {
            let mut initializing = LOCATOR.initializing.write().unwrap();
            if !initializing.insert(type_id) {
                log::error!("❌ Circular dependency detected for type: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        let result = std::panic::catch_unwind(|| Self::create::<T>(type_id, type_name));

        LOCATOR.initializing.write().unwrap().remove(&type_id);

        match result {
            Ok(instance) => instance,
            Err(e) => {
                log::error!("Failed to create instance for {}: {:?}", type_name, e);
                panic!("Failed to create instance for {}", type_name);
            }
        }
    }

    fn cached<T: 'static + Send + Sync>(type_id: TypeId) -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read().unwrap();
        instances.get(&type_id).map(|instance| {
            instance.clone()
                .downcast::<T>()
                .expect("Type mismatch in ServiceLocator")
        })
    }

    fn create<T: 'static + Send + Sync>(type_id: TypeId, type_name: &str) -> Arc<T> {
        if let Some(instance) = Self::cached::<T>(type_id) {
            return instance;
        }

        let clean_type_name = Self::extract_clean_type_name(type_name);
        let entity_name = repository_entity_name(&clean_type_name).unwrap_or_else(|| {
            panic!(
                "Component not found: {}. Make sure it's registered with #[repository] macro, or manually registered with ServiceLocator::set()",
                type_name
            )
        });

        let registration = REPOSITORY_NAME_CACHE.get(&entity_name)
            .unwrap_or_else(|| panic!("No repository found for entity: {}", entity_name));

        // 생성자는 다른 의존성을 get()으로 요청할 수 있으므로 락 밖에서 호출합니다.
        let boxed_instance = (registration.constructor)();
        let instance = match boxed_instance.downcast::<Arc<T>>() {
            Ok(arc_instance) => (*arc_instance).clone(),
            Err(_) => panic!("Type mismatch for repository: {}", registration.name),
        };

        let mut instances = LOCATOR.instances.write().unwrap();
        let stored = instances
            .entry(type_id)
            .or_insert_with(|| instance as Arc<dyn Any + Send + Sync>);

        stored.clone()
            .downcast::<T>()
            .expect("Type mismatch in ServiceLocator")
    }

    /// `sso_account_service::repositories::UserRepository` → `UserRepository`
    fn extract_clean_type_name(type_name: &str) -> String {
        match type_name.rfind("::") {
            Some(pos) => type_name[pos + 2..].to_string(),
            None => type_name.to_string(),
        }
    }

    /// 외부에서 생성된 인스턴스를 직접 등록합니다.
    ///
    /// 매크로로 관리되지 않는 컴포넌트(Database, RedisClient)와
    /// 리포지토리 위에 조립된 SSO 서비스들을 등록할 때 사용합니다.
    ///
    /// ```rust,ignore
    /// ServiceLocator::set(Arc::new(database));
    /// ServiceLocator::set(Arc::new(reconciler));
    ///
    /// let reconciler = ServiceLocator::get::<LoginReconciler>();
    /// ```
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_id = TypeId::of::<T>();
        let clean_name = Self::extract_clean_type_name(std::any::type_name::<T>());

        log::info!("📦 Registering: {}", clean_name);

        let mut instances = LOCATOR.instances.write().unwrap();
        instances.insert(type_id, instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 리포지토리를 미리 생성합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let repo_registrations: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        let repo_count = repo_registrations.len();

        if repo_count > 0 {
            print_step_start(1, "Creating Repository instances");

            for registration in repo_registrations {
                print_sub_task(registration.name, "Creating...");
                let _boxed_instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }

            print_step_complete(1, "Repository instances created", repo_count);
        }

        print_final_summary(repo_count);

        Ok(())
    }
}

/// 전역 서비스 로케이터 인스턴스
static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);
