//! 역할 엔티티

use serde::{Deserialize, Serialize};

/// 역할
///
/// `name`은 컬렉션 전체에서 유일합니다 (`role_name_unique` 인덱스).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
}
