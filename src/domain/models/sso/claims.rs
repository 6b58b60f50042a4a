//! 외부 클레임 맵

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// 외부 프로바이더가 보낸 클레임 (`email`, `mobile`, `RoleName`, ...)
///
/// 키는 소문자로 정규화해서 보관하므로 `RoleName`과 `rolename`은 같은 키입니다.
/// 같은 키가 대소문자만 달리 여러 번 오면 마지막 값이 남습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, String>")]
pub struct Claims(HashMap<String, String>);

impl Claims {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(&key.to_lowercase()).map(String::as_str)
    }

    /// 비어있지 않은 값만 돌려줍니다.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }

    /// 주어진 키들 중 처음으로 값이 있는 것
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get_non_empty(key))
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_lowercase(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, String>> for Claims {
    fn from(raw: HashMap<String, String>) -> Self {
        raw.into_iter().collect()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Claims {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut claims = Claims::default();
        for (key, value) in iter {
            claims.insert(key.as_ref(), value);
        }
        claims
    }
}
