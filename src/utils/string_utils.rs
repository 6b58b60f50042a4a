//! # 문자열 유틸리티
//!
//! 외부 신원 정보와 프로필 필드 처리에 쓰이는 공통 함수들입니다.

/// 공백만 있는 문자열을 `None`으로 정규화합니다.
///
/// 외부 프로바이더는 값이 없을 때 빈 문자열을 보내는 경우가 많으므로,
/// 신원 정보를 받는 즉시 이 함수로 정리합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 대소문자 구분 없이 접두사를 확인합니다.
pub fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value.len() >= prefix.len()
        && value.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// 원격 참조(`http://`, `https://`)인지 확인합니다.
pub fn is_remote_reference(value: &str) -> bool {
    starts_with_ignore_case(value, "http")
}

/// 비어있는 필드에만 값을 채웁니다.
///
/// # Returns
///
/// 값이 실제로 기록되었으면 `true`
pub fn fill_if_empty(field: &mut String, candidate: Option<&str>) -> bool {
    match candidate {
        Some(value) if field.is_empty() && !value.is_empty() => {
            *field = value.to_string();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  alice ".to_string())), Some("alice".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_remote_reference_detection() {
        assert!(is_remote_reference("https://cdn.example.com/a.png"));
        assert!(is_remote_reference("HTTP://cdn.example.com/a.png"));
        assert!(!is_remote_reference("/avatars/12"));
        assert!(!is_remote_reference("ht"));
    }

    #[test]
    fn test_fill_if_empty_never_overwrites() {
        let mut mail = String::new();
        assert!(fill_if_empty(&mut mail, Some("a@example.com")));
        assert!(!fill_if_empty(&mut mail, Some("b@example.com")));
        assert_eq!(mail, "a@example.com");

        let mut mobile = String::new();
        assert!(!fill_if_empty(&mut mobile, Some("")));
        assert!(!fill_if_empty(&mut mobile, None));
        assert!(mobile.is_empty());
    }
}
