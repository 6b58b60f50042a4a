//! 공통 유틸리티 모듈
//!
//! - [`string_utils`] - 외부 신원/프로필 문자열 처리
//! - [`display_terminal`] - 부팅 과정 로그 포맷팅

pub mod string_utils;
pub mod display_terminal;
