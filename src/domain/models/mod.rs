//! # Domain Models
//!
//! 영속되지 않는 요청 단위 모델들입니다.

pub mod sso;
