//! 외부 신원 연결 엔티티 모듈

pub mod identity_link;

pub use identity_link::*;
