//! 역할 엔티티 모듈

pub mod role;

pub use role::*;
