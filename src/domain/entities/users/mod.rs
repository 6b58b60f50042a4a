//! 로컬 계정 엔티티 모듈
//!
//! [`LocalUser`](user::LocalUser)는 기본/확장 두 형태를 가진 계정 타입입니다.

pub mod user;

pub use user::*;
