//! 외부 신원 연결 리포지토리 모듈

pub mod identity_link_repo;
