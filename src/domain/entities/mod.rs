//! # Domain Entities Module
//!
//! MongoDB 문서와 직접 매핑되는 영속 엔티티들입니다.
//!
//! | 엔티티 | 컬렉션 | 키 |
//! |--------|--------|----|
//! | [`LocalUser`](users::LocalUser) | `users` | `_id: i64`, `name` unique |
//! | [`Role`](roles::Role) | `roles` | `_id: i64`, `name` unique |
//! | [`IdentityLink`](links::IdentityLink) | `identity_links` | `(provider, open_id)` unique |
//!
//! 계정과 역할의 정수 ID는 `counters` 컬렉션의 시퀀스에서 발급됩니다.

pub mod users;
pub mod roles;
pub mod links;
