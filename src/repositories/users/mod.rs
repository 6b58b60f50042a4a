//! 계정 리포지토리 모듈
//!
//! ```rust,ignore
//! use crate::repositories::users::user_repo::UserRepository;
//!
//! let user_repo = UserRepository::instance();
//! let user = user_repo.find_by_name("alice").await?;
//! ```

pub mod user_repo;
