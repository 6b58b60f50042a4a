//! SSO 로그인 처리 모델
//!
//! - [`external_identity`] - 외부 프로바이더가 검증을 마치고 넘겨준 신원 정보
//! - [`claims`] - 대소문자 구분 없는 클레임 맵
//! - [`session`] - 요청마다 명시적으로 전달되는 세션 컨텍스트

pub mod claims;
pub mod external_identity;
pub mod session;

pub use claims::*;
pub use external_identity::*;
pub use session::*;
