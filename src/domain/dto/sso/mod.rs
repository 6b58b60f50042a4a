//! SSO 엔드포인트 요청/응답 DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
