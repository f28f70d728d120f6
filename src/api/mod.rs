// ==========================================
// 응급 병원 배정 엔진 - API 페이로드 레이어
// ==========================================

pub mod error;
pub mod payload;

pub use error::DispatchError;
pub use payload::{CandidatePayload, DispatchRequest, DispatchResponse};
