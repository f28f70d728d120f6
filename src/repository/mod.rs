// ==========================================
// 응급 병원 배정 엔진 - 저장소 레이어
// ==========================================
// 책임: 시설 캐시 데이터 접근
// ==========================================

pub mod error;
pub mod facility_cache;

pub use error::{RepositoryError, RepositoryResult};
pub use facility_cache::{FacilityCache, SqliteFacilityCache};
