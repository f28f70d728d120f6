// ==========================================
// 응급 병원 배정 엔진 - 도메인 모델 레이어
// ==========================================
// 책임: 엔티티/타입 정의
// 규칙: 데이터 접근 로직/엔진 로직을 포함하지 않는다
// ==========================================

pub mod candidate;
pub mod capacity;
pub mod facility;
pub mod types;

// 핵심 타입 재노출
pub use candidate::Candidate;
pub use capacity::CapacitySnapshot;
pub use facility::FacilityRecord;
pub use types::{BedKey, EquipKey, HospitalType, RegionClass};
