// ==========================================
// 응급 병원 배정 엔진 - 핵심 라이브러리
// ==========================================
// 역할: 환자 증상/위치 기준 이송 병원 후보 집계·랭킹
// 파이프라인: 지역 스코프 확장 → 병렬 수집 → 후보 보강
//             → 랭킹 → 풀 조립 → 경로 정밀화
// ==========================================

// ==========================================
// 모듈 선언
// ==========================================

// 도메인 레이어 - 엔티티와 타입
pub mod domain;

// 저장소 레이어 - 시설 캐시
pub mod repository;

// 소스 레이어 - 외부 레지스트리/경로 API
pub mod source;

// 엔진 레이어 - 파이프라인 단계
pub mod engine;

// 설정 레이어 - 정적 테이블/런타임 설정
pub mod config;

// 로그 시스템
pub mod logging;

// API 레이어 - 요청/응답 페이로드
pub mod api;

// ==========================================
// 핵심 타입 재노출
// ==========================================

// 도메인 타입
pub use domain::{BedKey, Candidate, CapacitySnapshot, EquipKey, FacilityRecord, HospitalType, RegionClass};

// 엔진
pub use engine::{
    CandidateEnricher, DispatchEngine, ParallelFetcher, PoolAssembler, Ranker, RegionResolver,
    RouteAnnotator,
};

// API
pub use api::{CandidatePayload, DispatchError, DispatchRequest, DispatchResponse};

// ==========================================
// 상수 정의
// ==========================================

// 시스템 버전
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 시스템 이름
pub const APP_NAME: &str = "응급 병원 배정 엔진";
