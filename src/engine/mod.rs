// ==========================================
// 응급 병원 배정 엔진 - 엔진 레이어
// ==========================================
// 책임: 후보 집계/랭킹 파이프라인의 각 단계 구현
// 규칙: 엔진은 SQL/HTTP를 직접 다루지 않는다 (seam trait 경유)
// ==========================================

pub mod enricher;
pub mod fetcher;
pub mod geo;
pub mod orchestrator;
pub mod pools;
pub mod ranker;
pub mod region;
pub mod route;

// 핵심 엔진 재노출
pub use enricher::{evaluate_requirements, CandidateEnricher, MAX_CANDIDATE_DISTANCE_KM};
pub use fetcher::{FetchLimits, ParallelFetcher};
pub use orchestrator::DispatchEngine;
pub use pools::{prioritize_by_region, PoolAssembler, PoolPlan};
pub use ranker::{grade_priority, Ranker};
pub use region::{RegionResolver, RegionScope};
pub use route::{heuristic_eta_minutes, RouteAnnotator};
