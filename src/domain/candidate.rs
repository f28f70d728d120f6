// ==========================================
// 응급 병원 배정 엔진 - 요청 스코프 후보 엔티티
// ==========================================
// 수명주기: 요청마다 생성되고 응답 조립 후 폐기된다
// 불변식: 거리 계산은 지역 분류/필터링보다 항상 먼저 수행
// ==========================================

use crate::domain::capacity::CapacitySnapshot;
use crate::domain::facility::FacilityRecord;
use crate::domain::types::RegionClass;
use serde::{Deserialize, Serialize};

/// 랭킹 파이프라인을 흐르는 병원 후보
///
/// `FacilityRecord` + `CapacitySnapshot` + 파생 필드의 합성이다.
/// `fetch_seq`는 수집 당시의 순번으로, 정렬 키가 모두 같을 때
/// 원래 수집 순서를 보존하는 최종 tie-break로 쓰인다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// 시설 기본정보 (등급 오버레이 반영)
    pub facility: FacilityRecord,
    /// 실시간 가용 스냅샷
    pub capacity: CapacitySnapshot,
    /// 요청 좌표로부터의 거리 (km)
    pub distance_km: f64,
    /// 도착 예상 시간 (분) - 경로 보정 이후에만 채워질 수 있음
    pub eta_minutes: Option<u32>,
    /// 증상 요구사항 충족 점수 (소아 중증 가산 전 [0,1])
    pub requirement_score: f64,
    /// 모든 필수 요건 100% 충족 여부
    pub meets_all_required: bool,
    /// 등급 우선순위 서수 (권역외상센터 4.0 ... 미분류 0.0)
    pub grade_priority: f64,
    /// 지역 분류
    pub region_class: RegionClass,
    /// 주소 기반 시군구 추정명
    pub region_name: Option<String>,
    /// 수집 순번 (안정 정렬용)
    pub fetch_seq: usize,
}

impl Candidate {
    /// 기관 식별자
    pub fn id(&self) -> &str {
        &self.facility.id
    }

    /// 동일 스코프 지역 내 후보 여부
    pub fn is_local(&self) -> bool {
        self.region_class == RegionClass::Local
    }
}
