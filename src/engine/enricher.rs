// ==========================================
// 응급 병원 배정 엔진 - 후보 보강 엔진
// ==========================================
// 책임: 기본정보 + 가용 스냅샷 + 등급 병합, 거리/분류/점수 산출
// 불변식: 거리 계산은 지역 분류·필터링보다 먼저 수행된다
// 제외 규칙: 좌표 누락 또는 150km 초과 후보는 조용히 폐기
// ==========================================

use crate::config::symptoms::{SymptomRule, PEDIATRIC_CRITICAL_SYMPTOM, PEDIATRIC_NICU_BONUS};
use crate::domain::capacity::CapacitySnapshot;
use crate::domain::candidate::Candidate;
use crate::domain::facility::FacilityRecord;
use crate::domain::types::{BedKey, HospitalType, RegionClass};
use crate::engine::geo::{guess_region_from_address, haversine_km};
use crate::engine::ranker::grade_priority;
use crate::source::registry::GradeInfo;
use std::collections::HashMap;
use tracing::debug;

/// 후보 유지 최대 거리 (km)
pub const MAX_CANDIDATE_DISTANCE_KM: f64 = 150.0;

// ==========================================
// 요구사항 평가
// ==========================================

/// 증상 규칙 평가 결과: (점수 [0,1], 완전 충족 여부)
///
/// 점수는 {플래그 충족 비율, 최소 병상 충족 비율} 중 규칙에 존재하는
/// 차원들의 평균이다. 한 차원만 있는 규칙은 그 차원만으로 평가된다.
/// 빈 규칙은 점수 0, 완전 충족 true (평가할 차원이 없으므로).
pub fn evaluate_requirements(snapshot: &CapacitySnapshot, rule: &SymptomRule) -> (f64, bool) {
    let flag_total = rule.required_flags.len();
    let flag_satisfied = rule
        .required_flags
        .iter()
        .filter(|key| snapshot.flag(**key))
        .count();

    let min_total = rule.min_counts.len();
    let min_satisfied = rule
        .min_counts
        .iter()
        .filter(|(key, threshold)| snapshot.beds(*key) >= *threshold)
        .count();

    let mut parts = Vec::new();
    if flag_total > 0 {
        parts.push(flag_satisfied as f64 / flag_total as f64);
    }
    if min_total > 0 {
        parts.push(min_satisfied as f64 / min_total as f64);
    }
    let score = if parts.is_empty() {
        0.0
    } else {
        parts.iter().sum::<f64>() / parts.len() as f64
    };

    let fully_met = flag_satisfied == flag_total && min_satisfied == min_total;
    (score, fully_met)
}

// ==========================================
// CandidateEnricher - 후보 보강 엔진
// ==========================================

/// 요청 문맥 (좌표/시군구/증상)을 들고 원시 레코드를 후보로 변환
pub struct CandidateEnricher {
    origin_lat: f64,
    origin_lon: f64,
    sigungu: Option<String>,
    rule: SymptomRule,
    hospital_type: HospitalType,
    symptom: String,
}

impl CandidateEnricher {
    pub fn new(
        origin_lat: f64,
        origin_lon: f64,
        sigungu: Option<String>,
        rule: SymptomRule,
        hospital_type: HospitalType,
        symptom: impl Into<String>,
    ) -> Self {
        Self {
            origin_lat,
            origin_lon,
            sigungu: sigungu.filter(|s| !s.trim().is_empty()),
            rule,
            hospital_type,
            symptom: symptom.into(),
        }
    }

    /// 원시 레코드 목록을 후보 목록으로 보강
    ///
    /// # 파라미터
    /// - `records`: 병합된 기본정보 레코드
    /// - `capacity`: id → 가용 스냅샷
    /// - `grades`: id → 등급 정보 (있으면 레코드 등급을 덮어쓴다)
    /// - `class_override`: 폴백 스코프 보강 시 `RegionClass::Fallback` 고정
    pub fn enrich(
        &self,
        records: Vec<FacilityRecord>,
        capacity: &HashMap<String, CapacitySnapshot>,
        grades: &HashMap<String, GradeInfo>,
        class_override: Option<RegionClass>,
    ) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for (fetch_seq, mut facility) in records.into_iter().enumerate() {
            // (a) 가용 스냅샷 오버레이 - 별도 필드로 합성되므로
            //     기관명/전화 등 식별 필드는 스냅샷이 건드리지 못한다
            let snapshot = capacity
                .get(&facility.id)
                .cloned()
                .unwrap_or_else(|| CapacitySnapshot::new(facility.id.clone()));

            // (b) 등급 오버레이 - 특화(외상센터) 지정 우선
            if let Some(grade) = grades.get(&facility.id) {
                facility.overlay_grade(grade.grade_code.as_deref(), grade.grade_name.as_deref());
            }

            // (c) 거리 계산 - 좌표 누락/150km 초과는 폐기
            let (Some(lat), Some(lon)) = (facility.lat, facility.lon) else {
                debug!(id = %facility.id, "좌표 누락, 후보 폐기");
                continue;
            };
            let distance_km = haversine_km(self.origin_lat, self.origin_lon, lat, lon);
            if distance_km > MAX_CANDIDATE_DISTANCE_KM {
                debug!(id = %facility.id, distance_km, "거리 초과, 후보 폐기");
                continue;
            }

            // (d) 지역 분류 - 주소 기반 시군구 텍스트 일치
            let region_name = facility
                .address
                .as_deref()
                .and_then(guess_region_from_address)
                .map(|(sido, sigungu)| sigungu.unwrap_or(sido))
                .or_else(|| self.sigungu.clone());
            let region_class = class_override.unwrap_or_else(|| {
                match (&self.sigungu, &region_name) {
                    (None, _) => RegionClass::Local,
                    (Some(requested), Some(name)) if requested == name => RegionClass::Local,
                    _ => RegionClass::Neighbor,
                }
            });

            // (e) 요구사항 평가 + 소아 중증 가산
            let (mut requirement_score, meets_all_required) =
                evaluate_requirements(&snapshot, &self.rule);
            if self.hospital_type == HospitalType::Pediatric
                && self.symptom == PEDIATRIC_CRITICAL_SYMPTOM
                && snapshot.beds(BedKey::IcuNeonatal) >= 1
            {
                requirement_score += PEDIATRIC_NICU_BONUS;
            }

            let grade_priority = grade_priority(
                facility.grade_name.as_deref(),
                facility.division_name.as_deref(),
            );

            candidates.push(Candidate {
                facility,
                capacity: snapshot,
                distance_km,
                eta_minutes: None,
                requirement_score,
                meets_all_required,
                grade_priority,
                region_class,
                region_name,
                fetch_seq,
            });
        }

        candidates
    }
}
