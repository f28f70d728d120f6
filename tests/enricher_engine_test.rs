// ==========================================
// CandidateEnricher 엔진 테스트
// ==========================================
// 검증 대상: 거리 컷오프, 좌표 누락 폐기, 지역 분류,
//           요구사항 점수, 소아 중증 가산
// ==========================================

use er_dispatch::config::symptoms::rule_for_symptom;
use er_dispatch::domain::capacity::CapacitySnapshot;
use er_dispatch::domain::facility::FacilityRecord;
use er_dispatch::domain::types::{HospitalType, RegionClass};
use er_dispatch::engine::{evaluate_requirements, CandidateEnricher};
use er_dispatch::source::registry::GradeInfo;
use std::collections::HashMap;

// 서울시청 좌표
const ORIGIN_LAT: f64 = 37.5665;
const ORIGIN_LON: f64 = 126.9780;

// ==========================================
// 테스트 헬퍼
// ==========================================

fn make_facility(id: &str, address: &str, lat: f64, lon: f64) -> FacilityRecord {
    let mut record = FacilityRecord::new(id);
    record.name = Some(format!("{id} 병원"));
    record.phone = Some("02-0000-0000".to_string());
    record.address = Some(address.to_string());
    record.lat = Some(lat);
    record.lon = Some(lon);
    record
}

fn make_enricher(symptom: &str, sigungu: Option<&str>) -> CandidateEnricher {
    CandidateEnricher::new(
        ORIGIN_LAT,
        ORIGIN_LON,
        sigungu.map(|s| s.to_string()),
        rule_for_symptom(symptom),
        HospitalType::from_symptom(symptom),
        symptom,
    )
}

fn stroke_ready_snapshot(id: &str) -> CapacitySnapshot {
    // 뇌졸중 규칙 (CT + 일반중환자실 ≥1) 완전 충족
    CapacitySnapshot {
        ct_available: Some(true),
        icu_general: Some(2),
        ..CapacitySnapshot::new(id)
    }
}

// ==========================================
// 거리 / 좌표 처리
// ==========================================

#[test]
fn test_distance_cutoff_at_150km() {
    let enricher = make_enricher("뇌졸중 의심(FAST+)", Some("종로구"));
    let records = vec![
        // 종로구, 약 1km
        make_facility("NEAR", "서울특별시 종로구 세종대로 1", 37.5729, 126.9794),
        // 대전, 약 140km - 유지
        make_facility("DAEJEON", "대전광역시 서구 둔산로 100", 36.3504, 127.3845),
        // 부산, 약 325km - 폐기
        make_facility("BUSAN", "부산광역시 연제구 중앙대로 1001", 35.1796, 129.0756),
    ];
    let candidates = enricher.enrich(records, &HashMap::new(), &HashMap::new(), None);

    let ids: Vec<&str> = candidates.iter().map(|c| c.id()).collect();
    assert_eq!(ids, vec!["NEAR", "DAEJEON"]);
    for candidate in &candidates {
        assert!(candidate.distance_km <= 150.0);
    }
}

#[test]
fn test_missing_coordinates_discarded() {
    let enricher = make_enricher("뇌졸중 의심(FAST+)", None);
    let mut no_coords = FacilityRecord::new("NO_COORDS");
    no_coords.address = Some("서울특별시 중구".to_string());
    let candidates = enricher.enrich(vec![no_coords], &HashMap::new(), &HashMap::new(), None);
    assert!(candidates.is_empty());
}

// ==========================================
// 지역 분류
// ==========================================

#[test]
fn test_local_neighbor_classification() {
    let enricher = make_enricher("뇌졸중 의심(FAST+)", Some("종로구"));
    let records = vec![
        make_facility("LOCAL", "서울특별시 종로구 대학로 101", 37.5794, 126.9989),
        make_facility("NEIGHBOR", "서울특별시 강남구 테헤란로 1", 37.4999, 127.0374),
    ];
    let candidates = enricher.enrich(records, &HashMap::new(), &HashMap::new(), None);

    assert_eq!(candidates[0].region_class, RegionClass::Local);
    assert_eq!(candidates[0].region_name.as_deref(), Some("종로구"));
    assert_eq!(candidates[1].region_class, RegionClass::Neighbor);
    assert_eq!(candidates[1].region_name.as_deref(), Some("강남구"));
}

#[test]
fn test_no_sigungu_means_everything_local() {
    let enricher = make_enricher("뇌졸중 의심(FAST+)", None);
    let records = vec![make_facility(
        "ANY",
        "서울특별시 강남구 테헤란로 1",
        37.4999,
        127.0374,
    )];
    let candidates = enricher.enrich(records, &HashMap::new(), &HashMap::new(), None);
    assert_eq!(candidates[0].region_class, RegionClass::Local);
}

#[test]
fn test_class_override_marks_fallback() {
    let enricher = make_enricher("뇌졸중 의심(FAST+)", Some("종로구"));
    let records = vec![make_facility(
        "FB",
        "경기도 수원시 권선구 1",
        37.2636,
        127.0286,
    )];
    let candidates = enricher.enrich(
        records,
        &HashMap::new(),
        &HashMap::new(),
        Some(RegionClass::Fallback),
    );
    assert_eq!(candidates[0].region_class, RegionClass::Fallback);
}

// ==========================================
// 요구사항 평가
// ==========================================

#[test]
fn test_full_satisfaction_scores_one() {
    let rule = rule_for_symptom("뇌졸중 의심(FAST+)");
    let (score, fully_met) = evaluate_requirements(&stroke_ready_snapshot("A"), &rule);
    assert_eq!(score, 1.0);
    assert!(fully_met);
}

#[test]
fn test_partial_satisfaction_averages_dimensions() {
    let rule = rule_for_symptom("뇌졸중 의심(FAST+)");
    // CT 불가, 중환자실은 충족 → (0/1 + 1/1) / 2 = 0.5
    let snapshot = CapacitySnapshot {
        ct_available: Some(false),
        icu_general: Some(1),
        ..CapacitySnapshot::new("A")
    };
    let (score, fully_met) = evaluate_requirements(&snapshot, &rule);
    assert_eq!(score, 0.5);
    assert!(!fully_met);
}

#[test]
fn test_single_dimension_rule_fully_evaluable() {
    // 정형외과 규칙은 최소 병상 차원만 존재
    let rule = rule_for_symptom("정형외과 중증(대형골절/절단)");
    let snapshot = CapacitySnapshot {
        operating_rooms: Some(1),
        icu_surgical: Some(1),
        ward_surgical: Some(0),
        ..CapacitySnapshot::new("A")
    };
    let (score, fully_met) = evaluate_requirements(&snapshot, &rule);
    assert!((score - 2.0 / 3.0).abs() < 1e-9);
    assert!(!fully_met);
}

#[test]
fn test_empty_rule_scores_zero_but_fully_met() {
    let rule = rule_for_symptom("미등록 증상");
    let (score, fully_met) = evaluate_requirements(&CapacitySnapshot::new("A"), &rule);
    assert_eq!(score, 0.0);
    assert!(fully_met);
}

#[test]
fn test_score_stays_in_unit_range_without_bonus() {
    let enricher = make_enricher("심근경색 의심(STEMI)", Some("종로구"));
    let mut capacity = HashMap::new();
    capacity.insert(
        "A".to_string(),
        CapacitySnapshot {
            angio_available: Some(true),
            operating_rooms: Some(1),
            ..CapacitySnapshot::new("A")
        },
    );
    let records = vec![make_facility("A", "서울특별시 종로구 1", 37.5729, 126.9794)];
    let candidates = enricher.enrich(records, &capacity, &HashMap::new(), None);

    let candidate = &candidates[0];
    assert!((0.0..=1.0).contains(&candidate.requirement_score));
    // 완전 충족이 아니면 meets_all_required는 false
    assert!(!candidate.meets_all_required);
}

// ==========================================
// 소아 중증 가산
// ==========================================

#[test]
fn test_pediatric_nicu_bonus_applied() {
    let enricher = make_enricher("소아 중증(신생아/영아)", Some("종로구"));
    let mut capacity = HashMap::new();
    capacity.insert(
        "PED".to_string(),
        CapacitySnapshot {
            pediatric_duty: Some(true),
            pediatric_surgery: Some(true),
            icu_neonatal: Some(1),
            ..CapacitySnapshot::new("PED")
        },
    );
    let records = vec![make_facility("PED", "서울특별시 종로구 1", 37.5729, 126.9794)];
    let candidates = enricher.enrich(records, &capacity, &HashMap::new(), None);

    let candidate = &candidates[0];
    // 완전 충족 1.0 + 가산 10.0
    assert!(candidate.meets_all_required);
    assert!((10.0..=11.0).contains(&candidate.requirement_score));
}

#[test]
fn test_pediatric_without_nicu_gets_no_bonus() {
    let enricher = make_enricher("소아 중증(신생아/영아)", Some("종로구"));
    let mut capacity = HashMap::new();
    capacity.insert(
        "PED".to_string(),
        CapacitySnapshot {
            pediatric_duty: Some(true),
            pediatric_surgery: Some(true),
            icu_neonatal: Some(0),
            ..CapacitySnapshot::new("PED")
        },
    );
    let records = vec![make_facility("PED", "서울특별시 종로구 1", 37.5729, 126.9794)];
    let candidates = enricher.enrich(records, &capacity, &HashMap::new(), None);
    assert!((0.0..=1.0).contains(&candidates[0].requirement_score));
}

#[test]
fn test_nicu_alone_does_not_trigger_bonus_for_other_symptoms() {
    let enricher = make_enricher("뇌졸중 의심(FAST+)", Some("종로구"));
    let mut capacity = HashMap::new();
    capacity.insert(
        "A".to_string(),
        CapacitySnapshot {
            icu_neonatal: Some(3),
            ..stroke_ready_snapshot("A")
        },
    );
    let records = vec![make_facility("A", "서울특별시 종로구 1", 37.5729, 126.9794)];
    let candidates = enricher.enrich(records, &capacity, &HashMap::new(), None);
    assert_eq!(candidates[0].requirement_score, 1.0);
}

// ==========================================
// 등급 오버레이
// ==========================================

#[test]
fn test_grade_overlay_raises_priority() {
    let enricher = make_enricher("뇌졸중 의심(FAST+)", Some("종로구"));
    let mut grades = HashMap::new();
    grades.insert(
        "A".to_string(),
        GradeInfo {
            grade_code: Some("G001".to_string()),
            grade_name: Some("권역외상센터".to_string()),
        },
    );
    let records = vec![make_facility("A", "서울특별시 종로구 1", 37.5729, 126.9794)];
    let candidates = enricher.enrich(records, &HashMap::new(), &grades, None);

    assert_eq!(candidates[0].facility.grade_name.as_deref(), Some("권역외상센터"));
    assert_eq!(candidates[0].grade_priority, 4.0);
    // 식별 필드는 오버레이로 변하지 않는다
    assert_eq!(candidates[0].facility.name.as_deref(), Some("A 병원"));
    assert_eq!(candidates[0].facility.phone.as_deref(), Some("02-0000-0000"));
}
