// ==========================================
// Ranker 엔진 테스트
// ==========================================
// 검증 대상: 다중 키 정렬 순서, 결정성/멱등성, 안정 tie-break
// ==========================================

use er_dispatch::domain::capacity::CapacitySnapshot;
use er_dispatch::domain::facility::FacilityRecord;
use er_dispatch::domain::types::RegionClass;
use er_dispatch::domain::Candidate;
use er_dispatch::engine::Ranker;

// ==========================================
// 테스트 헬퍼
// ==========================================

fn make_candidate(
    id: &str,
    score: f64,
    grade_priority: f64,
    distance_km: f64,
    fetch_seq: usize,
) -> Candidate {
    let mut facility = FacilityRecord::new(id);
    facility.lat = Some(37.5);
    facility.lon = Some(127.0);
    Candidate {
        capacity: CapacitySnapshot::new(id),
        facility,
        distance_km,
        eta_minutes: None,
        requirement_score: score,
        meets_all_required: score >= 1.0,
        grade_priority,
        region_class: RegionClass::Local,
        region_name: Some("종로구".to_string()),
        fetch_seq,
    }
}

fn ids(candidates: &[Candidate]) -> Vec<&str> {
    candidates.iter().map(|c| c.id()).collect()
}

// ==========================================
// 정렬 키 검증
// ==========================================

#[test]
fn test_score_dominates_grade_and_distance() {
    let ranker = Ranker::new();
    let ranked = ranker.rank(vec![
        make_candidate("LOW", 0.5, 4.0, 1.0, 0),
        make_candidate("HIGH", 1.0, 0.0, 90.0, 1),
    ]);
    assert_eq!(ids(&ranked), vec!["HIGH", "LOW"]);
}

#[test]
fn test_grade_breaks_score_tie() {
    let ranker = Ranker::new();
    let ranked = ranker.rank(vec![
        make_candidate("SECONDARY", 1.0, 1.0, 5.0, 0),
        make_candidate("TRAUMA_CENTER", 1.0, 4.0, 50.0, 1),
    ]);
    assert_eq!(ids(&ranked), vec!["TRAUMA_CENTER", "SECONDARY"]);
}

#[test]
fn test_distance_breaks_remaining_tie() {
    let ranker = Ranker::new();
    let ranked = ranker.rank(vec![
        make_candidate("FAR", 1.0, 2.0, 30.0, 0),
        make_candidate("NEAR", 1.0, 2.0, 3.0, 1),
    ]);
    assert_eq!(ids(&ranked), vec!["NEAR", "FAR"]);
}

#[test]
fn test_fetch_order_is_final_tiebreak() {
    let ranker = Ranker::new();
    let ranked = ranker.rank(vec![
        make_candidate("SECOND_SEEN", 0.5, 1.0, 10.0, 7),
        make_candidate("FIRST_SEEN", 0.5, 1.0, 10.0, 2),
    ]);
    assert_eq!(ids(&ranked), vec!["FIRST_SEEN", "SECOND_SEEN"]);
}

// ==========================================
// 결정성 / 멱등성
// ==========================================

#[test]
fn test_rank_is_deterministic_and_idempotent() {
    let ranker = Ranker::new();
    let input: Vec<Candidate> = (0..20)
        .map(|i| {
            make_candidate(
                &format!("H{i:02}"),
                (i % 3) as f64 / 2.0,
                (i % 5) as f64,
                (i * 7 % 100) as f64,
                i,
            )
        })
        .collect();

    let once = ranker.rank(input.clone());
    let twice = ranker.rank(once.clone());
    let again = ranker.rank(input);

    assert_eq!(ids(&once), ids(&twice), "재적용 시 순서가 달라짐");
    assert_eq!(ids(&once), ids(&again), "동일 입력에 다른 순서");
}

#[test]
fn test_pediatric_bonus_band_outranks_everything() {
    let ranker = Ranker::new();
    let ranked = ranker.rank(vec![
        make_candidate("PERFECT_NEAR", 1.0, 4.0, 1.0, 0),
        make_candidate("NICU_FAR", 10.5, 0.0, 99.0, 1),
    ]);
    // 소아 가산 대역 [10,11]은 거리/등급과 무관하게 최상위
    assert_eq!(ids(&ranked), vec!["NICU_FAR", "PERFECT_NEAR"]);
}
