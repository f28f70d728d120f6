// ==========================================
// PoolAssembler 엔진 테스트
// ==========================================
// 검증 대상: primary 거리 정책 (≤50km 우선, >100km 불가),
//           backup 상한/중복 배제, neighbor 제안 풀,
//           폴백 병합, 경로 보정 후속 교정
// ==========================================

use er_dispatch::domain::candidate::Candidate;
use er_dispatch::domain::capacity::CapacitySnapshot;
use er_dispatch::domain::facility::FacilityRecord;
use er_dispatch::domain::types::RegionClass;
use er_dispatch::engine::pools::{prioritize_by_region, PoolAssembler, PoolPlan};
use std::collections::HashSet;

// ==========================================
// 테스트 헬퍼
// ==========================================

fn make_candidate(
    id: &str,
    distance_km: f64,
    region_class: RegionClass,
    region_name: &str,
    fetch_seq: usize,
) -> Candidate {
    let mut facility = FacilityRecord::new(id);
    facility.name = Some(format!("{id} 병원"));
    Candidate {
        facility,
        capacity: CapacitySnapshot::new(id),
        distance_km,
        eta_minutes: None,
        requirement_score: 0.5,
        meets_all_required: false,
        grade_priority: 0.0,
        region_class,
        region_name: Some(region_name.to_string()),
        fetch_seq,
    }
}

fn local(id: &str, distance_km: f64, fetch_seq: usize) -> Candidate {
    make_candidate(id, distance_km, RegionClass::Local, "종로구", fetch_seq)
}

fn neighbor(id: &str, distance_km: f64, region: &str, fetch_seq: usize) -> Candidate {
    make_candidate(id, distance_km, RegionClass::Neighbor, region, fetch_seq)
}

fn fallback(id: &str, distance_km: f64, region: &str, fetch_seq: usize) -> Candidate {
    make_candidate(id, distance_km, RegionClass::Fallback, region, fetch_seq)
}

fn ids(candidates: &[Candidate]) -> Vec<&str> {
    candidates.iter().map(|c| c.id()).collect()
}

fn all_pool_ids(plan: &PoolPlan) -> Vec<String> {
    plan.primary
        .iter()
        .chain(&plan.backup)
        .chain(&plan.neighbor)
        .map(|c| c.id().to_string())
        .collect()
}

// ==========================================
// primary 거리 정책
// ==========================================

#[test]
fn test_primary_prefers_within_50km() {
    let assembler = PoolAssembler::new();
    let candidates = vec![
        local("A", 10.0, 0),
        local("B", 60.0, 1),
        local("C", 70.0, 2),
        local("D", 20.0, 3),
    ];
    let plan = assembler.assemble(candidates, Vec::new());

    // ≤50km 두 곳 우선, 부족분은 50~100km 구간에서 충원
    assert_eq!(ids(&plan.primary), vec!["A", "D", "B"]);
    assert_eq!(ids(&plan.backup), vec!["C"]);
}

#[test]
fn test_entries_beyond_100km_never_enter_primary() {
    let assembler = PoolAssembler::new();
    // 1차 스코프는 전부 100km 초과, 폴백은 반경 내
    let candidates = vec![
        local("FAR1", 120.0, 0),
        local("FAR2", 130.0, 1),
        local("FAR3", 140.0, 2),
    ];
    let fallback_pool = vec![
        fallback("FB1", 80.0, "수원시", 0),
        fallback("FB2", 90.0, "성남시", 1),
    ];
    let plan = assembler.assemble(candidates, fallback_pool);

    for candidate in &plan.primary {
        assert!(candidate.distance_km <= 100.0, "{} 초과", candidate.id());
    }
    // 반경 내 후보는 폴백뿐이므로 primary는 폴백에서 승격된다
    assert_eq!(ids(&plan.primary), vec!["FB1", "FB2"]);
}

#[test]
fn test_local_pool_empty_within_100km_still_fills_primary() {
    let assembler = PoolAssembler::new();
    // local 없음 - 인근 지역 후보만으로 primary 3석을 채워야 한다
    let candidates = vec![
        neighbor("N1", 15.0, "강남구", 0),
        neighbor("N2", 25.0, "강남구", 1),
        neighbor("N3", 35.0, "송파구", 2),
        neighbor("N4", 45.0, "송파구", 3),
        neighbor("N5", 55.0, "강동구", 4),
    ];
    let plan = assembler.assemble(candidates, Vec::new());

    assert_eq!(plan.primary.len(), 3);
    assert_eq!(plan.backup.len(), 2);
}

// ==========================================
// backup 풀
// ==========================================

#[test]
fn test_backup_excludes_primary_and_caps_at_10() {
    let assembler = PoolAssembler::new();
    let candidates: Vec<Candidate> = (0..15)
        .map(|i| local(&format!("H{i:02}"), 5.0 + i as f64, i))
        .collect();
    let plan = assembler.assemble(candidates, Vec::new());

    assert_eq!(plan.primary.len(), 3);
    assert_eq!(plan.backup.len(), 10);
    let primary_ids: HashSet<&str> = ids(&plan.primary).into_iter().collect();
    for candidate in &plan.backup {
        assert!(!primary_ids.contains(candidate.id()));
    }
}

// ==========================================
// neighbor 제안 풀 + 폴백 병합
// ==========================================

#[test]
fn test_neighbor_pool_caps_at_9_and_dedupes_selected() {
    let assembler = PoolAssembler::new();
    let mut candidates = vec![local("L1", 5.0, 0), local("L2", 8.0, 1), local("L3", 12.0, 2)];
    for i in 0..12 {
        candidates.push(neighbor(
            &format!("N{i:02}"),
            20.0 + i as f64,
            &format!("지역{}", i % 4),
            3 + i,
        ));
    }
    // 폴백에 이미 선택된 기관과 같은 id를 섞는다
    let fallback_pool = vec![
        fallback("L1", 5.0, "종로구", 0),
        fallback("FB1", 60.0, "수원시", 1),
    ];
    let plan = assembler.assemble(candidates, fallback_pool);

    assert!(plan.neighbor.len() <= 9);
    let pooled = all_pool_ids(&plan);
    let unique: HashSet<&String> = pooled.iter().collect();
    assert_eq!(pooled.len(), unique.len(), "풀 전체 기관 id는 유일해야 한다");
}

#[test]
fn test_empty_scope_draws_everything_from_fallback() {
    let assembler = PoolAssembler::new();
    let fallback_pool = vec![
        fallback("FB1", 30.0, "수원시", 0),
        fallback("FB2", 40.0, "수원시", 1),
        fallback("FB3", 55.0, "성남시", 2),
        fallback("FB4", 70.0, "성남시", 3),
    ];
    let plan = assembler.assemble(Vec::new(), fallback_pool);

    // 1차 스코프가 비면 primary 승격분을 포함해 전 풀이 폴백 출신이다
    assert_eq!(plan.primary.len(), 3);
    assert_eq!(ids(&plan.neighbor), vec!["FB4"]);
    assert!(plan.backup.is_empty());
    for candidate in plan.primary.iter().chain(&plan.neighbor) {
        assert_eq!(candidate.region_class, RegionClass::Fallback);
    }
}

#[test]
fn test_all_pools_unique_ids_with_duplicate_input() {
    let assembler = PoolAssembler::new();
    // 동일 기관이 local/neighbor 양쪽 수집에 중복 등장한 경우
    let candidates = vec![
        local("DUP", 10.0, 0),
        neighbor("DUP", 10.0, "강남구", 1),
        local("A", 20.0, 2),
        neighbor("B", 30.0, "강남구", 3),
        neighbor("C", 40.0, "송파구", 4),
    ];
    let plan = assembler.assemble(candidates, Vec::new());

    let pooled = all_pool_ids(&plan);
    let unique: HashSet<&String> = pooled.iter().collect();
    assert_eq!(pooled.len(), unique.len());
}

// ==========================================
// 지역 그룹핑
// ==========================================

#[test]
fn test_prioritize_by_region_orders_by_nearest_region() {
    let candidates = vec![
        neighbor("X1", 30.0, "X구", 0),
        neighbor("Y1", 12.0, "Y구", 1),
        neighbor("Y2", 10.0, "Y구", 2),
        neighbor("Z1", 20.0, "Z구", 3),
    ];
    let grouped = prioritize_by_region(&candidates, 2);

    // 지역 최단거리 순: Y구(10) → Z구(20), X구는 상한 초과로 탈락
    // 지역 내부는 거리 오름차순
    assert_eq!(ids(&grouped), vec!["Y2", "Y1", "Z1"]);
}

#[test]
fn test_prioritize_by_region_handles_missing_region_name() {
    let mut unnamed = neighbor("U1", 5.0, "", 0);
    unnamed.region_name = None;
    let grouped = prioritize_by_region(&[unnamed], 3);
    assert_eq!(ids(&grouped), vec!["U1"]);
}

// ==========================================
// 경로 보정 후속 교정
// ==========================================

#[test]
fn test_route_correction_demotes_and_backfills() {
    let assembler = PoolAssembler::new();
    let mut plan = PoolPlan {
        primary: vec![
            local("P1", 10.0, 0),
            // 경로 보정으로 실주행 거리가 반경을 넘은 경우
            local("P2", 120.0, 1),
            local("P3", 30.0, 2),
        ],
        backup: vec![local("B1", 40.0, 3), local("B2", 50.0, 4)],
        neighbor: Vec::new(),
    };
    assembler.apply_route_correction(&mut plan);

    assert_eq!(plan.primary.len(), 3);
    for candidate in &plan.primary {
        assert!(candidate.distance_km <= 100.0);
    }
    assert!(!ids(&plan.primary).contains(&"P2"));
    // 재충원은 backup 상위에서 이루어진다
    assert_eq!(ids(&plan.primary), vec!["P1", "P3", "B1"]);
    assert_eq!(ids(&plan.backup), vec!["B2"]);
}

#[test]
fn test_route_correction_noop_when_primary_within_radius() {
    let assembler = PoolAssembler::new();
    let mut plan = PoolPlan {
        primary: vec![local("P1", 10.0, 0), local("P2", 20.0, 1), local("P3", 30.0, 2)],
        backup: vec![local("B1", 40.0, 3)],
        neighbor: Vec::new(),
    };
    assembler.apply_route_correction(&mut plan);

    assert_eq!(ids(&plan.primary), vec!["P1", "P2", "P3"]);
    assert_eq!(ids(&plan.backup), vec!["B1"]);
}
