// ==========================================
// 응급 병원 배정 엔진 - 풀 조립 엔진
// ==========================================
// 책임: 랭킹된 후보를 이송(primary)/예비(backup)/인근(neighbor) 풀로 조립
// 거리 정책: primary ≤50km 우선, ≤100km 확장, >100km 절대 불가
// 불변식: 세 풀을 합쳐 기관 식별자는 유일하다
// ==========================================

use crate::domain::candidate::Candidate;
use crate::engine::ranker::Ranker;
use std::collections::{HashMap, HashSet};

/// primary 우선 반경 (km)
pub const PRIMARY_RADIUS_KM: f64 = 50.0;
/// 풀 수용 한계 반경 (km)
pub const POOL_RADIUS_KM: f64 = 100.0;
/// primary 슬롯 수
pub const PRIMARY_SLOTS: usize = 3;
/// backup 풀 상한
pub const BACKUP_CAP: usize = 10;
/// neighbor 풀 최종 상한 (폴백 병합 후)
pub const NEIGHBOR_CAP: usize = 9;
/// combined 확장 시 원거리 추가 상한
const FAR_EXTEND_CAP: usize = 10;
/// neighbor 그룹핑 지역 수 (combined 쪽)
const COMBINED_NEIGHBOR_REGIONS: usize = 3;
/// neighbor 제안 풀의 지역 수 상한
const SUGGEST_NEIGHBOR_REGIONS: usize = 5;
/// neighbor 제안 풀의 1차 건수 상한
const SUGGEST_NEIGHBOR_ENTRIES: usize = 10;

/// 조립된 풀 세트
#[derive(Debug, Clone, Default)]
pub struct PoolPlan {
    /// 이송 추천 (최대 3)
    pub primary: Vec<Candidate>,
    /// 예비 풀 (최대 10)
    pub backup: Vec<Candidate>,
    /// 인근 지역 제안 풀 (최대 9)
    pub neighbor: Vec<Candidate>,
}

/// 행정구역 단위 그룹핑 정렬
///
/// 지역별 최단 거리 순으로 지역을 정렬하고 (최대 `max_regions`개),
/// 각 지역 내부는 거리 오름차순으로 평탄화한다.
pub fn prioritize_by_region(candidates: &[Candidate], max_regions: usize) -> Vec<Candidate> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let mut buckets: HashMap<String, Vec<Candidate>> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();
    for candidate in candidates {
        let region = candidate
            .region_name
            .clone()
            .unwrap_or_else(|| "미상".to_string());
        if !buckets.contains_key(&region) {
            first_seen.push(region.clone());
        }
        buckets.entry(region).or_default().push(candidate.clone());
    }

    let mut ordered_regions = first_seen;
    ordered_regions.sort_by(|a, b| {
        let min_a = min_distance(&buckets[a]);
        let min_b = min_distance(&buckets[b]);
        min_a.partial_cmp(&min_b).unwrap_or(std::cmp::Ordering::Equal)
    });
    ordered_regions.truncate(max_regions);

    let mut flattened = Vec::new();
    for region in ordered_regions {
        let mut group = buckets.remove(&region).unwrap_or_default();
        group.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        flattened.extend(group);
    }
    flattened
}

fn min_distance(group: &[Candidate]) -> f64 {
    group
        .iter()
        .map(|c| c.distance_km)
        .fold(f64::INFINITY, f64::min)
}

fn dedupe_by_id(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.id().to_string()))
        .collect()
}

fn within(candidates: &[Candidate], radius_km: f64) -> Vec<Candidate> {
    candidates
        .iter()
        .filter(|c| c.distance_km <= radius_km)
        .cloned()
        .collect()
}

// ==========================================
// PoolAssembler - 풀 조립 엔진
// ==========================================
pub struct PoolAssembler {
    ranker: Ranker,
}

impl PoolAssembler {
    pub fn new() -> Self {
        Self { ranker: Ranker::new() }
    }

    /// 후보 집합을 3종 풀로 조립
    ///
    /// # 파라미터
    /// - `candidates`: 1차 스코프에서 보강된 후보 전체
    /// - `fallback`: 폴백 도(道) 스코프의 후보 (지역 그룹핑 완료 상태)
    pub fn assemble(&self, candidates: Vec<Candidate>, fallback: Vec<Candidate>) -> PoolPlan {
        // 1. local / neighbor 분할 - local이 비면 전체를 local로 간주
        let mut local: Vec<Candidate> = candidates.iter().filter(|c| c.is_local()).cloned().collect();
        if local.is_empty() {
            local = candidates.clone();
        }
        let neighbor: Vec<Candidate> =
            candidates.iter().filter(|c| !c.is_local()).cloned().collect();

        // local도 100km 제한 적용 - 전멸 시 무제한 local로 복귀
        let local_filtered = within(&local, POOL_RADIUS_KM);
        let local_ranked = self
            .ranker
            .rank(if local_filtered.is_empty() { local } else { local_filtered });

        // 2. neighbor 랭킹, 근거리/원거리 분리, 지역 그룹핑 (최대 3개 지역)
        let neighbor_ranked = self.ranker.rank(neighbor);
        let nearby_neighbor = within(&neighbor_ranked, POOL_RADIUS_KM);
        let far_neighbor: Vec<Candidate> = neighbor_ranked
            .iter()
            .filter(|c| c.distance_km > POOL_RADIUS_KM)
            .cloned()
            .collect();
        let nearby_grouped = prioritize_by_region(&nearby_neighbor, COMBINED_NEIGHBOR_REGIONS);

        // 3. combined = local ++ 그룹핑된 neighbor, 부족 시 원거리로 확장
        let mut combined = dedupe_by_id(
            local_ranked
                .into_iter()
                .chain(nearby_grouped)
                .collect(),
        );
        if combined.len() < PRIMARY_SLOTS {
            let far_ranked = self.ranker.rank(far_neighbor);
            combined = dedupe_by_id(
                combined
                    .into_iter()
                    .chain(far_ranked.into_iter().take(FAR_EXTEND_CAP))
                    .collect(),
            );
        }
        if combined.is_empty() {
            combined = self.ranker.rank(within(&candidates, POOL_RADIUS_KM));
        }
        // primary/backup 선택 대상은 항상 ≤100km
        let combined = dedupe_by_id(
            self.ranker
                .rank(combined)
                .into_iter()
                .filter(|c| c.distance_km <= POOL_RADIUS_KM)
                .collect(),
        );

        // 4. primary: ≤50km 우선, 부족하면 50~100km, 그래도 부족하면 잔여 ≤100km
        let mut primary: Vec<Candidate> = combined
            .iter()
            .filter(|c| c.distance_km <= PRIMARY_RADIUS_KM)
            .take(PRIMARY_SLOTS)
            .cloned()
            .collect();
        if primary.len() < PRIMARY_SLOTS {
            let mid_range: Vec<Candidate> = combined
                .iter()
                .filter(|c| c.distance_km > PRIMARY_RADIUS_KM && c.distance_km <= POOL_RADIUS_KM)
                .cloned()
                .collect();
            primary.extend(
                self.ranker
                    .rank(mid_range)
                    .into_iter()
                    .take(PRIMARY_SLOTS - primary.len()),
            );
        }
        if primary.len() < PRIMARY_SLOTS {
            let chosen: HashSet<String> = primary.iter().map(|c| c.id().to_string()).collect();
            primary.extend(
                combined
                    .iter()
                    .filter(|c| !chosen.contains(c.id()))
                    .take(PRIMARY_SLOTS - primary.len())
                    .cloned(),
            );
        }

        // 5. backup: combined에서 primary를 제외한 다음 순위 (최대 10)
        let primary_ids: HashSet<String> = primary.iter().map(|c| c.id().to_string()).collect();
        let backup: Vec<Candidate> = combined
            .iter()
            .filter(|c| !primary_ids.contains(c.id()))
            .take(BACKUP_CAP)
            .cloned()
            .collect();

        // 6. neighbor 제안 풀: 최대 5개 지역 / 10건 + 폴백 후보 병합, 최종 9건
        let suggest_base: Vec<Candidate> = prioritize_by_region(
            &nearby_neighbor,
            SUGGEST_NEIGHBOR_REGIONS,
        )
        .into_iter()
        .take(SUGGEST_NEIGHBOR_ENTRIES)
        .collect();

        let mut selected_ids: HashSet<String> = primary_ids.clone();
        selected_ids.extend(backup.iter().map(|c| c.id().to_string()));

        let merged_sources = self
            .ranker
            .rank(suggest_base.into_iter().chain(fallback).collect());
        let mut neighbor_pool = Vec::new();
        let mut seen = HashSet::new();
        for candidate in merged_sources {
            let id = candidate.id().to_string();
            if selected_ids.contains(&id) || !seen.insert(id) {
                continue;
            }
            if candidate.distance_km <= POOL_RADIUS_KM {
                neighbor_pool.push(candidate);
                if neighbor_pool.len() >= NEIGHBOR_CAP {
                    break;
                }
            }
        }

        // primary가 여전히 부족하면 neighbor 풀에서 끌어온다
        if primary.len() < PRIMARY_SLOTS && !neighbor_pool.is_empty() {
            let needed = PRIMARY_SLOTS - primary.len();
            let mut promoted = Vec::new();
            let mut remaining = Vec::new();
            for candidate in neighbor_pool {
                if promoted.len() < needed && candidate.distance_km <= POOL_RADIUS_KM {
                    promoted.push(candidate);
                } else {
                    remaining.push(candidate);
                }
            }
            primary.extend(promoted);
            neighbor_pool = remaining;
        }

        PoolPlan {
            primary,
            backup,
            neighbor: neighbor_pool,
        }
    }

    /// 경로 보정 후속 교정 패스
    ///
    /// 경로 서비스의 실주행 거리가 직선 추정과 크게 어긋날 수 있어,
    /// 주석 단계 이후 100km를 초과하게 된 primary 항목을 backup으로
    /// 강등하고 backup에서 primary를 3석까지 재충원한다.
    pub fn apply_route_correction(&self, plan: &mut PoolPlan) {
        let (kept, demoted): (Vec<Candidate>, Vec<Candidate>) = std::mem::take(&mut plan.primary)
            .into_iter()
            .partition(|c| c.distance_km <= POOL_RADIUS_KM);
        plan.primary = kept;
        plan.backup.extend(demoted);

        if plan.primary.len() < PRIMARY_SLOTS {
            let backup_ranked = self
                .ranker
                .rank(within(&std::mem::take(&mut plan.backup), POOL_RADIUS_KM));
            let needed = PRIMARY_SLOTS - plan.primary.len();
            let mut iter = backup_ranked.into_iter();
            plan.primary.extend(iter.by_ref().take(needed));
            plan.backup = iter.collect();
        }
    }
}

impl Default for PoolAssembler {
    fn default() -> Self {
        Self::new()
    }
}
