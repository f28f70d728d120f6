// ==========================================
// 응급 병원 배정 엔진 - 병렬 수집 엔진
// ==========================================
// 책임: 스코프 내 전 지역의 레지스트리/외상센터/병상/등급 수집
// 동시성: 엔드포인트 민감도별 세마포어 워커풀 (5/10/20)
// 장애 정책: 단일 지역·카테고리 실패는 기록 후 건너뛴다
// ==========================================
// 병합 규칙:
// - 기관 식별자는 first-seen-wins
// - 단, 외상센터 엔드포인트 출처 등급 정보는 일반 출처를 항상 덮어쓴다
// ==========================================

use crate::domain::capacity::CapacitySnapshot;
use crate::domain::facility::FacilityRecord;
use crate::domain::types::HospitalType;
use crate::repository::facility_cache::FacilityCache;
use crate::source::registry::{GradeEndpoint, GradeInfo, RegistrySource};
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// 카테고리별 수집 상한과 워커풀 크기
#[derive(Debug, Clone)]
pub struct FetchLimits {
    /// 일반 응급의료기관 상한 (general/pediatric 조회의 주 소스)
    pub general_cap: usize,
    /// 외상센터 상한 (trauma 조회의 주 소스)
    pub trauma_cap: usize,
    /// trauma 조회 시 보충하는 일반 기관 상한
    pub general_supplement_cap: usize,
    /// general/pediatric 조회 시 보충하는 외상센터 상한
    pub trauma_supplement_cap: usize,
    /// 기관별 기본정보 상세 조회 워커풀
    pub detail_concurrency: usize,
    /// 지역 단위 목록 조회 워커풀
    pub listing_concurrency: usize,
    /// 등급 목록 조회 워커풀 (레이트 리밋 민감)
    pub grade_concurrency: usize,
    /// 가용병상 조회 워커풀
    pub capacity_concurrency: usize,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            general_cap: 120,
            trauma_cap: 80,
            general_supplement_cap: 70,
            trauma_supplement_cap: 30,
            detail_concurrency: 20,
            listing_concurrency: 10,
            grade_concurrency: 5,
            capacity_concurrency: 5,
        }
    }
}

// ==========================================
// ParallelFetcher - 병렬 수집 엔진
// ==========================================
pub struct ParallelFetcher {
    registry: Arc<dyn RegistrySource>,
    cache: Arc<dyn FacilityCache>,
    limits: FetchLimits,
}

impl ParallelFetcher {
    pub fn new(registry: Arc<dyn RegistrySource>, cache: Arc<dyn FacilityCache>) -> Self {
        Self::with_limits(registry, cache, FetchLimits::default())
    }

    pub fn with_limits(
        registry: Arc<dyn RegistrySource>,
        cache: Arc<dyn FacilityCache>,
        limits: FetchLimits,
    ) -> Self {
        Self {
            registry,
            cache,
            limits,
        }
    }

    // ==========================================
    // 스코프 수집 (기본정보)
    // ==========================================

    /// 스코프 내 전 지역의 병원 기본정보 수집 후 병합
    ///
    /// 지역별 수집은 워커풀에서 동시에 돌고, 전부 합류한 뒤
    /// 지역 순서대로 first-seen-wins 병합한다. 좌표 없는 레코드는
    /// 이 단계에서 이미 제외되어 있다.
    pub async fn fetch_scope(
        &self,
        targets: &[String],
        hospital_type: HospitalType,
    ) -> Vec<FacilityRecord> {
        let semaphore = Arc::new(Semaphore::new(self.limits.listing_concurrency));
        let per_target = join_all(targets.iter().map(|target| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                let Ok(_permit) = semaphore.acquire().await else {
                    return Vec::new();
                };
                self.fetch_target(target, hospital_type).await
            }
        }))
        .await;

        let mut merged: Vec<FacilityRecord> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for records in per_target {
            for record in records {
                if seen.insert(record.id.clone()) {
                    merged.push(record);
                }
            }
        }
        merged
    }

    /// 단일 지역의 유형별 소스 구성 수집
    async fn fetch_target(&self, target: &str, hospital_type: HospitalType) -> Vec<FacilityRecord> {
        let mut records = Vec::new();
        match hospital_type {
            HospitalType::Trauma => {
                // 외상센터 우선, 일반 기관은 보충
                records.extend(self.fetch_trauma_centers(target, self.limits.trauma_cap).await);
                records.extend(
                    self.fetch_emergency_facilities(target, self.limits.general_supplement_cap)
                        .await,
                );
            }
            HospitalType::General | HospitalType::Pediatric => {
                records.extend(
                    self.fetch_emergency_facilities(target, self.limits.general_cap)
                        .await,
                );
                records.extend(
                    self.fetch_trauma_centers(target, self.limits.trauma_supplement_cap)
                        .await,
                );
            }
        }
        records
    }

    /// 일반 응급의료기관 목록 → 기본정보 해석
    async fn fetch_emergency_facilities(
        &self,
        target: &str,
        max_items: usize,
    ) -> Vec<FacilityRecord> {
        let ids = match self.registry.emergency_ids(target, max_items).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(%target, error = %e, "응급의료기관 목록 조회 실패, 건너뜀");
                return Vec::new();
            }
        };
        self.resolve_details(&ids).await
    }

    /// 외상센터 목록 → 기본정보 해석 + 외상센터 등급 오버레이
    async fn fetch_trauma_centers(&self, target: &str, max_items: usize) -> Vec<FacilityRecord> {
        let entries = match self.registry.trauma_listing(target, max_items).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(%target, error = %e, "외상센터 목록 조회 실패, 건너뜀");
                return Vec::new();
            }
        };

        let ids: Vec<String> = entries.iter().map(|e| e.id.clone()).collect();
        let grade_by_id: HashMap<String, GradeInfo> = entries
            .into_iter()
            .map(|e| (e.id, e.grade))
            .collect();

        let mut records = self.resolve_details(&ids).await;
        for record in &mut records {
            if let Some(grade) = grade_by_id.get(&record.id) {
                // 외상센터 지정 정보는 일반 출처보다 우선
                record.overlay_grade(grade.grade_code.as_deref(), grade.grade_name.as_deref());
            }
        }
        records
    }

    /// 기관 식별자 목록을 기본정보 레코드로 해석
    ///
    /// 캐시 히트(좌표 보유)는 외부 호출을 완전히 생략하고,
    /// 미스만 워커풀로 기본정보를 조회한 뒤 캐시에 upsert 한다.
    /// 반환 순서는 입력 id 순서를 따른다.
    async fn resolve_details(&self, ids: &[String]) -> Vec<FacilityRecord> {
        if ids.is_empty() {
            return Vec::new();
        }

        let mut cached: HashMap<String, FacilityRecord> = HashMap::new();
        match self.cache.get_many(ids).await {
            Ok(hits) => {
                for record in hits {
                    cached.insert(record.id.clone(), record);
                }
            }
            Err(e) => {
                // 캐시 장애 시 전량 외부 조회로 진행
                warn!(error = %e, "시설 캐시 조회 실패, 외부 조회로 대체");
            }
        }
        debug!(total = ids.len(), cache_hits = cached.len(), "상세 조회 캐시 히트");

        let missing: Vec<&String> = ids.iter().filter(|id| !cached.contains_key(*id)).collect();
        let semaphore = Arc::new(Semaphore::new(self.limits.detail_concurrency));
        let fetched = join_all(missing.iter().map(|id| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                let Ok(_permit) = semaphore.acquire().await else {
                    return None;
                };
                match self.registry.base_info(id).await {
                    Ok(Some(record)) if record.has_coordinates() => {
                        // 성공한 외부 조회는 즉시 캐시에 반영
                        if let Err(e) = self.cache.upsert(&record).await {
                            warn!(id = %record.id, error = %e, "시설 캐시 upsert 실패");
                        }
                        Some(record)
                    }
                    Ok(_) => {
                        debug!(id = id.as_str(), "좌표 없는 기본정보, 후보 제외");
                        None
                    }
                    Err(e) => {
                        warn!(id = id.as_str(), error = %e, "기본정보 조회 실패, 건너뜀");
                        None
                    }
                }
            }
        }))
        .await;

        let mut fetched_by_id: HashMap<String, FacilityRecord> = HashMap::new();
        for record in fetched.into_iter().flatten() {
            fetched_by_id.insert(record.id.clone(), record);
        }

        ids.iter()
            .filter_map(|id| cached.remove(id).or_else(|| fetched_by_id.remove(id)))
            .collect()
    }

    // ==========================================
    // 가용병상 수집
    // ==========================================

    /// 스코프 내 전 지역의 실시간 가용병상 병합 조회
    ///
    /// 스냅샷은 휘발성이므로 캐시를 거치지 않고 항상 재조회한다.
    pub async fn fetch_capacity(&self, targets: &[String]) -> HashMap<String, CapacitySnapshot> {
        let pool = self.limits.capacity_concurrency.min(targets.len().max(1));
        let semaphore = Arc::new(Semaphore::new(pool));
        let per_target = join_all(targets.iter().map(|target| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                let Ok(_permit) = semaphore.acquire().await else {
                    return HashMap::new();
                };
                match self.registry.capacity_by_region(target).await {
                    Ok(snapshots) => snapshots,
                    Err(e) => {
                        warn!(%target, error = %e, "가용병상 조회 실패, 건너뜀");
                        HashMap::new()
                    }
                }
            }
        }))
        .await;

        let mut combined = HashMap::new();
        for snapshots in per_target {
            combined.extend(snapshots);
        }
        combined
    }

    // ==========================================
    // 등급 정보 수집
    // ==========================================

    /// 대상 지역들에서 기관별 등급 정보 일괄 조회
    ///
    /// 1차: 일반 목록 엔드포인트 (first-seen-wins)
    /// 2차: 외상센터 목록 엔드포인트 (항상 덮어쓰기 - 외상센터 지정 우선)
    pub async fn fetch_grades(
        &self,
        ids: &[String],
        regions: &[String],
    ) -> HashMap<String, GradeInfo> {
        if ids.is_empty() {
            return HashMap::new();
        }
        let wanted: HashSet<&String> = ids.iter().collect();
        let mut grade_info: HashMap<String, GradeInfo> = HashMap::new();

        for (id, grade) in self.grade_pass(regions, GradeEndpoint::General).await {
            if wanted.contains(&id) && !grade.is_empty() {
                grade_info.entry(id).or_insert(grade);
            }
        }
        for (id, grade) in self.grade_pass(regions, GradeEndpoint::Trauma).await {
            if wanted.contains(&id) && !grade.is_empty() {
                grade_info.insert(id, grade);
            }
        }
        grade_info
    }

    /// 단일 엔드포인트에 대한 지역별 등급 조회 패스
    async fn grade_pass(
        &self,
        regions: &[String],
        endpoint: GradeEndpoint,
    ) -> Vec<(String, GradeInfo)> {
        let semaphore = Arc::new(Semaphore::new(self.limits.grade_concurrency));
        let per_region = join_all(regions.iter().map(|region| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                let Ok(_permit) = semaphore.acquire().await else {
                    return Vec::new();
                };
                match self.registry.grade_listing(region, endpoint).await {
                    Ok(entries) => entries,
                    Err(e) => {
                        warn!(%region, ?endpoint, error = %e, "등급 목록 조회 실패, 건너뜀");
                        Vec::new()
                    }
                }
            }
        }))
        .await;

        per_region.into_iter().flatten().collect()
    }
}
