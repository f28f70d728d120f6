// ==========================================
// 응급 병원 배정 엔진 - 파이프라인 오케스트레이터
// ==========================================
// 파이프라인 (좌→우, 단계 간 동기 장벽):
//   RegionResolver → ParallelFetcher → CandidateEnricher
//   → Ranker/PoolAssembler → RouteAnnotator → 경로 보정
// 치명 오류: 폴백 확장까지 끝난 뒤 후보가 전무한 경우뿐
// ==========================================

use crate::api::error::DispatchError;
use crate::api::payload::{CandidatePayload, DispatchRequest, DispatchResponse};
use crate::config::symptoms::rule_for_symptom;
use crate::domain::candidate::Candidate;
use crate::domain::types::{HospitalType, RegionClass};
use crate::engine::enricher::CandidateEnricher;
use crate::engine::fetcher::ParallelFetcher;
use crate::engine::pools::{prioritize_by_region, PoolAssembler, PoolPlan};
use crate::engine::region::RegionResolver;
use crate::engine::route::RouteAnnotator;
use crate::repository::facility_cache::FacilityCache;
use crate::source::registry::RegistrySource;
use crate::source::routing::RoutingSource;
use std::sync::Arc;
use tracing::{info, warn};

/// 폴백 스코프 후보의 지역 그룹 수 상한
const FALLBACK_REGION_CAP: usize = 3;

// ==========================================
// DispatchEngine - 전체 파이프라인
// ==========================================
pub struct DispatchEngine {
    resolver: RegionResolver,
    fetcher: ParallelFetcher,
    assembler: PoolAssembler,
    annotator: RouteAnnotator,
    cache: Arc<dyn FacilityCache>,
}

impl DispatchEngine {
    pub fn new(
        registry: Arc<dyn RegistrySource>,
        routing: Arc<dyn RoutingSource>,
        cache: Arc<dyn FacilityCache>,
    ) -> Self {
        Self {
            resolver: RegionResolver::new(),
            fetcher: ParallelFetcher::new(registry, Arc::clone(&cache)),
            assembler: PoolAssembler::new(),
            annotator: RouteAnnotator::new(routing),
            cache,
        }
    }

    /// 배정 요청 1건 처리
    pub async fn dispatch(
        &self,
        request: &DispatchRequest,
    ) -> Result<DispatchResponse, DispatchError> {
        if !request.lat.is_finite() || !request.lon.is_finite()
            || (request.lat == 0.0 && request.lon == 0.0)
        {
            return Err(DispatchError::InvalidRequest("lat/lon"));
        }
        if request.sido.trim().is_empty() {
            return Err(DispatchError::InvalidRequest("sido"));
        }

        let hospital_type = HospitalType::from_symptom(&request.symptom);
        let rule = rule_for_symptom(&request.symptom);
        info!(
            sido = %request.sido,
            symptom = %request.symptom,
            %hospital_type,
            "배정 파이프라인 시작"
        );

        // 1. 지역 스코프 확장
        let scope = self.resolver.resolve(&request.sido);
        let targets = scope.targets();

        // 2. 스코프 수집 (합류 장벽)
        let records = self.fetcher.fetch_scope(&targets, hospital_type).await;

        // 3. 가용병상 + 등급 수집 (합류 장벽)
        let capacity = self.fetcher.fetch_capacity(&targets).await;
        let ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
        let mut grade_regions = targets.clone();
        if let Some(province) = &scope.fallback_province {
            if !grade_regions.contains(province) {
                grade_regions.push(province.clone());
            }
        }
        let grades = self.fetcher.fetch_grades(&ids, &grade_regions).await;

        // 4. 후보 보강
        let enricher = CandidateEnricher::new(
            request.lat,
            request.lon,
            request.sigungu.clone(),
            rule,
            hospital_type,
            request.symptom.clone(),
        );
        let candidates = enricher.enrich(records, &capacity, &grades, None);

        // 5. 폴백 도(道) 확장 - 광역시 요청에만 존재
        let fallback = match &scope.fallback_province {
            Some(province) => {
                self.fetch_fallback_candidates(province, hospital_type, &enricher, &grades)
                    .await
            }
            None => Vec::new(),
        };

        // 폴백 확장까지 끝났는데도 후보가 전무하면 치명 오류
        if candidates.is_empty() && fallback.is_empty() {
            return Err(DispatchError::NoFacilities {
                sido: request.sido.clone(),
            });
        }

        // 6. 풀 조립
        let mut plan = self.assembler.assemble(candidates, fallback);

        // 7. 경로 주석 (합류 장벽) + 사후 교정
        let route_paths = self
            .annotator
            .annotate((request.lat, request.lon), &mut plan.primary)
            .await;
        self.assembler.apply_route_correction(&mut plan);

        // 8. 응답 대상 시설 캐시 반영
        self.upsert_plan_facilities(&plan).await;

        info!(
            primary = plan.primary.len(),
            backup = plan.backup.len(),
            neighbor = plan.neighbor.len(),
            "배정 파이프라인 완료"
        );

        Ok(DispatchResponse {
            primary: plan.primary.iter().map(CandidatePayload::from).collect(),
            backup: plan.backup.iter().map(CandidatePayload::from).collect(),
            neighbor: plan.neighbor.iter().map(CandidatePayload::from).collect(),
            route_paths,
        })
    }

    /// 폴백 도(道) 스코프의 후보 수집·보강
    ///
    /// 폴백 후보는 항상 `RegionClass::Fallback`으로 분류되며
    /// 지역 그룹핑(최대 3개 지역)된 상태로 풀 조립에 투입된다.
    async fn fetch_fallback_candidates(
        &self,
        province: &str,
        hospital_type: HospitalType,
        enricher: &CandidateEnricher,
        grades: &std::collections::HashMap<String, crate::source::registry::GradeInfo>,
    ) -> Vec<Candidate> {
        let fallback_scope = self.resolver.resolve(province);
        let fallback_targets = fallback_scope.targets();
        let records = self
            .fetcher
            .fetch_scope(&fallback_targets, hospital_type)
            .await;
        let capacity = self.fetcher.fetch_capacity(&fallback_targets).await;
        let candidates = enricher.enrich(records, &capacity, grades, Some(RegionClass::Fallback));
        prioritize_by_region(&candidates, FALLBACK_REGION_CAP)
    }

    /// 응답에 포함된 시설을 캐시에 upsert (좌표 보유 레코드만)
    async fn upsert_plan_facilities(&self, plan: &PoolPlan) {
        let all = plan
            .primary
            .iter()
            .chain(plan.backup.iter())
            .chain(plan.neighbor.iter());
        for candidate in all {
            if !candidate.facility.has_coordinates() {
                continue;
            }
            if let Err(e) = self.cache.upsert(&candidate.facility).await {
                warn!(id = %candidate.facility.id, error = %e, "시설 캐시 반영 실패");
            }
        }
    }
}
