// ==========================================
// 응급 병원 배정 엔진 - 경로 주석 엔진
// ==========================================
// 책임: primary 후보의 거리/ETA를 실주행 기준으로 정밀화
// 동시성: 세마포어 ≤5 워커풀, 전체 합류 후 일괄 반영
// 폴백: eta = round(거리 * 1.3 / 40 * 60) 분
//        (우회 계수 1.3, 평균 시속 40km/h 가정)
// ==========================================

use crate::domain::candidate::Candidate;
use crate::source::routing::RoutingSource;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::warn;

/// 경로 조회 워커풀 크기
const ROUTE_CONCURRENCY: usize = 5;
/// 직선 거리 대비 우회 계수
const DETOUR_FACTOR: f64 = 1.3;
/// 가정 평균 시속 (km/h)
const AVERAGE_SPEED_KMH: f64 = 40.0;

/// 직선 거리 기반 ETA 추정 (분)
pub fn heuristic_eta_minutes(distance_km: f64) -> u32 {
    (distance_km * DETOUR_FACTOR / AVERAGE_SPEED_KMH * 60.0).round() as u32
}

// ==========================================
// RouteAnnotator - 경로 주석 엔진
// ==========================================
pub struct RouteAnnotator {
    routing: Arc<dyn RoutingSource>,
}

impl RouteAnnotator {
    pub fn new(routing: Arc<dyn RoutingSource>) -> Self {
        Self { routing }
    }

    /// primary 후보들의 거리/ETA 정밀화 및 경로 수집
    ///
    /// 성공 시 `distance_km`/`eta_minutes`를 실주행 값으로 덮어쓰고
    /// 경로를 기관 id 키로 모은다. 실패/경로 없음은 휴리스틱 ETA로
    /// 대체하며 오류를 전파하지 않는다.
    ///
    /// # 반환
    /// 기관 id → 경로 좌표 목록 [lon, lat]
    pub async fn annotate(
        &self,
        origin: (f64, f64),
        candidates: &mut [Candidate],
    ) -> HashMap<String, Vec<[f64; 2]>> {
        let semaphore = Arc::new(Semaphore::new(ROUTE_CONCURRENCY));
        let outcomes = join_all(candidates.iter().map(|candidate| {
            let semaphore = Arc::clone(&semaphore);
            let dest = (
                candidate.facility.lat.unwrap_or_default(),
                candidate.facility.lon.unwrap_or_default(),
            );
            let has_coords = candidate.facility.has_coordinates();
            async move {
                if !has_coords {
                    return None;
                }
                let Ok(_permit) = semaphore.acquire().await else {
                    return None;
                };
                match self.routing.driving_info(origin, dest).await {
                    Ok(info) => info,
                    Err(e) => {
                        warn!(error = %e, "경로 조회 실패, 휴리스틱 ETA 사용");
                        None
                    }
                }
            }
        }))
        .await;

        // 합류 장벽 이후 일괄 반영
        let mut route_paths = HashMap::new();
        for (candidate, outcome) in candidates.iter_mut().zip(outcomes) {
            match outcome {
                Some(info) => {
                    candidate.distance_km = info.distance_km;
                    candidate.eta_minutes = Some(info.duration_minutes);
                    if !info.path.is_empty() {
                        route_paths.insert(candidate.id().to_string(), info.path);
                    }
                }
                None => {
                    candidate.eta_minutes = Some(heuristic_eta_minutes(candidate.distance_km));
                }
            }
        }
        route_paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristic_eta() {
        // 40km: 40 * 1.3 / 40 * 60 = 78분
        assert_eq!(heuristic_eta_minutes(40.0), 78);
        assert_eq!(heuristic_eta_minutes(0.0), 0);
        // 10km: 10 * 1.3 / 40 * 60 = 19.5 → 반올림 20분
        assert_eq!(heuristic_eta_minutes(10.0), 20);
    }
}
