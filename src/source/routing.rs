// ==========================================
// 응급 병원 배정 엔진 - 경로 조회 소스
// ==========================================
// 실구현: 카카오 길찾기 API (거리/소요시간/경로 좌표)
// ==========================================

use crate::config::settings::KAKAO_DIRECTIONS_URL;
use crate::source::error::SourceResult;
use crate::source::http::HttpClient;
use async_trait::async_trait;
use serde_json::Value;

/// 주행 경로 정보
#[derive(Debug, Clone, PartialEq)]
pub struct DrivingInfo {
    /// 주행 거리 (km)
    pub distance_km: f64,
    /// 소요 시간 (분)
    pub duration_minutes: u32,
    /// 경로 좌표 목록 [lon, lat]
    pub path: Vec<[f64; 2]>,
}

/// 외부 경로 서비스 seam
#[async_trait]
pub trait RoutingSource: Send + Sync {
    /// 출발지 → 목적지 주행 정보 조회
    ///
    /// # 파라미터
    /// - `origin`: (lat, lon)
    /// - `dest`: (lat, lon)
    ///
    /// # 반환
    /// - `Ok(Some(..))`: 경로 탐색 성공
    /// - `Ok(None)`: 응답은 받았으나 경로 없음
    async fn driving_info(
        &self,
        origin: (f64, f64),
        dest: (f64, f64),
    ) -> SourceResult<Option<DrivingInfo>>;
}

// ==========================================
// KakaoRouting - 실구현
// ==========================================

/// 카카오 길찾기 기반 경로 소스
pub struct KakaoRouting {
    client: HttpClient,
    api_key: String,
}

impl KakaoRouting {
    pub fn new(client: HttpClient, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl RoutingSource for KakaoRouting {
    async fn driving_info(
        &self,
        origin: (f64, f64),
        dest: (f64, f64),
    ) -> SourceResult<Option<DrivingInfo>> {
        let query = vec![
            ("origin", format!("{},{}", origin.1, origin.0)),
            ("destination", format!("{},{}", dest.1, dest.0)),
            ("priority", "RECOMMEND".to_string()),
        ];
        let auth = ("Authorization", format!("KakaoAK {}", self.api_key));
        let value: Value = self
            .client
            .get_json(KAKAO_DIRECTIONS_URL, &query, &[auth])
            .await?;

        Ok(parse_directions(&value))
    }
}

fn parse_directions(value: &Value) -> Option<DrivingInfo> {
    let route = value["routes"].as_array()?.first()?;
    let summary = &route["summary"];
    let distance_m = summary["distance"].as_f64()?;
    let duration_sec = summary["duration"].as_f64()?;

    // 구간 안내점 좌표를 경로 폴리라인으로 사용
    let mut path = Vec::new();
    if let Some(sections) = route["sections"].as_array() {
        for section in sections {
            if let Some(guides) = section["guides"].as_array() {
                for guide in guides {
                    if let (Some(x), Some(y)) = (guide["x"].as_f64(), guide["y"].as_f64()) {
                        path.push([x, y]);
                    }
                }
            }
        }
    }

    Some(DrivingInfo {
        distance_km: distance_m / 1000.0,
        duration_minutes: (duration_sec / 60.0) as u32,
        path,
    })
}
