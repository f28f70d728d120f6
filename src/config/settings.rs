// ==========================================
// 응급 병원 배정 엔진 - 런타임 설정
// ==========================================
// 서비스 키는 환경변수에서 읽는다:
// - DATA_GO_KR_SERVICE_KEY: 공공데이터 응급의료 API
// - KAKAO_REST_API_KEY: 카카오 길찾기 API
// ==========================================

use std::env;
use thiserror::Error;

// ===== 외부 API 엔드포인트 =====

/// 실시간 가용병상 조회
pub const ER_BED_URL: &str =
    "https://apis.data.go.kr/B552657/ErmctInfoInqireService/getEmrrmRltmUsefulSckbdInfoInqire";
/// 응급의료기관 기본정보 조회
pub const EGYT_BASE_URL: &str =
    "https://apis.data.go.kr/B552657/ErmctInfoInqireService/getEgytBassInfoInqire";
/// 응급의료기관 목록 조회 (등급 포함)
pub const EGYT_LIST_URL: &str =
    "https://apis.data.go.kr/B552657/ErmctInfoInqireService/getEgytListInfoInqire";
/// 권역외상센터 목록 조회
pub const STRM_LIST_URL: &str =
    "https://apis.data.go.kr/B552657/ErmctInfoInqireService/getStrmListInfoInqire";
/// 카카오 길찾기
pub const KAKAO_DIRECTIONS_URL: &str = "https://apis-navi.kakaomobility.com/v1/directions";

/// 설정 로드 오류
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("환경변수 누락: {0}")]
    MissingEnv(&'static str),
}

/// 런타임 설정
#[derive(Debug, Clone)]
pub struct Settings {
    /// 공공데이터 서비스 키
    pub service_key: String,
    /// 카카오 REST API 키
    pub kakao_key: String,
    /// 시설 캐시 DB 경로
    pub cache_db_path: String,
}

impl Settings {
    /// 환경변수에서 설정 로드
    ///
    /// # 환경변수
    /// - `DATA_GO_KR_SERVICE_KEY` (필수)
    /// - `KAKAO_REST_API_KEY` (필수)
    /// - `ER_DISPATCH_CACHE_DB` (선택, 기본 `facility_cache.db`)
    pub fn from_env() -> Result<Self, SettingsError> {
        let service_key = env::var("DATA_GO_KR_SERVICE_KEY")
            .map_err(|_| SettingsError::MissingEnv("DATA_GO_KR_SERVICE_KEY"))?;
        let kakao_key = env::var("KAKAO_REST_API_KEY")
            .map_err(|_| SettingsError::MissingEnv("KAKAO_REST_API_KEY"))?;
        let cache_db_path =
            env::var("ER_DISPATCH_CACHE_DB").unwrap_or_else(|_| "facility_cache.db".to_string());

        Ok(Self {
            service_key,
            kakao_key,
            cache_db_path,
        })
    }
}
