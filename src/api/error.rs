// ==========================================
// 응급 병원 배정 엔진 - 엔진 오류 타입
// ==========================================
// 오류 정책: 하위 단계 실패는 비치명(기록 후 건너뜀)이며,
// 모든 폴백 확장 후에도 후보가 전무한 경우만 치명 오류다
// ==========================================

use thiserror::Error;

/// 배정 엔진이 호출자에게 드러내는 오류
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("필수 파라미터 누락 또는 무효: {0}")]
    InvalidRequest(&'static str),

    #[error("해당 행정구역의 응급 대상 병원을 찾지 못했습니다: {sido}")]
    NoFacilities { sido: String },
}
