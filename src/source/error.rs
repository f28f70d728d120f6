// ==========================================
// 응급 병원 배정 엔진 - 외부 소스 오류 타입
// ==========================================
// 오류 정책:
// - 429: 재시도 없이 해당 호출 실패 처리
// - 5xx/타임아웃: 제한된 백오프 재시도
// ==========================================

use thiserror::Error;

/// 외부 레지스트리/경로 API 호출 오류
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("레이트 리밋 응답(429): {url}")]
    RateLimited { url: String },

    #[error("HTTP 상태 오류 ({status}): {url}")]
    Status { status: u16, url: String },

    #[error("HTTP 요청 실패: {0}")]
    Http(#[from] reqwest::Error),

    #[error("응답 해석 실패: {0}")]
    Decode(String),
}

/// 외부 소스 Result 별칭
pub type SourceResult<T> = Result<T, SourceError>;
