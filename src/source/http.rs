// ==========================================
// 응급 병원 배정 엔진 - HTTP 클라이언트
// ==========================================
// 타임아웃: 연결 5초 / 전체 15초
// 재시도: 5xx·타임아웃만 최대 3회, 지수 백오프
// 429는 재시도하지 않는다
// ==========================================

use crate::source::error::{SourceError, SourceResult};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::warn;

/// 재시도 기본 횟수
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// 백오프 기준 간격
const BACKOFF_BASE_MS: u64 = 200;

/// 백오프 지연 계산: 200ms * 2^(attempt-1)
pub(crate) fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(BACKOFF_BASE_MS << (attempt.saturating_sub(1)))
}

/// 외부 API 공용 HTTP 클라이언트
pub struct HttpClient {
    inner: reqwest::Client,
    max_attempts: u32,
}

impl HttpClient {
    /// 기본 타임아웃/재시도 정책으로 클라이언트 생성
    pub fn new() -> SourceResult<Self> {
        let inner = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            inner,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// GET 요청 후 JSON 역직렬화
    ///
    /// # 파라미터
    /// - `url`: 요청 URL
    /// - `query`: 쿼리 파라미터
    /// - `headers`: 추가 헤더 (예: 카카오 Authorization)
    ///
    /// # 오류
    /// - 429 → `SourceError::RateLimited` (즉시 실패)
    /// - 그 외 4xx → `SourceError::Status`
    /// - 5xx/타임아웃 → 백오프 재시도 후 소진 시 실패
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: &[(&str, String)],
    ) -> SourceResult<T> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let mut request = self.inner.get(url).query(query);
            for (key, value) in headers {
                request = request.header(*key, value);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status == StatusCode::TOO_MANY_REQUESTS {
                        return Err(SourceError::RateLimited {
                            url: url.to_string(),
                        });
                    }
                    if status.is_server_error() {
                        if attempt >= self.max_attempts {
                            return Err(SourceError::Status {
                                status: status.as_u16(),
                                url: url.to_string(),
                            });
                        }
                        warn!(url, status = status.as_u16(), attempt, "서버 오류, 재시도");
                        tokio::time::sleep(backoff_delay(attempt)).await;
                        continue;
                    }
                    if !status.is_success() {
                        return Err(SourceError::Status {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                    }
                    return response
                        .json::<T>()
                        .await
                        .map_err(|e| SourceError::Decode(e.to_string()));
                }
                Err(e) if (e.is_timeout() || e.is_connect()) && attempt < self.max_attempts => {
                    warn!(url, attempt, error = %e, "요청 실패, 재시도");
                    tokio::time::sleep(backoff_delay(attempt)).await;
                }
                Err(e) => return Err(SourceError::Http(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_delay_doubles() {
        assert_eq!(backoff_delay(1), Duration::from_millis(200));
        assert_eq!(backoff_delay(2), Duration::from_millis(400));
        assert_eq!(backoff_delay(3), Duration::from_millis(800));
    }
}
