// ==========================================
// 응급 병원 배정 엔진 - 저장소 레이어 오류 타입
// ==========================================
// 도구: thiserror 파생 매크로
// ==========================================

use thiserror::Error;

/// 저장소 레이어 오류 타입
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("데이터베이스 연결 실패: {0}")]
    ConnectionError(String),

    #[error("데이터베이스 락 획득 실패: {0}")]
    LockError(String),

    #[error("데이터베이스 질의 실패: {0}")]
    QueryError(String),

    #[error("유효하지 않은 레코드 (id={id}): {message}")]
    InvalidRecord { id: String, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        RepositoryError::QueryError(err.to_string())
    }
}

/// 저장소 레이어 Result 별칭
pub type RepositoryResult<T> = Result<T, RepositoryError>;
