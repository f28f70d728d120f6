// ==========================================
// 응급 병원 배정 엔진 - 시설 캐시 저장소
// ==========================================
// 책임: facility_cache 테이블의 get/upsert
// 규칙: Repository는 비즈니스 로직을 포함하지 않는다
// ==========================================
// 동시성 계약: id 단위 upsert, last-write-wins.
// 동일 id에 대한 동시 쓰기 순서는 보장하지 않는다.
// ==========================================

use crate::domain::facility::FacilityRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// FacilityCache - 시설 캐시 seam
// ==========================================

/// 시설 기본정보 키-값 캐시
///
/// 좌표가 채워진 캐시 히트는 외부 상세 조회를 생략하는 근거가 되므로,
/// `get`/`get_many`는 좌표가 있는 레코드만 돌려준다.
/// 이 엔진은 캐시 레코드를 삭제하지 않는다 (upsert only).
#[async_trait]
pub trait FacilityCache: Send + Sync {
    /// id로 단건 조회 (좌표 보유 레코드만)
    async fn get(&self, id: &str) -> RepositoryResult<Option<FacilityRecord>>;

    /// id 목록 일괄 조회 (좌표 보유 레코드만)
    async fn get_many(&self, ids: &[String]) -> RepositoryResult<Vec<FacilityRecord>>;

    /// 저장 또는 갱신
    ///
    /// 갱신 시 새 값이 있는 필드만 덮어쓴다 (None은 기존 값 유지).
    /// 좌표가 없는 레코드는 저장하지 않는다.
    async fn upsert(&self, record: &FacilityRecord) -> RepositoryResult<()>;
}

// ==========================================
// SqliteFacilityCache - SQLite 구현
// ==========================================

/// SQLite 기반 시설 캐시
pub struct SqliteFacilityCache {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteFacilityCache {
    /// 파일 경로로 캐시 저장소 생성 (테이블 자동 생성)
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = Connection::open(db_path)
            .map_err(|e| RepositoryError::ConnectionError(e.to_string()))?;
        Self::from_connection(conn)
    }

    /// 인메모리 캐시 생성 (테스트용)
    pub fn in_memory() -> RepositoryResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| RepositoryError::ConnectionError(e.to_string()))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> RepositoryResult<Self> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS facility_cache (
                facility_id   TEXT PRIMARY KEY,
                name          TEXT,
                address       TEXT,
                phone         TEXT,
                lat           REAL,
                lon           REAL,
                grade_code    TEXT,
                grade_name    TEXT,
                division_code TEXT,
                division_name TEXT,
                updated_at    TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
            [],
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<FacilityRecord> {
        Ok(FacilityRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            address: row.get(2)?,
            phone: row.get(3)?,
            lat: row.get(4)?,
            lon: row.get(5)?,
            grade_code: row.get(6)?,
            grade_name: row.get(7)?,
            division_code: row.get(8)?,
            division_name: row.get(9)?,
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    facility_id, name, address, phone, lat, lon,
    grade_code, grade_name, division_code, division_name
"#;

#[async_trait]
impl FacilityCache for SqliteFacilityCache {
    async fn get(&self, id: &str) -> RepositoryResult<Option<FacilityRecord>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM facility_cache \
             WHERE facility_id = ?1 AND lat IS NOT NULL AND lon IS NOT NULL"
        );
        let record = conn
            .query_row(&sql, params![id], Self::row_to_record)
            .optional()?;
        Ok(record)
    }

    async fn get_many(&self, ids: &[String]) -> RepositoryResult<Vec<FacilityRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.get_conn()?;
        let placeholders = vec!["?"; ids.len()].join(",");
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM facility_cache \
             WHERE facility_id IN ({placeholders}) \
               AND lat IS NOT NULL AND lon IS NOT NULL"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(ids.iter()),
            Self::row_to_record,
        )?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    async fn upsert(&self, record: &FacilityRecord) -> RepositoryResult<()> {
        if !record.has_coordinates() {
            // 좌표 없는 레코드는 캐시 히트 판정에 쓸 수 없으므로 저장하지 않는다
            return Err(RepositoryError::InvalidRecord {
                id: record.id.clone(),
                message: "좌표 정보 없음".to_string(),
            });
        }
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO facility_cache (
                facility_id, name, address, phone, lat, lon,
                grade_code, grade_name, division_code, division_name, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, datetime('now'))
            ON CONFLICT(facility_id) DO UPDATE SET
                name          = COALESCE(excluded.name, facility_cache.name),
                address       = COALESCE(excluded.address, facility_cache.address),
                phone         = COALESCE(excluded.phone, facility_cache.phone),
                lat           = excluded.lat,
                lon           = excluded.lon,
                grade_code    = COALESCE(excluded.grade_code, facility_cache.grade_code),
                grade_name    = COALESCE(excluded.grade_name, facility_cache.grade_name),
                division_code = COALESCE(excluded.division_code, facility_cache.division_code),
                division_name = COALESCE(excluded.division_name, facility_cache.division_name),
                updated_at    = datetime('now')
            "#,
            params![
                record.id,
                record.name,
                record.address,
                record.phone,
                record.lat,
                record.lon,
                record.grade_code,
                record.grade_name,
                record.division_code,
                record.division_name,
            ],
        )?;
        Ok(())
    }
}
