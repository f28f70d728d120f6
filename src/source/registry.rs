// ==========================================
// 응급 병원 배정 엔진 - 공공데이터 레지스트리 소스
// ==========================================
// 대상 API: 국립중앙의료원 전국 응급의료기관 조회 서비스
// - 실시간 가용병상 (getEmrrmRltmUsefulSckbdInfoInqire)
// - 기본정보 (getEgytBassInfoInqire)
// - 응급의료기관 목록/등급 (getEgytListInfoInqire)
// - 권역외상센터 목록 (getStrmListInfoInqire)
// 응답은 _type=json 으로 요청해 serde_json으로 해석한다
// ==========================================

use crate::config::settings::{EGYT_BASE_URL, EGYT_LIST_URL, ER_BED_URL, STRM_LIST_URL};
use crate::domain::capacity::CapacitySnapshot;
use crate::domain::facility::FacilityRecord;
use crate::source::error::SourceResult;
use crate::source::http::HttpClient;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::Value;
use std::collections::HashMap;

// ==========================================
// 소스 seam 타입
// ==========================================

/// 응급의료기관 지정 등급 정보
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeInfo {
    /// 지정 코드 (dutyEmcls)
    pub grade_code: Option<String>,
    /// 지정 명칭 (dutyEmclsName)
    pub grade_name: Option<String>,
}

impl GradeInfo {
    /// 코드/명칭 둘 다 비어 있는지 여부
    pub fn is_empty(&self) -> bool {
        self.grade_code.is_none() && self.grade_name.is_none()
    }
}

/// 권역외상센터 목록 항목 (식별자 + 등급)
#[derive(Debug, Clone)]
pub struct TraumaListEntry {
    pub id: String,
    pub grade: GradeInfo,
}

/// 등급 목록 조회 엔드포인트 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeEndpoint {
    /// 일반 응급의료기관 목록 (getEgytListInfoInqire)
    General,
    /// 권역외상센터 목록 (getStrmListInfoInqire)
    Trauma,
}

/// 외부 병원 레지스트리 seam
///
/// 실구현은 공공데이터 API를 호출하고, 테스트는 인메모리 mock으로 대체한다.
#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// 지역 내 응급의료기관 식별자 목록 (최대 `max_items`건)
    async fn emergency_ids(&self, sido: &str, max_items: usize) -> SourceResult<Vec<String>>;

    /// 지역 내 권역외상센터 목록 (최대 `max_items`건)
    async fn trauma_listing(
        &self,
        sido: &str,
        max_items: usize,
    ) -> SourceResult<Vec<TraumaListEntry>>;

    /// 병원 기본정보 단건 조회
    async fn base_info(&self, id: &str) -> SourceResult<Option<FacilityRecord>>;

    /// 지역 내 실시간 가용병상 스냅샷 (id → 스냅샷)
    async fn capacity_by_region(
        &self,
        sido: &str,
    ) -> SourceResult<HashMap<String, CapacitySnapshot>>;

    /// 지역 내 등급 목록 조회
    async fn grade_listing(
        &self,
        sido: &str,
        endpoint: GradeEndpoint,
    ) -> SourceResult<Vec<(String, GradeInfo)>>;
}

// ==========================================
// 응답 JSON 추출 헬퍼
// ==========================================
// 공공데이터 JSON 응답은 item이 배열/단일 객체/빈 문자열로
// 섞여 오고 수치도 문자열로 올 수 있어 Value 기반으로 흡수한다

fn response_items(value: &Value) -> Vec<&Value> {
    let item = &value["response"]["body"]["items"]["item"];
    match item {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![item],
        _ => Vec::new(),
    }
}

fn text_field(item: &Value, key: &str) -> Option<String> {
    match &item[key] {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn float_field(item: &Value, key: &str) -> Option<f64> {
    match &item[key] {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn int_field(item: &Value, key: &str) -> Option<i64> {
    match &item[key] {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn yn_field(item: &Value, key: &str) -> Option<bool> {
    text_field(item, key).map(|s| s.eq_ignore_ascii_case("Y"))
}

fn datetime_field(item: &Value, key: &str) -> Option<NaiveDateTime> {
    // hvidate 형식: yyyyMMddHHmmss
    text_field(item, key)
        .and_then(|s| NaiveDateTime::parse_from_str(&s, "%Y%m%d%H%M%S").ok())
}

fn facility_from_item(item: &Value) -> Option<FacilityRecord> {
    let id = text_field(item, "hpid")?;
    Some(FacilityRecord {
        id,
        name: text_field(item, "dutyName").or_else(|| text_field(item, "dutyname")),
        address: text_field(item, "dutyAddr"),
        phone: text_field(item, "dutyTel3").or_else(|| text_field(item, "dutytel3")),
        lat: float_field(item, "wgs84Lat"),
        lon: float_field(item, "wgs84Lon"),
        grade_code: text_field(item, "dutyEmcls"),
        grade_name: text_field(item, "dutyEmclsName"),
        division_code: text_field(item, "dutyDiv"),
        division_name: text_field(item, "dutyDivNam"),
    })
}

fn snapshot_from_item(item: &Value) -> Option<CapacitySnapshot> {
    let facility_id = text_field(item, "hpid")?;
    Some(CapacitySnapshot {
        facility_id,
        updated_at: datetime_field(item, "hvidate"),
        er_beds: int_field(item, "hvec"),
        operating_rooms: int_field(item, "hvoc"),
        icu_general: int_field(item, "hvicc"),
        ward_beds: int_field(item, "hvgc"),
        icu_neuro: int_field(item, "hvcc"),
        icu_neonatal: int_field(item, "hvncc"),
        icu_thoracic: int_field(item, "hvccc"),
        icu_surgical: int_field(item, "hv3"),
        ward_surgical: int_field(item, "hv4"),
        ward_neurology: int_field(item, "hv5"),
        icu_neurosurgery: int_field(item, "hv6"),
        icu_burn: int_field(item, "hv8"),
        icu_trauma: int_field(item, "hv9"),
        ct_available: yn_field(item, "hvctayn"),
        mri_available: yn_field(item, "hvmriayn"),
        angio_available: yn_field(item, "hvangioayn"),
        ventilator_available: yn_field(item, "hvventiayn"),
        pediatric_duty: yn_field(item, "hv10"),
        pediatric_surgery: yn_field(item, "hv11"),
        duty_doctor: text_field(item, "hvdnm"),
    })
}

fn grade_from_item(item: &Value) -> GradeInfo {
    GradeInfo {
        grade_code: text_field(item, "dutyEmcls"),
        grade_name: text_field(item, "dutyEmclsName"),
    }
}

// ==========================================
// OpenDataRegistry - 실구현
// ==========================================

/// 공공데이터 포털 기반 레지스트리 소스
pub struct OpenDataRegistry {
    client: HttpClient,
    service_key: String,
}

impl OpenDataRegistry {
    pub fn new(client: HttpClient, service_key: impl Into<String>) -> Self {
        Self {
            client,
            service_key: service_key.into(),
        }
    }

    fn region_query(&self, sido: &str, rows: usize) -> Vec<(&'static str, String)> {
        vec![
            ("serviceKey", self.service_key.clone()),
            ("STAGE1", sido.to_string()),
            ("pageNo", "1".to_string()),
            ("numOfRows", rows.to_string()),
            ("_type", "json".to_string()),
        ]
    }
}

#[async_trait]
impl RegistrySource for OpenDataRegistry {
    async fn emergency_ids(&self, sido: &str, max_items: usize) -> SourceResult<Vec<String>> {
        let rows = (max_items * 2).min(500);
        let query = self.region_query(sido, rows);
        let value: Value = self.client.get_json(ER_BED_URL, &query, &[]).await?;

        // 순서를 보존하면서 중복 제거
        let mut ids = Vec::new();
        for item in response_items(&value) {
            if let Some(id) = text_field(item, "hpid") {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
            if ids.len() >= max_items {
                break;
            }
        }
        Ok(ids)
    }

    async fn trauma_listing(
        &self,
        sido: &str,
        max_items: usize,
    ) -> SourceResult<Vec<TraumaListEntry>> {
        let rows = (max_items * 2).min(500);
        let query = self.region_query(sido, rows);
        let value: Value = self.client.get_json(STRM_LIST_URL, &query, &[]).await?;

        let mut entries = Vec::new();
        for item in response_items(&value) {
            if let Some(id) = text_field(item, "hpid") {
                entries.push(TraumaListEntry {
                    id,
                    grade: grade_from_item(item),
                });
            }
            if entries.len() >= max_items {
                break;
            }
        }
        Ok(entries)
    }

    async fn base_info(&self, id: &str) -> SourceResult<Option<FacilityRecord>> {
        let query = vec![
            ("serviceKey", self.service_key.clone()),
            ("HPID", id.to_string()),
            ("pageNo", "1".to_string()),
            ("numOfRows", "1".to_string()),
            ("_type", "json".to_string()),
        ];
        let value: Value = self.client.get_json(EGYT_BASE_URL, &query, &[]).await?;
        Ok(response_items(&value)
            .first()
            .and_then(|item| facility_from_item(item)))
    }

    async fn capacity_by_region(
        &self,
        sido: &str,
    ) -> SourceResult<HashMap<String, CapacitySnapshot>> {
        let query = self.region_query(sido, 500);
        let value: Value = self.client.get_json(ER_BED_URL, &query, &[]).await?;

        let mut snapshots = HashMap::new();
        for item in response_items(&value) {
            if let Some(snapshot) = snapshot_from_item(item) {
                snapshots.insert(snapshot.facility_id.clone(), snapshot);
            }
        }
        Ok(snapshots)
    }

    async fn grade_listing(
        &self,
        sido: &str,
        endpoint: GradeEndpoint,
    ) -> SourceResult<Vec<(String, GradeInfo)>> {
        let url = match endpoint {
            GradeEndpoint::General => EGYT_LIST_URL,
            GradeEndpoint::Trauma => STRM_LIST_URL,
        };
        let query = self.region_query(sido, 500);
        let value: Value = self.client.get_json(url, &query, &[]).await?;

        let mut entries = Vec::new();
        for item in response_items(&value) {
            if let Some(id) = text_field(item, "hpid") {
                entries.push((id, grade_from_item(item)));
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_items_handles_array_and_single_object() {
        let many = json!({"response": {"body": {"items": {"item": [
            {"hpid": "A01"}, {"hpid": "A02"}
        ]}}}});
        assert_eq!(response_items(&many).len(), 2);

        let single = json!({"response": {"body": {"items": {"item": {"hpid": "A01"}}}}});
        assert_eq!(response_items(&single).len(), 1);

        let empty = json!({"response": {"body": {"items": ""}}});
        assert!(response_items(&empty).is_empty());
    }

    #[test]
    fn test_snapshot_parsing_mixes_string_and_number() {
        let item = json!({
            "hpid": "A1100001",
            "hvec": "5",
            "hvoc": 2,
            "hvncc": "1",
            "hvctayn": "Y",
            "hvventiayn": "N",
            "hvidate": "20260828120000"
        });
        let snapshot = snapshot_from_item(&item).unwrap();
        assert_eq!(snapshot.er_beds, Some(5));
        assert_eq!(snapshot.operating_rooms, Some(2));
        assert_eq!(snapshot.icu_neonatal, Some(1));
        assert_eq!(snapshot.ct_available, Some(true));
        assert_eq!(snapshot.ventilator_available, Some(false));
        assert!(snapshot.updated_at.is_some());
    }

    #[test]
    fn test_facility_parsing_with_string_coordinates() {
        let item = json!({
            "hpid": "A1100001",
            "dutyName": "서울중앙병원",
            "dutyAddr": "서울특별시 종로구 세종대로 1",
            "dutyTel3": "02-0000-0000",
            "wgs84Lat": "37.5729",
            "wgs84Lon": 126.9794,
            "dutyDivNam": "상급종합"
        });
        let record = facility_from_item(&item).unwrap();
        assert_eq!(record.lat, Some(37.5729));
        assert_eq!(record.lon, Some(126.9794));
        assert!(record.has_coordinates());
        assert_eq!(record.division_name.as_deref(), Some("상급종합"));
    }
}
