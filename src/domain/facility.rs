// ==========================================
// 응급 병원 배정 엔진 - 시설 기본정보 엔티티
// ==========================================
// 준정적 데이터: 외부 조회 성공 시마다 캐시에 upsert 되며
// 이 엔진은 캐시 레코드를 삭제하지 않는다
// ==========================================

use serde::{Deserialize, Serialize};

/// 병원 기본정보 레코드 (기관 식별자 hpid 기준)
///
/// 외부 레지스트리 기본정보 조회 결과 또는 시설 캐시 조회 결과를 담는다.
/// 좌표가 있는 캐시 히트는 외부 상세 조회를 생략하는 근거가 된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    /// 기관 식별자 (hpid)
    pub id: String,
    /// 기관명
    pub name: Option<String>,
    /// 주소
    pub address: Option<String>,
    /// 대표 전화 (응급실)
    pub phone: Option<String>,
    /// 위도 (WGS84)
    pub lat: Option<f64>,
    /// 경도 (WGS84)
    pub lon: Option<f64>,
    /// 응급의료기관 지정 코드 (dutyEmcls)
    pub grade_code: Option<String>,
    /// 응급의료기관 지정 명칭 (dutyEmclsName)
    pub grade_name: Option<String>,
    /// 기관 구분 코드 (dutyDiv)
    pub division_code: Option<String>,
    /// 기관 구분 명칭 (dutyDivNam)
    pub division_name: Option<String>,
}

impl FacilityRecord {
    /// 식별자만 가진 빈 레코드 생성
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            address: None,
            phone: None,
            lat: None,
            lon: None,
            grade_code: None,
            grade_name: None,
            division_code: None,
            division_name: None,
        }
    }

    /// 좌표 보유 여부
    pub fn has_coordinates(&self) -> bool {
        self.lat.is_some() && self.lon.is_some()
    }

    /// 등급 정보 덮어쓰기 (값이 있는 필드만)
    pub fn overlay_grade(&mut self, grade_code: Option<&str>, grade_name: Option<&str>) {
        if let Some(code) = grade_code {
            self.grade_code = Some(code.to_string());
        }
        if let Some(name) = grade_name {
            self.grade_name = Some(name.to_string());
        }
    }
}
