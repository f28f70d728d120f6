// ==========================================
// 응급 병원 배정 엔진 - 행정구역 정적 테이블
// ==========================================
// 도(道) 요청 시 함께 조회할 포함 광역시 목록과,
// 광역시 요청 시 지역 풀 고갈에 대비한 폴백 도 매핑
// ==========================================

/// 도(道) → 지리적으로 내부에 위치한 광역시 목록
pub const PROVINCE_INCLUDE_METROS: &[(&str, &[&str])] = &[
    ("경기도", &["서울특별시", "인천광역시"]),
    ("전라남도", &["광주광역시"]),
    ("충청남도", &["대전광역시", "세종특별자치시"]),
    ("경상남도", &["부산광역시", "울산광역시"]),
    ("경상북도", &["대구광역시"]),
];

/// 광역시/특별시 → 폴백 도(道)
pub const METRO_FALLBACK_PROVINCE: &[(&str, &str)] = &[
    ("서울특별시", "경기도"),
    ("인천광역시", "경기도"),
    ("광주광역시", "전라남도"),
    ("대전광역시", "충청남도"),
    ("울산광역시", "경상남도"),
    ("부산광역시", "경상남도"),
    ("대구광역시", "경상북도"),
    ("세종특별자치시", "충청남도"),
];

/// 등급 정보 일괄 조회 시 기본 대상이 되는 전국 시도 목록
pub const ALL_SIDOS: &[&str] = &[
    "서울특별시",
    "부산광역시",
    "대구광역시",
    "인천광역시",
    "광주광역시",
    "대전광역시",
    "울산광역시",
    "경기도",
    "강원도",
    "충청북도",
    "충청남도",
    "전라북도",
    "전라남도",
    "경상북도",
    "경상남도",
    "제주특별자치도",
    "세종특별자치시",
];

/// 광역시/특별시/특별자치시 여부
pub fn is_metropolitan(sido: &str) -> bool {
    sido.ends_with("광역시") || sido.ends_with("특별시") || sido.ends_with("특별자치시")
}

/// 도(道)에 포함된 광역시 목록 조회 (미등록 지역은 빈 목록)
pub fn included_metros(sido: &str) -> Vec<String> {
    PROVINCE_INCLUDE_METROS
        .iter()
        .find(|(province, _)| *province == sido)
        .map(|(_, metros)| metros.iter().map(|m| m.to_string()).collect())
        .unwrap_or_default()
}

/// 광역시의 폴백 도(道) 조회
pub fn fallback_province(sido: &str) -> Option<String> {
    if !is_metropolitan(sido) {
        return None;
    }
    METRO_FALLBACK_PROVINCE
        .iter()
        .find(|(metro, _)| *metro == sido)
        .map(|(_, province)| province.to_string())
}
