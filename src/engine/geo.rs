// ==========================================
// 응급 병원 배정 엔진 - 지리 계산 유틸
// ==========================================

/// 지구 반지름 (km)
const EARTH_RADIUS_KM: f64 = 6371.0;

/// 두 좌표 간 대권 거리 (haversine, km)
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_KM * c
}

/// 주소 문자열에서 (시도, 시군구) 추정
///
/// 공백 분리 기반의 단순 추정이다. 행정구역 경계 데이터와 대조된 적이
/// 없는 방식이므로 local/neighbor 분류 이상의 용도로 쓰지 않는다.
pub fn guess_region_from_address(address: &str) -> Option<(String, Option<String>)> {
    let mut parts = address.split_whitespace();
    let sido = parts.next()?.to_string();
    let sigungu = parts.next().map(|s| s.to_string());
    Some((sido, sigungu))
}
