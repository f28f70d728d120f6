// ==========================================
// 응급 병원 배정 엔진 - 지역 스코프 해석기
// ==========================================
// 책임: 요청 행정구역 → 조회 대상 스코프 확장
// 특징: 네트워크/DB 접근 없는 순수 정적 테이블 조회
// 오류 없음: 미등록 지역은 확장 목록이 비어 있을 뿐이다
// ==========================================

use crate::config::regions;

/// 지역 조회 스코프
///
/// `[primary] + included_metros`가 1차 조회 대상이며,
/// `fallback_province`는 요청 지역이 광역시일 때만 설정되어
/// 지역 풀이 부족할 경우의 확장에 쓰인다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionScope {
    /// 요청된 시도
    pub primary: String,
    /// 정적 테이블 기준 함께 조회하는 광역시 목록
    pub included_metros: Vec<String>,
    /// 광역시 요청 시의 폴백 도(道)
    pub fallback_province: Option<String>,
}

impl RegionScope {
    /// 1차 조회 대상 목록: [primary] + included_metros (순서 보존)
    pub fn targets(&self) -> Vec<String> {
        let mut targets = vec![self.primary.clone()];
        targets.extend(self.included_metros.iter().cloned());
        targets
    }
}

// ==========================================
// RegionResolver - 스코프 해석 엔진
// ==========================================
pub struct RegionResolver;

impl RegionResolver {
    pub fn new() -> Self {
        Self
    }

    /// 요청 시도명을 조회 스코프로 확장
    pub fn resolve(&self, sido: &str) -> RegionScope {
        RegionScope {
            primary: sido.to_string(),
            included_metros: regions::included_metros(sido),
            fallback_province: regions::fallback_province(sido),
        }
    }
}

impl Default for RegionResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_province_scope_includes_metros() {
        let scope = RegionResolver::new().resolve("경기도");
        assert_eq!(
            scope.targets(),
            vec!["경기도", "서울특별시", "인천광역시"]
        );
        assert_eq!(scope.fallback_province, None);
    }

    #[test]
    fn test_metro_scope_has_fallback() {
        let scope = RegionResolver::new().resolve("서울특별시");
        assert_eq!(scope.targets(), vec!["서울특별시"]);
        assert_eq!(scope.fallback_province.as_deref(), Some("경기도"));
    }

    #[test]
    fn test_unknown_region_yields_bare_scope() {
        let scope = RegionResolver::new().resolve("미지의지역");
        assert_eq!(scope.targets(), vec!["미지의지역"]);
        assert!(scope.included_metros.is_empty());
        assert_eq!(scope.fallback_province, None);
    }
}
