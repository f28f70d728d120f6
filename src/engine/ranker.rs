// ==========================================
// 응급 병원 배정 엔진 - 랭킹 엔진
// ==========================================
// 정렬 키 (오름차순):
//   (-requirement_score, -grade_priority, distance_km, fetch_seq)
// 순수 함수: 동일 입력 집합 → 동일 출력 순서 (멱등)
// ==========================================

use crate::domain::candidate::Candidate;
use std::cmp::Ordering;

/// 지정/구분 명칭 문자열에서 등급 우선순위 서수 도출
///
/// 부분 문자열 매칭 순서가 곧 우선순위 판정 순서다.
pub fn grade_priority(grade_name: Option<&str>, division_name: Option<&str>) -> f64 {
    let grade = grade_name.unwrap_or("");
    let division = division_name.unwrap_or("");

    if grade.contains("권역외상센터") {
        return 4.0;
    }
    if grade.contains("권역응급의료센터") || division.contains("권역응급의료센터") {
        return 3.5;
    }
    if division.contains("3차") || division.contains("상급종합") {
        return 2.0;
    }
    if division.contains("2차") {
        return 1.0;
    }
    0.0
}

// ==========================================
// Ranker - 다중 키 정렬 엔진
// ==========================================
pub struct Ranker;

impl Ranker {
    pub fn new() -> Self {
        Self
    }

    /// 후보 목록 정렬 (우선순위 높은 순)
    pub fn rank(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates.sort_by(Self::compare);
        candidates
    }

    /// 정렬 비교: 점수 내림차순 → 등급 내림차순 → 거리 오름차순 → 수집 순번
    fn compare(a: &Candidate, b: &Candidate) -> Ordering {
        b.requirement_score
            .partial_cmp(&a.requirement_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.grade_priority
                    .partial_cmp(&a.grade_priority)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| {
                a.distance_km
                    .partial_cmp(&b.distance_km)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.fetch_seq.cmp(&b.fetch_seq))
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_priority_tiers() {
        assert_eq!(grade_priority(Some("권역외상센터"), None), 4.0);
        assert_eq!(grade_priority(Some("권역응급의료센터"), None), 3.5);
        assert_eq!(grade_priority(None, Some("권역응급의료센터")), 3.5);
        assert_eq!(grade_priority(None, Some("상급종합병원")), 2.0);
        assert_eq!(grade_priority(None, Some("종합병원(3차)")), 2.0);
        assert_eq!(grade_priority(None, Some("병원(2차)")), 1.0);
        assert_eq!(grade_priority(None, None), 0.0);
        assert_eq!(grade_priority(Some("지역응급의료기관"), Some("의원")), 0.0);
    }

    #[test]
    fn test_trauma_center_outranks_division() {
        // 권역외상센터 지정은 구분 명칭과 무관하게 최상위
        assert_eq!(grade_priority(Some("권역외상센터"), Some("의원")), 4.0);
    }
}
