// ==========================================
// 응급 병원 배정 엔진 - 증상별 필수 요건 규칙
// ==========================================
// 규칙 구성:
// - required_flags: 반드시 Y 여야 하는 장비/인력 플래그
// - min_counts: 최소 병상 수 (≥) 요건
// - nice_to_have: 참고용 (점수에 반영하지 않음)
// ==========================================

use crate::domain::types::{BedKey, EquipKey};

/// 증상 카테고리별 필수 요건 규칙
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymptomRule {
    /// 장비/인력 가용 플래그 요건 (모두 충족 시 해당 차원 100%)
    pub required_flags: Vec<EquipKey>,
    /// 최소 병상 수 요건 (키, 하한)
    pub min_counts: Vec<(BedKey, i64)>,
    /// 있으면 좋은 항목 - 정보 제공용이며 점수에 영향 없음
    pub nice_to_have: Vec<(BedKey, i64)>,
}

impl SymptomRule {
    /// 평가 가능한 차원이 하나도 없는 빈 규칙 여부
    pub fn is_empty(&self) -> bool {
        self.required_flags.is_empty() && self.min_counts.is_empty()
    }
}

/// 소아 중증 가산점 대상 증상명
pub const PEDIATRIC_CRITICAL_SYMPTOM: &str = "소아 중증(신생아/영아)";

/// 소아 중증 + 신생아 중환자실 보유 시 가산점
///
/// [0,1] 점수 척도 대비 의도적으로 큰 상수로, 소아 수용 가능 병원을
/// 거리와 무관하게 최상위로 끌어올리는 정책 값이다.
pub const PEDIATRIC_NICU_BONUS: f64 = 10.0;

/// 증상명으로 규칙 조회
///
/// 미등록 증상은 빈 규칙을 돌려준다. 빈 규칙 평가는 점수 0,
/// `meets_all_required = true` (평가할 차원이 없으므로)가 된다.
pub fn rule_for_symptom(symptom: &str) -> SymptomRule {
    use BedKey::*;
    use EquipKey::*;

    match symptom {
        "뇌졸중 의심(FAST+)" => SymptomRule {
            required_flags: vec![Ct],
            min_counts: vec![(IcuGeneral, 1)],
            nice_to_have: vec![(WardNeurology, 1), (IcuNeurosurgery, 1)],
        },
        "심근경색 의심(STEMI)" => SymptomRule {
            required_flags: vec![Angiography],
            min_counts: vec![(OperatingRoom, 1), (IcuGeneral, 1)],
            nice_to_have: vec![],
        },
        "다발성 외상/중증 외상" => SymptomRule {
            required_flags: vec![Ventilator],
            min_counts: vec![(OperatingRoom, 1), (IcuGeneral, 1)],
            nice_to_have: vec![(IcuTrauma, 1)],
        },
        "성인 호흡곤란" => SymptomRule {
            required_flags: vec![Ventilator],
            min_counts: vec![(IcuGeneral, 1), (IcuNeuro, 1)],
            nice_to_have: vec![],
        },
        "소아 호흡곤란" => SymptomRule {
            required_flags: vec![PediatricDuty, PediatricSurgery],
            min_counts: vec![(IcuNeonatal, 1)],
            nice_to_have: vec![],
        },
        "성인 경련" => SymptomRule {
            required_flags: vec![Ct],
            min_counts: vec![(IcuGeneral, 1), (WardNeurology, 1)],
            nice_to_have: vec![],
        },
        "소아 경련" => SymptomRule {
            required_flags: vec![PediatricDuty, PediatricSurgery],
            min_counts: vec![(IcuNeonatal, 1)],
            nice_to_have: vec![],
        },
        "정형외과 중증(대형골절/절단)" => SymptomRule {
            required_flags: vec![],
            min_counts: vec![(OperatingRoom, 1), (IcuSurgical, 1), (WardSurgical, 1)],
            nice_to_have: vec![],
        },
        "신경외과 응급(의식저하/외상성출혈)" => SymptomRule {
            required_flags: vec![Ct],
            min_counts: vec![(IcuNeurosurgery, 1), (IcuGeneral, 1)],
            nice_to_have: vec![],
        },
        "소아 중증(신생아/영아)" => SymptomRule {
            required_flags: vec![PediatricDuty, PediatricSurgery],
            min_counts: vec![(IcuNeonatal, 1)],
            nice_to_have: vec![],
        },
        _ => SymptomRule::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_symptom_has_rule() {
        let rule = rule_for_symptom("뇌졸중 의심(FAST+)");
        assert_eq!(rule.required_flags, vec![EquipKey::Ct]);
        assert_eq!(rule.min_counts, vec![(BedKey::IcuGeneral, 1)]);
        assert!(!rule.is_empty());
    }

    #[test]
    fn test_unknown_symptom_yields_empty_rule() {
        let rule = rule_for_symptom("없는 증상");
        assert!(rule.is_empty());
    }

    #[test]
    fn test_nice_to_have_present_but_separate() {
        let rule = rule_for_symptom("다발성 외상/중증 외상");
        assert_eq!(rule.nice_to_have, vec![(BedKey::IcuTrauma, 1)]);
    }
}
