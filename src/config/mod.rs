// ==========================================
// 응급 병원 배정 엔진 - 설정 레이어
// ==========================================
// 정적 테이블 (행정구역/증상 규칙) + 런타임 설정
// ==========================================

pub mod regions;
pub mod settings;
pub mod symptoms;

pub use regions::{fallback_province, included_metros, is_metropolitan, ALL_SIDOS};
pub use settings::{Settings, SettingsError};
pub use symptoms::{
    rule_for_symptom, SymptomRule, PEDIATRIC_CRITICAL_SYMPTOM, PEDIATRIC_NICU_BONUS,
};
