// ==========================================
// 응급 병원 배정 엔진 - 도메인 타입 정의
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 병원 조회 유형 (Hospital Type)
// ==========================================
// 증상 분류에 따라 조회 소스 구성과 건수 상한이 달라진다
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HospitalType {
    General,
    Trauma,
    Pediatric,
}

impl HospitalType {
    /// 증상 분류명으로부터 병원 조회 유형 결정
    pub fn from_symptom(symptom: &str) -> Self {
        match symptom {
            "다발성 외상/중증 외상" => HospitalType::Trauma,
            "소아 중증(신생아/영아)" => HospitalType::Pediatric,
            _ => HospitalType::General,
        }
    }
}

impl fmt::Display for HospitalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HospitalType::General => write!(f, "general"),
            HospitalType::Trauma => write!(f, "trauma"),
            HospitalType::Pediatric => write!(f, "pediatric"),
        }
    }
}

// ==========================================
// 지역 분류 (Region Classification)
// ==========================================
// Local: 요청자 시군구와 일치 (또는 시군구 미지정)
// Neighbor: 동일 스코프 내 다른 시군구
// Fallback: 광역시 폴백 도(道)에서 보충된 후보
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionClass {
    Local,
    Neighbor,
    Fallback,
}

impl fmt::Display for RegionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionClass::Local => write!(f, "local"),
            RegionClass::Neighbor => write!(f, "neighbor"),
            RegionClass::Fallback => write!(f, "fallback"),
        }
    }
}

// ==========================================
// 장비 가용 플래그 키 (Equipment Key)
// ==========================================
// 실시간 가용병상 응답의 Y/N 필드에 대응
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipKey {
    /// CT 가용 (hvctayn)
    Ct,
    /// MRI 가용 (hvmriayn)
    Mri,
    /// 혈관촬영 가용 (hvangioayn)
    Angiography,
    /// 인공호흡기 가용 (hvventiayn)
    Ventilator,
    /// 소아 당직 (hv10)
    PediatricDuty,
    /// 소아 수술 (hv11)
    PediatricSurgery,
}

// ==========================================
// 병상 수 키 (Bed Key)
// ==========================================
// 실시간 가용병상 응답의 수치 필드에 대응
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BedKey {
    /// 응급실 (hvec)
    EmergencyRoom,
    /// 수술실 (hvoc)
    OperatingRoom,
    /// 일반 중환자실 (hvicc)
    IcuGeneral,
    /// 입원실 (hvgc)
    Ward,
    /// 신경 중환자실 (hvcc)
    IcuNeuro,
    /// 신생아 중환자실 (hvncc)
    IcuNeonatal,
    /// 흉부 중환자실 (hvccc)
    IcuThoracic,
    /// 외과 중환자실 (hv3)
    IcuSurgical,
    /// 외과 입원실 (hv4)
    WardSurgical,
    /// 신경과 입원실 (hv5)
    WardNeurology,
    /// 신경외과 중환자실 (hv6)
    IcuNeurosurgery,
    /// 화상 중환자실 (hv8)
    IcuBurn,
    /// 외상 중환자실 (hv9)
    IcuTrauma,
}
