// ==========================================
// 응급 병원 배정 엔진 - 실시간 가용 병상 스냅샷
// ==========================================
// 휘발성 데이터: 캐시하지 않고 요청마다 재조회한다
// "best effort, last successful fetch wins"
// ==========================================

use crate::domain::types::{BedKey, EquipKey};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 병원별 실시간 병상 수 / 장비 가용 스냅샷
///
/// 레지스트리 응답 필드가 비어 있을 수 있으므로 전 필드가 `Option`이다.
/// 평가 시 누락 병상 수는 0, 누락 플래그는 불가(false)로 본다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacitySnapshot {
    /// 기관 식별자 (hpid)
    pub facility_id: String,
    /// 스냅샷 갱신 시각 (hvidate)
    pub updated_at: Option<NaiveDateTime>,

    // ===== 병상 수 =====
    /// 응급실 (hvec)
    pub er_beds: Option<i64>,
    /// 수술실 (hvoc)
    pub operating_rooms: Option<i64>,
    /// 일반 중환자실 (hvicc)
    pub icu_general: Option<i64>,
    /// 입원실 (hvgc)
    pub ward_beds: Option<i64>,
    /// 신경 중환자실 (hvcc)
    pub icu_neuro: Option<i64>,
    /// 신생아 중환자실 (hvncc)
    pub icu_neonatal: Option<i64>,
    /// 흉부 중환자실 (hvccc)
    pub icu_thoracic: Option<i64>,
    /// 외과 중환자실 (hv3)
    pub icu_surgical: Option<i64>,
    /// 외과 입원실 (hv4)
    pub ward_surgical: Option<i64>,
    /// 신경과 입원실 (hv5)
    pub ward_neurology: Option<i64>,
    /// 신경외과 중환자실 (hv6)
    pub icu_neurosurgery: Option<i64>,
    /// 화상 중환자실 (hv8)
    pub icu_burn: Option<i64>,
    /// 외상 중환자실 (hv9)
    pub icu_trauma: Option<i64>,

    // ===== 장비/인력 가용 플래그 =====
    /// CT 가용 (hvctayn)
    pub ct_available: Option<bool>,
    /// MRI 가용 (hvmriayn)
    pub mri_available: Option<bool>,
    /// 혈관촬영 가용 (hvangioayn)
    pub angio_available: Option<bool>,
    /// 인공호흡기 가용 (hvventiayn)
    pub ventilator_available: Option<bool>,
    /// 소아 당직 (hv10)
    pub pediatric_duty: Option<bool>,
    /// 소아 수술 (hv11)
    pub pediatric_surgery: Option<bool>,

    /// 당직의명 (hvdnm)
    pub duty_doctor: Option<String>,
}

impl CapacitySnapshot {
    /// 식별자만 가진 빈 스냅샷 생성
    pub fn new(facility_id: impl Into<String>) -> Self {
        Self {
            facility_id: facility_id.into(),
            ..Default::default()
        }
    }

    /// 병상 수 조회 (누락 시 0)
    pub fn beds(&self, key: BedKey) -> i64 {
        let value = match key {
            BedKey::EmergencyRoom => self.er_beds,
            BedKey::OperatingRoom => self.operating_rooms,
            BedKey::IcuGeneral => self.icu_general,
            BedKey::Ward => self.ward_beds,
            BedKey::IcuNeuro => self.icu_neuro,
            BedKey::IcuNeonatal => self.icu_neonatal,
            BedKey::IcuThoracic => self.icu_thoracic,
            BedKey::IcuSurgical => self.icu_surgical,
            BedKey::WardSurgical => self.ward_surgical,
            BedKey::WardNeurology => self.ward_neurology,
            BedKey::IcuNeurosurgery => self.icu_neurosurgery,
            BedKey::IcuBurn => self.icu_burn,
            BedKey::IcuTrauma => self.icu_trauma,
        };
        value.unwrap_or(0)
    }

    /// 장비/인력 가용 여부 조회 (누락 시 false)
    pub fn flag(&self, key: EquipKey) -> bool {
        let value = match key {
            EquipKey::Ct => self.ct_available,
            EquipKey::Mri => self.mri_available,
            EquipKey::Angiography => self.angio_available,
            EquipKey::Ventilator => self.ventilator_available,
            EquipKey::PediatricDuty => self.pediatric_duty,
            EquipKey::PediatricSurgery => self.pediatric_surgery,
        };
        value.unwrap_or(false)
    }
}
