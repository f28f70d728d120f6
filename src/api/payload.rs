// ==========================================
// 응급 병원 배정 엔진 - 요청/응답 페이로드
// ==========================================
// 책임: 논리 요청 수신과 응답 직렬화 형태 정의
// ==========================================

use crate::domain::candidate::Candidate;
use crate::domain::types::RegionClass;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 배정 요청 (논리 입력)
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchRequest {
    /// 요청자 위도
    pub lat: f64,
    /// 요청자 경도
    pub lon: f64,
    /// 시도
    pub sido: String,
    /// 시군구 (비어 있으면 전 지역을 local로 본다)
    #[serde(default)]
    pub sigungu: Option<String>,
    /// 증상 분류명
    pub symptom: String,
}

/// 응답용 병원 항목
#[derive(Debug, Clone, Serialize)]
pub struct CandidatePayload {
    pub hpid: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub distance_km: f64,
    pub eta_minutes: Option<u32>,
    pub requirement_score: f64,
    pub meets_all_required: bool,
    pub grade_code: Option<String>,
    pub grade_name: Option<String>,
    pub division_code: Option<String>,
    pub division_name: Option<String>,
    pub region_class: RegionClass,
    pub region_name: Option<String>,

    // ===== 가용 스냅샷 =====
    pub er_beds: Option<i64>,
    pub operating_rooms: Option<i64>,
    pub icu_general: Option<i64>,
    pub ward_beds: Option<i64>,
    pub icu_neuro: Option<i64>,
    pub icu_neonatal: Option<i64>,
    pub icu_thoracic: Option<i64>,
    pub icu_trauma: Option<i64>,
    pub ct_available: Option<bool>,
    pub mri_available: Option<bool>,
    pub angio_available: Option<bool>,
    pub ventilator_available: Option<bool>,
    pub duty_doctor: Option<String>,
    pub capacity_updated_at: Option<NaiveDateTime>,
}

impl From<&Candidate> for CandidatePayload {
    fn from(candidate: &Candidate) -> Self {
        let facility = &candidate.facility;
        let capacity = &candidate.capacity;
        Self {
            hpid: facility.id.clone(),
            name: facility.name.clone(),
            address: facility.address.clone(),
            phone: facility.phone.clone(),
            lat: facility.lat,
            lon: facility.lon,
            distance_km: candidate.distance_km,
            eta_minutes: candidate.eta_minutes,
            requirement_score: candidate.requirement_score,
            meets_all_required: candidate.meets_all_required,
            grade_code: facility.grade_code.clone(),
            grade_name: facility.grade_name.clone(),
            division_code: facility.division_code.clone(),
            division_name: facility.division_name.clone(),
            region_class: candidate.region_class,
            region_name: candidate.region_name.clone(),
            er_beds: capacity.er_beds,
            operating_rooms: capacity.operating_rooms,
            icu_general: capacity.icu_general,
            ward_beds: capacity.ward_beds,
            icu_neuro: capacity.icu_neuro,
            icu_neonatal: capacity.icu_neonatal,
            icu_thoracic: capacity.icu_thoracic,
            icu_trauma: capacity.icu_trauma,
            ct_available: capacity.ct_available,
            mri_available: capacity.mri_available,
            angio_available: capacity.angio_available,
            ventilator_available: capacity.ventilator_available,
            duty_doctor: capacity.duty_doctor.clone(),
            capacity_updated_at: capacity.updated_at,
        }
    }
}

/// 배정 응답 (논리 출력)
#[derive(Debug, Clone, Serialize)]
pub struct DispatchResponse {
    /// 이송 추천 (최대 3)
    pub primary: Vec<CandidatePayload>,
    /// 예비 풀 (최대 10)
    pub backup: Vec<CandidatePayload>,
    /// 인근 지역 제안 풀 (최대 9)
    pub neighbor: Vec<CandidatePayload>,
    /// 기관 id → 경로 좌표 목록 [lon, lat]
    pub route_paths: HashMap<String, Vec<[f64; 2]>>,
}
