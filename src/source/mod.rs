// ==========================================
// 응급 병원 배정 엔진 - 외부 소스 레이어
// ==========================================
// 책임: 외부 레지스트리/경로 API 호출과 응답 해석
// seam: RegistrySource / RoutingSource trait
// ==========================================

pub mod error;
pub mod http;
pub mod registry;
pub mod routing;

pub use error::{SourceError, SourceResult};
pub use http::HttpClient;
pub use registry::{
    GradeEndpoint, GradeInfo, OpenDataRegistry, RegistrySource, TraumaListEntry,
};
pub use routing::{DrivingInfo, KakaoRouting, RoutingSource};
