// ==========================================
// 응급 병원 배정 엔진 - CLI 진입점
// ==========================================
// 요청 1건을 끝까지 수행하고 응답 JSON을 출력한다
// 사용법: er-dispatch <lat> <lon> <시도> <시군구> <증상>
// ==========================================

use anyhow::{bail, Context, Result};
use er_dispatch::config::Settings;
use er_dispatch::repository::SqliteFacilityCache;
use er_dispatch::source::{HttpClient, KakaoRouting, OpenDataRegistry};
use er_dispatch::{logging, DispatchEngine, DispatchRequest};
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", er_dispatch::APP_NAME, er_dispatch::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 5 {
        bail!("사용법: er-dispatch <lat> <lon> <시도> <시군구> <증상>");
    }
    let request = DispatchRequest {
        lat: args[0].parse().context("lat 해석 실패")?,
        lon: args[1].parse().context("lon 해석 실패")?,
        sido: args[2].clone(),
        sigungu: Some(args[3].clone()).filter(|s| !s.trim().is_empty()),
        symptom: args[4].clone(),
    };

    let settings = Settings::from_env()?;
    tracing::info!("시설 캐시: {}", settings.cache_db_path);

    let registry = Arc::new(OpenDataRegistry::new(
        HttpClient::new()?,
        settings.service_key.clone(),
    ));
    let routing = Arc::new(KakaoRouting::new(
        HttpClient::new()?,
        settings.kakao_key.clone(),
    ));
    let cache = Arc::new(SqliteFacilityCache::new(&settings.cache_db_path)?);

    let engine = DispatchEngine::new(registry, routing, cache);
    let response = engine.dispatch(&request).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
