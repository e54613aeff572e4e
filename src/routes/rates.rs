use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::rates::RateBook;
use crate::domain::service::ServiceKind;
use crate::error::{ApiError, ApiResult};
use crate::services::RateSource;

#[derive(Serialize)]
pub struct RateTableResponse {
    pub service: ServiceKind,
    pub label: String,
    pub source: RateSource,
    pub table: serde_json::Value,
}

/// Currently resolved rate table for one service, with a marker saying
/// whether it came from the remote store or the built-in fallback.
pub async fn get_service_rates(
    State(state): State<Arc<AppState>>,
    Path(service): Path<String>,
) -> ApiResult<Json<RateTableResponse>> {
    let kind = ServiceKind::from_key(&service)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown service: {service}")))?;

    let (book, sources) = state.rates.rate_book().await;
    let source = sources
        .get(&kind)
        .copied()
        .unwrap_or(RateSource::Fallback);

    Ok(Json(RateTableResponse {
        service: kind,
        label: kind.label().to_string(),
        source,
        table: table_json(&book, kind).map_err(|e| ApiError::Internal(e.into()))?,
    }))
}

fn table_json(book: &RateBook, kind: ServiceKind) -> Result<serde_json::Value, serde_json::Error> {
    match kind {
        ServiceKind::SaniClean => serde_json::to_value(&book.sani_clean),
        ServiceKind::SaniScrub => serde_json::to_value(&book.sani_scrub),
        ServiceKind::RpmWindows => serde_json::to_value(&book.rpm_windows),
        ServiceKind::PowerScrub => serde_json::to_value(&book.power_scrub),
        ServiceKind::Janitorial => serde_json::to_value(&book.janitorial),
        ServiceKind::Sanipod => serde_json::to_value(&book.sanipod),
        ServiceKind::FoamingDrain => serde_json::to_value(&book.foaming_drain),
        ServiceKind::CarpetClean => serde_json::to_value(&book.carpet_clean),
        ServiceKind::StripWax => serde_json::to_value(&book.strip_wax),
        ServiceKind::GreaseTrap => serde_json::to_value(&book.grease_trap),
        ServiceKind::Electrostatic => serde_json::to_value(&book.electrostatic),
        ServiceKind::Microfiber => serde_json::to_value(&book.microfiber),
    }
}
