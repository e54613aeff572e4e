use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::DataResponse;
use crate::app::AppState;
use crate::domain::forms::AgreementForm;
use crate::domain::legacy;
use crate::engine::recorder::{ChangeEntry, ChangeRecorder};
use crate::engine::{self, AgreementQuote};
use crate::error::{ApiError, ApiResult};
use crate::services::SourceMap;

#[derive(Debug, Deserialize)]
pub struct PriceRequest {
    pub agreement: AgreementForm,
    /// Form state recovered from a previously saved document; feeds the
    /// saved layer of override resolution.
    #[serde(default)]
    pub saved: Option<AgreementForm>,
    /// Quoting session; reused across repricings so override records group.
    #[serde(default)]
    pub session: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub session: Uuid,
    pub quote: AgreementQuote,
    pub changes: Vec<ChangeEntry>,
    pub rate_sources: SourceMap,
}

/// Price an agreement against the current rate book.
pub async fn price_quote(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PriceRequest>,
) -> ApiResult<Json<PriceResponse>> {
    let (book, sources) = state.rates.rate_book().await;
    Ok(Json(run_pricing(request, book, sources)))
}

/// Reprice after a forced rate refetch, bypassing the cache TTL.
pub async fn refresh_pricing(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PriceRequest>,
) -> ApiResult<Json<PriceResponse>> {
    let (book, sources) = state.rates.refresh().await;
    Ok(Json(run_pricing(request, book, sources)))
}

fn run_pricing(
    request: PriceRequest,
    book: crate::domain::rates::RateBook,
    sources: SourceMap,
) -> PriceResponse {
    let session = request.session.unwrap_or_else(Uuid::new_v4);
    let mut recorder = ChangeRecorder::new(session);

    let quote = engine::price_agreement(
        &request.agreement,
        &book,
        request.saved.as_ref(),
        &mut recorder,
    );

    tracing::info!(
        session = %session,
        services = quote.services.iter().filter(|s| s.is_active).count(),
        classification = ?quote.aggregate.classification,
        total = %quote.aggregate.total_agreement_amount,
        "Priced agreement"
    );

    PriceResponse {
        session,
        quote,
        changes: recorder.into_entries(),
        rate_sources: sources,
    }
}

/// Normalize a saved document of any historical shape into the canonical
/// agreement form.
pub async fn load_document(
    Json(raw): Json<serde_json::Value>,
) -> ApiResult<DataResponse<AgreementForm>> {
    if !raw.is_object() {
        return Err(ApiError::BadRequest(
            "Document must be a JSON object".to_string(),
        ));
    }

    let form = legacy::agreement_from_document(&raw);
    Ok(DataResponse::new(form))
}
