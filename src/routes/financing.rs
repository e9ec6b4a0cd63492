// Handlers for the financing calculator

use axum::{Json, extract::State};
use serde::Serialize;

use crate::{
    AppState,
    error::AppResult,
    financing::{ALLOWED_TERMS, LoanParameters, LoanResult, compute_loan},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    financed_principal: f64,
    // null when the parameters cannot produce a meaningful payment
    result: Option<LoanResult>,
}

#[derive(Serialize)]
pub struct TermsResponse {
    terms: Vec<u32>,
    defaults: LoanParameters,
}

pub async fn calculate(Json(params): Json<LoanParameters>) -> AppResult<Json<CalculationResponse>> {
    params.validate()?;
    let result = compute_loan(&params);
    tracing::info!(
        principal = params.financed_principal(),
        term = params.term_months,
        has_result = result.is_some(),
        "[HANDLER] /api/financing/calculate - Loan computed."
    );

    Ok(Json(CalculationResponse {
        financed_principal: params.financed_principal(),
        result,
    }))
}

pub async fn get_terms(State(app_state): State<AppState>) -> Json<TermsResponse> {
    Json(TermsResponse {
        terms: ALLOWED_TERMS.to_vec(),
        defaults: LoanParameters {
            annual_rate_percent: app_state.settings.default_interest_rate,
            ..LoanParameters::default()
        },
    })
}
