// Handlers for inventory endpoints

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    AppState,
    catalog::Facets,
    error::{AppError, AppResult},
    export,
    inventory::{Bracket, FilterCriteria, MILEAGE_BRACKETS, PRICE_BRACKETS, SortKey, find_bracket},
    models::{Vehicle, VehicleCategory},
};

// --- Request Structs ---

// Query string as sent by the listing page. Empty values mean "no filter",
// which is what an unselected <select> submits.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub q: Option<String>,
    pub brand: Option<String>,
    pub year: Option<String>,
    pub fuel: Option<String>,
    pub transmission: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub mileage: Option<String>,
    pub sort: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ListingQuery {
    pub fn into_criteria(self) -> AppResult<FilterCriteria> {
        let year = non_empty(self.year)
            .map(|raw| {
                raw.trim()
                    .parse::<u16>()
                    .map_err(|_| AppError::BadRequest(format!("invalid year '{}'", raw)))
            })
            .transpose()?;

        let category = non_empty(self.category)
            .map(|raw| {
                raw.parse::<VehicleCategory>()
                    .map_err(|e| AppError::BadRequest(e.to_string()))
            })
            .transpose()?;

        let price = non_empty(self.price)
            .map(|id| lookup_bracket(&PRICE_BRACKETS, "price", &id))
            .transpose()?;
        let mileage = non_empty(self.mileage)
            .map(|id| lookup_bracket(&MILEAGE_BRACKETS, "mileage", &id))
            .transpose()?;

        let sort = non_empty(self.sort)
            .map(|raw| {
                raw.parse::<SortKey>()
                    .map_err(|e| AppError::BadRequest(e.to_string()))
            })
            .transpose()?
            .unwrap_or_default();

        Ok(FilterCriteria {
            query: non_empty(self.q),
            brand: non_empty(self.brand),
            year,
            fuel: non_empty(self.fuel),
            transmission: non_empty(self.transmission),
            category,
            price,
            mileage,
            sort,
        })
    }
}

fn lookup_bracket(brackets: &[Bracket], kind: &str, id: &str) -> AppResult<Bracket> {
    find_bracket(brackets, id)
        .ok_or_else(|| AppError::BadRequest(format!("unknown {} bracket '{}'", kind, id)))
}

// --- Response Wrappers ---

#[derive(Serialize)]
struct ListingResponse {
    count: usize,
    sort: SortKey,
    vehicles: Arc<Vec<Vehicle>>,
}

#[derive(Serialize)]
struct BracketOption {
    id: String,
    min: u32,
    max: Option<u32>, // None for the open-ended top bracket
}

impl From<&Bracket> for BracketOption {
    fn from(bracket: &Bracket) -> Self {
        Self {
            id: bracket.id(),
            min: bracket.min,
            max: (bracket.max != u32::MAX).then_some(bracket.max),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetsResponse {
    dealership: String,
    #[serde(flatten)]
    facets: Facets,
    price_brackets: Vec<BracketOption>,
    mileage_brackets: Vec<BracketOption>,
    sort_keys: Vec<SortKey>,
}

// --- API Handlers ---

pub async fn list_vehicles(
    State(app_state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> AppResult<impl IntoResponse> {
    let criteria = query.into_criteria()?;
    tracing::info!(criteria = ?criteria, "[HANDLER] /api/vehicles - Request received.");

    let vehicles = app_state.listing_cache.listings(&app_state.catalog, &criteria);
    tracing::debug!(count = vehicles.len(), "[HANDLER] /api/vehicles - Returning listing.");

    Ok(Json(ListingResponse {
        count: vehicles.len(),
        sort: criteria.sort,
        vehicles,
    }))
}

pub async fn get_vehicle(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Vehicle>> {
    tracing::info!("[HANDLER] /api/vehicles/:slug - Request received for slug: {}", slug);
    app_state
        .catalog
        .by_slug(&slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no vehicle with slug '{}'", slug)))
}

pub async fn get_facets(State(app_state): State<AppState>) -> Json<FacetsResponse> {
    Json(FacetsResponse {
        dealership: app_state.settings.dealership_name.clone(),
        facets: app_state.catalog.facets(),
        price_brackets: PRICE_BRACKETS.iter().map(BracketOption::from).collect(),
        mileage_brackets: MILEAGE_BRACKETS.iter().map(BracketOption::from).collect(),
        sort_keys: SortKey::ALL.to_vec(),
    })
}

pub async fn export_vehicles(
    State(app_state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> AppResult<impl IntoResponse> {
    let criteria = query.into_criteria()?;
    let vehicles = app_state.listing_cache.listings(&app_state.catalog, &criteria);
    let body = export::to_csv_bytes(&vehicles)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    let disposition = format!("attachment; filename=\"inventory_{}.csv\"", timestamp);
    tracing::info!(rows = vehicles.len(), "[HANDLER] /api/vehicles/export - CSV generated.");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
