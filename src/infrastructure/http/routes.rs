use super::{error::AppError, state::AppState};
use crate::application::lookup_stock::{LookupRequest, LookupResponse};
use crate::domain::values::like_flag::parse_like_flag;
use axum::{
    extract::{ConnectInfo, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::{net::SocketAddr, sync::Arc};

const FORWARDED_FOR: &str = "x-forwarded-for";

/// `GET /api/stock-prices?stock=goog[&stock=msft][&like=true]`
pub async fn stock_prices_handler(
    State(state): State<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<LookupResponse>, AppError> {
    let request = LookupRequest {
        // `stock[]` is what qs-style clients send for arrays
        symbols: params
            .iter()
            .filter(|(k, _)| k == "stock" || k == "stock[]")
            .map(|(_, v)| v.clone())
            .collect(),
        like: parse_like_flag(
            params
                .iter()
                .rev()
                .find(|(k, _)| k == "like")
                .map(|(_, v)| v.as_str()),
        ),
        caller_address: caller_address(state.trust_proxy, &headers, connect_info),
    };

    let response = state.checker.lookup(request).await?;
    Ok(Json(response))
}

pub async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

fn caller_address(
    trust_proxy: bool,
    headers: &HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
) -> String {
    if trust_proxy {
        let forwarded = headers
            .get(FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(addr) = forwarded {
            return addr.to_string();
        }
    }

    connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_default()
}
