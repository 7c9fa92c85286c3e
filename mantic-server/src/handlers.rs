use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use mantic_api::FullMarket;

use crate::{AppState, Error};

/// `GET /api/v0/slug/:slug`: the market's public fields together with its
/// full bet and comment lists, fetched concurrently. Unknown slugs get a 404
/// and nothing else is fetched.
pub async fn market_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let contract = state
        .store
        .contract_by_slug(&slug)
        .await
        .with_context(|| format!("resolving market slug {slug:?}"))?
        .ok_or(Error::contract_not_found())?;

    let (bets, comments) = futures::try_join!(
        state.store.bets_on(contract.id),
        state.comments.list_for_contract(contract.id, None),
    )
    .with_context(|| format!("fetching bets and comments for {:?}", contract.id))?;

    Ok((
        [(header::CACHE_CONTROL, "max-age=0")],
        Json(FullMarket {
            contract,
            bets,
            comments,
        }),
    ))
}
