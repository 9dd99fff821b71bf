// SPDX-License-Identifier: MIT

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::Stream;
use serde::Deserialize;
use serde_json::{json, Value};
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use super::error::ApiResult;
use super::AppState;
use crate::hub::model::CampaignStatus;
use crate::hub::{HubError, InviteOutcome};
use crate::market::seed::CoordinateField;
use crate::market::views::{
    CampaignCard, CampaignForm, CampaignMap, MerchantView, RiderCard, RiderPoint, RiderProfile,
    RiderView,
};

fn merchant(state: &AppState) -> MerchantView<'_> {
    MerchantView::new(&state.session, &state.cities)
}

fn rider(state: &AppState) -> RiderView<'_> {
    RiderView::new(&state.session, state.tracker_config.jitter)
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_cities(State(state): State<AppState>) -> Json<Value> {
    let cities: Vec<Value> = state
        .cities
        .iter()
        .map(|(name, c)| json!({ "name": name, "lat": c.lat, "lon": c.lon }))
        .collect();
    Json(json!(cities))
}

// ── Merchant ──

pub async fn available_riders(State(state): State<AppState>) -> Json<Vec<RiderCard>> {
    Json(merchant(&state).available_riders().await)
}

pub async fn list_campaigns(State(state): State<AppState>) -> Json<Vec<CampaignCard>> {
    Json(merchant(&state).campaigns().await)
}

pub async fn create_campaign(
    State(state): State<AppState>,
    payload: Result<Json<CampaignForm>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CampaignCard>)> {
    let Json(form) = payload?;
    let card = merchant(&state).create_campaign(form).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

pub async fn invite_riders(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> ApiResult<Json<InviteOutcome>> {
    Ok(Json(merchant(&state).invite(&title).await?))
}

pub async fn campaign_map(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> ApiResult<Json<CampaignMap>> {
    Ok(Json(merchant(&state).campaign_map(&title).await?))
}

#[derive(Debug, Deserialize)]
pub struct TrackingParams {
    interval_ms: Option<u64>,
    max_ticks: Option<u64>,
}

pub async fn start_tracking(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Query(params): Query<TrackingParams>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let title = {
        let store = state.session.read().await;
        let campaign = store.campaign(&title)?;
        if campaign.status == CampaignStatus::Completed {
            return Err(HubError::InvalidTransition {
                campaign: campaign.title.clone(),
                from: campaign.status,
                action: "track",
            }
            .into());
        }
        campaign.title.clone()
    };

    let mut config = state.tracker_config.clone();
    if let Some(ms) = params.interval_ms.filter(|ms| *ms > 0) {
        config.interval = Duration::from_millis(ms);
    }
    config.max_ticks = params.max_ticks;

    let body = json!({
        "campaign": title,
        "interval_ms": config.interval.as_millis() as u64,
        "max_ticks": config.max_ticks,
    });
    state
        .trackers
        .start(state.session.clone(), &title, config)
        .await;

    Ok((StatusCode::ACCEPTED, Json(body)))
}

pub async fn stop_tracking(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> ApiResult<Json<Value>> {
    if !state.trackers.stop(&title).await {
        return Err(tracker_not_found(&title).into());
    }
    Ok(Json(json!({ "campaign": title, "stopped": true })))
}

pub async fn stream_tracking(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let rx = state
        .trackers
        .subscribe(&title)
        .await
        .ok_or_else(|| tracker_not_found(&title))?;

    log::info!("Streaming locations for '{}'", title);

    // Lagged receivers skip missed snapshots rather than ending the stream
    let stream = BroadcastStream::new(rx)
        .filter_map(|msg| msg.ok())
        .filter_map(|snapshot| {
            Event::default()
                .event("location")
                .json_data(&snapshot)
                .ok()
        })
        .map(Ok::<Event, Infallible>);

    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(1))))
}

fn tracker_not_found(title: &str) -> HubError {
    HubError::NotFound {
        entity: "Tracker",
        key: title.to_string(),
    }
}

// ── Rider ──

pub async fn rider_login(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<RiderProfile>> {
    Ok(Json(rider(&state).login(&name).await?))
}

pub async fn pending_campaigns(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Vec<CampaignCard>>> {
    Ok(Json(rider(&state).pending_campaigns(&name).await?))
}

pub async fn active_campaign(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Option<CampaignCard>>> {
    Ok(Json(rider(&state).active_campaign(&name).await?))
}

pub async fn accept_campaign(
    State(state): State<AppState>,
    Path((name, title)): Path<(String, String)>,
) -> ApiResult<Json<CampaignCard>> {
    Ok(Json(rider(&state).accept(&name, &title).await?))
}

pub async fn complete_campaign(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<CampaignCard>> {
    let card = rider(&state).complete(&name).await?;
    state.trackers.stop(&card.title).await;
    Ok(Json(card))
}

pub async fn share_location(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<RiderPoint>> {
    Ok(Json(rider(&state).share_location(&name).await?))
}

#[derive(Debug, Deserialize)]
pub struct LocationForm {
    lat: CoordinateField,
    lon: CoordinateField,
}

pub async fn update_location(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<LocationForm>, JsonRejection>,
) -> ApiResult<Json<RiderProfile>> {
    let Json(form) = payload?;
    let profile = rider(&state)
        .update_location(&name, &form.lat.as_text(), &form.lon.as_text())
        .await?;
    Ok(Json(profile))
}
