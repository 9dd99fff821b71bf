// SPDX-License-Identifier: MIT

//! Scripted walk through one campaign's lifecycle
//!
//! Drives both views against a fresh session and records what each
//! dashboard would show after every step.

use serde::Serialize;
use serde_json::Value;

use crate::hub::{Result, Session};
use crate::market::seed::SeedDefinition;
use crate::market::tracking::DEFAULT_JITTER;
use crate::market::views::{CampaignForm, MerchantView, RiderView};

/// One recorded step of the walkthrough
#[derive(Debug, Clone, Serialize)]
pub struct DemoStep {
    pub action: String,
    pub result: Value,
}

/// Run create → invite → accept → complete for `campaign`, accepted by `rider`
pub async fn run_scenario(
    seed: &SeedDefinition,
    campaign: &str,
    rider: &str,
) -> Result<Vec<DemoStep>> {
    let session = Session::new(seed.build_store());
    let cities = seed.city_table();
    let merchant_view = MerchantView::new(&session, &cities);
    let rider_view = RiderView::new(&session, DEFAULT_JITTER);

    let mut steps = Vec::new();
    let mut record = |action: String, result: Value| {
        log::info!("demo: {}", action);
        steps.push(DemoStep { action, result });
    };

    record(
        "available riders".to_string(),
        to_value(&merchant_view.available_riders().await),
    );

    let form = CampaignForm::new(campaign, "Hyperlocal promotion carried by riders");
    record(
        format!("merchant launches '{}'", campaign),
        to_value(&merchant_view.create_campaign(form).await?),
    );

    record(
        format!("merchant invites riders for '{}'", campaign),
        to_value(&merchant_view.invite(campaign).await?),
    );

    record(
        format!("{} checks pending campaigns", rider),
        to_value(&rider_view.pending_campaigns(rider).await?),
    );

    record(
        format!("{} accepts '{}'", rider, campaign),
        to_value(&rider_view.accept(rider, campaign).await?),
    );

    record(
        format!("{} shares live location", rider),
        to_value(&rider_view.share_location(rider).await?),
    );

    record(
        format!("merchant opens the map for '{}'", campaign),
        to_value(&merchant_view.campaign_map(campaign).await?),
    );

    record(
        format!("{} marks '{}' complete", rider, campaign),
        to_value(&rider_view.complete(rider).await?),
    );

    record(
        format!("{} profile", rider),
        to_value(&rider_view.login(rider).await?),
    );

    Ok(steps)
}

fn to_value<T: Serialize>(value: &T) -> Value {
    // Projections are plain structs; serialization cannot fail
    serde_json::to_value(value).unwrap_or(Value::Null)
}
