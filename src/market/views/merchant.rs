// SPDX-License-Identifier: MIT

//! Merchant dashboard: launch campaigns, invite riders, watch the map

use serde::{Deserialize, Serialize};

use super::projection::{CampaignCard, CampaignMap, RiderCard, RiderPoint};
use crate::hub::model::{CampaignDuration, ImageRef, NewCampaign, DEFAULT_BUDGET};
use crate::hub::{InviteOutcome, Result, Session};
use crate::market::seed::{CityTable, LocationInput};

/// The campaign form as submitted by a merchant
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CampaignForm {
    pub title: String,
    pub description: String,
    pub budget: Option<u32>,
    pub duration: Option<CampaignDuration>,
    pub location: Option<LocationInput>,
    pub image: Option<String>,
}

impl CampaignForm {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            budget: None,
            duration: None,
            location: None,
            image: None,
        }
    }

    fn into_new_campaign(self, cities: &CityTable) -> Result<NewCampaign> {
        let location = self
            .location
            .as_ref()
            .map(|input| input.resolve(cities))
            .transpose()?;

        Ok(NewCampaign {
            title: self.title,
            description: self.description,
            budget: self.budget.unwrap_or(DEFAULT_BUDGET),
            duration: self.duration.unwrap_or_default(),
            location,
            image: self.image.map(ImageRef),
        })
    }
}

/// Stateless merchant view over a session
pub struct MerchantView<'a> {
    session: &'a Session,
    cities: &'a CityTable,
}

impl<'a> MerchantView<'a> {
    pub fn new(session: &'a Session, cities: &'a CityTable) -> Self {
        Self { session, cities }
    }

    /// "Launch Campaign"
    pub async fn create_campaign(&self, form: CampaignForm) -> Result<CampaignCard> {
        let new_campaign = form.into_new_campaign(self.cities)?;
        let mut store = self.session.write().await;
        let campaign = store.create_campaign(new_campaign)?.clone();
        Ok(CampaignCard::build(&store, &campaign))
    }

    /// Riders that can be invited right now
    pub async fn available_riders(&self) -> Vec<RiderCard> {
        let store = self.session.read().await;
        store
            .available_riders()
            .into_iter()
            .map(RiderCard::from_rider)
            .collect()
    }

    /// Every campaign in creation order
    pub async fn campaigns(&self) -> Vec<CampaignCard> {
        let store = self.session.read().await;
        store
            .campaigns()
            .iter()
            .map(|c| CampaignCard::build(&store, c))
            .collect()
    }

    /// "Invite Riders"
    pub async fn invite(&self, title: &str) -> Result<InviteOutcome> {
        self.session.invite_riders(title).await
    }

    /// "Show Map": where the riders carrying this campaign are
    pub async fn campaign_map(&self, title: &str) -> Result<CampaignMap> {
        let store = self.session.read().await;
        let campaign = store.campaign(title)?;
        let points = store
            .riders_on_campaign(title)?
            .into_iter()
            .map(RiderPoint::from_rider)
            .collect();

        Ok(CampaignMap {
            campaign: campaign.title.clone(),
            status: campaign.status,
            points,
        })
    }
}
