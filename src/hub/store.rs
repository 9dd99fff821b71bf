// SPDX-License-Identifier: MIT

//! In-memory campaign/rider state with its transition rules
//!
//! Every transition validates first and mutates second, so a failed call
//! leaves the store exactly as it was.

use chrono::Utc;
use serde::Serialize;

use super::error::{HubError, Result};
use super::model::{
    Campaign, CampaignId, CampaignStatus, NewCampaign, Rider, RiderId, MAX_BUDGET, MIN_BUDGET,
};

/// Result of inviting riders to a campaign
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InviteOutcome {
    pub campaign: String,
    /// Names of riders newly assigned by this call
    pub invited: Vec<String>,
    pub status: CampaignStatus,
}

/// Canonical state for one session
#[derive(Debug, Clone, Default)]
pub struct CampaignStore {
    campaigns: Vec<Campaign>,
    riders: Vec<Rider>,
}

impl CampaignStore {
    /// Create a store seeded with the given roster
    pub fn new(riders: Vec<Rider>) -> Self {
        Self {
            campaigns: Vec::new(),
            riders,
        }
    }

    /// Create a store with no riders and no campaigns
    pub fn empty() -> Self {
        Self::default()
    }

    /// All campaigns in creation order
    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    /// The full roster in seed order
    pub fn riders(&self) -> &[Rider] {
        &self.riders
    }

    /// Look up a rider by name (case-insensitive)
    pub fn rider(&self, name: &str) -> Result<&Rider> {
        self.rider_index(name).map(|idx| &self.riders[idx])
    }

    /// Look up a campaign by title (case-insensitive)
    pub fn campaign(&self, title: &str) -> Result<&Campaign> {
        self.campaign_index(title).map(|idx| &self.campaigns[idx])
    }

    pub fn rider_by_id(&self, id: RiderId) -> Option<&Rider> {
        self.riders.iter().find(|r| r.id == id)
    }

    pub fn campaign_by_id(&self, id: CampaignId) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    /// Names of the riders assigned to a campaign, in invitation order
    pub fn assigned_names(&self, campaign: &Campaign) -> Vec<String> {
        campaign
            .assigned_riders
            .iter()
            .filter_map(|id| self.rider_by_id(*id))
            .map(|r| r.name.clone())
            .collect()
    }

    /// Append a new campaign in `Waiting` state
    pub fn create_campaign(&mut self, form: NewCampaign) -> Result<&Campaign> {
        let title = form.title.trim();
        let description = form.description.trim();

        if title.is_empty() || description.is_empty() {
            return Err(HubError::validation(
                "Please enter both title and description.",
            ));
        }
        if !(MIN_BUDGET..=MAX_BUDGET).contains(&form.budget) {
            return Err(HubError::validation(format!(
                "Budget must be between {} and {}, got {}",
                MIN_BUDGET, MAX_BUDGET, form.budget
            )));
        }
        if self.campaign_index(title).is_ok() {
            return Err(HubError::Conflict(format!(
                "Campaign '{}' already exists",
                title
            )));
        }

        let campaign = Campaign {
            id: CampaignId::new(),
            title: title.to_string(),
            description: description.to_string(),
            budget: form.budget,
            duration: form.duration,
            image: form.image,
            status: CampaignStatus::Waiting,
            assigned_riders: Vec::new(),
            accepted_by: None,
            location: form.location,
            created_at: Utc::now(),
        };
        log::info!("Campaign '{}' launched ({})", campaign.title, campaign.id);

        self.campaigns.push(campaign);
        Ok(&self.campaigns[self.campaigns.len() - 1])
    }

    /// Assign every available rider to the campaign
    ///
    /// Riders that are unavailable or already assigned are left alone, so
    /// calling this again only picks up riders who became available since.
    pub fn invite_riders(&mut self, title: &str) -> Result<InviteOutcome> {
        let c_idx = self.campaign_index(title)?;
        let campaign = &self.campaigns[c_idx];

        if !campaign.status.is_open() {
            return Err(HubError::InvalidTransition {
                campaign: campaign.title.clone(),
                from: campaign.status,
                action: "invite riders for",
            });
        }

        let candidates: Vec<usize> = self
            .riders
            .iter()
            .enumerate()
            .filter(|(_, r)| r.available && !campaign.is_assigned(r.id))
            .map(|(idx, _)| idx)
            .collect();
        for &r_idx in &candidates {
            self.verify_rider_link(r_idx)?;
        }

        let campaign_id = self.campaigns[c_idx].id;
        let mut invited = Vec::with_capacity(candidates.len());
        for r_idx in candidates {
            let rider = &mut self.riders[r_idx];
            rider.engage(campaign_id);
            self.campaigns[c_idx].assigned_riders.push(rider.id);
            invited.push(rider.name.clone());
        }

        let campaign = &mut self.campaigns[c_idx];
        campaign.status = CampaignStatus::InvitesSent;

        if invited.is_empty() {
            log::warn!("No riders available to invite for '{}'", campaign.title);
        } else {
            log::info!(
                "Invites sent for '{}' to {}",
                campaign.title,
                invited.join(", ")
            );
        }

        Ok(InviteOutcome {
            campaign: campaign.title.clone(),
            invited,
            status: campaign.status,
        })
    }

    /// A rider takes on a campaign they were invited to
    pub fn accept_campaign(&mut self, rider_name: &str, title: &str) -> Result<&Campaign> {
        let r_idx = self.rider_index(rider_name)?;
        let c_idx = self.campaign_index(title)?;
        self.verify_rider_link(r_idx)?;

        let rider = &self.riders[r_idx];
        let campaign = &self.campaigns[c_idx];

        if !campaign.is_assigned(rider.id) {
            return Err(HubError::NotAssigned {
                rider: rider.name.clone(),
                campaign: campaign.title.clone(),
            });
        }
        if !campaign.status.is_open() {
            return Err(HubError::InvalidTransition {
                campaign: campaign.title.clone(),
                from: campaign.status,
                action: "accept",
            });
        }
        if let Some(other) = rider.active_campaign.filter(|id| *id != campaign.id) {
            let other_title = self
                .campaign_by_id(other)
                .map(|c| c.title.clone())
                .unwrap_or_default();
            return Err(HubError::Conflict(format!(
                "Rider '{}' is already engaged on '{}'",
                rider.name, other_title
            )));
        }

        let campaign_id = campaign.id;
        let rider_id = rider.id;
        self.riders[r_idx].engage(campaign_id);

        let campaign = &mut self.campaigns[c_idx];
        campaign.status = CampaignStatus::AcceptedByRider;
        campaign.accepted_by = Some(rider_id);
        log::info!(
            "Rider '{}' accepted '{}'",
            self.riders[r_idx].name,
            campaign.title
        );

        Ok(&self.campaigns[c_idx])
    }

    /// The accepting rider finishes the campaign and becomes available
    ///
    /// Any other rider still holding this campaign as active is released too.
    pub fn complete_campaign(&mut self, title: &str, rider_name: &str) -> Result<&Campaign> {
        let c_idx = self.campaign_index(title)?;
        let r_idx = self.rider_index(rider_name)?;
        self.verify_rider_link(r_idx)?;

        let rider = &self.riders[r_idx];
        let campaign = &self.campaigns[c_idx];

        if campaign.status != CampaignStatus::AcceptedByRider {
            return Err(HubError::InvalidTransition {
                campaign: campaign.title.clone(),
                from: campaign.status,
                action: "complete",
            });
        }
        if campaign.accepted_by != Some(rider.id) {
            return Err(HubError::NotAssigned {
                rider: rider.name.clone(),
                campaign: campaign.title.clone(),
            });
        }

        let campaign_id = campaign.id;
        self.campaigns[c_idx].status = CampaignStatus::Completed;

        for rider in self
            .riders
            .iter_mut()
            .filter(|r| r.active_campaign == Some(campaign_id))
        {
            rider.release();
            log::debug!("Released rider '{}'", rider.name);
        }
        log::info!(
            "Campaign '{}' completed by '{}'",
            self.campaigns[c_idx].title,
            self.riders[r_idx].name
        );

        Ok(&self.campaigns[c_idx])
    }

    /// Overwrite a rider's coordinates
    pub fn update_rider_location(&mut self, name: &str, lat: f64, lon: f64) -> Result<&Rider> {
        let idx = self.rider_index(name)?;
        let rider = &mut self.riders[idx];
        rider.location.lat = lat;
        rider.location.lon = lon;
        log::debug!("Rider '{}' moved to ({}, {})", rider.name, lat, lon);
        Ok(&self.riders[idx])
    }

    /// Shift a rider's coordinates by a small delta
    pub fn nudge_rider(&mut self, name: &str, dlat: f64, dlon: f64) -> Result<&Rider> {
        let idx = self.rider_index(name)?;
        let rider = &mut self.riders[idx];
        rider.location = rider.location.offset(dlat, dlon);
        Ok(&self.riders[idx])
    }

    pub fn available_riders(&self) -> Vec<&Rider> {
        self.riders.iter().filter(|r| r.available).collect()
    }

    /// Open campaigns the rider has been invited to
    pub fn campaigns_for_rider(&self, name: &str) -> Result<Vec<&Campaign>> {
        let rider = self.rider(name)?;
        Ok(self
            .campaigns
            .iter()
            .filter(|c| c.is_assigned(rider.id) && c.status.is_open())
            .collect())
    }

    /// The campaign the rider is currently engaged on, if any
    pub fn active_campaign(&self, name: &str) -> Result<Option<&Campaign>> {
        let rider = self.rider(name)?;
        Ok(rider.active_campaign.and_then(|id| self.campaign_by_id(id)))
    }

    /// Riders whose active campaign is the given one
    pub fn riders_on_campaign(&self, title: &str) -> Result<Vec<&Rider>> {
        let campaign = self.campaign(title)?;
        Ok(self
            .riders
            .iter()
            .filter(|r| r.active_campaign == Some(campaign.id))
            .collect())
    }

    /// Check the rider/campaign cross references for the whole store
    pub fn check_integrity(&self) -> Result<()> {
        for idx in 0..self.riders.len() {
            self.verify_rider_link(idx)?;
        }
        for campaign in &self.campaigns {
            if let Some(id) = campaign.accepted_by {
                if !campaign.is_assigned(id) {
                    return Err(HubError::integrity(format!(
                        "campaign '{}' was accepted by a rider it never invited",
                        campaign.title
                    )));
                }
            }
        }
        Ok(())
    }

    fn verify_rider_link(&self, idx: usize) -> Result<()> {
        let rider = &self.riders[idx];
        let Some(campaign_id) = rider.active_campaign else {
            return Ok(());
        };

        let campaign = self.campaign_by_id(campaign_id).ok_or_else(|| {
            HubError::integrity(format!(
                "rider '{}' points at unknown campaign {}",
                rider.name, campaign_id
            ))
        })?;
        if !campaign.is_assigned(rider.id) {
            return Err(HubError::integrity(format!(
                "rider '{}' is active on '{}' without being assigned",
                rider.name, campaign.title
            )));
        }
        if rider.available {
            return Err(HubError::integrity(format!(
                "rider '{}' is marked available while active on '{}'",
                rider.name, campaign.title
            )));
        }
        Ok(())
    }

    fn rider_index(&self, name: &str) -> Result<usize> {
        self.riders
            .iter()
            .position(|r| r.matches(name))
            .ok_or_else(|| HubError::rider_not_found(name))
    }

    fn campaign_index(&self, title: &str) -> Result<usize> {
        let title = title.trim();
        self.campaigns
            .iter()
            .position(|c| c.title.eq_ignore_ascii_case(title))
            .ok_or_else(|| HubError::campaign_not_found(title))
    }
}
