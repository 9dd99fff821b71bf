// SPDX-License-Identifier: MIT

//! Serializable read models handed to the presentation layer

use serde::Serialize;

use crate::hub::model::{Campaign, CampaignDuration, CampaignStatus, Coordinates, Rider};
use crate::hub::CampaignStore;

/// A rider as listed on the merchant dashboard
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RiderCard {
    pub name: String,
    pub city: String,
    pub available: bool,
}

impl RiderCard {
    pub fn from_rider(rider: &Rider) -> Self {
        Self {
            name: rider.name.clone(),
            city: rider.city.clone(),
            available: rider.available,
        }
    }
}

/// A logged-in rider's own profile
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RiderProfile {
    pub name: String,
    pub city: String,
    pub available: bool,
    pub location: Coordinates,
    pub active_campaign: Option<String>,
    pub greeting: String,
}

impl RiderProfile {
    pub fn build(store: &CampaignStore, rider: &Rider) -> Self {
        Self {
            name: rider.name.clone(),
            city: rider.city.clone(),
            available: rider.available,
            location: rider.location,
            active_campaign: rider
                .active_campaign
                .and_then(|id| store.campaign_by_id(id))
                .map(|c| c.title.clone()),
            greeting: format!("Welcome back, {} from {}", rider.name, rider.city),
        }
    }
}

/// A campaign with rider references resolved to names
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CampaignCard {
    pub title: String,
    pub description: String,
    pub budget: u32,
    pub duration: CampaignDuration,
    pub status: CampaignStatus,
    pub created: String,
    pub image: Option<String>,
    pub location: Option<Coordinates>,
    pub assigned_riders: Vec<String>,
    pub accepted_by: Option<String>,
}

impl CampaignCard {
    pub fn build(store: &CampaignStore, campaign: &Campaign) -> Self {
        Self {
            title: campaign.title.clone(),
            description: campaign.description.clone(),
            budget: campaign.budget,
            duration: campaign.duration,
            status: campaign.status,
            created: campaign.created_display(),
            image: campaign.image.as_ref().map(|i| i.0.clone()),
            location: campaign.location,
            assigned_riders: store.assigned_names(campaign),
            accepted_by: campaign
                .accepted_by
                .and_then(|id| store.rider_by_id(id))
                .map(|r| r.name.clone()),
        }
    }
}

/// One marker on the tracking map
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RiderPoint {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl RiderPoint {
    pub fn from_rider(rider: &Rider) -> Self {
        Self {
            name: rider.name.clone(),
            lat: rider.location.lat,
            lon: rider.location.lon,
        }
    }
}

/// Points for every rider currently carrying a campaign
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CampaignMap {
    pub campaign: String,
    pub status: CampaignStatus,
    pub points: Vec<RiderPoint>,
}
