// SPDX-License-Identifier: MIT

//! Campaign types: the merchant side of the marketplace

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::geo::Coordinates;
use super::rider::RiderId;

/// Lowest budget a merchant can pick (rupees)
pub const MIN_BUDGET: u32 = 1_000;
/// Highest budget a merchant can pick (rupees)
pub const MAX_BUDGET: u32 = 100_000;
/// Budget used when the form leaves it unset
pub const DEFAULT_BUDGET: u32 = 5_000;

/// Stable identifier for a campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(pub Uuid);

impl CampaignId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CampaignId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where a campaign stands in its lifecycle
///
/// Variants are declared in lifecycle order so `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CampaignStatus {
    Waiting,
    #[serde(rename = "Invites Sent")]
    InvitesSent,
    #[serde(rename = "Accepted by Rider")]
    AcceptedByRider,
    Completed,
}

impl CampaignStatus {
    /// Riders can still accept an invitation
    pub fn is_open(self) -> bool {
        matches!(self, Self::Waiting | Self::InvitesSent)
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Waiting => "Waiting",
            Self::InvitesSent => "Invites Sent",
            Self::AcceptedByRider => "Accepted by Rider",
            Self::Completed => "Completed",
        };
        f.write_str(label)
    }
}

/// How long the campaign runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CampaignDuration {
    #[default]
    #[serde(rename = "1 Week")]
    OneWeek,
    #[serde(rename = "2 Weeks")]
    TwoWeeks,
    #[serde(rename = "1 Month")]
    OneMonth,
}

impl CampaignDuration {
    pub const ALL: [CampaignDuration; 3] = [Self::OneWeek, Self::TwoWeeks, Self::OneMonth];

    pub fn days(self) -> u32 {
        match self {
            Self::OneWeek => 7,
            Self::TwoWeeks => 14,
            Self::OneMonth => 30,
        }
    }
}

/// Opaque reference to an uploaded ad image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

/// A merchant-created advertising task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub title: String,
    pub description: String,
    pub budget: u32,
    pub duration: CampaignDuration,
    pub image: Option<ImageRef>,
    pub status: CampaignStatus,
    /// Riders invited to this campaign, in invitation order, without duplicates
    pub assigned_riders: Vec<RiderId>,
    /// The rider that accepted, once status reaches `AcceptedByRider`
    pub accepted_by: Option<RiderId>,
    pub location: Option<Coordinates>,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    pub fn is_assigned(&self, rider: RiderId) -> bool {
        self.assigned_riders.contains(&rider)
    }

    /// Display form of `created_at`, e.g. `05-Mar 14:30`
    pub fn created_display(&self) -> String {
        self.created_at.format("%d-%b %H:%M").to_string()
    }
}

/// Input for creating a campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCampaign {
    pub title: String,
    pub description: String,
    #[serde(default = "default_budget")]
    pub budget: u32,
    #[serde(default)]
    pub duration: CampaignDuration,
    #[serde(default)]
    pub location: Option<Coordinates>,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

fn default_budget() -> u32 {
    DEFAULT_BUDGET
}

impl NewCampaign {
    /// A campaign with default budget and duration
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            budget: DEFAULT_BUDGET,
            duration: CampaignDuration::default(),
            location: None,
            image: None,
        }
    }

    pub fn with_budget(mut self, budget: u32) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_duration(mut self, duration: CampaignDuration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_location(mut self, location: Coordinates) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(ImageRef(image.into()));
        self
    }
}
