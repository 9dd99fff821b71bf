// SPDX-License-Identifier: MIT

//! Rider types: the delivery agents carrying the ads

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::campaign::CampaignId;
use super::geo::Coordinates;

/// Stable identifier for a rider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiderId(pub Uuid);

impl RiderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RiderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RiderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rider {
    pub id: RiderId,
    pub name: String,
    pub city: String,
    pub available: bool,
    pub location: Coordinates,
    pub active_campaign: Option<CampaignId>,
}

impl Rider {
    pub fn new(name: impl Into<String>, city: impl Into<String>, location: Coordinates) -> Self {
        Self {
            id: RiderId::new(),
            name: name.into(),
            city: city.into(),
            available: true,
            location,
            active_campaign: None,
        }
    }

    /// Case-insensitive name match, as used by rider login
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Attach to a campaign; an engaged rider is never available
    pub(crate) fn engage(&mut self, campaign: CampaignId) {
        self.active_campaign = Some(campaign);
        self.available = false;
    }

    /// Detach from any campaign and become available again
    pub(crate) fn release(&mut self) {
        self.active_campaign = None;
        self.available = true;
    }
}
