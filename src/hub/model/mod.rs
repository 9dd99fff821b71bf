// SPDX-License-Identifier: MIT

//! Domain types for campaigns and riders

mod campaign;
mod geo;
mod rider;

pub use campaign::{
    Campaign, CampaignDuration, CampaignId, CampaignStatus, ImageRef, NewCampaign, DEFAULT_BUDGET,
    MAX_BUDGET, MIN_BUDGET,
};
pub use geo::Coordinates;
pub use rider::{Rider, RiderId};
