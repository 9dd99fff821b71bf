// SPDX-License-Identifier: MIT

//! Presentation surfaces over the shared session
//!
//! Both views are stateless: they read the store, project it into
//! serializable cards, and run a single transition per user action.

mod merchant;
mod projection;
mod rider;

pub use merchant::{CampaignForm, MerchantView};
pub use projection::{CampaignCard, CampaignMap, RiderCard, RiderPoint, RiderProfile};
pub use rider::RiderView;
