// SPDX-License-Identifier: MIT

//! Campaign-rider state store
//!
//! This module provides:
//! - `CampaignStore` - canonical in-memory state and its transitions
//! - `Session` - the store shared behind an async lock
//! - `HubError` - the error taxonomy for every transition

pub mod error;
pub mod model;
mod session;
mod store;

pub use error::{HubError, Result};
pub use session::Session;
pub use store::{CampaignStore, InviteOutcome};
