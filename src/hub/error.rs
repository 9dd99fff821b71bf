// SPDX-License-Identifier: MIT

//! Typed error handling for the campaign/rider hub
//!
//! Every transition on the store returns [`HubError`] on failure. None of
//! these are fatal: callers surface them as a user-visible message.

use thiserror::Error;

use super::model::CampaignStatus;

/// Top-level error type for marketing-hub
#[derive(Debug, Error)]
pub enum HubError {
    /// A required field was missing or out of range at creation time
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Rider name or campaign title not present in the session
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    /// Manual latitude/longitude entry that is not a number
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// A campaign title is already taken
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The campaign status does not allow this action
    #[error("Cannot {action} campaign '{campaign}' while it is {from}")]
    InvalidTransition {
        campaign: String,
        from: CampaignStatus,
        action: &'static str,
    },

    /// The rider is not (or no longer) attached to the campaign
    #[error("Rider '{rider}' is not assigned to campaign '{campaign}'")]
    NotAssigned { rider: String, campaign: String },

    /// Rider and campaign records disagree about each other
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// Seed or server configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, HubError>;

impl HubError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed(message.into())
    }

    /// Create a not-found error for a rider name
    pub fn rider_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Rider",
            key: name.into(),
        }
    }

    /// Create a not-found error for a campaign title
    pub fn campaign_not_found(title: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Campaign",
            key: title.into(),
        }
    }

    /// Create a not-found error for a city name
    pub fn city_not_found(city: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "City",
            key: city.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an integrity error
    pub fn integrity(message: impl Into<String>) -> Self {
        Self::Integrity(message.into())
    }

    /// Stable machine-readable code, used by the HTTP layer
    pub fn code(&self) -> &'static str {
        match self {
            Self::ValidationFailed(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidCoordinate(_) => "INVALID_COORDINATE",
            Self::Conflict(_) => "CONFLICT",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotAssigned { .. } => "NOT_ASSIGNED",
            Self::Integrity(_) => "INTEGRITY_ERROR",
            Self::Config(_) | Self::Io(_) | Self::Yaml(_) => "CONFIG_ERROR",
        }
    }
}
