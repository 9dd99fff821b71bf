// SPDX-License-Identifier: MIT

//! Coordinates shared by riders, campaigns and the map projection

use serde::{Deserialize, Serialize};

use crate::hub::error::{HubError, Result};

/// A latitude/longitude pair in decimal degrees
///
/// No range validation: values are stored exactly as entered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Parse manual text entry into coordinates
    pub fn parse(lat: &str, lon: &str) -> Result<Self> {
        Ok(Self {
            lat: parse_component("latitude", lat)?,
            lon: parse_component("longitude", lon)?,
        })
    }

    /// Shift by the given deltas
    pub fn offset(self, dlat: f64, dlon: f64) -> Self {
        Self {
            lat: self.lat + dlat,
            lon: self.lon + dlon,
        }
    }
}

fn parse_component(label: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| HubError::InvalidCoordinate(format!("{} '{}' is not a number", label, raw)))?;

    // "NaN" and "inf" parse as f64 but are not usable positions
    if !value.is_finite() {
        return Err(HubError::InvalidCoordinate(format!(
            "{} '{}' is not a finite number",
            label, raw
        )));
    }
    Ok(value)
}
