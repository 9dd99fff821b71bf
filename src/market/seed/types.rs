// SPDX-License-Identifier: MIT

//! YAML schema types for seed data
//!
//! A seed file holds the rider roster and the city lookup table:
//!
//! ```yaml
//! riders:
//!   - name: Ravi
//!     city: Bangalore
//!     lat: 12.97
//!     lon: 77.59
//! cities:
//!   - name: Bangalore
//!     lat: 12.9716
//!     lon: 77.5946
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::hub::model::{Coordinates, Rider};
use crate::hub::{CampaignStore, HubError, Result};

/// Built-in roster and cities used when no seed file is given
pub static DEFAULT_SEED: Lazy<SeedDefinition> = Lazy::new(|| SeedDefinition {
    riders: vec![
        RiderSeed::new("Ravi", "Bangalore", true, 12.97, 77.59),
        RiderSeed::new("Ankit", "Delhi", true, 28.61, 77.21),
        RiderSeed::new("Zara", "Pune", false, 18.52, 73.85),
    ],
    cities: vec![
        CitySeed::new("Bangalore", 12.9716, 77.5946),
        CitySeed::new("Delhi", 28.6139, 77.2090),
        CitySeed::new("Mumbai", 19.0760, 72.8777),
        CitySeed::new("Pune", 18.5204, 73.8567),
        CitySeed::new("Hyderabad", 17.3850, 78.4867),
    ],
});

/// Top-level seed definition
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SeedDefinition {
    #[serde(default)]
    pub riders: Vec<RiderSeed>,
    #[serde(default)]
    pub cities: Vec<CitySeed>,
}

/// One roster entry
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RiderSeed {
    pub name: String,
    pub city: String,
    #[serde(default = "default_available")]
    pub available: bool,
    pub lat: f64,
    pub lon: f64,
}

fn default_available() -> bool {
    true
}

impl RiderSeed {
    pub fn new(name: &str, city: &str, available: bool, lat: f64, lon: f64) -> Self {
        Self {
            name: name.to_string(),
            city: city.to_string(),
            available,
            lat,
            lon,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CitySeed {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl CitySeed {
    pub fn new(name: &str, lat: f64, lon: f64) -> Self {
        Self {
            name: name.to_string(),
            lat,
            lon,
        }
    }
}

impl SeedDefinition {
    /// Build a fresh store holding this roster
    pub fn build_store(&self) -> CampaignStore {
        let riders = self
            .riders
            .iter()
            .map(|seed| {
                let mut rider = Rider::new(
                    seed.name.clone(),
                    seed.city.clone(),
                    Coordinates::new(seed.lat, seed.lon),
                );
                rider.available = seed.available;
                rider
            })
            .collect();
        CampaignStore::new(riders)
    }

    pub fn city_table(&self) -> CityTable {
        CityTable {
            cities: self
                .cities
                .iter()
                .map(|c| (c.name.clone(), Coordinates::new(c.lat, c.lon)))
                .collect(),
        }
    }
}

/// Fixed city name to coordinate lookup
#[derive(Debug, Clone, Default)]
pub struct CityTable {
    cities: Vec<(String, Coordinates)>,
}

impl CityTable {
    /// Case-insensitive lookup
    pub fn lookup(&self, city: &str) -> Result<Coordinates> {
        let city = city.trim();
        self.cities
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(city))
            .map(|(_, coords)| *coords)
            .ok_or_else(|| HubError::city_not_found(city))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cities.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Coordinates)> {
        self.cities.iter().map(|(name, c)| (name.as_str(), *c))
    }
}

/// A coordinate typed into a form: sent as JSON number or text
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum CoordinateField {
    Number(f64),
    Text(String),
}

impl CoordinateField {
    pub fn as_text(&self) -> String {
        match self {
            CoordinateField::Number(n) => n.to_string(),
            CoordinateField::Text(s) => s.clone(),
        }
    }
}

/// Campaign location as entered on the form: a known city or a lat/lon pair
///
/// Each coordinate may be a number or text; text is parsed on resolve.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum LocationInput {
    City {
        city: String,
    },
    Point {
        lat: CoordinateField,
        lon: CoordinateField,
    },
}

impl LocationInput {
    pub fn resolve(&self, cities: &CityTable) -> Result<Coordinates> {
        match self {
            LocationInput::City { city } => cities.lookup(city),
            LocationInput::Point { lat, lon } => Coordinates::parse(&lat.as_text(), &lon.as_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_seed_roster() {
        let store = DEFAULT_SEED.build_store();
        let names: Vec<&str> = store.riders().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ravi", "Ankit", "Zara"]);
        assert!(store.rider("Ravi").unwrap().available);
        assert!(!store.rider("Zara").unwrap().available);
        assert_eq!(store.available_riders().len(), 2);
    }

    #[test]
    fn test_default_city_table() {
        let cities = DEFAULT_SEED.city_table();
        assert_eq!(cities.names().count(), 5);
        assert_eq!(
            cities.lookup("pune").unwrap(),
            Coordinates::new(18.5204, 73.8567)
        );
        assert!(matches!(
            cities.lookup("Chennai").unwrap_err(),
            HubError::NotFound { entity: "City", .. }
        ));
    }

    #[test]
    fn test_location_input_variants() {
        let cities = DEFAULT_SEED.city_table();

        let city: LocationInput = serde_json::from_value(json!({"city": "Delhi"})).unwrap();
        assert_eq!(
            city.resolve(&cities).unwrap(),
            Coordinates::new(28.6139, 77.2090)
        );

        let point: LocationInput = serde_json::from_value(json!({"lat": 1.5, "lon": 2.5})).unwrap();
        assert_eq!(point.resolve(&cities).unwrap(), Coordinates::new(1.5, 2.5));

        let manual: LocationInput =
            serde_json::from_value(json!({"lat": "12.5", "lon": "abc"})).unwrap();
        assert!(matches!(
            manual.resolve(&cities).unwrap_err(),
            HubError::InvalidCoordinate(_)
        ));

        let mixed: LocationInput =
            serde_json::from_value(json!({"lat": 12.0, "lon": "abc"})).unwrap();
        assert!(matches!(
            mixed.resolve(&cities).unwrap_err(),
            HubError::InvalidCoordinate(_)
        ));

        let mixed: LocationInput =
            serde_json::from_value(json!({"lat": "12.5", "lon": 77.25})).unwrap();
        assert_eq!(mixed.resolve(&cities).unwrap(), Coordinates::new(12.5, 77.25));
    }
}
