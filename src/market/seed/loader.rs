//! Seed loader - YAML file loading and validation

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::types::{SeedDefinition, DEFAULT_SEED};
use crate::hub::{HubError, Result};

/// Loads the rider roster and city table from YAML files
pub struct SeedLoader;

impl SeedLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load seed data from a YAML file
    pub fn load_seed<P: AsRef<Path>>(&self, path: P) -> Result<SeedDefinition> {
        let path = path.as_ref();
        log::info!("Loading seed data from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Load from `path` if given, otherwise use the built-in seed
    pub fn load_or_default<P: AsRef<Path>>(&self, path: Option<P>) -> Result<SeedDefinition> {
        match path {
            Some(path) => self.load_seed(path),
            None => Ok(DEFAULT_SEED.clone()),
        }
    }

    /// Parse seed data from a YAML string
    ///
    /// A missing section falls back to the built-in one.
    pub fn parse_yaml(content: &str) -> Result<SeedDefinition> {
        let mut def: SeedDefinition = serde_yaml::from_str(content)?;
        if def.riders.is_empty() {
            def.riders = DEFAULT_SEED.riders.clone();
        }
        if def.cities.is_empty() {
            def.cities = DEFAULT_SEED.cities.clone();
        }
        Self::validate(&def)?;
        Ok(def)
    }

    fn validate(def: &SeedDefinition) -> Result<()> {
        let mut seen = HashSet::new();
        for rider in &def.riders {
            let key = rider.name.trim().to_lowercase();
            if key.is_empty() {
                return Err(HubError::config("rider name must not be empty"));
            }
            if !seen.insert(key) {
                return Err(HubError::config(format!(
                    "duplicate rider name '{}'",
                    rider.name
                )));
            }
        }

        let mut seen = HashSet::new();
        for city in &def.cities {
            if !seen.insert(city.name.trim().to_lowercase()) {
                return Err(HubError::config(format!(
                    "duplicate city '{}'",
                    city.name
                )));
            }
        }
        Ok(())
    }
}

impl Default for SeedLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_seed() {
        let yaml = r#"
riders:
  - name: Meera
    city: Mumbai
    lat: 19.07
    lon: 72.87
  - name: Kabir
    city: Hyderabad
    available: false
    lat: 17.38
    lon: 78.48
cities:
  - name: Mumbai
    lat: 19.0760
    lon: 72.8777
"#;
        let def = SeedLoader::parse_yaml(yaml).unwrap();
        assert_eq!(def.riders.len(), 2);
        assert!(def.riders[0].available);
        assert!(!def.riders[1].available);
        assert_eq!(def.cities.len(), 1);

        let store = def.build_store();
        assert_eq!(store.available_riders().len(), 1);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let def = SeedLoader::parse_yaml("riders: []\n").unwrap();
        assert_eq!(def.riders.len(), 3);
        assert_eq!(def.cities.len(), 5);
    }

    #[test]
    fn test_duplicate_rider_rejected() {
        let yaml = r#"
riders:
  - name: Ravi
    city: Bangalore
    lat: 1.0
    lon: 2.0
  - name: RAVI
    city: Delhi
    lat: 3.0
    lon: 4.0
"#;
        let err = SeedLoader::parse_yaml(yaml).unwrap_err();
        assert!(matches!(err, HubError::Config(_)));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = SeedLoader::parse_yaml("riders: [name: ").unwrap_err();
        assert!(matches!(err, HubError::Yaml(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SeedLoader::new()
            .load_seed("/nonexistent/seed.yaml")
            .unwrap_err();
        assert!(matches!(err, HubError::Io(_)));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let def = SeedLoader::new().load_or_default(None::<&str>).unwrap();
        assert_eq!(def.riders[0].name, "Ravi");
    }
}
