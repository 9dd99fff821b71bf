// SPDX-License-Identifier: MIT

//! Static seed data: the rider roster and the city lookup table

mod loader;
mod types;

pub use loader::SeedLoader;
pub use types::{
    CitySeed, CityTable, CoordinateField, LocationInput, RiderSeed, SeedDefinition, DEFAULT_SEED,
};
