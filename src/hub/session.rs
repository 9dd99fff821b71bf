// SPDX-License-Identifier: MIT

use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::error::Result;
use super::model::{Campaign, NewCampaign, Rider};
use super::store::{CampaignStore, InviteOutcome};

/// Shared handle to one session's store
///
/// Cloning is cheap and every clone sees the same state. Each transition
/// method holds the write lock for exactly one store call.
#[derive(Clone, Default)]
pub struct Session {
    store: Arc<RwLock<CampaignStore>>,
}

impl Session {
    pub fn new(store: CampaignStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, CampaignStore> {
        self.store.read().await
    }

    /// Direct mutable access for in-crate views and the tracker
    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, CampaignStore> {
        self.store.write().await
    }

    pub async fn create_campaign(&self, form: NewCampaign) -> Result<Campaign> {
        let mut store = self.store.write().await;
        store.create_campaign(form).cloned()
    }

    pub async fn invite_riders(&self, title: &str) -> Result<InviteOutcome> {
        let mut store = self.store.write().await;
        store.invite_riders(title)
    }

    pub async fn accept_campaign(&self, rider: &str, title: &str) -> Result<Campaign> {
        let mut store = self.store.write().await;
        store.accept_campaign(rider, title).cloned()
    }

    pub async fn complete_campaign(&self, title: &str, rider: &str) -> Result<Campaign> {
        let mut store = self.store.write().await;
        store.complete_campaign(title, rider).cloned()
    }

    pub async fn update_rider_location(&self, rider: &str, lat: f64, lon: f64) -> Result<Rider> {
        let mut store = self.store.write().await;
        store.update_rider_location(rider, lat, lon).cloned()
    }

    pub async fn available_riders(&self) -> Vec<Rider> {
        let store = self.store.read().await;
        store.available_riders().into_iter().cloned().collect()
    }

    pub async fn campaigns_for_rider(&self, rider: &str) -> Result<Vec<Campaign>> {
        let store = self.store.read().await;
        Ok(store
            .campaigns_for_rider(rider)?
            .into_iter()
            .cloned()
            .collect())
    }
}
