// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use super::tracker::{LiveTracker, LocationSnapshot, TrackerConfig, TrackingHandle};
use crate::hub::Session;

/// At most one running tracker per campaign
#[derive(Clone, Default)]
pub struct TrackerRegistry {
    trackers: Arc<RwLock<HashMap<String, TrackingHandle>>>,
}

impl TrackerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking, replacing (and stopping) any tracker already running
    pub async fn start(&self, session: Session, campaign: &str, config: TrackerConfig) {
        let handle = LiveTracker::start(session, campaign, config);
        let mut trackers = self.trackers.write().await;
        prune(&mut trackers);
        if let Some(previous) = trackers.insert(key(campaign), handle) {
            log::debug!("Replacing tracker for '{}'", previous.campaign());
            previous.stop();
        }
    }

    /// Stop the tracker for `campaign`; false if none is running
    pub async fn stop(&self, campaign: &str) -> bool {
        let mut trackers = self.trackers.write().await;
        prune(&mut trackers);
        match trackers.remove(&key(campaign)) {
            Some(handle) => {
                handle.stop();
                true
            }
            None => false,
        }
    }

    /// Subscribe to a running tracker's snapshots
    ///
    /// The receiver reports `Closed` once the tracker ends for any reason.
    pub async fn subscribe(&self, campaign: &str) -> Option<broadcast::Receiver<LocationSnapshot>> {
        let mut trackers = self.trackers.write().await;
        prune(&mut trackers);
        trackers.get(&key(campaign)).map(|h| h.subscribe())
    }

    pub async fn is_running(&self, campaign: &str) -> bool {
        let trackers = self.trackers.read().await;
        trackers
            .get(&key(campaign))
            .is_some_and(|h| !h.is_finished())
    }

    /// Stop every tracker, used on shutdown
    pub async fn stop_all(&self) {
        let mut trackers = self.trackers.write().await;
        for (_, handle) in trackers.drain() {
            handle.stop();
        }
    }
}

fn key(campaign: &str) -> String {
    campaign.trim().to_lowercase()
}

/// Drop trackers whose task has already ended
fn prune(trackers: &mut HashMap<String, TrackingHandle>) {
    trackers.retain(|_, handle| {
        if handle.is_finished() {
            log::debug!("Tracker for '{}' already ended", handle.campaign());
            return false;
        }
        true
    });
}
